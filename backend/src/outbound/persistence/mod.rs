//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are thin: Diesel row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay internal, every row is converted through
//! the validated domain constructors, and database errors are mapped to the
//! typed repository errors declared next to each port.

pub(crate) mod diesel_helpers;
mod diesel_profile_repository;
mod diesel_review_repository;
mod diesel_skill_catalogue_repository;
mod diesel_skill_link_repository;
mod diesel_swap_repository;
mod models;
mod pool;
mod schema;

pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_skill_catalogue_repository::DieselSkillCatalogueRepository;
pub use diesel_skill_link_repository::DieselSkillLinkRepository;
pub use diesel_swap_repository::DieselSwapRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
