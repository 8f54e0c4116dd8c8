//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories) abstract the PostgreSQL store; driving ports
//! (queries and commands) are the use-case surface the HTTP adapter calls.
//! Every port ships a `Fixture*` no-op implementation for wiring tests and
//! a mockall mock in test builds.

mod match_query;
mod profile_repository;
mod reviews;
mod skill_catalogue_repository;
mod skill_link_repository;
mod swap_command;
mod swap_query;
mod swap_repository;

pub use match_query::{DEFAULT_MATCH_LIMIT, FindMatchesRequest, FixtureMatchQuery, MatchQuery};
#[cfg(test)]
pub use match_query::MockMatchQuery;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError, ProfileUpdate,
};
#[cfg(test)]
pub use reviews::{MockReviewCommand, MockReviewRepository};
pub use reviews::{
    CreateReviewRequest, FixtureReviewCommand, FixtureReviewRepository, ReviewCommand,
    ReviewRepository, ReviewRepositoryError,
};
#[cfg(test)]
pub use skill_catalogue_repository::MockSkillCatalogueRepository;
pub use skill_catalogue_repository::{
    FixtureSkillCatalogueRepository, SkillCatalogueRepository, SkillCatalogueRepositoryError,
};
#[cfg(test)]
pub use skill_link_repository::MockSkillLinkRepository;
pub use skill_link_repository::{
    FixtureSkillLinkRepository, OfferedEdge, SkillLinkRepository, SkillLinkRepositoryError,
};
#[cfg(test)]
pub use swap_command::MockSwapCommand;
pub use swap_command::{CreateSwapRequest, FixtureSwapCommand, SwapCommand, TransitionSwapRequest};
#[cfg(test)]
pub use swap_query::MockSwapQuery;
pub use swap_query::{FixtureSwapQuery, SwapQuery, SwapView};
#[cfg(test)]
pub use swap_repository::MockSwapRepository;
pub use swap_repository::{FixtureSwapRepository, SwapRepository, SwapRepositoryError};
