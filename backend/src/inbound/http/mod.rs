//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod matches;
pub mod profiles;
pub mod reviews;
pub mod skills;
pub mod state;
pub mod swaps;
pub mod validation;

pub use crate::domain::ApiResult;
