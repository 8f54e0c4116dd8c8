//! Port for profile persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Availability, DisplayName, Profile, ProfileId};

/// Persistence errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileRepositoryError {
    /// Repository connection could not be established.
    #[error("profile repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query { message: String },
}

impl ProfileRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Validated field bundle for updating a profile's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: DisplayName,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub availability: Vec<Availability>,
}

/// Port for profile storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile by identifier.
    async fn find_by_id(
        &self,
        id: ProfileId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Fetch several profiles at once. Missing ids are silently absent from
    /// the result; callers decide whether that matters.
    async fn find_by_ids(
        &self,
        ids: &[ProfileId],
    ) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Apply an update to a profile's editable fields.
    ///
    /// Returns the updated profile, or `None` if no such profile exists.
    async fn update(
        &self,
        id: ProfileId,
        update: ProfileUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}

/// Fixture implementation for tests that do not exercise profile storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find_by_id(
        &self,
        _id: ProfileId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn find_by_ids(
        &self,
        _ids: &[ProfileId],
    ) -> Result<Vec<Profile>, ProfileRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(
        &self,
        _id: ProfileId,
        _update: ProfileUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }
}
