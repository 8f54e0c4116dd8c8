//! Port for the read-only skill catalogue.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Skill;

/// Errors raised by skill catalogue adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillCatalogueRepositoryError {
    /// Repository connection could not be established.
    #[error("skill catalogue connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("skill catalogue query failed: {message}")]
    Query { message: String },
}

impl SkillCatalogueRepositoryError {
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

/// Port for catalogue reads. The catalogue is reference data seeded by
/// migration; there is no write surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillCatalogueRepository: Send + Sync {
    /// List the whole catalogue, ordered by name.
    async fn list(&self) -> Result<Vec<Skill>, SkillCatalogueRepositoryError>;

    /// Case-insensitive substring search on skill names, ordered by name.
    async fn search_by_name(
        &self,
        needle: &str,
    ) -> Result<Vec<Skill>, SkillCatalogueRepositoryError>;

    /// Fetch specific catalogue entries by id.
    async fn find_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Skill>, SkillCatalogueRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSkillCatalogueRepository;

#[async_trait]
impl SkillCatalogueRepository for FixtureSkillCatalogueRepository {
    async fn list(&self) -> Result<Vec<Skill>, SkillCatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn search_by_name(
        &self,
        _needle: &str,
    ) -> Result<Vec<Skill>, SkillCatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_ids(
        &self,
        _ids: &[Uuid],
    ) -> Result<Vec<Skill>, SkillCatalogueRepositoryError> {
        Ok(Vec::new())
    }
}
