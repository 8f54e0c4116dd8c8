//! Port for the offered/wanted skill-link edges.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{OfferedSkill, ProfileId, WantedSkill};

/// Errors raised by skill-link repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillLinkRepositoryError {
    /// Repository connection could not be established.
    #[error("skill link repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("skill link repository query failed: {message}")]
    Query { message: String },
    /// The (profile, skill) edge already exists.
    #[error("profile {profile_id} already has a link for skill {skill_id}")]
    DuplicateLink { profile_id: ProfileId, skill_id: Uuid },
    /// The referenced profile or skill does not exist.
    #[error("unknown profile or skill referenced by the link")]
    UnknownReference,
}

impl SkillLinkRepositoryError {
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

/// One offered-skill edge as returned by the match-candidate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferedEdge {
    /// Profile offering the skill.
    pub profile_id: ProfileId,
    /// The offered skill.
    pub skill_id: Uuid,
}

/// Port for reading and mutating skill-link edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillLinkRepository: Send + Sync {
    /// Skill ids the profile wants to learn.
    async fn wanted_skill_ids(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<Uuid>, SkillLinkRepositoryError>;

    /// Offered-skill edges for a profile, with proficiency.
    async fn offered_skills(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<OfferedSkill>, SkillLinkRepositoryError>;

    /// Wanted-skill edges for a profile, with urgency.
    async fn wanted_skills(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<WantedSkill>, SkillLinkRepositoryError>;

    /// All offered edges whose skill is in `skill_ids`, excluding those
    /// belonging to `exclude_profile_id`. This is the single grouped scan
    /// behind match discovery.
    async fn offered_edges_for_skills(
        &self,
        skill_ids: &[Uuid],
        exclude_profile_id: ProfileId,
    ) -> Result<Vec<OfferedEdge>, SkillLinkRepositoryError>;

    /// Insert an offered-skill edge.
    async fn add_offered(
        &self,
        link: &OfferedSkill,
    ) -> Result<(), SkillLinkRepositoryError>;

    /// Insert a wanted-skill edge.
    async fn add_wanted(&self, link: &WantedSkill) -> Result<(), SkillLinkRepositoryError>;

    /// Delete an offered-skill edge; `Ok(false)` when it did not exist.
    async fn remove_offered(
        &self,
        profile_id: ProfileId,
        skill_id: Uuid,
    ) -> Result<bool, SkillLinkRepositoryError>;

    /// Delete a wanted-skill edge; `Ok(false)` when it did not exist.
    async fn remove_wanted(
        &self,
        profile_id: ProfileId,
        skill_id: Uuid,
    ) -> Result<bool, SkillLinkRepositoryError>;
}

/// Fixture implementation for tests that do not exercise skill links.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSkillLinkRepository;

#[async_trait]
impl SkillLinkRepository for FixtureSkillLinkRepository {
    async fn wanted_skill_ids(
        &self,
        _profile_id: ProfileId,
    ) -> Result<Vec<Uuid>, SkillLinkRepositoryError> {
        Ok(Vec::new())
    }

    async fn offered_skills(
        &self,
        _profile_id: ProfileId,
    ) -> Result<Vec<OfferedSkill>, SkillLinkRepositoryError> {
        Ok(Vec::new())
    }

    async fn wanted_skills(
        &self,
        _profile_id: ProfileId,
    ) -> Result<Vec<WantedSkill>, SkillLinkRepositoryError> {
        Ok(Vec::new())
    }

    async fn offered_edges_for_skills(
        &self,
        _skill_ids: &[Uuid],
        _exclude_profile_id: ProfileId,
    ) -> Result<Vec<OfferedEdge>, SkillLinkRepositoryError> {
        Ok(Vec::new())
    }

    async fn add_offered(&self, _link: &OfferedSkill) -> Result<(), SkillLinkRepositoryError> {
        Ok(())
    }

    async fn add_wanted(&self, _link: &WantedSkill) -> Result<(), SkillLinkRepositoryError> {
        Ok(())
    }

    async fn remove_offered(
        &self,
        _profile_id: ProfileId,
        _skill_id: Uuid,
    ) -> Result<bool, SkillLinkRepositoryError> {
        Ok(false)
    }

    async fn remove_wanted(
        &self,
        _profile_id: ProfileId,
        _skill_id: Uuid,
    ) -> Result<bool, SkillLinkRepositoryError> {
        Ok(false)
    }
}
