//! Port for skill-swap persistence, including the compare-and-set status
//! update that keeps racing transitions from both succeeding.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ProfileId, SkillSwap, SwapStatus};

/// Errors raised by swap repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapRepositoryError {
    /// Repository connection could not be established.
    #[error("swap repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("swap repository query failed: {message}")]
    Query { message: String },
    /// No swap exists with the given id.
    #[error("swap {swap_id} not found")]
    NotFound { swap_id: Uuid },
    /// The conditional status update found a different current status.
    #[error("swap status changed concurrently: expected {expected}, found {actual}")]
    StatusConflict {
        expected: SwapStatus,
        actual: SwapStatus,
    },
}

impl SwapRepositoryError {
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

/// Port for swap storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwapRepository: Send + Sync {
    /// Persist a freshly created swap.
    async fn insert(&self, swap: &SkillSwap) -> Result<SkillSwap, SwapRepositoryError>;

    /// Fetch a swap by identifier.
    async fn find_by_id(
        &self,
        swap_id: Uuid,
    ) -> Result<Option<SkillSwap>, SwapRepositoryError>;

    /// All swaps where the profile is requester or provider, newest first.
    async fn list_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<SkillSwap>, SwapRepositoryError>;

    /// Conditionally move a swap from `expected` to `new_status`, refreshing
    /// `updated_at`.
    ///
    /// The update must only apply while the stored status still equals
    /// `expected`; a concurrent transition surfaces as
    /// [`SwapRepositoryError::StatusConflict`] carrying the status actually
    /// found. The adapter performs no retry.
    async fn update_status(
        &self,
        swap_id: Uuid,
        expected: SwapStatus,
        new_status: SwapStatus,
    ) -> Result<SkillSwap, SwapRepositoryError>;
}

/// Fixture implementation for tests that do not exercise swap persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSwapRepository;

#[async_trait]
impl SwapRepository for FixtureSwapRepository {
    async fn insert(&self, swap: &SkillSwap) -> Result<SkillSwap, SwapRepositoryError> {
        Ok(swap.clone())
    }

    async fn find_by_id(
        &self,
        _swap_id: Uuid,
    ) -> Result<Option<SkillSwap>, SwapRepositoryError> {
        Ok(None)
    }

    async fn list_for_profile(
        &self,
        _profile_id: ProfileId,
    ) -> Result<Vec<SkillSwap>, SwapRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_status(
        &self,
        swap_id: Uuid,
        _expected: SwapStatus,
        _new_status: SwapStatus,
    ) -> Result<SkillSwap, SwapRepositoryError> {
        Err(SwapRepositoryError::NotFound { swap_id })
    }
}
