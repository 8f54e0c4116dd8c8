//! Driving port for swap mutations: creation and status transitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, ProfileId, SkillSwap, SwapStatus};

/// Request to open a new skill swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapRequest {
    /// Profile opening the request.
    pub requester_id: ProfileId,
    /// Profile asked to teach the requested skill.
    pub provider_id: ProfileId,
    /// Skill the provider must currently offer.
    pub requested_skill_id: Uuid,
    /// Skill the requester offers in return; must be in the requester's
    /// offered set.
    pub offered_skill_id: Uuid,
    /// Optional message shown to the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request to move a swap to a new status on behalf of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionSwapRequest {
    /// Swap being transitioned.
    pub swap_id: Uuid,
    /// Profile performing the transition; must be a participant allowed to
    /// trigger the edge.
    pub actor_id: ProfileId,
    /// Target status.
    pub new_status: SwapStatus,
}

/// Driving port for swap write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwapCommand: Send + Sync {
    /// Validate preconditions and open a swap in `pending` status.
    async fn create_swap(&self, request: CreateSwapRequest) -> Result<SkillSwap, Error>;

    /// Apply one state-machine transition with actor authorisation and a
    /// compare-and-set write; a lost race surfaces as a conflict error.
    async fn transition_status(
        &self,
        request: TransitionSwapRequest,
    ) -> Result<SkillSwap, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Creation echoes a pending swap; transitions always report the swap as
/// missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSwapCommand;

#[async_trait]
impl SwapCommand for FixtureSwapCommand {
    async fn create_swap(&self, request: CreateSwapRequest) -> Result<SkillSwap, Error> {
        let now = chrono::Utc::now();
        crate::domain::SkillSwap::new(crate::domain::SkillSwapDraft {
            id: Uuid::new_v4(),
            requester_id: request.requester_id,
            provider_id: request.provider_id,
            requested_skill_id: request.requested_skill_id,
            offered_skill_id: request.offered_skill_id,
            status: SwapStatus::Pending,
            message: request.message,
            scheduled_date: None,
            created_at: now,
            updated_at: now,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn transition_status(
        &self,
        request: TransitionSwapRequest,
    ) -> Result<SkillSwap, Error> {
        Err(Error::not_found(format!("swap {} not found", request.swap_id)))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_create_yields_pending_swap() {
        let command = FixtureSwapCommand;
        let swap = command
            .create_swap(CreateSwapRequest {
                requester_id: ProfileId::random(),
                provider_id: ProfileId::random(),
                requested_skill_id: Uuid::new_v4(),
                offered_skill_id: Uuid::new_v4(),
                message: None,
            })
            .await
            .expect("fixture create succeeds");
        assert_eq!(swap.status(), SwapStatus::Pending);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_rejects_same_party() {
        let command = FixtureSwapCommand;
        let id = ProfileId::random();
        let err = command
            .create_swap(CreateSwapRequest {
                requester_id: id,
                provider_id: id,
                requested_skill_id: Uuid::new_v4(),
                offered_skill_id: Uuid::new_v4(),
                message: None,
            })
            .await
            .expect_err("same party rejected");
        assert_eq!(err.code, crate::domain::ErrorCode::InvalidRequest);
    }
}
