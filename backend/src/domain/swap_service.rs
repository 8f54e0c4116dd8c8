//! Swap lifecycle domain service.
//!
//! Implements the [`SwapCommand`] and [`SwapQuery`] driving ports: creation
//! with skill-ownership preconditions, listing with derived views, and
//! state transitions with actor authorisation plus a compare-and-set write
//! through the repository. The service is stateless between calls and never
//! retries; conflict errors surface to the caller, which may re-fetch and
//! decide for itself.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    CreateSwapRequest, SkillLinkRepository, SkillLinkRepositoryError, SwapCommand, SwapQuery,
    SwapRepository, SwapRepositoryError, SwapView, TransitionSwapRequest,
};
use crate::domain::{
    Error, ProfileId, SkillSwap, SkillSwapDraft, SwapParty, SwapStatus, SwapTransitionError,
    SwapValidationError,
};

fn map_swap_repo_error(error: SwapRepositoryError) -> Error {
    match error {
        SwapRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("swap repository unavailable: {message}"))
        }
        SwapRepositoryError::Query { message } => {
            Error::internal(format!("swap repository error: {message}"))
        }
        SwapRepositoryError::NotFound { swap_id } => {
            Error::not_found(format!("swap {swap_id} not found"))
        }
        SwapRepositoryError::StatusConflict { expected, actual } => {
            Error::conflict(format!(
                "swap status changed concurrently: expected {expected}, found {actual}"
            ))
            .with_details(json!({
                "expectedStatus": expected,
                "currentStatus": actual,
            }))
        }
    }
}

fn map_link_error(error: SkillLinkRepositoryError) -> Error {
    match error {
        SkillLinkRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("skill link repository unavailable: {message}"))
        }
        other => Error::internal(format!("skill link repository error: {other}")),
    }
}

fn validation_error(error: &SwapValidationError) -> Error {
    let base = Error::invalid_request(error.to_string());
    match error {
        SwapValidationError::SkillNotOffered { party, skill_id } => base.with_details(json!({
            "party": party,
            "skillId": skill_id,
        })),
        _ => base,
    }
}

fn transition_error(error: &SwapTransitionError) -> Error {
    match error {
        SwapTransitionError::IllegalTransition { from, to } => {
            Error::conflict(error.to_string()).with_details(json!({
                "currentStatus": from,
                "targetStatus": to,
            }))
        }
        SwapTransitionError::NotParticipant { .. }
        | SwapTransitionError::UnauthorizedActor { .. } => Error::forbidden(error.to_string()),
    }
}

/// Swap lifecycle service over the swap and skill-link repositories.
#[derive(Clone)]
pub struct SwapService<S, L> {
    swaps: Arc<S>,
    skill_links: Arc<L>,
}

impl<S, L> SwapService<S, L> {
    /// Create a new service with its repositories.
    pub fn new(swaps: Arc<S>, skill_links: Arc<L>) -> Self {
        Self { swaps, skill_links }
    }
}

impl<S, L> SwapService<S, L>
where
    S: SwapRepository,
    L: SkillLinkRepository,
{
    /// Check that `party` currently offers `skill_id`.
    async fn require_offered(
        &self,
        party: SwapParty,
        profile_id: ProfileId,
        skill_id: Uuid,
    ) -> Result<(), Error> {
        let offered = self
            .skill_links
            .offered_skills(profile_id)
            .await
            .map_err(map_link_error)?;
        if offered.iter().any(|link| link.skill_id == skill_id) {
            Ok(())
        } else {
            Err(validation_error(&SwapValidationError::SkillNotOffered {
                party,
                skill_id,
            }))
        }
    }
}

#[async_trait]
impl<S, L> SwapCommand for SwapService<S, L>
where
    S: SwapRepository,
    L: SkillLinkRepository,
{
    async fn create_swap(&self, request: CreateSwapRequest) -> Result<SkillSwap, Error> {
        if request.requester_id == request.provider_id {
            return Err(validation_error(&SwapValidationError::SameParty));
        }
        self.require_offered(
            SwapParty::Provider,
            request.provider_id,
            request.requested_skill_id,
        )
        .await?;
        self.require_offered(
            SwapParty::Requester,
            request.requester_id,
            request.offered_skill_id,
        )
        .await?;

        // Duplicate pending requests for the same pair are permitted, as in
        // the original application.
        let now = Utc::now();
        let swap = SkillSwap::new(SkillSwapDraft {
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
        .map_err(|err| validation_error(&err))?;

        let stored = self.swaps.insert(&swap).await.map_err(map_swap_repo_error)?;
        info!(
            swap_id = %stored.id(),
            requester_id = %stored.requester_id(),
            provider_id = %stored.provider_id(),
            "skill swap created"
        );
        Ok(stored)
    }

    async fn transition_status(
        &self,
        request: TransitionSwapRequest,
    ) -> Result<SkillSwap, Error> {
        let swap = self
            .swaps
            .find_by_id(request.swap_id)
            .await
            .map_err(map_swap_repo_error)?
            .ok_or_else(|| Error::not_found(format!("swap {} not found", request.swap_id)))?;

        swap.authorize_transition(request.actor_id, request.new_status)
            .map_err(|err| transition_error(&err))?;

        // Compare-and-set on the status read above; a racing transition
        // loses here with a conflict rather than silently double-applying.
        let updated = self
            .swaps
            .update_status(request.swap_id, swap.status(), request.new_status)
            .await
            .map_err(map_swap_repo_error)?;
        info!(
            swap_id = %updated.id(),
            from = %swap.status(),
            to = %updated.status(),
            actor_id = %request.actor_id,
            "skill swap transitioned"
        );
        Ok(updated)
    }
}

#[async_trait]
impl<S, L> SwapQuery for SwapService<S, L>
where
    S: SwapRepository,
    L: SkillLinkRepository,
{
    async fn list_swaps(
        &self,
        profile_id: ProfileId,
        view: SwapView,
    ) -> Result<Vec<SkillSwap>, Error> {
        let swaps = self
            .swaps
            .list_for_profile(profile_id)
            .await
            .map_err(map_swap_repo_error)?;
        Ok(swaps
            .into_iter()
            .filter(|swap| view.matches(swap, profile_id))
            .collect())
    }
}

#[cfg(test)]
#[path = "swap_service_tests.rs"]
mod tests;
