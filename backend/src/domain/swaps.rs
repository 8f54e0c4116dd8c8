//! Skill-swap entity and lifecycle state machine.
//!
//! A [`SkillSwap`] is the request-and-agreement record governing one
//! skill-for-skill exchange between two profiles. Its status moves through
//! a fixed state machine:
//!
//! ```text
//! pending ──> accepted ──> completed
//!    │            │
//!    ├──> rejected└──> cancelled
//!    └──> cancelled
//! ```
//!
//! `rejected`, `completed`, and `cancelled` are terminal. Accepting or
//! rejecting is the provider's call; cancelling and completing are open to
//! either participant. The transition table lives here so the service layer
//! and its tests share one source of truth.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::profile::ProfileId;

/// Lifecycle status of a skill swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    /// Created by the requester; awaiting the provider's decision.
    Pending,
    /// Provider agreed; the exchange may be scheduled and carried out.
    Accepted,
    /// Provider declined. Terminal.
    Rejected,
    /// Both parties finished the exchange. Terminal.
    Completed,
    /// Either party withdrew before completion. Terminal.
    Cancelled,
}

impl SwapStatus {
    /// Stable storage identifier for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are permitted out of this status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    /// The actor rule governing a transition out of this status, or `None`
    /// when the edge is not part of the state machine.
    pub const fn transition_rule(self, to: Self) -> Option<ActorRule> {
        match (self, to) {
            (Self::Pending, Self::Accepted | Self::Rejected) => Some(ActorRule::ProviderOnly),
            (Self::Pending | Self::Accepted, Self::Cancelled)
            | (Self::Accepted, Self::Completed) => Some(ActorRule::EitherParticipant),
            _ => None,
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapStatus {
    type Err = SwapValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(SwapValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Who may trigger a given transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRule {
    /// Only the swap's provider.
    ProviderOnly,
    /// Either the requester or the provider.
    EitherParticipant,
}

/// The side of a swap a profile occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwapParty {
    Requester,
    Provider,
}

impl fmt::Display for SwapParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requester => f.write_str("requester"),
            Self::Provider => f.write_str("provider"),
        }
    }
}

/// Maximum allowed length for the optional request message.
pub const MESSAGE_MAX: usize = 500;

/// Validation errors raised when building or requesting a swap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapValidationError {
    /// Requester and provider must be different profiles.
    #[error("requester and provider must be different profiles")]
    SameParty,
    /// A party does not currently offer the named skill.
    #[error("{party} does not offer skill {skill_id}")]
    SkillNotOffered {
        party: SwapParty,
        skill_id: Uuid,
    },
    /// The optional message exceeds [`MESSAGE_MAX`] characters.
    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },
    /// A status label failed to parse.
    #[error("unknown swap status: {value}")]
    UnknownStatus { value: String },
}

/// Transition errors raised by the lifecycle state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapTransitionError {
    /// The `(from, to)` edge is not part of the state machine.
    #[error("cannot transition swap from {from} to {to}")]
    IllegalTransition { from: SwapStatus, to: SwapStatus },
    /// The acting profile is not a participant of the swap.
    #[error("profile {actor_id} is not a participant in this swap")]
    NotParticipant { actor_id: ProfileId },
    /// The acting participant is not allowed to trigger this edge.
    #[error("only the {required} may transition this swap from {from} to {to}")]
    UnauthorizedActor {
        required: SwapParty,
        from: SwapStatus,
        to: SwapStatus,
    },
}

/// Unvalidated field bundle for constructing a [`SkillSwap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSwapDraft {
    pub id: Uuid,
    pub requester_id: ProfileId,
    pub provider_id: ProfileId,
    pub requested_skill_id: Uuid,
    pub offered_skill_id: Uuid,
    pub status: SwapStatus,
    pub message: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One skill-for-skill exchange between two profiles.
///
/// ## Invariants
/// - `requester_id != provider_id`.
/// - `message`, when present, is at most [`MESSAGE_MAX`] characters.
///
/// Swaps are never hard-deleted; they reach a terminal status instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSwap {
    id: Uuid,
    requester_id: ProfileId,
    provider_id: ProfileId,
    requested_skill_id: Uuid,
    offered_skill_id: Uuid,
    status: SwapStatus,
    message: Option<String>,
    scheduled_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SkillSwap {
    /// Validate and construct a [`SkillSwap`].
    pub fn new(draft: SkillSwapDraft) -> Result<Self, SwapValidationError> {
        if draft.requester_id == draft.provider_id {
            return Err(SwapValidationError::SameParty);
        }
        if let Some(text) = draft.message.as_deref() {
            if text.chars().count() > MESSAGE_MAX {
                return Err(SwapValidationError::MessageTooLong { max: MESSAGE_MAX });
            }
        }

        let SkillSwapDraft {
            id,
            requester_id,
            provider_id,
            requested_skill_id,
            offered_skill_id,
            status,
            message,
            scheduled_date,
            created_at,
            updated_at,
        } = draft;

        Ok(Self {
            id,
            requester_id,
            provider_id,
            requested_skill_id,
            offered_skill_id,
            status,
            message,
            scheduled_date,
            created_at,
            updated_at,
        })
    }

    /// Stable swap identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Profile that opened the request.
    pub const fn requester_id(&self) -> ProfileId {
        self.requester_id
    }

    /// Profile asked to teach the requested skill.
    pub const fn provider_id(&self) -> ProfileId {
        self.provider_id
    }

    /// Skill the requester wants taught (offered by the provider).
    pub const fn requested_skill_id(&self) -> Uuid {
        self.requested_skill_id
    }

    /// Skill the requester offers in return.
    pub const fn offered_skill_id(&self) -> Uuid {
        self.offered_skill_id
    }

    /// Current lifecycle status.
    pub const fn status(&self) -> SwapStatus {
        self.status
    }

    /// Optional message attached by the requester.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Agreed session time, if any.
    pub const fn scheduled_date(&self) -> Option<DateTime<Utc>> {
        self.scheduled_date
    }

    /// Record creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The side `profile_id` occupies in this swap, if any.
    pub fn party_of(&self, profile_id: ProfileId) -> Option<SwapParty> {
        if profile_id == self.requester_id {
            Some(SwapParty::Requester)
        } else if profile_id == self.provider_id {
            Some(SwapParty::Provider)
        } else {
            None
        }
    }

    /// Check that `actor_id` may move this swap to `to`.
    ///
    /// Pure authorisation check; the persistent write still goes through the
    /// repository's compare-and-set update so racing actors cannot both
    /// succeed.
    pub fn authorize_transition(
        &self,
        actor_id: ProfileId,
        to: SwapStatus,
    ) -> Result<(), SwapTransitionError> {
        let from = self.status;
        let rule = from
            .transition_rule(to)
            .ok_or(SwapTransitionError::IllegalTransition { from, to })?;
        let party = self
            .party_of(actor_id)
            .ok_or(SwapTransitionError::NotParticipant { actor_id })?;

        match rule {
            ActorRule::ProviderOnly if party != SwapParty::Provider => {
                Err(SwapTransitionError::UnauthorizedActor {
                    required: SwapParty::Provider,
                    from,
                    to,
                })
            }
            ActorRule::ProviderOnly | ActorRule::EitherParticipant => Ok(()),
        }
    }
}
