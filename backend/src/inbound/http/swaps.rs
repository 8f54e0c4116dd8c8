//! Skill-swap lifecycle HTTP handlers.
//!
//! ```text
//! POST /api/v1/swaps
//! POST /api/v1/swaps/{id}/status
//! GET  /api/v1/profiles/{id}/swaps?view=incoming
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{CreateSwapRequest, SwapView, TransitionSwapRequest};
use crate::domain::{SkillSwap, SwapStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_label, parse_profile_id, parse_uuid};

const STATUS_LABELS: &str = "pending, accepted, rejected, completed, cancelled";

/// One swap as presented to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapBody {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub provider_id: Uuid,
    pub requested_skill_id: Uuid,
    pub offered_skill_id: Uuid,
    pub status: SwapStatus,
    pub message: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SkillSwap> for SwapBody {
    fn from(swap: SkillSwap) -> Self {
        Self {
            id: swap.id(),
            requester_id: *swap.requester_id().as_uuid(),
            provider_id: *swap.provider_id().as_uuid(),
            requested_skill_id: swap.requested_skill_id(),
            offered_skill_id: swap.offered_skill_id(),
            status: swap.status(),
            message: swap.message().map(str::to_owned),
            scheduled_date: swap.scheduled_date(),
            created_at: swap.created_at(),
            updated_at: swap.updated_at(),
        }
    }
}

/// Payload for opening a swap.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapBody {
    pub requester_id: String,
    pub provider_id: String,
    pub requested_skill_id: String,
    pub offered_skill_id: String,
    pub message: Option<String>,
}

impl CreateSwapBody {
    fn into_request(self) -> Result<CreateSwapRequest, crate::domain::Error> {
        Ok(CreateSwapRequest {
            requester_id: parse_profile_id(self.requester_id, FieldName::new("requesterId"))?,
            provider_id: parse_profile_id(self.provider_id, FieldName::new("providerId"))?,
            requested_skill_id: parse_uuid(
                self.requested_skill_id,
                FieldName::new("requestedSkillId"),
            )?,
            offered_skill_id: parse_uuid(self.offered_skill_id, FieldName::new("offeredSkillId"))?,
            message: self.message,
        })
    }
}

/// Payload for transitioning a swap's status.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionSwapBody {
    /// Profile performing the transition.
    pub actor_id: String,
    /// Target status label.
    pub status: String,
}

/// Query parameters for listing a profile's swaps.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SwapListQuery {
    /// View filter: all, incoming, outgoing, active, or completed.
    pub view: Option<String>,
}

/// Open a new swap request between two profiles.
#[utoipa::path(
    post,
    path = "/api/v1/swaps",
    request_body = CreateSwapBody,
    responses(
        (status = 201, description = "Swap created in pending status", body = SwapBody),
        (status = 400, description = "Invalid payload", body = crate::domain::Error),
        (status = 404, description = "Unknown participant", body = crate::domain::Error)
    ),
    tags = ["swaps"],
    operation_id = "createSwap"
)]
#[post("/swaps")]
pub async fn create_swap(
    state: web::Data<HttpState>,
    body: web::Json<CreateSwapBody>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner().into_request()?;
    let swap = state.swap_command.create_swap(request).await?;
    Ok(HttpResponse::Created().json(SwapBody::from(swap)))
}

/// Move a swap along its lifecycle on behalf of a participant.
#[utoipa::path(
    post,
    path = "/api/v1/swaps/{id}/status",
    params(("id" = String, Path, description = "Swap UUID")),
    request_body = TransitionSwapBody,
    responses(
        (status = 200, description = "Swap after the transition", body = SwapBody),
        (status = 403, description = "Actor may not perform this transition", body = crate::domain::Error),
        (status = 404, description = "Unknown swap", body = crate::domain::Error),
        (status = 409, description = "Transition not allowed from the current status", body = crate::domain::Error)
    ),
    tags = ["swaps"],
    operation_id = "transitionSwap"
)]
#[post("/swaps/{id}/status")]
pub async fn transition_swap(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<TransitionSwapBody>,
) -> ApiResult<web::Json<SwapBody>> {
    let swap_id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let body = body.into_inner();
    let actor_id = parse_profile_id(body.actor_id, FieldName::new("actorId"))?;
    let new_status = parse_label::<SwapStatus>(body.status, FieldName::new("status"), STATUS_LABELS)?;
    let swap = state
        .swap_command
        .transition_status(TransitionSwapRequest {
            swap_id,
            actor_id,
            new_status,
        })
        .await?;
    Ok(web::Json(swap.into()))
}

/// List a profile's swaps, newest first, filtered to a view.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}/swaps",
    params(
        ("id" = String, Path, description = "Profile UUID"),
        SwapListQuery
    ),
    responses(
        (status = 200, description = "Swaps in the requested view", body = Vec<SwapBody>),
        (status = 400, description = "Unknown view label", body = crate::domain::Error)
    ),
    tags = ["swaps"],
    operation_id = "listSwaps"
)]
#[get("/profiles/{id}/swaps")]
pub async fn list_swaps(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<SwapListQuery>,
) -> ApiResult<web::Json<Vec<SwapBody>>> {
    let profile_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let view = match query.into_inner().view {
        Some(raw) => raw.parse::<SwapView>()?,
        None => SwapView::All,
    };
    let swaps = state.swap_query.list_swaps(profile_id, view).await?;
    Ok(web::Json(swaps.into_iter().map(Into::into).collect()))
}
