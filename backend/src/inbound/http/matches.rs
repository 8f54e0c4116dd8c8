//! Match discovery HTTP handler.
//!
//! ```text
//! GET /api/v1/profiles/{id}/matches?limit=5
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::MatchCandidate;
use crate::domain::ports::{DEFAULT_MATCH_LIMIT, FindMatchesRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::profiles::ProfileBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_profile_id};

/// Query parameters for match discovery.
#[derive(Debug, Deserialize, IntoParams)]
pub struct MatchListQuery {
    /// Maximum number of candidates to return.
    pub limit: Option<usize>,
}

/// One match candidate with its compatibility breakdown.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchBody {
    pub profile: ProfileBody,
    pub matching_skill_ids: Vec<Uuid>,
    pub compatibility_score: u32,
}

impl From<MatchCandidate> for MatchBody {
    fn from(candidate: MatchCandidate) -> Self {
        Self {
            profile: candidate.profile.into(),
            matching_skill_ids: candidate.matching_skill_ids,
            compatibility_score: candidate.compatibility_score,
        }
    }
}

/// Rank candidate partners for a profile by wanted/offered skill overlap.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}/matches",
    params(
        ("id" = String, Path, description = "Profile UUID"),
        MatchListQuery
    ),
    responses(
        (status = 200, description = "Ranked candidates", body = Vec<MatchBody>),
        (status = 404, description = "Unknown profile", body = crate::domain::Error)
    ),
    tags = ["matches"],
    operation_id = "listMatches"
)]
#[get("/profiles/{id}/matches")]
pub async fn list_matches(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<MatchListQuery>,
) -> ApiResult<web::Json<Vec<MatchBody>>> {
    let profile_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let limit = query.into_inner().limit.unwrap_or(DEFAULT_MATCH_LIMIT);
    let candidates = state
        .matches
        .find_matches(FindMatchesRequest { profile_id, limit })
        .await?;
    Ok(web::Json(candidates.into_iter().map(Into::into).collect()))
}
