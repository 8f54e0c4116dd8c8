//! Skill catalogue HTTP handlers.
//!
//! ```text
//! GET /api/v1/skills
//! GET /api/v1/skills?q=gui
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::SkillCatalogueRepositoryError;
use crate::domain::{Error, Skill};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn map_catalogue_error(error: SkillCatalogueRepositoryError) -> Error {
    match error {
        SkillCatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("skill catalogue unavailable: {message}"))
        }
        SkillCatalogueRepositoryError::Query { message } => {
            Error::internal(format!("skill catalogue error: {message}"))
        }
    }
}

/// Query parameters for catalogue listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SkillListQuery {
    /// Optional case-insensitive name filter.
    pub q: Option<String>,
}

/// List the skill catalogue, optionally filtered by name.
#[utoipa::path(
    get,
    path = "/api/v1/skills",
    params(SkillListQuery),
    responses(
        (status = 200, description = "Catalogue skills", body = Vec<Skill>),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["skills"],
    operation_id = "listSkills"
)]
#[get("/skills")]
pub async fn list_skills(
    state: web::Data<HttpState>,
    query: web::Query<SkillListQuery>,
) -> ApiResult<web::Json<Vec<Skill>>> {
    let skills = match query.into_inner().q.as_deref() {
        Some(needle) if !needle.trim().is_empty() => state
            .skills
            .search_by_name(needle.trim())
            .await
            .map_err(map_catalogue_error)?,
        _ => state.skills.list().await.map_err(map_catalogue_error)?,
    };
    Ok(web::Json(skills))
}
