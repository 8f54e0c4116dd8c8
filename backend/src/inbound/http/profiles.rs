//! Profile and skill-link HTTP handlers.
//!
//! ```text
//! GET    /api/v1/profiles/{id}
//! PUT    /api/v1/profiles/{id}
//! GET    /api/v1/profiles/{id}/offered-skills
//! POST   /api/v1/profiles/{id}/offered-skills
//! DELETE /api/v1/profiles/{id}/offered-skills/{skill_id}
//! GET    /api/v1/profiles/{id}/wanted-skills
//! POST   /api/v1/profiles/{id}/wanted-skills
//! DELETE /api/v1/profiles/{id}/wanted-skills/{skill_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{ProfileRepositoryError, ProfileUpdate, SkillLinkRepositoryError};
use crate::domain::{
    Availability, DisplayName, Error, OfferedSkill, Proficiency, Profile, ProfileId, Urgency,
    WantedSkill, profile::BIO_MAX,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_label, parse_profile_id, parse_uuid};

const AVAILABILITY_LABELS: &str = "weekdays, weekends, mornings, afternoons, evenings, flexible";
const PROFICIENCY_LABELS: &str = "beginner, intermediate, advanced, expert";
const URGENCY_LABELS: &str = "low, medium, high";

fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile store unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
    }
}

fn map_link_error(error: SkillLinkRepositoryError) -> Error {
    match error {
        SkillLinkRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("skill link store unavailable: {message}"))
        }
        SkillLinkRepositoryError::Query { message } => {
            Error::internal(format!("skill link store error: {message}"))
        }
        SkillLinkRepositoryError::DuplicateLink {
            profile_id,
            skill_id,
        } => Error::conflict("profile already has a link for this skill").with_details(json!({
            "profileId": profile_id.to_string(),
            "skillId": skill_id.to_string(),
        })),
        SkillLinkRepositoryError::UnknownReference => {
            Error::invalid_request("profile or skill does not exist")
        }
    }
}

fn profile_not_found(profile_id: ProfileId) -> Error {
    Error::not_found(format!("profile {profile_id} not found"))
}

/// Public profile representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    pub id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub availability: Vec<Availability>,
}

impl From<Profile> for ProfileBody {
    fn from(profile: Profile) -> Self {
        Self {
            id: *profile.id().as_uuid(),
            display_name: profile.display_name().as_ref().to_owned(),
            bio: profile.bio().map(str::to_owned),
            location: profile.location().map(str::to_owned),
            availability: profile.availability().to_vec(),
        }
    }
}

/// Full-replacement profile update payload.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    pub display_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub availability: Vec<String>,
}

impl UpdateProfileBody {
    fn into_update(self) -> Result<ProfileUpdate, Error> {
        let display_name = DisplayName::new(self.display_name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if let Some(text) = self.bio.as_deref() {
            if text.chars().count() > BIO_MAX {
                return Err(Error::invalid_request(format!(
                    "bio must be at most {BIO_MAX} characters",
                )));
            }
        }
        let availability = self
            .availability
            .into_iter()
            .map(|tag| {
                parse_label::<Availability>(tag, FieldName::new("availability"), AVAILABILITY_LABELS)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProfileUpdate {
            display_name,
            bio: self.bio,
            location: self.location,
            availability,
        })
    }
}

/// One offered-skill edge.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferedSkillBody {
    pub skill_id: Uuid,
    pub proficiency: Proficiency,
}

impl From<OfferedSkill> for OfferedSkillBody {
    fn from(link: OfferedSkill) -> Self {
        Self {
            skill_id: link.skill_id,
            proficiency: link.proficiency,
        }
    }
}

/// One wanted-skill edge.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WantedSkillBody {
    pub skill_id: Uuid,
    pub urgency: Urgency,
}

impl From<WantedSkill> for WantedSkillBody {
    fn from(link: WantedSkill) -> Self {
        Self {
            skill_id: link.skill_id,
            urgency: link.urgency,
        }
    }
}

/// Payload for adding an offered skill.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOfferedSkillBody {
    pub skill_id: String,
    pub proficiency: String,
}

/// Payload for adding a wanted skill.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWantedSkillBody {
    pub skill_id: String,
    pub urgency: String,
}

/// Fetch a profile by id.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}",
    params(("id" = String, Path, description = "Profile UUID")),
    responses(
        (status = 200, description = "The profile", body = ProfileBody),
        (status = 404, description = "Unknown profile", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "getProfile"
)]
#[get("/profiles/{id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileBody>> {
    let profile_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let profile = state
        .profiles
        .find_by_id(profile_id)
        .await
        .map_err(map_profile_error)?
        .ok_or_else(|| profile_not_found(profile_id))?;
    Ok(web::Json(profile.into()))
}

/// Replace the mutable fields of a profile.
#[utoipa::path(
    put,
    path = "/api/v1/profiles/{id}",
    params(("id" = String, Path, description = "Profile UUID")),
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileBody),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 404, description = "Unknown profile", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "updateProfile"
)]
#[put("/profiles/{id}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<ProfileBody>> {
    let profile_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let update = body.into_inner().into_update()?;
    let profile = state
        .profiles
        .update(profile_id, update)
        .await
        .map_err(map_profile_error)?
        .ok_or_else(|| profile_not_found(profile_id))?;
    Ok(web::Json(profile.into()))
}

/// List the skills a profile offers.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}/offered-skills",
    params(("id" = String, Path, description = "Profile UUID")),
    responses((status = 200, description = "Offered skills", body = Vec<OfferedSkillBody>)),
    tags = ["profiles"],
    operation_id = "listOfferedSkills"
)]
#[get("/profiles/{id}/offered-skills")]
pub async fn list_offered_skills(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<OfferedSkillBody>>> {
    let profile_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let links = state
        .skill_links
        .offered_skills(profile_id)
        .await
        .map_err(map_link_error)?;
    Ok(web::Json(links.into_iter().map(Into::into).collect()))
}

/// Add a skill to a profile's offered list.
#[utoipa::path(
    post,
    path = "/api/v1/profiles/{id}/offered-skills",
    params(("id" = String, Path, description = "Profile UUID")),
    request_body = AddOfferedSkillBody,
    responses(
        (status = 201, description = "Offered skill added", body = OfferedSkillBody),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 409, description = "Skill already offered", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "addOfferedSkill"
)]
#[post("/profiles/{id}/offered-skills")]
pub async fn add_offered_skill(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<AddOfferedSkillBody>,
) -> ApiResult<HttpResponse> {
    let profile_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let body = body.into_inner();
    let skill_id = parse_uuid(body.skill_id, FieldName::new("skillId"))?;
    let proficiency = parse_label::<Proficiency>(
        body.proficiency,
        FieldName::new("proficiency"),
        PROFICIENCY_LABELS,
    )?;
    let link = OfferedSkill {
        profile_id,
        skill_id,
        proficiency,
    };
    state
        .skill_links
        .add_offered(&link)
        .await
        .map_err(map_link_error)?;
    Ok(HttpResponse::Created().json(OfferedSkillBody::from(link)))
}

/// Remove a skill from a profile's offered list.
#[utoipa::path(
    delete,
    path = "/api/v1/profiles/{id}/offered-skills/{skill_id}",
    params(
        ("id" = String, Path, description = "Profile UUID"),
        ("skill_id" = String, Path, description = "Skill UUID")
    ),
    responses(
        (status = 204, description = "Offered skill removed"),
        (status = 404, description = "Link not found", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "removeOfferedSkill"
)]
#[delete("/profiles/{id}/offered-skills/{skill_id}")]
pub async fn remove_offered_skill(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (profile_raw, skill_raw) = path.into_inner();
    let profile_id = parse_profile_id(profile_raw, FieldName::new("id"))?;
    let skill_id = parse_uuid(skill_raw, FieldName::new("skillId"))?;
    let removed = state
        .skill_links
        .remove_offered(profile_id, skill_id)
        .await
        .map_err(map_link_error)?;
    if removed {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("offered skill link not found"))
    }
}

/// List the skills a profile wants to learn.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}/wanted-skills",
    params(("id" = String, Path, description = "Profile UUID")),
    responses((status = 200, description = "Wanted skills", body = Vec<WantedSkillBody>)),
    tags = ["profiles"],
    operation_id = "listWantedSkills"
)]
#[get("/profiles/{id}/wanted-skills")]
pub async fn list_wanted_skills(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<WantedSkillBody>>> {
    let profile_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let links = state
        .skill_links
        .wanted_skills(profile_id)
        .await
        .map_err(map_link_error)?;
    Ok(web::Json(links.into_iter().map(Into::into).collect()))
}

/// Add a skill to a profile's wanted list.
#[utoipa::path(
    post,
    path = "/api/v1/profiles/{id}/wanted-skills",
    params(("id" = String, Path, description = "Profile UUID")),
    request_body = AddWantedSkillBody,
    responses(
        (status = 201, description = "Wanted skill added", body = WantedSkillBody),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 409, description = "Skill already wanted", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "addWantedSkill"
)]
#[post("/profiles/{id}/wanted-skills")]
pub async fn add_wanted_skill(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<AddWantedSkillBody>,
) -> ApiResult<HttpResponse> {
    let profile_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let body = body.into_inner();
    let skill_id = parse_uuid(body.skill_id, FieldName::new("skillId"))?;
    let urgency = parse_label::<Urgency>(body.urgency, FieldName::new("urgency"), URGENCY_LABELS)?;
    let link = WantedSkill {
        profile_id,
        skill_id,
        urgency,
    };
    state
        .skill_links
        .add_wanted(&link)
        .await
        .map_err(map_link_error)?;
    Ok(HttpResponse::Created().json(WantedSkillBody::from(link)))
}

/// Remove a skill from a profile's wanted list.
#[utoipa::path(
    delete,
    path = "/api/v1/profiles/{id}/wanted-skills/{skill_id}",
    params(
        ("id" = String, Path, description = "Profile UUID"),
        ("skill_id" = String, Path, description = "Skill UUID")
    ),
    responses(
        (status = 204, description = "Wanted skill removed"),
        (status = 404, description = "Link not found", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "removeWantedSkill"
)]
#[delete("/profiles/{id}/wanted-skills/{skill_id}")]
pub async fn remove_wanted_skill(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (profile_raw, skill_raw) = path.into_inner();
    let profile_id = parse_profile_id(profile_raw, FieldName::new("id"))?;
    let skill_id = parse_uuid(skill_raw, FieldName::new("skillId"))?;
    let removed = state
        .skill_links
        .remove_wanted(profile_id, skill_id)
        .await
        .map_err(map_link_error)?;
    if removed {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("wanted skill link not found"))
    }
}

#[cfg(test)]
mod tests {
    //! Handler coverage over mocked profile and skill-link ports.

    use std::sync::Arc;

    use actix_web::{App, test};
    use serde_json::Value;

    use crate::domain::ports::{MockProfileRepository, MockSkillLinkRepository};

    use super::*;

    const PROFILE: &str = "00000000-0000-0000-0000-000000000001";
    const SKILL: &str = "00000000-0000-0000-0000-00000000000a";

    fn sample_profile() -> Profile {
        Profile::new(
            ProfileId::new(PROFILE).expect("valid id"),
            DisplayName::new("Riley Chen").expect("valid name"),
            Some("I teach guitar".to_owned()),
            Some("Bristol".to_owned()),
            vec![Availability::Weekends, Availability::Evenings],
        )
        .expect("valid profile")
    }

    fn state_with_profiles(profiles: MockProfileRepository) -> web::Data<HttpState> {
        let mut state = HttpState::fixture();
        state.profiles = Arc::new(profiles);
        web::Data::new(state)
    }

    fn state_with_links(links: MockSkillLinkRepository) -> web::Data<HttpState> {
        let mut state = HttpState::fixture();
        state.skill_links = Arc::new(links);
        web::Data::new(state)
    }

    #[actix_web::test]
    async fn fetches_a_profile_by_id() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_profile())));

        let app = test::init_service(
            App::new()
                .app_data(state_with_profiles(profiles))
                .service(get_profile),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/profiles/{PROFILE}"))
                .to_request(),
        )
        .await;

        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["displayName"], "Riley Chen");
        assert_eq!(body["availability"][0], "weekends");
    }

    #[actix_web::test]
    async fn unknown_profile_is_404() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_id().returning(|_| Ok(None));

        let app = test::init_service(
            App::new()
                .app_data(state_with_profiles(profiles))
                .service(get_profile),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/profiles/{PROFILE}"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 404);
    }

    #[actix_web::test]
    async fn malformed_profile_id_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::fixture()))
                .service(get_profile),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profiles/not-a-uuid")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "invalid_uuid");
    }

    #[actix_web::test]
    async fn update_replaces_profile_fields() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_update()
            .withf(|_, update| {
                update.display_name.as_ref() == "Riley C"
                    && update.bio.is_none()
                    && update.availability == vec![Availability::Flexible]
            })
            .returning(|_, _| Ok(Some(sample_profile())));

        let app = test::init_service(
            App::new()
                .app_data(state_with_profiles(profiles))
                .service(update_profile),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/profiles/{PROFILE}"))
                .set_json(serde_json::json!({
                    "displayName": "Riley C",
                    "bio": null,
                    "location": "Bristol",
                    "availability": ["flexible"],
                }))
                .to_request(),
        )
        .await;

        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn update_rejects_unknown_availability_tag() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::fixture()))
                .service(update_profile),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/profiles/{PROFILE}"))
                .set_json(serde_json::json!({
                    "displayName": "Riley C",
                    "availability": ["sometimes"],
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["value"], "sometimes");
    }

    #[actix_web::test]
    async fn update_rejects_short_display_name() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::fixture()))
                .service(update_profile),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/profiles/{PROFILE}"))
                .set_json(serde_json::json!({
                    "displayName": "ab",
                    "availability": [],
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 400);
    }

    #[actix_web::test]
    async fn adds_an_offered_skill() {
        let mut links = MockSkillLinkRepository::new();
        links
            .expect_add_offered()
            .withf(|link| {
                link.skill_id.to_string() == SKILL && link.proficiency == Proficiency::Advanced
            })
            .returning(|_| Ok(()));

        let app = test::init_service(
            App::new()
                .app_data(state_with_links(links))
                .service(add_offered_skill),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/profiles/{PROFILE}/offered-skills"))
                .set_json(serde_json::json!({
                    "skillId": SKILL,
                    "proficiency": "advanced",
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 201);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["proficiency"], "advanced");
    }

    #[actix_web::test]
    async fn duplicate_offered_skill_is_409() {
        let mut links = MockSkillLinkRepository::new();
        links.expect_add_offered().returning(|link| {
            Err(SkillLinkRepositoryError::DuplicateLink {
                profile_id: link.profile_id,
                skill_id: link.skill_id,
            })
        });

        let app = test::init_service(
            App::new()
                .app_data(state_with_links(links))
                .service(add_offered_skill),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/profiles/{PROFILE}/offered-skills"))
                .set_json(serde_json::json!({
                    "skillId": SKILL,
                    "proficiency": "beginner",
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 409);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["skillId"], SKILL);
    }

    #[actix_web::test]
    async fn unknown_skill_reference_is_400() {
        let mut links = MockSkillLinkRepository::new();
        links
            .expect_add_wanted()
            .returning(|_| Err(SkillLinkRepositoryError::UnknownReference));

        let app = test::init_service(
            App::new()
                .app_data(state_with_links(links))
                .service(add_wanted_skill),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/profiles/{PROFILE}/wanted-skills"))
                .set_json(serde_json::json!({
                    "skillId": SKILL,
                    "urgency": "high",
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 400);
    }

    #[actix_web::test]
    async fn removing_an_absent_link_is_404() {
        let mut links = MockSkillLinkRepository::new();
        links.expect_remove_offered().returning(|_, _| Ok(false));

        let app = test::init_service(
            App::new()
                .app_data(state_with_links(links))
                .service(remove_offered_skill),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/profiles/{PROFILE}/offered-skills/{SKILL}"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 404);
    }

    #[actix_web::test]
    async fn removing_a_wanted_link_returns_204() {
        let mut links = MockSkillLinkRepository::new();
        links.expect_remove_wanted().returning(|_, _| Ok(true));

        let app = test::init_service(
            App::new()
                .app_data(state_with_links(links))
                .service(remove_wanted_skill),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/profiles/{PROFILE}/wanted-skills/{SKILL}"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 204);
    }

    #[actix_web::test]
    async fn listing_offered_skills_returns_edges() {
        let mut links = MockSkillLinkRepository::new();
        links.expect_offered_skills().returning(|profile_id| {
            Ok(vec![OfferedSkill {
                profile_id,
                skill_id: SKILL.parse().expect("valid uuid"),
                proficiency: Proficiency::Expert,
            }])
        });

        let app = test::init_service(
            App::new()
                .app_data(state_with_links(links))
                .service(list_offered_skills),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/profiles/{PROFILE}/offered-skills"))
                .to_request(),
        )
        .await;

        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body[0]["skillId"], SKILL);
        assert_eq!(body[0]["proficiency"], "expert");
    }
}
