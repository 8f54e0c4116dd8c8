//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers every HTTP endpoint from the
//! inbound layer along with the request and response schemas those endpoints
//! exchange. The generated specification backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Availability, Error, ErrorCode, Proficiency, Skill, SwapStatus, Urgency};
use crate::inbound::http::matches::MatchBody;
use crate::inbound::http::profiles::{
    AddOfferedSkillBody, AddWantedSkillBody, OfferedSkillBody, ProfileBody, UpdateProfileBody,
    WantedSkillBody,
};
use crate::inbound::http::reviews::{CreateReviewBody, ReviewBody};
use crate::inbound::http::swaps::{CreateSwapBody, SwapBody, TransitionSwapBody};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SkillXchange backend API",
        description = "HTTP interface for skill discovery, match ranking, the \
                       swap lifecycle, reviews, and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::skills::list_skills,
        crate::inbound::http::profiles::get_profile,
        crate::inbound::http::profiles::update_profile,
        crate::inbound::http::profiles::list_offered_skills,
        crate::inbound::http::profiles::add_offered_skill,
        crate::inbound::http::profiles::remove_offered_skill,
        crate::inbound::http::profiles::list_wanted_skills,
        crate::inbound::http::profiles::add_wanted_skill,
        crate::inbound::http::profiles::remove_wanted_skill,
        crate::inbound::http::matches::list_matches,
        crate::inbound::http::swaps::create_swap,
        crate::inbound::http::swaps::transition_swap,
        crate::inbound::http::swaps::list_swaps,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Skill,
        Availability,
        Proficiency,
        Urgency,
        SwapStatus,
        ProfileBody,
        UpdateProfileBody,
        OfferedSkillBody,
        WantedSkillBody,
        AddOfferedSkillBody,
        AddWantedSkillBody,
        MatchBody,
        SwapBody,
        CreateSwapBody,
        TransitionSwapBody,
        ReviewBody,
        CreateReviewBody,
    )),
    tags(
        (name = "skills", description = "Skill catalogue browsing"),
        (name = "profiles", description = "Profiles and their skill links"),
        (name = "matches", description = "Compatibility-ranked partner discovery"),
        (name = "swaps", description = "Skill-swap lifecycle"),
        (name = "reviews", description = "Post-swap reviews"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
