//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{MatchService, ReviewService, SwapService};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::matches::list_matches;
use backend::inbound::http::profiles::{
    add_offered_skill, add_wanted_skill, get_profile, list_offered_skills, list_wanted_skills,
    remove_offered_skill, remove_wanted_skill, update_profile,
};
use backend::inbound::http::reviews::{create_review, list_reviews};
use backend::inbound::http::skills::list_skills;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::swaps::{create_swap, list_swaps, transition_swap};
use backend::outbound::persistence::{
    DieselProfileRepository, DieselReviewRepository, DieselSkillCatalogueRepository,
    DieselSkillLinkRepository, DieselSwapRepository,
};

/// Build the HTTP port bundle from configuration.
///
/// With a database pool, every port is backed by a Diesel adapter and the
/// domain services run on top of them. Without one, fixture ports keep the
/// wiring testable offline.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let Some(pool) = &config.db_pool else {
        return web::Data::new(HttpState::fixture());
    };

    let profiles = Arc::new(DieselProfileRepository::new(pool.clone()));
    let skills = Arc::new(DieselSkillCatalogueRepository::new(pool.clone()));
    let skill_links = Arc::new(DieselSkillLinkRepository::new(pool.clone()));
    let swaps = Arc::new(DieselSwapRepository::new(pool.clone()));
    let reviews = Arc::new(DieselReviewRepository::new(pool.clone()));

    let match_service = Arc::new(MatchService::new(skill_links.clone(), profiles.clone()));
    let swap_service = Arc::new(SwapService::new(swaps.clone(), skill_links.clone()));
    let review_service = Arc::new(ReviewService::new(swaps.clone(), reviews.clone()));

    web::Data::new(HttpState {
        profiles,
        skills,
        skill_links,
        matches: match_service,
        swap_command: swap_service.clone(),
        swap_query: swap_service,
        review_command: review_service,
        reviews,
    })
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_skills)
        .service(get_profile)
        .service(update_profile)
        .service(list_offered_skills)
        .service(add_offered_skill)
        .service(remove_offered_skill)
        .service(list_wanted_skills)
        .service(add_wanted_skill)
        .service(remove_wanted_skill)
        .service(list_matches)
        .service(create_swap)
        .service(transition_swap)
        .service(list_swaps)
        .service(create_review)
        .service(list_reviews);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
