//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureMatchQuery, FixtureProfileRepository, FixtureReviewCommand, FixtureReviewRepository,
    FixtureSkillCatalogueRepository, FixtureSkillLinkRepository, FixtureSwapCommand,
    FixtureSwapQuery, MatchQuery, ProfileRepository, ReviewCommand, ReviewRepository,
    SkillCatalogueRepository, SkillLinkRepository, SwapCommand, SwapQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileRepository>,
    pub skills: Arc<dyn SkillCatalogueRepository>,
    pub skill_links: Arc<dyn SkillLinkRepository>,
    pub matches: Arc<dyn MatchQuery>,
    pub swap_command: Arc<dyn SwapCommand>,
    pub swap_query: Arc<dyn SwapQuery>,
    pub review_command: Arc<dyn ReviewCommand>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl HttpState {
    /// State wired entirely with fixture ports.
    ///
    /// Used by wiring tests and doc examples that never reach a store.
    pub fn fixture() -> Self {
        Self {
            profiles: Arc::new(FixtureProfileRepository),
            skills: Arc::new(FixtureSkillCatalogueRepository),
            skill_links: Arc::new(FixtureSkillLinkRepository),
            matches: Arc::new(FixtureMatchQuery),
            swap_command: Arc::new(FixtureSwapCommand),
            swap_query: Arc::new(FixtureSwapQuery),
            review_command: Arc::new(FixtureReviewCommand),
            reviews: Arc::new(FixtureReviewRepository),
        }
    }
}
