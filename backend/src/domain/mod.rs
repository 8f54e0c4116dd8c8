//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers, plus the services driving match discovery and the
//! skill-swap lifecycle. Types are immutable once constructed; invariants
//! and serde contracts are documented on each type.

pub mod error;
pub mod matching;
pub mod ports;
pub mod profile;
pub mod review;
pub mod review_service;
pub mod skill;
pub mod swap_service;
pub mod swaps;

pub use self::error::{Error, ErrorCode};
pub use self::matching::{MatchCandidate, MatchService, compatibility_score};
pub use self::profile::{Availability, DisplayName, Profile, ProfileId, ProfileValidationError};
pub use self::review::{Review, ReviewValidationError};
pub use self::review_service::ReviewService;
pub use self::skill::{OfferedSkill, Proficiency, Skill, Urgency, WantedSkill};
pub use self::swap_service::SwapService;
pub use self::swaps::{
    ActorRule, SkillSwap, SkillSwapDraft, SwapParty, SwapStatus, SwapTransitionError,
    SwapValidationError,
};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
