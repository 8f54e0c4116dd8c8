//! Match discovery: ranking partners whose offered skills overlap a
//! profile's wanted skills.
//!
//! The scoring policy is deliberately simple: each matched skill is worth
//! [`POINTS_PER_MATCH`] points, saturating at 100 for four or more
//! matches. It lives in [`compatibility_score`] so it can be replaced
//! without touching the grouping or ranking logic.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{
    FindMatchesRequest, MatchQuery, ProfileRepository, ProfileRepositoryError,
    SkillLinkRepository, SkillLinkRepositoryError,
};
use crate::domain::{Error, Profile, ProfileId};

/// Points contributed by each matched skill.
pub const POINTS_PER_MATCH: u32 = 25;
/// Upper bound on a compatibility score.
pub const SCORE_CAP: u32 = 100;

/// Compatibility score for a candidate matching `matched` wanted skills.
///
/// Monotonic non-decreasing in `matched` and capped at [`SCORE_CAP`].
///
/// # Examples
/// ```
/// use backend::domain::compatibility_score;
///
/// assert_eq!(compatibility_score(0), 0);
/// assert_eq!(compatibility_score(1), 25);
/// assert_eq!(compatibility_score(4), 100);
/// assert_eq!(compatibility_score(9), 100);
/// ```
pub fn compatibility_score(matched: usize) -> u32 {
    u32::try_from(matched)
        .unwrap_or(u32::MAX)
        .saturating_mul(POINTS_PER_MATCH)
        .min(SCORE_CAP)
}

/// A derived, non-persisted suggestion of a compatible exchange partner.
///
/// `matching_skill_ids` is always a subset of the requester's wanted set
/// intersected with the candidate's offered set, computed fresh per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// The candidate partner.
    pub profile: Profile,
    /// Wanted skills of the requester that this candidate offers.
    pub matching_skill_ids: Vec<Uuid>,
    /// Overlap strength, 0 to 100.
    pub compatibility_score: u32,
}

/// Match discovery service implementing the [`MatchQuery`] driving port.
///
/// Stateless between calls: every query reads current skill links from the
/// store, groups the offered edges in memory, and ranks the result. Store
/// failures propagate as data-access errors; an empty wanted set is a valid
/// "no expressed interest yet" state and yields an empty ranking.
#[derive(Clone)]
pub struct MatchService<L, P> {
    skill_links: Arc<L>,
    profiles: Arc<P>,
}

impl<L, P> MatchService<L, P> {
    /// Create a new service over the skill-link and profile repositories.
    pub fn new(skill_links: Arc<L>, profiles: Arc<P>) -> Self {
        Self {
            skill_links,
            profiles,
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

fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
    }
}

#[async_trait]
impl<L, P> MatchQuery for MatchService<L, P>
where
    L: SkillLinkRepository,
    P: ProfileRepository,
{
    async fn find_matches(
        &self,
        request: FindMatchesRequest,
    ) -> Result<Vec<MatchCandidate>, Error> {
        if request.limit == 0 {
            return Err(Error::invalid_request("limit must be at least 1"));
        }

        let requester_id = request.profile_id;
        self.profiles
            .find_by_id(requester_id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found(format!("profile {requester_id} not found")))?;

        let wanted = self
            .skill_links
            .wanted_skill_ids(requester_id)
            .await
            .map_err(map_link_error)?;
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let edges = self
            .skill_links
            .offered_edges_for_skills(&wanted, requester_id)
            .await
            .map_err(map_link_error)?;

        // Group edges by candidate. BTreeMap keys give ascending profile
        // UUIDs, which is the documented tiebreak once the stable sort by
        // score runs below.
        let mut by_candidate: BTreeMap<ProfileId, Vec<Uuid>> = BTreeMap::new();
        for edge in edges {
            by_candidate.entry(edge.profile_id).or_default().push(edge.skill_id);
        }

        let candidate_ids: Vec<ProfileId> = by_candidate.keys().copied().collect();
        let mut profiles: BTreeMap<ProfileId, Profile> = self
            .profiles
            .find_by_ids(&candidate_ids)
            .await
            .map_err(map_profile_error)?
            .into_iter()
            .map(|profile| (profile.id(), profile))
            .collect();

        let mut candidates: Vec<MatchCandidate> = by_candidate
            .into_iter()
            .filter_map(|(profile_id, matching_skill_ids)| {
                let profile = profiles.remove(&profile_id)?;
                let compatibility_score = compatibility_score(matching_skill_ids.len());
                Some(MatchCandidate {
                    profile,
                    matching_skill_ids,
                    compatibility_score,
                })
            })
            .collect();

        // Candidates are built in ascending profile-id order; sort_by_key
        // is stable, so equal scores keep that order.
        candidates.sort_by_key(|candidate| std::cmp::Reverse(candidate.compatibility_score));
        candidates.truncate(request.limit);
        Ok(candidates)
    }
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
