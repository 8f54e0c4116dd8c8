//! Driving port for match discovery.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, MatchCandidate, ProfileId};

/// Default number of candidates returned when the caller gives no limit.
pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// Request to rank candidate partners for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesRequest {
    /// Profile whose wanted skills drive the search.
    pub profile_id: ProfileId,
    /// Maximum number of candidates to return; must be at least 1.
    pub limit: usize,
}

impl FindMatchesRequest {
    /// Build a request with the default limit.
    pub const fn with_default_limit(profile_id: ProfileId) -> Self {
        Self {
            profile_id,
            limit: DEFAULT_MATCH_LIMIT,
        }
    }
}

/// Driving port for read-only match discovery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchQuery: Send + Sync {
    /// Rank candidate partners for the requesting profile.
    ///
    /// Candidates are ordered by compatibility score descending, ties broken
    /// by ascending candidate profile UUID, and truncated to the requested
    /// limit. A profile with no wanted skills gets an empty ranking.
    async fn find_matches(
        &self,
        request: FindMatchesRequest,
    ) -> Result<Vec<MatchCandidate>, Error>;
}

/// Fixture query implementation returning no candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMatchQuery;

#[async_trait]
impl MatchQuery for FixtureMatchQuery {
    async fn find_matches(
        &self,
        _request: FindMatchesRequest,
    ) -> Result<Vec<MatchCandidate>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_query_returns_no_candidates() {
        let query = FixtureMatchQuery;
        let request = FindMatchesRequest::with_default_limit(ProfileId::random());
        assert_eq!(request.limit, DEFAULT_MATCH_LIMIT);

        let candidates = query
            .find_matches(request)
            .await
            .expect("fixture query succeeds");
        assert!(candidates.is_empty());
    }
}
