//! Ports for post-swap reviews: the persistence port and the driving
//! command validating review preconditions against the swap record.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, ProfileId, Review};

/// Errors raised by review repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewRepositoryError {
    /// Repository connection could not be established.
    #[error("review repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("review repository query failed: {message}")]
    Query { message: String },
    /// The reviewer already reviewed this swap.
    #[error("profile {reviewer_id} already reviewed swap {swap_id}")]
    DuplicateReview { reviewer_id: ProfileId, swap_id: Uuid },
}

impl ReviewRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for review storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a validated review.
    async fn insert(&self, review: &Review) -> Result<Review, ReviewRepositoryError>;

    /// Reviews received by a profile, newest first.
    async fn list_for_reviewee(
        &self,
        reviewee_id: ProfileId,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;
}

/// Fixture implementation for tests that do not exercise review storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewRepository;

#[async_trait]
impl ReviewRepository for FixtureReviewRepository {
    async fn insert(&self, review: &Review) -> Result<Review, ReviewRepositoryError> {
        Ok(review.clone())
    }

    async fn list_for_reviewee(
        &self,
        _reviewee_id: ProfileId,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        Ok(Vec::new())
    }
}

/// Request to leave a review on a completed swap.
///
/// The reviewee is derived, not supplied: it is the other participant of
/// the swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    /// The completed swap being reviewed.
    pub swap_id: Uuid,
    /// Participant writing the review.
    pub reviewer_id: ProfileId,
    /// Star rating, 1 to 5.
    pub rating: i16,
    /// Optional free-text comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Driving port for review write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Validate that the swap is completed and the reviewer participated,
    /// then persist the review about the other participant.
    async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, Error>;
}

/// Fixture command implementation that refuses every review.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewCommand;

#[async_trait]
impl ReviewCommand for FixtureReviewCommand {
    async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, Error> {
        Err(Error::not_found(format!("swap {} not found", request.swap_id)))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_repository_list_returns_empty() {
        let repo = FixtureReviewRepository;
        let reviews = repo
            .list_for_reviewee(ProfileId::random())
            .await
            .expect("fixture list succeeds");
        assert!(reviews.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_command_reports_missing_swap() {
        let command = FixtureReviewCommand;
        let err = command
            .create_review(CreateReviewRequest {
                swap_id: Uuid::new_v4(),
                reviewer_id: ProfileId::random(),
                rating: 5,
                comment: None,
            })
            .await
            .expect_err("fixture has no swaps");
        assert_eq!(err.code, crate::domain::ErrorCode::NotFound);
    }
}
