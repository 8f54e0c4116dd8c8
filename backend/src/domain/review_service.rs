//! Review domain service.
//!
//! Implements [`ReviewCommand`]: a review may only be written by a
//! participant of a completed swap, and it is always about the other
//! participant.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    CreateReviewRequest, ReviewCommand, ReviewRepository, ReviewRepositoryError, SwapRepository,
    SwapRepositoryError,
};
use crate::domain::{Error, Review, SwapParty, SwapStatus};

fn map_swap_repo_error(error: SwapRepositoryError) -> Error {
    match error {
        SwapRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("swap repository unavailable: {message}"))
        }
        other => Error::internal(format!("swap repository error: {other}")),
    }
}

fn map_review_repo_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::DuplicateReview { swap_id, .. } => {
            Error::conflict(format!("swap {swap_id} has already been reviewed by this profile"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
    }
}

/// Review service over the swap and review repositories.
#[derive(Clone)]
pub struct ReviewService<S, R> {
    swaps: Arc<S>,
    reviews: Arc<R>,
}

impl<S, R> ReviewService<S, R> {
    /// Create a new service with its repositories.
    pub fn new(swaps: Arc<S>, reviews: Arc<R>) -> Self {
        Self { swaps, reviews }
    }
}

#[async_trait]
impl<S, R> ReviewCommand for ReviewService<S, R>
where
    S: SwapRepository,
    R: ReviewRepository,
{
    async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, Error> {
        let swap = self
            .swaps
            .find_by_id(request.swap_id)
            .await
            .map_err(map_swap_repo_error)?
            .ok_or_else(|| Error::not_found(format!("swap {} not found", request.swap_id)))?;

        if swap.status() != SwapStatus::Completed {
            return Err(Error::conflict("only completed swaps can be reviewed")
                .with_details(json!({ "currentStatus": swap.status() })));
        }
        let party = swap.party_of(request.reviewer_id).ok_or_else(|| {
            Error::forbidden(format!(
                "profile {} is not a participant in this swap",
                request.reviewer_id
            ))
        })?;
        let reviewee_id = match party {
            SwapParty::Requester => swap.provider_id(),
            SwapParty::Provider => swap.requester_id(),
        };

        let review = Review::new(
            Uuid::new_v4(),
            request.swap_id,
            request.reviewer_id,
            reviewee_id,
            request.rating,
            request.comment,
            Utc::now(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        let stored = self
            .reviews
            .insert(&review)
            .await
            .map_err(map_review_repo_error)?;
        info!(
            review_id = %stored.id(),
            swap_id = %stored.swap_id(),
            reviewer_id = %stored.reviewer_id(),
            "review recorded"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for [`ReviewService`] over mocked repositories.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockReviewRepository, MockSwapRepository};
    use crate::domain::{ErrorCode, ProfileId, SkillSwap, SkillSwapDraft};

    fn service(
        swaps: MockSwapRepository,
        reviews: MockReviewRepository,
    ) -> ReviewService<MockSwapRepository, MockReviewRepository> {
        ReviewService::new(Arc::new(swaps), Arc::new(reviews))
    }

    fn swap_with_status(
        requester_id: ProfileId,
        provider_id: ProfileId,
        status: SwapStatus,
    ) -> SkillSwap {
        let now = Utc::now();
        SkillSwap::new(SkillSwapDraft {
            id: Uuid::new_v4(),
            requester_id,
            provider_id,
            requested_skill_id: Uuid::new_v4(),
            offered_skill_id: Uuid::new_v4(),
            status,
            message: None,
            scheduled_date: None,
            created_at: now,
            updated_at: now,
        })
        .expect("valid swap")
    }

    #[rstest]
    #[tokio::test]
    async fn requester_reviews_the_provider() {
        let requester_id = ProfileId::random();
        let provider_id = ProfileId::random();
        let completed = swap_with_status(requester_id, provider_id, SwapStatus::Completed);
        let swap_id = completed.id();

        let mut swaps = MockSwapRepository::new();
        swaps
            .expect_find_by_id()
            .returning(move |_| Ok(Some(completed.clone())));
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_insert()
            .withf(move |review| {
                review.reviewer_id() == requester_id && review.reviewee_id() == provider_id
            })
            .returning(|review| Ok(review.clone()));

        let review = service(swaps, reviews)
            .create_review(CreateReviewRequest {
                swap_id,
                reviewer_id: requester_id,
                rating: 5,
                comment: Some("patient and well prepared".to_owned()),
            })
            .await
            .expect("review recorded");
        assert_eq!(review.rating(), 5);
        assert_eq!(review.reviewee_id(), provider_id);
    }

    #[rstest]
    #[case(SwapStatus::Pending)]
    #[case(SwapStatus::Accepted)]
    #[case(SwapStatus::Rejected)]
    #[case(SwapStatus::Cancelled)]
    #[tokio::test]
    async fn only_completed_swaps_can_be_reviewed(#[case] status: SwapStatus) {
        let requester_id = ProfileId::random();
        let swap = swap_with_status(requester_id, ProfileId::random(), status);
        let swap_id = swap.id();

        let mut swaps = MockSwapRepository::new();
        swaps
            .expect_find_by_id()
            .returning(move |_| Ok(Some(swap.clone())));

        let err = service(swaps, MockReviewRepository::new())
            .create_review(CreateReviewRequest {
                swap_id,
                reviewer_id: requester_id,
                rating: 4,
                comment: None,
            })
            .await
            .expect_err("incomplete swap refused");
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn non_participants_may_not_review() {
        let swap = swap_with_status(
            ProfileId::random(),
            ProfileId::random(),
            SwapStatus::Completed,
        );
        let swap_id = swap.id();

        let mut swaps = MockSwapRepository::new();
        swaps
            .expect_find_by_id()
            .returning(move |_| Ok(Some(swap.clone())));

        let err = service(swaps, MockReviewRepository::new())
            .create_review(CreateReviewRequest {
                swap_id,
                reviewer_id: ProfileId::random(),
                rating: 4,
                comment: None,
            })
            .await
            .expect_err("stranger refused");
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn out_of_range_rating_is_invalid() {
        let requester_id = ProfileId::random();
        let swap = swap_with_status(requester_id, ProfileId::random(), SwapStatus::Completed);
        let swap_id = swap.id();

        let mut swaps = MockSwapRepository::new();
        swaps
            .expect_find_by_id()
            .returning(move |_| Ok(Some(swap.clone())));

        let err = service(swaps, MockReviewRepository::new())
            .create_review(CreateReviewRequest {
                swap_id,
                reviewer_id: requester_id,
                rating: 6,
                comment: None,
            })
            .await
            .expect_err("rating out of range");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_review_is_a_conflict() {
        let requester_id = ProfileId::random();
        let swap = swap_with_status(requester_id, ProfileId::random(), SwapStatus::Completed);
        let swap_id = swap.id();

        let mut swaps = MockSwapRepository::new();
        swaps
            .expect_find_by_id()
            .returning(move |_| Ok(Some(swap.clone())));
        let mut reviews = MockReviewRepository::new();
        reviews.expect_insert().returning(move |review| {
            Err(ReviewRepositoryError::DuplicateReview {
                reviewer_id: review.reviewer_id(),
                swap_id: review.swap_id(),
            })
        });

        let err = service(swaps, reviews)
            .create_review(CreateReviewRequest {
                swap_id,
                reviewer_id: requester_id,
                rating: 3,
                comment: None,
            })
            .await
            .expect_err("second review refused");
        assert_eq!(err.code, ErrorCode::Conflict);
    }
}
