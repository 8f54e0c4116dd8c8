//! Post-swap review data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profile::ProfileId;

/// Minimum allowed rating.
pub const RATING_MIN: i16 = 1;
/// Maximum allowed rating.
pub const RATING_MAX: i16 = 5;
/// Maximum allowed length for a review comment.
pub const COMMENT_MAX: usize = 1_000;

/// Validation errors raised when building a review.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    /// Rating must lie within `[RATING_MIN, RATING_MAX]`.
    #[error("rating must be between {min} and {max}")]
    RatingOutOfRange { min: i16, max: i16 },
    /// Reviewer and reviewee must be different profiles.
    #[error("reviewer and reviewee must be different profiles")]
    SelfReview,
    /// The comment exceeds [`COMMENT_MAX`] characters.
    #[error("comment must be at most {max} characters")]
    CommentTooLong { max: usize },
}

/// A rating one participant leaves about the other after a completed swap.
///
/// ## Invariants
/// - `rating` lies within `[RATING_MIN, RATING_MAX]`.
/// - `reviewer_id != reviewee_id`.
///
/// That both profiles participated in the reviewed swap and that the swap
/// is completed are enforced by the review service at creation, since they
/// require a swap lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    id: Uuid,
    swap_id: Uuid,
    reviewer_id: ProfileId,
    reviewee_id: ProfileId,
    rating: i16,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Validate and construct a [`Review`].
    #[expect(clippy::too_many_arguments, reason = "flat constructor mirrors the stored record")]
    pub fn new(
        id: Uuid,
        swap_id: Uuid,
        reviewer_id: ProfileId,
        reviewee_id: ProfileId,
        rating: i16,
        comment: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ReviewValidationError> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(ReviewValidationError::RatingOutOfRange {
                min: RATING_MIN,
                max: RATING_MAX,
            });
        }
        if reviewer_id == reviewee_id {
            return Err(ReviewValidationError::SelfReview);
        }
        if let Some(text) = comment.as_deref() {
            if text.chars().count() > COMMENT_MAX {
                return Err(ReviewValidationError::CommentTooLong { max: COMMENT_MAX });
            }
        }
        Ok(Self {
            id,
            swap_id,
            reviewer_id,
            reviewee_id,
            rating,
            comment,
            created_at,
        })
    }

    /// Stable review identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The completed swap this review is about.
    pub const fn swap_id(&self) -> Uuid {
        self.swap_id
    }

    /// Profile that wrote the review.
    pub const fn reviewer_id(&self) -> ProfileId {
        self.reviewer_id
    }

    /// Profile being reviewed.
    pub const fn reviewee_id(&self) -> ProfileId {
        self.reviewee_id
    }

    /// Star rating, 1 to 5.
    pub const fn rating(&self) -> i16 {
        self.rating
    }

    /// Optional free-text comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Record creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
