//! Review HTTP handlers.
//!
//! ```text
//! POST /api/v1/reviews
//! GET  /api/v1/profiles/{id}/reviews
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateReviewRequest, ReviewRepositoryError};
use crate::domain::{Error, Review};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_profile_id, parse_uuid};

fn map_review_repo_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review store unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review store error: {message}"))
        }
        ReviewRepositoryError::DuplicateReview {
            reviewer_id,
            swap_id,
        } => Error::conflict(format!(
            "profile {reviewer_id} already reviewed swap {swap_id}",
        )),
    }
}

/// One review as presented to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    pub id: Uuid,
    pub swap_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewBody {
    fn from(review: Review) -> Self {
        Self {
            id: review.id(),
            swap_id: review.swap_id(),
            reviewer_id: *review.reviewer_id().as_uuid(),
            reviewee_id: *review.reviewee_id().as_uuid(),
            rating: review.rating(),
            comment: review.comment().map(str::to_owned),
            created_at: review.created_at(),
        }
    }
}

/// Payload for leaving a review on a completed swap.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewBody {
    pub swap_id: String,
    pub reviewer_id: String,
    pub rating: i16,
    pub comment: Option<String>,
}

impl CreateReviewBody {
    fn into_request(self) -> Result<CreateReviewRequest, Error> {
        Ok(CreateReviewRequest {
            swap_id: parse_uuid(self.swap_id, FieldName::new("swapId"))?,
            reviewer_id: parse_profile_id(self.reviewer_id, FieldName::new("reviewerId"))?,
            rating: self.rating,
            comment: self.comment,
        })
    }
}

/// Leave a review about the other participant of a completed swap.
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = CreateReviewBody,
    responses(
        (status = 201, description = "Review recorded", body = ReviewBody),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 403, description = "Reviewer did not participate", body = Error),
        (status = 409, description = "Swap not completed or already reviewed", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    body: web::Json<CreateReviewBody>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner().into_request()?;
    let review = state.review_command.create_review(request).await?;
    Ok(HttpResponse::Created().json(ReviewBody::from(review)))
}

/// List the reviews a profile has received, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}/reviews",
    params(("id" = String, Path, description = "Profile UUID")),
    responses((status = 200, description = "Reviews received", body = Vec<ReviewBody>)),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/profiles/{id}/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ReviewBody>>> {
    let reviewee_id = parse_profile_id(path.into_inner(), FieldName::new("id"))?;
    let reviews = state
        .reviews
        .list_for_reviewee(reviewee_id)
        .await
        .map_err(map_review_repo_error)?;
    Ok(web::Json(reviews.into_iter().map(Into::into).collect()))
}
