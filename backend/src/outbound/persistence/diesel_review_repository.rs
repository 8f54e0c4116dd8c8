//! PostgreSQL-backed [`ReviewRepository`] implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{ProfileId, Review};

use super::diesel_helpers::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewReviewRow, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::reviews;

/// Diesel-backed implementation of the review repository port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewRepositoryError {
    map_basic_pool_error(error, ReviewRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> ReviewRepositoryError {
    map_basic_diesel_error(
        error,
        ReviewRepositoryError::query,
        ReviewRepositoryError::connection,
    )
}

/// Map insert failures; the (swap, reviewer) unique constraint carries
/// domain meaning.
fn map_insert_error(
    error: DieselError,
    reviewer_id: ProfileId,
    swap_id: Uuid,
) -> ReviewRepositoryError {
    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ReviewRepositoryError::DuplicateReview {
                reviewer_id,
                swap_id,
            }
        }
        _ => map_diesel_error(error),
    }
}

/// Convert a database row into a validated domain review.
fn row_to_review(row: ReviewRow) -> Result<Review, ReviewRepositoryError> {
    let ReviewRow {
        id,
        swap_id,
        reviewer_id,
        reviewee_id,
        rating,
        comment,
        created_at,
    } = row;

    Review::new(
        id,
        swap_id,
        ProfileId::from_uuid(reviewer_id),
        ProfileId::from_uuid(reviewee_id),
        rating,
        comment,
        created_at,
    )
    .map_err(|err| ReviewRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &Review) -> Result<Review, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewReviewRow {
            id: review.id(),
            swap_id: review.swap_id(),
            reviewer_id: *review.reviewer_id().as_uuid(),
            reviewee_id: *review.reviewee_id().as_uuid(),
            rating: review.rating(),
            comment: review.comment(),
            created_at: review.created_at(),
        };

        let stored = diesel::insert_into(reviews::table)
            .values(&row)
            .returning(ReviewRow::as_returning())
            .get_result::<ReviewRow>(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, review.reviewer_id(), review.swap_id()))?;

        row_to_review(stored)
    }

    async fn list_for_reviewee(
        &self,
        reviewee_id: ProfileId,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::reviewee_id.eq(reviewee_id.as_uuid()))
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_review).collect()
    }
}
