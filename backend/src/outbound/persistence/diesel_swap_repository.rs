//! PostgreSQL-backed [`SwapRepository`] implementation.
//!
//! The status transition is a single conditional `UPDATE` filtered on both
//! the swap id and the expected status, so racing transitions resolve in the
//! database: exactly one racer matches the filter, the rest observe zero
//! affected rows and are mapped to a status conflict.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{SwapRepository, SwapRepositoryError};
use crate::domain::{ProfileId, SkillSwap, SkillSwapDraft, SwapStatus};

use super::diesel_helpers::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSkillSwapRow, SkillSwapRow};
use super::pool::{DbPool, PoolError};
use super::schema::skill_swaps;

/// Diesel-backed implementation of the swap repository port.
#[derive(Clone)]
pub struct DieselSwapRepository {
    pool: DbPool,
}

impl DieselSwapRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SwapRepositoryError {
    map_basic_pool_error(error, SwapRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SwapRepositoryError {
    map_basic_diesel_error(
        error,
        SwapRepositoryError::query,
        SwapRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain swap.
fn row_to_swap(row: SkillSwapRow) -> Result<SkillSwap, SwapRepositoryError> {
    let SkillSwapRow {
        id,
        requester_id,
        provider_id,
        requested_skill_id,
        offered_skill_id,
        status,
        message,
        scheduled_date,
        created_at,
        updated_at,
    } = row;

    let status = status
        .parse::<SwapStatus>()
        .map_err(|err| SwapRepositoryError::query(err.to_string()))?;

    SkillSwap::new(SkillSwapDraft {
        id,
        requester_id: ProfileId::from_uuid(requester_id),
        provider_id: ProfileId::from_uuid(provider_id),
        requested_skill_id,
        offered_skill_id,
        status,
        message,
        scheduled_date,
        created_at,
        updated_at,
    })
    .map_err(|err| SwapRepositoryError::query(err.to_string()))
}

async fn load_swap_row(
    conn: &mut AsyncPgConnection,
    swap_id: Uuid,
) -> Result<Option<SkillSwapRow>, SwapRepositoryError> {
    skill_swaps::table
        .filter(skill_swaps::id.eq(swap_id))
        .select(SkillSwapRow::as_select())
        .first::<SkillSwapRow>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)
}

#[async_trait]
impl SwapRepository for DieselSwapRepository {
    async fn insert(&self, swap: &SkillSwap) -> Result<SkillSwap, SwapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewSkillSwapRow {
            id: swap.id(),
            requester_id: *swap.requester_id().as_uuid(),
            provider_id: *swap.provider_id().as_uuid(),
            requested_skill_id: swap.requested_skill_id(),
            offered_skill_id: swap.offered_skill_id(),
            status: swap.status().as_str(),
            message: swap.message(),
            scheduled_date: swap.scheduled_date(),
            created_at: swap.created_at(),
            updated_at: swap.updated_at(),
        };

        let stored = diesel::insert_into(skill_swaps::table)
            .values(&row)
            .returning(SkillSwapRow::as_returning())
            .get_result::<SkillSwapRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_swap(stored)
    }

    async fn find_by_id(&self, swap_id: Uuid) -> Result<Option<SkillSwap>, SwapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = load_swap_row(&mut conn, swap_id).await?;
        row.map(row_to_swap).transpose()
    }

    async fn list_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<SkillSwap>, SwapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *profile_id.as_uuid();

        let rows: Vec<SkillSwapRow> = skill_swaps::table
            .filter(
                skill_swaps::requester_id
                    .eq(uuid)
                    .or(skill_swaps::provider_id.eq(uuid)),
            )
            .order((skill_swaps::created_at.desc(), skill_swaps::id.desc()))
            .select(SkillSwapRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_swap).collect()
    }

    async fn update_status(
        &self,
        swap_id: Uuid,
        expected: SwapStatus,
        new_status: SwapStatus,
    ) -> Result<SkillSwap, SwapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            skill_swaps::table
                .filter(skill_swaps::id.eq(swap_id))
                .filter(skill_swaps::status.eq(expected.as_str())),
        )
        .set((
            skill_swaps::status.eq(new_status.as_str()),
            skill_swaps::updated_at.eq(Utc::now()),
        ))
        .returning(SkillSwapRow::as_returning())
        .get_result::<SkillSwapRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        if let Some(row) = updated {
            return row_to_swap(row);
        }

        // Zero rows: either the swap is gone or its status moved underneath
        // us. Re-read to report which.
        match load_swap_row(&mut conn, swap_id).await? {
            Some(row) => {
                let actual = row
                    .status
                    .parse::<SwapStatus>()
                    .map_err(|err| SwapRepositoryError::query(err.to_string()))?;
                Err(SwapRepositoryError::StatusConflict { expected, actual })
            }
            None => Err(SwapRepositoryError::NotFound { swap_id }),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> SkillSwapRow {
        let now = Utc::now();
        SkillSwapRow {
            id: Uuid::new_v4(),
            requester_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            requested_skill_id: Uuid::new_v4(),
            offered_skill_id: Uuid::new_v4(),
            status: "pending".to_owned(),
            message: Some("keen to learn".to_owned()),
            scheduled_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, SwapRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, SwapRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_builds_domain_swap(valid_row: SkillSwapRow) {
        let swap = row_to_swap(valid_row).expect("valid row converts");
        assert_eq!(swap.status(), SwapStatus::Pending);
        assert_eq!(swap.message(), Some("keen to learn"));
    }

    #[rstest]
    fn row_conversion_rejects_unknown_status(mut valid_row: SkillSwapRow) {
        valid_row.status = "negotiating".to_owned();

        let error = row_to_swap(valid_row).expect_err("unknown status fails");
        assert!(matches!(error, SwapRepositoryError::Query { .. }));
        assert!(error.to_string().contains("negotiating"));
    }

    #[rstest]
    fn row_conversion_rejects_same_party_row(mut valid_row: SkillSwapRow) {
        valid_row.provider_id = valid_row.requester_id;

        let error = row_to_swap(valid_row).expect_err("corrupt row fails");
        assert!(matches!(error, SwapRepositoryError::Query { .. }));
    }
}
