//! PostgreSQL-backed [`SkillCatalogueRepository`] implementation.
//!
//! The catalogue is read-only reference data seeded by migration, so this
//! adapter only ever queries.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Skill;
use crate::domain::ports::{SkillCatalogueRepository, SkillCatalogueRepositoryError};

use super::diesel_helpers::{map_basic_diesel_error, map_basic_pool_error};
use super::models::SkillRow;
use super::pool::{DbPool, PoolError};
use super::schema::skills;

/// Diesel-backed implementation of the skill catalogue port.
#[derive(Clone)]
pub struct DieselSkillCatalogueRepository {
    pool: DbPool,
}

impl DieselSkillCatalogueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SkillCatalogueRepositoryError {
    map_basic_pool_error(error, SkillCatalogueRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SkillCatalogueRepositoryError {
    map_basic_diesel_error(
        error,
        SkillCatalogueRepositoryError::query,
        SkillCatalogueRepositoryError::connection,
    )
}

fn row_to_skill(row: SkillRow) -> Skill {
    let SkillRow {
        id,
        name,
        category,
        description,
        created_at: _,
    } = row;
    Skill {
        id,
        name,
        category,
        description,
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl SkillCatalogueRepository for DieselSkillCatalogueRepository {
    async fn list(&self) -> Result<Vec<Skill>, SkillCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SkillRow> = skills::table
            .order(skills::name.asc())
            .select(SkillRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_skill).collect())
    }

    async fn search_by_name(
        &self,
        query: &str,
    ) -> Result<Vec<Skill>, SkillCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = format!("%{}%", escape_like(query));

        let rows: Vec<SkillRow> = skills::table
            .filter(skills::name.ilike(pattern))
            .order(skills::name.asc())
            .select(SkillRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_skill).collect())
    }

    async fn find_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Skill>, SkillCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SkillRow> = skills::table
            .filter(skills::id.eq_any(ids.to_vec()))
            .order(skills::name.asc())
            .select(SkillRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_skill).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and LIKE escaping.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            SkillCatalogueRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(
            repo_err,
            SkillCatalogueRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    #[case("python", "python")]
    #[case("100%", "100\\%")]
    #[case("snake_case", "snake\\_case")]
    #[case("back\\slash", "back\\\\slash")]
    fn like_wildcards_are_escaped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }
}
