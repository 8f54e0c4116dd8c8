//! PostgreSQL-backed [`ProfileRepository`] implementation using Diesel ORM.
//!
//! Rows are rebuilt through the validated domain constructors so data that
//! slipped past the database constraints still cannot reach the domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError, ProfileUpdate};
use crate::domain::{Availability, DisplayName, Profile, ProfileId};

use super::diesel_helpers::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ProfileChangeset, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the profile repository port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn parse_availability(tags: Vec<String>) -> Result<Vec<Availability>, ProfileRepositoryError> {
    tags.into_iter()
        .map(|tag| {
            tag.parse::<Availability>()
                .map_err(|err| ProfileRepositoryError::query(err.to_string()))
        })
        .collect()
}

/// Convert a database row into a validated domain profile.
fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let ProfileRow {
        id,
        display_name,
        bio,
        location,
        availability,
        created_at: _,
        updated_at: _,
    } = row;

    let display_name = DisplayName::new(display_name)
        .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
    let availability = parse_availability(availability)?;

    Profile::new(
        ProfileId::from_uuid(id),
        display_name,
        bio,
        location,
        availability,
    )
    .map_err(|err| ProfileRepositoryError::query(err.to_string()))
}

fn changeset(update: &ProfileUpdate) -> ProfileChangeset<'_> {
    ProfileChangeset {
        display_name: update.display_name.as_ref(),
        bio: update.bio.as_deref(),
        location: update.location.as_deref(),
        availability: update
            .availability
            .iter()
            .map(|tag| tag.as_str().to_owned())
            .collect(),
    }
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = profiles::table
            .filter(profiles::id.eq(id.as_uuid()))
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn find_by_ids(
        &self,
        ids: &[ProfileId],
    ) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<ProfileRow> = profiles::table
            .filter(profiles::id.eq_any(uuids))
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn update(
        &self,
        id: ProfileId,
        update: ProfileUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(profiles::table.filter(profiles::id.eq(id.as_uuid())))
            .set(changeset(&update))
            .returning(ProfileRow::as_returning())
            .get_result::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }
}
