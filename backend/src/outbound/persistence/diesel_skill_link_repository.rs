//! PostgreSQL-backed [`SkillLinkRepository`] implementation.
//!
//! Persists the offered/wanted edges between profiles and catalogue skills
//! and runs the grouped offered-edge scan behind match discovery.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{OfferedEdge, SkillLinkRepository, SkillLinkRepositoryError};
use crate::domain::{OfferedSkill, ProfileId, WantedSkill};

use super::diesel_helpers::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOfferedSkillRow, NewWantedSkillRow, OfferedSkillRow, WantedSkillRow};
use super::pool::{DbPool, PoolError};
use super::schema::{profile_skills_offered, profile_skills_wanted};

/// Diesel-backed implementation of the skill link repository port.
#[derive(Clone)]
pub struct DieselSkillLinkRepository {
    pool: DbPool,
}

impl DieselSkillLinkRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SkillLinkRepositoryError {
    map_basic_pool_error(error, SkillLinkRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> SkillLinkRepositoryError {
    map_basic_diesel_error(
        error,
        SkillLinkRepositoryError::query,
        SkillLinkRepositoryError::connection,
    )
}

/// Map insert failures, recognising the constraint violations that carry
/// domain meaning for edge creation.
fn map_insert_error(
    error: DieselError,
    profile_id: ProfileId,
    skill_id: Uuid,
) -> SkillLinkRepositoryError {
    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            SkillLinkRepositoryError::DuplicateLink {
                profile_id,
                skill_id,
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            SkillLinkRepositoryError::UnknownReference
        }
        _ => map_diesel_error(error),
    }
}

fn row_to_offered(row: OfferedSkillRow) -> Result<OfferedSkill, SkillLinkRepositoryError> {
    let proficiency = row
        .proficiency
        .parse()
        .map_err(|err: crate::domain::skill::UnknownLevel| {
            SkillLinkRepositoryError::query(err.to_string())
        })?;
    Ok(OfferedSkill {
        profile_id: ProfileId::from_uuid(row.profile_id),
        skill_id: row.skill_id,
        proficiency,
    })
}

fn row_to_wanted(row: WantedSkillRow) -> Result<WantedSkill, SkillLinkRepositoryError> {
    let urgency = row
        .urgency
        .parse()
        .map_err(|err: crate::domain::skill::UnknownLevel| {
            SkillLinkRepositoryError::query(err.to_string())
        })?;
    Ok(WantedSkill {
        profile_id: ProfileId::from_uuid(row.profile_id),
        skill_id: row.skill_id,
        urgency,
    })
}

#[async_trait]
impl SkillLinkRepository for DieselSkillLinkRepository {
    async fn wanted_skill_ids(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<Uuid>, SkillLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        profile_skills_wanted::table
            .filter(profile_skills_wanted::profile_id.eq(profile_id.as_uuid()))
            .select(profile_skills_wanted::skill_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn offered_skills(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<OfferedSkill>, SkillLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OfferedSkillRow> = profile_skills_offered::table
            .filter(profile_skills_offered::profile_id.eq(profile_id.as_uuid()))
            .select(OfferedSkillRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_offered).collect()
    }

    async fn wanted_skills(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<WantedSkill>, SkillLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<WantedSkillRow> = profile_skills_wanted::table
            .filter(profile_skills_wanted::profile_id.eq(profile_id.as_uuid()))
            .select(WantedSkillRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_wanted).collect()
    }

    async fn offered_edges_for_skills(
        &self,
        skill_ids: &[Uuid],
        exclude_profile_id: ProfileId,
    ) -> Result<Vec<OfferedEdge>, SkillLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Uuid, Uuid)> = profile_skills_offered::table
            .filter(profile_skills_offered::skill_id.eq_any(skill_ids.to_vec()))
            .filter(profile_skills_offered::profile_id.ne(exclude_profile_id.as_uuid()))
            .select((
                profile_skills_offered::profile_id,
                profile_skills_offered::skill_id,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(profile_id, skill_id)| OfferedEdge {
                profile_id: ProfileId::from_uuid(profile_id),
                skill_id,
            })
            .collect())
    }

    async fn add_offered(&self, link: &OfferedSkill) -> Result<(), SkillLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewOfferedSkillRow {
            profile_id: *link.profile_id.as_uuid(),
            skill_id: link.skill_id,
            proficiency: link.proficiency.as_str(),
        };

        diesel::insert_into(profile_skills_offered::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, link.profile_id, link.skill_id))
    }

    async fn add_wanted(&self, link: &WantedSkill) -> Result<(), SkillLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewWantedSkillRow {
            profile_id: *link.profile_id.as_uuid(),
            skill_id: link.skill_id,
            urgency: link.urgency.as_str(),
        };

        diesel::insert_into(profile_skills_wanted::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, link.profile_id, link.skill_id))
    }

    async fn remove_offered(
        &self,
        profile_id: ProfileId,
        skill_id: Uuid,
    ) -> Result<bool, SkillLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            profile_skills_offered::table
                .filter(profile_skills_offered::profile_id.eq(profile_id.as_uuid()))
                .filter(profile_skills_offered::skill_id.eq(skill_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn remove_wanted(
        &self,
        profile_id: ProfileId,
        skill_id: Uuid,
    ) -> Result<bool, SkillLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            profile_skills_wanted::table
                .filter(profile_skills_wanted::profile_id.eq(profile_id.as_uuid()))
                .filter(profile_skills_wanted::skill_id.eq(skill_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
