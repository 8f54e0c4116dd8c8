//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    profile_skills_offered, profile_skills_wanted, profiles, reviews, skill_swaps, skills,
};

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub availability: Vec<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating a profile's editable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileChangeset<'a> {
    pub display_name: &'a str,
    pub bio: Option<&'a str>,
    pub location: Option<&'a str>,
    pub availability: Vec<String>,
}

/// Row struct for reading from the skills table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading offered-skill edges.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profile_skills_offered)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OfferedSkillRow {
    pub profile_id: Uuid,
    pub skill_id: Uuid,
    pub proficiency: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating offered-skill edges.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profile_skills_offered)]
pub(crate) struct NewOfferedSkillRow<'a> {
    pub profile_id: Uuid,
    pub skill_id: Uuid,
    pub proficiency: &'a str,
}

/// Row struct for reading wanted-skill edges.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profile_skills_wanted)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WantedSkillRow {
    pub profile_id: Uuid,
    pub skill_id: Uuid,
    pub urgency: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating wanted-skill edges.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profile_skills_wanted)]
pub(crate) struct NewWantedSkillRow<'a> {
    pub profile_id: Uuid,
    pub skill_id: Uuid,
    pub urgency: &'a str,
}

/// Row struct for reading from the skill_swaps table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skill_swaps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillSwapRow {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub provider_id: Uuid,
    pub requested_skill_id: Uuid,
    pub offered_skill_id: Uuid,
    pub status: String,
    pub message: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating skill swap records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skill_swaps)]
pub(crate) struct NewSkillSwapRow<'a> {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub provider_id: Uuid,
    pub requested_skill_id: Uuid,
    pub offered_skill_id: Uuid,
    pub status: &'a str,
    pub message: Option<&'a str>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the reviews table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub swap_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating review records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub id: Uuid,
    pub swap_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub rating: i16,
    pub comment: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}
