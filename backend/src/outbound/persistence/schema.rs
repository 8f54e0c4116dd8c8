//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered user profiles.
    profiles (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name (3 to 64 characters).
        display_name -> Varchar,
        /// Optional free-text self description.
        bio -> Nullable<Text>,
        /// Optional free-text location.
        location -> Nullable<Varchar>,
        /// Availability tags, stored as lowercase labels.
        availability -> Array<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared skill catalogue, seeded by migration.
    skills (id) {
        id -> Uuid,
        /// Unique display name, compared case-insensitively.
        name -> Varchar,
        category -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skills a profile offers to teach.
    profile_skills_offered (profile_id, skill_id) {
        profile_id -> Uuid,
        skill_id -> Uuid,
        /// Self-assessed level: beginner, intermediate, advanced, expert.
        proficiency -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skills a profile wants to learn.
    profile_skills_wanted (profile_id, skill_id) {
        profile_id -> Uuid,
        skill_id -> Uuid,
        /// Urgency label: low, medium, high.
        urgency -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skill-for-skill exchange records with their lifecycle status.
    skill_swaps (id) {
        id -> Uuid,
        requester_id -> Uuid,
        provider_id -> Uuid,
        requested_skill_id -> Uuid,
        offered_skill_id -> Uuid,
        /// Lifecycle status label; transitions are enforced by the domain.
        status -> Varchar,
        message -> Nullable<Text>,
        scheduled_date -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Post-swap ratings, unique per (swap, reviewer).
    reviews (id) {
        id -> Uuid,
        swap_id -> Uuid,
        reviewer_id -> Uuid,
        reviewee_id -> Uuid,
        /// Star rating between 1 and 5, checked by constraint.
        rating -> Int2,
        comment -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(profile_skills_offered -> profiles (profile_id));
diesel::joinable!(profile_skills_offered -> skills (skill_id));
diesel::joinable!(profile_skills_wanted -> profiles (profile_id));
diesel::joinable!(profile_skills_wanted -> skills (skill_id));
diesel::joinable!(reviews -> skill_swaps (swap_id));

diesel::allow_tables_to_appear_in_same_query!(
    profiles,
    skills,
    profile_skills_offered,
    profile_skills_wanted,
    skill_swaps,
    reviews,
);
