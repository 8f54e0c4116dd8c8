//! Skill catalogue data model and the skill-link edges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::profile::ProfileId;

/// A named, categorised capability in the shared catalogue.
///
/// Skills are immutable reference data: the catalogue is seeded by
/// migration and never mutated by the domain. Names are unique
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Stable catalogue identifier.
    pub id: Uuid,
    /// Unique display name, e.g. "Python" or "Guitar".
    pub name: String,
    /// Broad grouping, e.g. "Technology" or "Music".
    pub category: String,
    /// Optional longer description shown in the catalogue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Error returned when parsing an unknown enum label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} level: {value}")]
pub struct UnknownLevel {
    /// Field the label was parsed for (`proficiency` or `urgency`).
    pub field: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Self-assessed teaching proficiency on an offered skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    /// Stable storage identifier for this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Proficiency {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            other => Err(UnknownLevel {
                field: "proficiency",
                value: other.to_owned(),
            }),
        }
    }
}

/// How urgently a profile wishes to learn a wanted skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Stable storage identifier for this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(UnknownLevel {
                field: "urgency",
                value: other.to_owned(),
            }),
        }
    }
}

/// Edge expressing that a profile can teach a catalogue skill.
///
/// Unique per `(profile_id, skill_id)`; the store enforces this and the
/// skill-link repository surfaces duplicate inserts as conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferedSkill {
    pub profile_id: ProfileId,
    pub skill_id: Uuid,
    pub proficiency: Proficiency,
}

/// Edge expressing that a profile wishes to learn a catalogue skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WantedSkill {
    pub profile_id: ProfileId,
    pub skill_id: Uuid,
    pub urgency: Urgency,
}
