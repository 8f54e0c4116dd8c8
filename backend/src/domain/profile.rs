//! Profile data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the profile constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyId,
    InvalidId,
    EmptyDisplayName,
    DisplayNameTooShort { min: usize },
    DisplayNameTooLong { max: usize },
    DisplayNameInvalidCharacters,
    UnknownAvailability { value: String },
    BioTooLong { max: usize },
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "profile id must not be empty"),
            Self::InvalidId => write!(f, "profile id must be a valid UUID"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooShort { min } => {
                write!(f, "display name must be at least {min} characters")
            }
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::DisplayNameInvalidCharacters => write!(
                f,
                "display name may only contain letters, numbers, spaces, or underscores",
            ),
            Self::UnknownAvailability { value } => {
                write!(f, "unknown availability tag: {value}")
            }
            Self::BioTooLong { max } => write!(f, "bio must be at most {max} characters"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Stable profile identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Validate and construct a [`ProfileId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(ProfileValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(ProfileValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| ProfileValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`ProfileId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProfileId> for String {
    fn from(value: ProfileId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ProfileId {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name shown to other users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

/// Minimum allowed length for a display name.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

fn display_name_char_allowed(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || c == '_'
}

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(ProfileValidationError::EmptyDisplayName);
        }

        let length = display_name.chars().count();
        if length < DISPLAY_NAME_MIN {
            return Err(ProfileValidationError::DisplayNameTooShort {
                min: DISPLAY_NAME_MIN,
            });
        }
        if length > DISPLAY_NAME_MAX {
            return Err(ProfileValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        if !display_name.chars().all(display_name_char_allowed) {
            return Err(ProfileValidationError::DisplayNameInvalidCharacters);
        }

        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Weekly availability tag a profile advertises for skill sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Weekdays,
    Weekends,
    Mornings,
    Afternoons,
    Evenings,
    Flexible,
}

impl Availability {
    /// Stable storage identifier for this tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekdays => "weekdays",
            Self::Weekends => "weekends",
            Self::Mornings => "mornings",
            Self::Afternoons => "afternoons",
            Self::Evenings => "evenings",
            Self::Flexible => "flexible",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = ProfileValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekdays" => Ok(Self::Weekdays),
            "weekends" => Ok(Self::Weekends),
            "mornings" => Ok(Self::Mornings),
            "afternoons" => Ok(Self::Afternoons),
            "evenings" => Ok(Self::Evenings),
            "flexible" => Ok(Self::Flexible),
            other => Err(ProfileValidationError::UnknownAvailability {
                value: other.to_owned(),
            }),
        }
    }
}

/// Maximum allowed length for a profile bio.
pub const BIO_MAX: usize = 1_000;

/// A registered user's public-facing record.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `display_name` satisfies [`DisplayName`] validation.
/// - `bio`, when present, is at most [`BIO_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    id: ProfileId,
    display_name: DisplayName,
    bio: Option<String>,
    location: Option<String>,
    availability: Vec<Availability>,
}

impl Profile {
    /// Build a new [`Profile`] from validated components.
    pub fn new(
        id: ProfileId,
        display_name: DisplayName,
        bio: Option<String>,
        location: Option<String>,
        availability: Vec<Availability>,
    ) -> Result<Self, ProfileValidationError> {
        if let Some(text) = bio.as_deref() {
            if text.chars().count() > BIO_MAX {
                return Err(ProfileValidationError::BioTooLong { max: BIO_MAX });
            }
        }
        Ok(Self {
            id,
            display_name,
            bio,
            location,
            availability,
        })
    }

    /// Stable profile identifier.
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Display name shown to other users.
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Free-text self description, if any.
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Free-text location, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Availability tags advertised for skill sessions.
    pub fn availability(&self) -> &[Availability] {
        &self.availability
    }
}
