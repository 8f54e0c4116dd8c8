//! Driving port for swap reads and the derived presentation views.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ProfileId, SkillSwap, SwapParty, SwapStatus};

/// Derived view filters the presentation layer uses over a profile's swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapView {
    /// Every swap the profile participates in.
    All,
    /// Pending swaps where the profile is the provider.
    Incoming,
    /// Swaps the profile opened, in any status.
    Outgoing,
    /// Accepted swaps.
    Active,
    /// Completed swaps.
    Completed,
}

impl SwapView {
    /// Whether `swap` belongs to this view for `profile_id`.
    pub fn matches(self, swap: &SkillSwap, profile_id: ProfileId) -> bool {
        match self {
            Self::All => true,
            Self::Incoming => {
                swap.status() == SwapStatus::Pending
                    && swap.party_of(profile_id) == Some(SwapParty::Provider)
            }
            Self::Outgoing => swap.party_of(profile_id) == Some(SwapParty::Requester),
            Self::Active => swap.status() == SwapStatus::Accepted,
            Self::Completed => swap.status() == SwapStatus::Completed,
        }
    }
}

impl fmt::Display for SwapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::Active => "active",
            Self::Completed => "completed",
        };
        f.write_str(label)
    }
}

impl FromStr for SwapView {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "incoming" => Ok(Self::Incoming),
            "outgoing" => Ok(Self::Outgoing),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(Error::invalid_request(format!("unknown swap view: {other}"))),
        }
    }
}

/// Driving port for swap read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwapQuery: Send + Sync {
    /// Swaps where the profile is requester or provider, newest first,
    /// filtered to the requested view.
    async fn list_swaps(
        &self,
        profile_id: ProfileId,
        view: SwapView,
    ) -> Result<Vec<SkillSwap>, Error>;
}

/// Fixture query implementation returning no swaps.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSwapQuery;

#[async_trait]
impl SwapQuery for FixtureSwapQuery {
    async fn list_swaps(
        &self,
        _profile_id: ProfileId,
        _view: SwapView,
    ) -> Result<Vec<SkillSwap>, Error> {
        Ok(Vec::new())
    }
}
