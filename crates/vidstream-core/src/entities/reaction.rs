//! Reaction entity - a like or subscription relation between an actor
//! and a target entity
//!
//! Presence of the record IS the liked/subscribed state; there is no
//! boolean flag. At most one Reaction exists per
//! (actor, target kind, target id) tuple, enforced by the store.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::value_objects::Snowflake;

/// What a reaction points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionTargetKind {
    Video,
    Comment,
    Tweet,
    /// Subscribing to a user's channel
    Channel,
}

impl ReactionTargetKind {
    /// Stable storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Comment => "comment",
            Self::Tweet => "tweet",
            Self::Channel => "channel",
        }
    }

    /// Parse the storage representation back into the enum
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "video" => Some(Self::Video),
            "comment" => Some(Self::Comment),
            "tweet" => Some(Self::Tweet),
            "channel" => Some(Self::Channel),
            _ => None,
        }
    }
}

impl fmt::Display for ReactionTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub actor_id: Snowflake,
    pub target_kind: ReactionTargetKind,
    pub target_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(actor_id: Snowflake, target_kind: ReactionTargetKind, target_id: Snowflake) -> Self {
        Self {
            actor_id,
            target_kind,
            target_id,
            created_at: Utc::now(),
        }
    }

    /// Check if this reaction points at the given target
    #[inline]
    pub fn is_for(&self, target_kind: ReactionTargetKind, target_id: Snowflake) -> bool {
        self.target_kind == target_kind && self.target_id == target_id
    }
}

/// Result of a toggle call on the reaction store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The relation did not exist and was created
    Added(Reaction),
    /// The relation existed and was removed
    Removed,
}

impl ToggleOutcome {
    /// True when the toggle created the relation
    #[inline]
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}
