//! Player identity and the per-player economic record.
//!
//! Player identities are assigned externally (the upstream social platform
//! hands us a numeric id); this crate only wraps them in a newtype so the
//! compiler prevents mixing them with other integers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Type-safe wrapper around the externally assigned numeric player id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Return the inner numeric id.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<PlayerId> for u64 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

/// The per-player economic record.
///
/// Created on first contact with the starting balance, mutated on every
/// extend, break, and calendar reset, never deleted. The balance is a plain
/// signed integer with no floor enforced at this layer: callers must
/// pre-check sufficiency before debiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Externally assigned unique id.
    pub id: PlayerId,
    /// Platform username, refreshed on every contact.
    pub username: String,
    /// Display name, refreshed on every contact when provided.
    pub display_name: String,
    /// Spendable balance. Restored to the starting amount on daily reset.
    pub points_balance: i64,
    /// Lifetime sum of all pots claimed by breaking.
    pub total_pot_won: i64,
    /// Pot claimed by the most recent break.
    pub last_break_pot: i64,
    /// Timestamp of the most recent break, if any.
    pub last_break_at: Option<DateTime<Utc>>,
    /// Best single break today (max, not cumulative). Zeroed on daily reset.
    pub daily_break_pot: i64,
    /// Best single break this week (max, not cumulative). Zeroed when a
    /// daily reset crosses into a new week.
    pub weekly_break_pot: i64,
    /// Lifetime count of dominoes placed.
    pub dominoes_placed: u64,
    /// Lifetime count of chains broken.
    pub chains_broken: u64,
    /// Longest chain length at the moment this player broke it.
    pub longest_chain_at_break: u32,
    /// UTC calendar date of the last daily reset.
    pub last_daily_reset: NaiveDate,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every contact.
    pub last_active_at: DateTime<Utc>,
}

impl Player {
    /// Create a fresh record for a first-contact player.
    ///
    /// The record starts with `starting_balance` points, zeroed stats, and
    /// today's date stamped as the last daily reset.
    pub fn new(
        id: PlayerId,
        username: String,
        display_name: Option<String>,
        starting_balance: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.unwrap_or_else(|| username.clone()),
            username,
            points_balance: starting_balance,
            total_pot_won: 0,
            last_break_pot: 0,
            last_break_at: None,
            daily_break_pot: 0,
            weekly_break_pot: 0,
            dominoes_placed: 0,
            chains_broken: 0,
            longest_chain_at_break: 0,
            last_daily_reset: now.date_naive(),
            created_at: now,
            last_active_at: now,
        }
    }
}
