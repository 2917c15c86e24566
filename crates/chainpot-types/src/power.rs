//! Power domino kinds and the active-power lifecycle state.
//!
//! Regular powers attach to every 7th domino; the bomb is special and only
//! arms by random roll while the pot sits inside its window. At most one
//! power is active at a time -- a newly assigned power replaces the previous
//! one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The four power domino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PowerKind {
    /// Next placement adds +20 to the pot instead of +10.
    DoubleDown,
    /// If the chain is broken while active, the pot is cut in half.
    Shockwave,
    /// If the chain is untouched past the fuse, the pot nukes to zero.
    Bomb,
    /// Breakers only receive half the pot while turns remain.
    Reverse,
}

impl PowerKind {
    /// Display emoji for the frontend.
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::DoubleDown => "\u{1f525}",
            Self::Shockwave => "\u{1f329}",
            Self::Bomb => "\u{1f4a3}",
            Self::Reverse => "\u{1f300}",
        }
    }

    /// Display name for the frontend.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DoubleDown => "Double Down",
            Self::Shockwave => "Shockwave",
            Self::Bomb => "Bomb",
            Self::Reverse => "Reverse",
        }
    }

    /// One-line effect description for the frontend.
    pub const fn description(self) -> &'static str {
        match self {
            Self::DoubleDown => "Next placement adds +20 to pot instead of +10",
            Self::Shockwave => "If broken next turn, pot is cut in half",
            Self::Bomb => "If no move before the fuse runs out, pot nukes to zero",
            Self::Reverse => "Breaker only gets half the pot for 3 turns",
        }
    }

    /// Whether this power survives a chain break and reset.
    ///
    /// Only `reverse` persists; `shockwave` and `bomb` are cleared
    /// unconditionally on break, and a leftover `double_down` is dropped
    /// with the rest of the chain.
    pub const fn persists_across_break(self) -> bool {
        matches!(self, Self::Reverse)
    }
}

/// The currently active power on the global chain, with display metadata.
///
/// Exactly one of the lifecycle fields is populated depending on the kind:
/// `turns_remaining` for `reverse`, `expires_at` for `bomb`, neither for
/// `double_down` and `shockwave` (which resolve on the next placement or
/// break respectively).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActivePower {
    /// Which power is active.
    pub kind: PowerKind,
    /// Display emoji (denormalized for the frontend).
    pub emoji: String,
    /// Display name (denormalized for the frontend).
    pub name: String,
    /// Break turns remaining (`reverse` only).
    pub turns_remaining: Option<u8>,
    /// Absolute detonation deadline (`bomb` only).
    pub expires_at: Option<DateTime<Utc>>,
}

impl ActivePower {
    /// Activate a power with no counter or deadline.
    pub fn new(kind: PowerKind) -> Self {
        Self {
            kind,
            emoji: kind.emoji().to_owned(),
            name: kind.display_name().to_owned(),
            turns_remaining: None,
            expires_at: None,
        }
    }

    /// Activate a power with a turns-remaining counter (`reverse`).
    pub fn with_turns(kind: PowerKind, turns: u8) -> Self {
        Self {
            turns_remaining: Some(turns),
            ..Self::new(kind)
        }
    }

    /// Activate a power with an absolute expiry deadline (`bomb`).
    pub fn with_expiry(kind: PowerKind, expires_at: DateTime<Utc>) -> Self {
        Self {
            expires_at: Some(expires_at),
            ..Self::new(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&PowerKind::DoubleDown).ok().as_deref(),
            Some("\"double_down\"")
        );
        assert_eq!(
            serde_json::to_string(&PowerKind::Shockwave).ok().as_deref(),
            Some("\"shockwave\"")
        );
    }

    #[test]
    fn only_reverse_persists_across_break() {
        assert!(PowerKind::Reverse.persists_across_break());
        assert!(!PowerKind::DoubleDown.persists_across_break());
        assert!(!PowerKind::Shockwave.persists_across_break());
        assert!(!PowerKind::Bomb.persists_across_break());
    }

    #[test]
    fn constructors_populate_display_metadata() {
        let p = ActivePower::with_turns(PowerKind::Reverse, 3);
        assert_eq!(p.name, "Reverse");
        assert_eq!(p.turns_remaining, Some(3));
        assert!(p.expires_at.is_none());

        let deadline = Utc::now();
        let b = ActivePower::with_expiry(PowerKind::Bomb, deadline);
        assert_eq!(b.expires_at, Some(deadline));
        assert!(b.turns_remaining.is_none());
    }
}
