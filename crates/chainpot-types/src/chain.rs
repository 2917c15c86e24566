//! The global chain/pot singleton and its dominoes.
//!
//! Exactly one [`ChainState`] exists process-wide, persisted under a single
//! key. Dominoes exist only while the chain is unbroken; the whole list is
//! cleared atomically when a break resets the chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::player::PlayerId;
use crate::power::{ActivePower, PowerKind};

/// One domino in the current chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Domino {
    /// 1-based ordinal position within the current chain.
    pub id: u32,
    /// Who placed it.
    pub placed_by: PlayerId,
    /// Username of the placer at placement time.
    pub placed_by_username: String,
    /// Upper face value, 1..=6.
    pub top_value: u8,
    /// Lower face value, 1..=6.
    pub bottom_value: u8,
    /// When the domino was placed.
    pub placed_at: DateTime<Utc>,
    /// Whether this placement carried a power (7th-slot or armed bomb).
    pub is_power_domino: bool,
    /// The power attached to this placement, if any.
    pub power: Option<PowerKind>,
}

/// Summary of the most recent break, kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LastBreaker {
    /// Who broke the chain.
    pub player: PlayerId,
    /// Username of the breaker at break time.
    pub username: String,
    /// Points claimed (after any halving power).
    pub pot_won: i64,
    /// Chain length at the moment of the break.
    pub chain_length: u32,
}

/// The global chain/pot resource.
///
/// State machine: Idle (`domino_count == 0`) -> Building (1..N) -> break
/// transition returns to Idle. A surviving `reverse` power is the only
/// state carried across the reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChainState {
    /// Number of dominoes in the current chain.
    pub domino_count: u32,
    /// Points accumulated in the current pot, claimable only by breaking.
    pub pot_points: i64,
    /// Timestamp of the most recent extend or break.
    pub last_move_at: Option<DateTime<Utc>>,
    /// The ordered chain, oldest first.
    pub dominoes: Vec<Domino>,
    /// Who last broke a chain, if anyone has.
    pub last_breaker: Option<LastBreaker>,
    /// The power currently in effect, if any.
    pub active_power: Option<ActivePower>,
    /// Whether a bomb has already armed during the current game.
    pub bomb_used_this_game: bool,
}

impl ChainState {
    /// Whether the chain is in the Idle state (no dominoes placed).
    pub const fn is_idle(&self) -> bool {
        self.domino_count == 0
    }

    /// Whether the given power kind is currently active.
    pub fn has_active(&self, kind: PowerKind) -> bool {
        self.active_power.as_ref().is_some_and(|p| p.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        let state = ChainState::default();
        assert!(state.is_idle());
        assert_eq!(state.pot_points, 0);
        assert!(state.dominoes.is_empty());
        assert!(state.active_power.is_none());
        assert!(!state.bomb_used_this_game);
    }

    #[test]
    fn has_active_matches_kind() {
        let mut state = ChainState::default();
        assert!(!state.has_active(PowerKind::Shockwave));
        state.active_power = Some(ActivePower::new(PowerKind::Shockwave));
        assert!(state.has_active(PowerKind::Shockwave));
        assert!(!state.has_active(PowerKind::Bomb));
    }

    #[test]
    fn state_roundtrip_serde() {
        let mut state = ChainState::default();
        state.domino_count = 2;
        state.pot_points = 20;
        state.dominoes.push(Domino {
            id: 1,
            placed_by: PlayerId(9),
            placed_by_username: "dave".to_owned(),
            top_value: 3,
            bottom_value: 5,
            placed_at: Utc::now(),
            is_power_domino: false,
            power: None,
        });
        let json = serde_json::to_string(&state).ok();
        assert!(json.is_some());
        let restored: Result<ChainState, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok().as_ref(), Some(&state));
    }
}
