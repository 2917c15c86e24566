//! Move results, leaderboard entries, and display constants.
//!
//! Every mutating operation returns a [`MoveOutcome`] carrying a success
//! flag, a human-readable message, and fresh snapshots of the chain and the
//! acting player. Rejections (insufficient funds, chain too short, empty
//! pot) are structured failures, not errors: state is unchanged and the
//! message explains why.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::chain::ChainState;
use crate::player::{Player, PlayerId};

/// The result of an extend or break attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MoveOutcome {
    /// Whether the move was applied.
    pub success: bool,
    /// Human-readable description of what happened.
    pub message: String,
    /// The chain state after the operation (unchanged on rejection).
    pub state: ChainState,
    /// The acting player's record after the operation.
    pub player: Option<Player>,
    /// Points credited to the leaderboard on a successful break.
    pub points_awarded: Option<i64>,
}

impl MoveOutcome {
    /// Build a successful outcome.
    pub fn applied(message: String, state: ChainState, player: Player) -> Self {
        Self {
            success: true,
            message,
            state,
            player: Some(player),
            points_awarded: None,
        }
    }

    /// Build a structured rejection. State snapshots are unchanged.
    pub fn rejected(message: String, state: ChainState, player: Option<Player>) -> Self {
        Self {
            success: false,
            message,
            state,
            player,
            points_awarded: None,
        }
    }
}

/// One ranked leaderboard row: derived, read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeaderboardEntry {
    /// The ranked player.
    pub player: PlayerId,
    /// Username for display.
    pub username: String,
    /// The bucket score (best single break for the period).
    pub score: i64,
}

/// Read-only game constants exposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameConstants {
    /// Cost of placing a domino.
    pub extend_cost: i64,
    /// Cost of breaking the chain.
    pub break_cost: i64,
    /// Minimum chain length required before a break is allowed.
    pub min_dominoes_to_break: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn rejected_outcome_has_no_award() {
        let outcome =
            MoveOutcome::rejected("no".to_owned(), ChainState::default(), None);
        assert!(!outcome.success);
        assert!(outcome.points_awarded.is_none());
        assert!(outcome.player.is_none());
    }

    #[test]
    fn applied_outcome_carries_player_snapshot() {
        let player = Player::new(PlayerId(1), "erin".to_owned(), None, 100, Utc::now());
        let outcome = MoveOutcome::applied(
            "placed".to_owned(),
            ChainState::default(),
            player.clone(),
        );
        assert!(outcome.success);
        assert_eq!(outcome.player, Some(player));
    }
}
