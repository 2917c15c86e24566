//! Fixed economic and power-up tuning values.
//!
//! These are compile-time constants rather than configuration: the game's
//! balance was tuned around them and every client displays them via
//! [`GameConstants`].

use chainpot_types::GameConstants;

/// Balance granted on first contact and restored by the daily reset.
pub const STARTING_BALANCE: i64 = 100;

/// Cost of placing a domino.
pub const EXTEND_COST: i64 = 10;

/// Cost of breaking the chain.
pub const BREAK_COST: i64 = 20;

/// Minimum chain length required before a break is allowed.
pub const MIN_DOMINOES_TO_BREAK: u32 = 3;

/// Every Nth domino in the chain is a power slot.
pub const POWER_DOMINO_INTERVAL: u32 = 7;

/// The bomb can only arm while the pot (after the placement) is at least
/// this much.
pub const BOMB_MIN_POT: i64 = 50;

/// The bomb can only arm while the pot (after the placement) is at most
/// this much.
pub const BOMB_MAX_POT: i64 = 500;

/// Probability that a placement inside the bomb window arms a bomb.
pub const BOMB_CHANCE: f64 = 0.15;

/// Seconds from arming until the bomb nukes the pot.
pub const BOMB_FUSE_SECONDS: i64 = 60;

/// Break turns a fresh `reverse` power stays in effect.
pub const REVERSE_TURNS: u8 = 3;

/// Read-only constants bundle exposed for display.
pub const fn game_constants() -> GameConstants {
    GameConstants {
        extend_cost: EXTEND_COST,
        break_cost: BREAK_COST,
        min_dominoes_to_break: MIN_DOMINOES_TO_BREAK,
    }
}
