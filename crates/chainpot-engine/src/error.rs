//! Error taxonomy for the game engine.
//!
//! Two tiers, matching how failures surface:
//!
//! - [`MoveRejection`]: terminal for the requested move but not an error in
//!   the Rust sense. Converted into a structured [`chainpot_types::MoveOutcome`]
//!   failure (success = false, explanatory message, unchanged state).
//! - [`EngineError`]: genuine faults -- mutating an unknown player, or a
//!   storage-layer failure that survived the gateway's degrade policy
//!   (in practice, corrupt stored JSON). Nothing is process-fatal.

use chainpot_store::StoreError;
use chainpot_types::PlayerId;

/// Reasons a move is rejected without touching any state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    /// The player cannot afford the operation's fixed cost.
    #[error("Not enough points! You have {have}, need {need}.")]
    InsufficientFunds {
        /// Current spendable balance.
        have: i64,
        /// The operation's fixed cost.
        need: i64,
    },

    /// The chain is shorter than the minimum required to break.
    #[error("Need at least {min} dominoes to break the chain!")]
    ChainTooShort {
        /// Minimum chain length required.
        min: u32,
    },

    /// The pot is empty, so there is nothing to claim.
    #[error("No points in the pot to claim!")]
    EmptyPot,

    /// The caller supplied a blank or invalid player identity.
    #[error("A player username is required.")]
    InvalidIdentity,
}

/// Errors that can occur inside the game engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A mutation was attempted on a player that has never been created.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// A storage operation failed past the gateway's degrade policy.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
