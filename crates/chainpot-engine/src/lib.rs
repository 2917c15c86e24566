//! Game-state engine for the Chainpot domino-chain economy.
//!
//! One persistent chain is shared by every player: pay to extend it (the
//! pot grows), or pay to break it (the pot becomes leaderboard score and
//! the chain resets). This crate owns the whole game core; transport,
//! rendering, and onboarding live elsewhere and talk to [`GameEngine`],
//! [`PlayerStore`], and [`LeaderboardService`].
//!
//! # Modules
//!
//! - [`game`] -- The chain/pot state machine behind one serialization lock
//! - [`players`] -- Per-player records, calendar resets, stat mutation
//! - [`leaderboard`] -- Ranked top-N over daily/weekly buckets
//! - [`powers`] -- Power-up rolls and lazy bomb settlement
//! - [`calendar`] -- UTC day/week boundary helpers
//! - [`constants`] -- Fixed economic tuning values
//! - [`error`] -- Rejection and error taxonomy
//!
//! # Randomness
//!
//! Dice faces, power selection, and bomb arming all draw from an [`rand::Rng`]
//! passed in by the caller, so tests can supply seeded generators and the
//! decision logic itself stays in pure, directly testable functions.

pub mod calendar;
pub mod constants;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod players;
pub mod powers;

// Re-export primary types at crate root.
pub use error::{EngineError, MoveRejection};
pub use game::GameEngine;
pub use leaderboard::{DEFAULT_LEADERBOARD_LIMIT, LeaderboardService};
pub use players::PlayerStore;
