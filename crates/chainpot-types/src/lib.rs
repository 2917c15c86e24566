//! Shared type definitions for the Chainpot domino-chain game.
//!
//! This crate is the single source of truth for all types used across the
//! Chainpot workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the mini-app frontend.
//!
//! # Modules
//!
//! - [`player`] -- Player identity and the per-player economic record
//! - [`power`] -- Power domino kinds and the active-power lifecycle state
//! - [`chain`] -- The global chain/pot singleton and its dominoes
//! - [`outcome`] -- Move results, leaderboard entries, display constants

pub mod chain;
pub mod outcome;
pub mod player;
pub mod power;

// Re-export all public types at crate root for convenience.
pub use chain::{ChainState, Domino, LastBreaker};
pub use outcome::{GameConstants, LeaderboardEntry, MoveOutcome};
pub use player::{Player, PlayerId};
pub use power::{ActivePower, PowerKind};
