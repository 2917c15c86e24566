//! Persistence gateway for the Chainpot game.
//!
//! One storage capability interface ([`Gateway`]) with two implementations
//! chosen at startup: a durable Redis-compatible remote store
//! ([`RedisStore`], via `fred`) and an in-process fallback
//! ([`MemoryStore`]) with identical read/write semantics that loses data on
//! restart. The [`Store`] facade wraps both and silently degrades remote
//! failures to the fallback: availability over consistency, a deliberate
//! trade-off for a casual game.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `game:state` | JSON | The global chain/pot singleton |
//! | `player:{id}` | JSON | Per-player economic record |
//! | `players:all` | Set | Every player id ever seen |
//! | `leaderboard:daily:{yyyy-mm-dd}` | Sorted set | Best single break per player, per UTC day |
//! | `leaderboard:weekly:{week-start}` | Sorted set | Best single break per player, per week (Sunday start) |

pub mod error;
pub mod gateway;
pub mod keys;
pub mod memory;
pub mod redis;
pub mod store;

// Re-export primary types at crate root.
pub use error::StoreError;
pub use gateway::Gateway;
pub use memory::MemoryStore;
pub use redis::RedisStore;
pub use store::Store;
