//! Ranked top-N queries over the daily and weekly score buckets.
//!
//! Buckets are sorted sets keyed by UTC calendar date (daily) or week-start
//! date (weekly) and start empty automatically when the key rolls over. The
//! sorted set supplies the candidate ranking; each row is hydrated from the
//! player record so the returned score always reflects the stored best
//! break for the period.

use chainpot_store::{Store, keys};
use chainpot_types::{LeaderboardEntry, Player, PlayerId};

use crate::calendar;
use crate::error::EngineError;

/// Default number of rows returned to the frontend.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 5;

/// Read-only ranked views over the leaderboard buckets.
#[derive(Clone)]
pub struct LeaderboardService {
    store: Store,
}

impl LeaderboardService {
    /// Create a leaderboard service over the given storage facade.
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Top entries for today's bucket, best single break first.
    pub async fn daily_top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, EngineError> {
        let key = keys::daily_leaderboard(calendar::today_utc());
        self.ranked_top(&key, limit, |p| p.daily_break_pot).await
    }

    /// Top entries for this week's bucket, best single break first.
    pub async fn weekly_top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, EngineError> {
        let key = keys::weekly_leaderboard(calendar::week_start(calendar::today_utc()));
        self.ranked_top(&key, limit, |p| p.weekly_break_pot).await
    }

    /// Shared hydration path for both buckets.
    ///
    /// Strictly descending by the bucket's score, zero-score players
    /// excluded, never more than `limit` rows. Members that fail to parse
    /// or no longer resolve to a player record are skipped.
    async fn ranked_top(
        &self,
        key: &str,
        limit: usize,
        score_of: fn(&Player) -> i64,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        let rows = self.store.ztop(key, limit).await?;

        let mut entries = Vec::with_capacity(rows.len());
        for (member, _) in rows {
            let Ok(raw_id) = member.parse::<u64>() else {
                tracing::warn!(key, member, "skipping unparseable leaderboard member");
                continue;
            };
            let id = PlayerId(raw_id);
            let Some(player) = self.store.get_json::<Player>(&keys::player(id)).await? else {
                continue;
            };
            let score = score_of(&player);
            if score > 0 {
                entries.push(LeaderboardEntry {
                    player: id,
                    username: player.username,
                    score,
                });
            }
        }

        // The stored zset score can lag the record (different bucket day);
        // re-sort on the hydrated values. The sort is stable, so ties keep
        // the zset order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        Ok(entries)
    }
}
