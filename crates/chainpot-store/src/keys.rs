//! Key builders for the patterns listed in the crate documentation.

use chainpot_types::PlayerId;
use chrono::NaiveDate;

/// The global chain/pot singleton.
pub const GAME_STATE_KEY: &str = "game:state";

/// Set of every player id ever seen.
pub const ALL_PLAYERS_KEY: &str = "players:all";

/// Per-player record key.
pub fn player(id: PlayerId) -> String {
    format!("player:{id}")
}

/// Daily leaderboard bucket for the given UTC calendar date.
pub fn daily_leaderboard(date: NaiveDate) -> String {
    format!("leaderboard:daily:{date}")
}

/// Weekly leaderboard bucket for the given week-start date (the most recent
/// Sunday).
pub fn weekly_leaderboard(week_start: NaiveDate) -> String {
    format!("leaderboard:weekly:{week_start}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn key_formats_are_stable() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(player(PlayerId(42)), "player:42");
        assert_eq!(daily_leaderboard(date), "leaderboard:daily:2026-08-23");
        assert_eq!(weekly_leaderboard(date), "leaderboard:weekly:2026-08-23");
    }
}
