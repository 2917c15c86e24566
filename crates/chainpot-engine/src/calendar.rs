//! UTC calendar boundaries for the daily and weekly resets.
//!
//! All temporal logic runs on UTC calendar dates. A week starts on the most
//! recent Sunday. The reset itself is a pure transform over a player record
//! so tests can drive it with explicit dates.

use chainpot_types::Player;
use chrono::{Datelike, Days, NaiveDate, Utc};

/// The current UTC calendar date.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// The start of the week containing `date`: the most recent Sunday.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(days_back)).unwrap_or(date)
}

/// Whether `stored` falls in a strictly earlier week than `today`.
pub fn in_earlier_week(stored: NaiveDate, today: NaiveDate) -> bool {
    week_start(stored) < week_start(today)
}

/// Apply the calendar reset to a player record, in place.
///
/// If the stored `last_daily_reset` differs from `today`, the balance is
/// restored to `starting_balance`, `daily_break_pot` is zeroed, and the
/// date is stamped; `weekly_break_pot` is additionally zeroed when the
/// stored date falls in a strictly earlier week. Returns whether anything
/// changed.
pub fn apply_daily_reset(player: &mut Player, today: NaiveDate, starting_balance: i64) -> bool {
    let stored = player.last_daily_reset;
    if stored == today {
        return false;
    }

    player.points_balance = starting_balance;
    player.daily_break_pot = 0;
    player.last_daily_reset = today;

    if in_earlier_week(stored, today) {
        player.weekly_break_pot = 0;
    }

    true
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chainpot_types::PlayerId;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn player_reset_on(day: NaiveDate) -> Player {
        let mut p = Player::new(PlayerId(1), "alice".to_owned(), None, 100, Utc::now());
        p.last_daily_reset = day;
        p.points_balance = 37;
        p.daily_break_pot = 55;
        p.weekly_break_pot = 80;
        p
    }

    #[test]
    fn week_starts_on_the_most_recent_sunday() {
        // 2026-08-26 is a Wednesday; that week started Sunday 2026-08-23.
        assert_eq!(week_start(date(2026, 8, 26)), date(2026, 8, 23));
        // A Sunday is its own week start.
        assert_eq!(week_start(date(2026, 8, 23)), date(2026, 8, 23));
        // A Saturday belongs to the week that started six days earlier.
        assert_eq!(week_start(date(2026, 8, 29)), date(2026, 8, 23));
    }

    #[test]
    fn earlier_week_detection() {
        assert!(in_earlier_week(date(2026, 8, 22), date(2026, 8, 23)));
        assert!(!in_earlier_week(date(2026, 8, 23), date(2026, 8, 29)));
        assert!(!in_earlier_week(date(2026, 8, 26), date(2026, 8, 26)));
        assert!(in_earlier_week(date(2026, 8, 1), date(2026, 8, 26)));
    }

    #[test]
    fn same_day_is_a_no_op() {
        let today = date(2026, 8, 26);
        let mut p = player_reset_on(today);
        assert!(!apply_daily_reset(&mut p, today, 100));
        assert_eq!(p.points_balance, 37);
        assert_eq!(p.daily_break_pot, 55);
        assert_eq!(p.weekly_break_pot, 80);
    }

    #[test]
    fn new_day_same_week_resets_daily_only() {
        let mut p = player_reset_on(date(2026, 8, 25));
        assert!(apply_daily_reset(&mut p, date(2026, 8, 26), 100));
        assert_eq!(p.points_balance, 100);
        assert_eq!(p.daily_break_pot, 0);
        assert_eq!(p.weekly_break_pot, 80);
        assert_eq!(p.last_daily_reset, date(2026, 8, 26));
    }

    #[test]
    fn new_week_resets_weekly_too() {
        // Saturday 2026-08-22 -> Wednesday 2026-08-26 crosses the Sunday
        // boundary.
        let mut p = player_reset_on(date(2026, 8, 22));
        assert!(apply_daily_reset(&mut p, date(2026, 8, 26), 100));
        assert_eq!(p.points_balance, 100);
        assert_eq!(p.daily_break_pot, 0);
        assert_eq!(p.weekly_break_pot, 0);
    }
}
