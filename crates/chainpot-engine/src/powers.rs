//! Power-up rolls and the lazy bomb settlement transform.
//!
//! Random decisions are split in two, the way the weather table does it:
//! the engine draws raw values from an injected [`Rng`], and pure functions
//! turn those values into decisions. Tests drive the pure half with exact
//! inputs.

use chainpot_types::{ActivePower, ChainState, PowerKind};
use chrono::{DateTime, Utc};
use rand::Rng;

use crate::constants::{BOMB_CHANCE, BOMB_MAX_POT, BOMB_MIN_POT, POWER_DOMINO_INTERVAL, REVERSE_TURNS};

/// Roll one domino face: uniform in 1..=6.
pub fn random_face(rng: &mut impl Rng) -> u8 {
    rng.random_range(1..=6)
}

/// Whether the 1-based chain position is a regular power slot (every 7th).
pub const fn is_power_slot(index: u32) -> bool {
    index != 0 && index % POWER_DOMINO_INTERVAL == 0
}

/// Decide whether a bomb arms on this placement.
///
/// `pot_after` is the pot including this placement's addition; `roll` is a
/// uniform value in `[0, 1)`. A bomb never arms twice in one game, and only
/// while the pot sits inside the `[BOMB_MIN_POT, BOMB_MAX_POT]` window.
pub fn should_arm_bomb(pot_after: i64, bomb_used: bool, roll: f64) -> bool {
    if bomb_used {
        return false;
    }
    if pot_after < BOMB_MIN_POT || pot_after > BOMB_MAX_POT {
        return false;
    }
    roll < BOMB_CHANCE
}

/// Pick one of the three regular (non-bomb) powers uniformly.
///
/// `reverse` starts with its full turn counter.
pub fn random_regular_power(rng: &mut impl Rng) -> ActivePower {
    match rng.random_range(0..3u8) {
        0 => ActivePower::new(PowerKind::DoubleDown),
        1 => ActivePower::new(PowerKind::Shockwave),
        _ => ActivePower::with_turns(PowerKind::Reverse, REVERSE_TURNS),
    }
}

/// Settle an expired bomb on a loaded snapshot, in place.
///
/// Applied to every loaded state before any transaction proceeds: if the
/// active power is a bomb whose deadline has passed, the pot is forced to
/// zero and the power cleared. Returns whether the bomb went off. This is a
/// pure transform, not a background timer -- the store has no independent
/// execution context.
pub fn settle_bomb(state: &mut ChainState, now: DateTime<Utc>) -> bool {
    let Some(power) = state.active_power.as_ref() else {
        return false;
    };
    if power.kind != PowerKind::Bomb {
        return false;
    }
    let Some(deadline) = power.expires_at else {
        return false;
    };
    if now <= deadline {
        return false;
    }

    state.pot_points = 0;
    state.active_power = None;
    true
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn power_slots_fall_on_multiples_of_seven() {
        assert!(!is_power_slot(0));
        assert!(!is_power_slot(1));
        assert!(!is_power_slot(6));
        assert!(is_power_slot(7));
        assert!(!is_power_slot(8));
        assert!(is_power_slot(14));
        assert!(is_power_slot(70));
    }

    #[test]
    fn bomb_arms_only_inside_the_window() {
        assert!(should_arm_bomb(50, false, 0.0));
        assert!(should_arm_bomb(500, false, 0.14));
        assert!(!should_arm_bomb(49, false, 0.0));
        assert!(!should_arm_bomb(501, false, 0.0));
    }

    #[test]
    fn bomb_roll_threshold_is_fifteen_percent() {
        assert!(should_arm_bomb(100, false, 0.1499));
        assert!(!should_arm_bomb(100, false, 0.15));
        assert!(!should_arm_bomb(100, false, 0.99));
    }

    #[test]
    fn bomb_never_arms_twice_per_game() {
        assert!(!should_arm_bomb(100, true, 0.0));
    }

    #[test]
    fn faces_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let face = random_face(&mut rng);
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn regular_powers_are_never_bombs() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut saw_reverse = false;
        for _ in 0..200 {
            let power = random_regular_power(&mut rng);
            assert_ne!(power.kind, PowerKind::Bomb);
            if power.kind == PowerKind::Reverse {
                saw_reverse = true;
                assert_eq!(power.turns_remaining, Some(REVERSE_TURNS));
            } else {
                assert!(power.turns_remaining.is_none());
            }
        }
        assert!(saw_reverse, "200 draws should produce at least one reverse");
    }

    #[test]
    fn expired_bomb_nukes_the_pot() {
        let now = Utc::now();
        let mut state = ChainState {
            pot_points: 120,
            active_power: Some(ActivePower::with_expiry(
                PowerKind::Bomb,
                now - Duration::seconds(1),
            )),
            ..ChainState::default()
        };
        assert!(settle_bomb(&mut state, now));
        assert_eq!(state.pot_points, 0);
        assert!(state.active_power.is_none());
    }

    #[test]
    fn live_bomb_is_left_alone() {
        let now = Utc::now();
        let mut state = ChainState {
            pot_points: 120,
            active_power: Some(ActivePower::with_expiry(
                PowerKind::Bomb,
                now + Duration::seconds(30),
            )),
            ..ChainState::default()
        };
        assert!(!settle_bomb(&mut state, now));
        assert_eq!(state.pot_points, 120);
        assert!(state.active_power.is_some());
    }

    #[test]
    fn non_bomb_powers_never_settle() {
        let now = Utc::now();
        let mut state = ChainState {
            pot_points: 80,
            active_power: Some(ActivePower::new(PowerKind::Shockwave)),
            ..ChainState::default()
        };
        assert!(!settle_bomb(&mut state, now));
        assert_eq!(state.pot_points, 80);
    }
}
