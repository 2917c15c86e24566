//! Per-player records: creation, calendar resets, balance and stat
//! mutation, leaderboard score upserts.
//!
//! Records are keyed per player, so cross-player operations never contend.
//! The balance invariant (never spend below zero) is enforced by caller
//! pre-checks, not here: [`PlayerStore::adjust_balance`] applies the delta
//! with no floor.

use chainpot_store::{Store, keys};
use chainpot_types::{Player, PlayerId};
use chrono::Utc;

use crate::calendar;
use crate::constants::STARTING_BALANCE;
use crate::error::EngineError;

/// Whole point values stay far below 2^53, where `f64` is exact.
#[allow(clippy::cast_precision_loss)]
const fn score(points: i64) -> f64 {
    points as f64
}

/// Owns all per-player records.
#[derive(Clone)]
pub struct PlayerStore {
    store: Store,
}

impl PlayerStore {
    /// Create a player store over the given storage facade.
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Fetch a player record, if one exists.
    pub async fn get(&self, id: PlayerId) -> Result<Option<Player>, EngineError> {
        Ok(self.store.get_json(&keys::player(id)).await?)
    }

    /// Persist a record and register the id in the all-players set.
    async fn save(&self, player: &Player) -> Result<(), EngineError> {
        self.store
            .set_json(&keys::player(player.id), player)
            .await?;
        self.store
            .sadd(keys::ALL_PLAYERS_KEY, &player.id.to_string())
            .await?;
        Ok(())
    }

    /// Load a record for mutation, failing if the player was never created.
    async fn load(&self, id: PlayerId) -> Result<Player, EngineError> {
        self.get(id).await?.ok_or(EngineError::PlayerNotFound(id))
    }

    /// Return the existing record or create one with the starting balance.
    ///
    /// On every access the calendar reset is applied: a stored reset date
    /// other than today's UTC date restores the balance and zeroes
    /// `daily_break_pot` (and `weekly_break_pot` when the date fell in an
    /// earlier week). The username, display name, and last-active timestamp
    /// are always refreshed, and the record is persisted.
    pub async fn get_or_create(
        &self,
        id: PlayerId,
        username: &str,
        display_name: Option<&str>,
    ) -> Result<Player, EngineError> {
        let now = Utc::now();

        let Some(mut player) = self.get(id).await? else {
            let player = Player::new(
                id,
                username.to_owned(),
                display_name.map(ToOwned::to_owned),
                STARTING_BALANCE,
                now,
            );
            self.save(&player).await?;
            tracing::info!(player = %id, username, "created new player");
            return Ok(player);
        };

        if calendar::apply_daily_reset(&mut player, now.date_naive(), STARTING_BALANCE) {
            tracing::info!(
                player = %id,
                balance = player.points_balance,
                weekly_break_pot = player.weekly_break_pot,
                "calendar reset applied"
            );
        }

        player.username = username.to_owned();
        if let Some(name) = display_name {
            player.display_name = name.to_owned();
        }
        player.last_active_at = now;

        self.save(&player).await?;
        Ok(player)
    }

    /// Apply a balance delta. No floor or ceiling is enforced.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] for an unknown id.
    pub async fn adjust_balance(&self, id: PlayerId, delta: i64) -> Result<Player, EngineError> {
        let mut player = self.load(id).await?;
        player.points_balance = player.points_balance.saturating_add(delta);
        player.last_active_at = Utc::now();
        self.save(&player).await?;
        Ok(player)
    }

    /// Record a domino placement.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] for an unknown id.
    pub async fn record_extend(&self, id: PlayerId) -> Result<Player, EngineError> {
        let mut player = self.load(id).await?;
        player.dominoes_placed = player.dominoes_placed.saturating_add(1);
        player.last_active_at = Utc::now();
        self.save(&player).await?;
        Ok(player)
    }

    /// Record a chain break and upsert the daily/weekly leaderboard scores.
    ///
    /// `daily_break_pot` and `weekly_break_pot` track the best single break
    /// for the period (max, not sum); the lifetime total accumulates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] for an unknown id.
    pub async fn record_break(
        &self,
        id: PlayerId,
        chain_length: u32,
        pot_won: i64,
    ) -> Result<Player, EngineError> {
        let now = Utc::now();
        let mut player = self.load(id).await?;

        player.chains_broken = player.chains_broken.saturating_add(1);
        player.total_pot_won = player.total_pot_won.saturating_add(pot_won);
        player.last_break_pot = pot_won;
        player.last_break_at = Some(now);

        if pot_won > player.daily_break_pot {
            player.daily_break_pot = pot_won;
        }
        if pot_won > player.weekly_break_pot {
            player.weekly_break_pot = pot_won;
        }
        if chain_length > player.longest_chain_at_break {
            player.longest_chain_at_break = chain_length;
        }

        player.last_active_at = now;
        self.save(&player).await?;

        let today = now.date_naive();
        let member = id.to_string();
        self.store
            .zadd(
                &keys::daily_leaderboard(today),
                score(player.daily_break_pot),
                &member,
            )
            .await?;
        self.store
            .zadd(
                &keys::weekly_leaderboard(calendar::week_start(today)),
                score(player.weekly_break_pot),
                &member,
            )
            .await?;

        Ok(player)
    }

    /// Debug-only: force a player's balance back to the starting amount and
    /// zero today's best break, stamping today as the reset date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] for an unknown id.
    pub async fn force_reset(&self, id: PlayerId) -> Result<Player, EngineError> {
        let now = Utc::now();
        let mut player = self.load(id).await?;

        player.points_balance = STARTING_BALANCE;
        player.daily_break_pot = 0;
        player.last_daily_reset = now.date_naive();
        player.last_active_at = now;

        self.save(&player).await?;
        tracing::warn!(player = %id, "forced balance reset");
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chainpot_store::Store;

    use super::*;

    fn players() -> PlayerStore {
        PlayerStore::new(Store::in_memory())
    }

    #[tokio::test]
    async fn first_contact_creates_with_starting_balance() {
        let store = players();
        let p = store
            .get_or_create(PlayerId(1), "alice", None)
            .await
            .unwrap();
        assert_eq!(p.points_balance, STARTING_BALANCE);
        assert_eq!(p.dominoes_placed, 0);
        assert_eq!(p.username, "alice");
    }

    #[tokio::test]
    async fn second_contact_returns_existing_record() {
        let store = players();
        store
            .get_or_create(PlayerId(1), "alice", None)
            .await
            .unwrap();
        store.adjust_balance(PlayerId(1), -30).await.unwrap();

        let p = store
            .get_or_create(PlayerId(1), "alice", None)
            .await
            .unwrap();
        assert_eq!(p.points_balance, 70);
    }

    #[tokio::test]
    async fn contact_refreshes_names() {
        let store = players();
        store
            .get_or_create(PlayerId(1), "alice", None)
            .await
            .unwrap();
        let p = store
            .get_or_create(PlayerId(1), "alice_renamed", Some("Alice!"))
            .await
            .unwrap();
        assert_eq!(p.username, "alice_renamed");
        assert_eq!(p.display_name, "Alice!");
    }

    #[tokio::test]
    async fn adjust_balance_has_no_floor() {
        let store = players();
        store
            .get_or_create(PlayerId(1), "alice", None)
            .await
            .unwrap();
        let p = store.adjust_balance(PlayerId(1), -250).await.unwrap();
        assert_eq!(p.points_balance, -150);
    }

    #[tokio::test]
    async fn mutating_unknown_player_is_not_found() {
        let store = players();
        let err = store.adjust_balance(PlayerId(404), 10).await;
        assert!(matches!(err, Err(EngineError::PlayerNotFound(PlayerId(404)))));
        let err = store.record_extend(PlayerId(404)).await;
        assert!(matches!(err, Err(EngineError::PlayerNotFound(_))));
        let err = store.record_break(PlayerId(404), 3, 30).await;
        assert!(matches!(err, Err(EngineError::PlayerNotFound(_))));
    }

    #[tokio::test]
    async fn record_extend_increments_counter() {
        let store = players();
        store
            .get_or_create(PlayerId(1), "alice", None)
            .await
            .unwrap();
        store.record_extend(PlayerId(1)).await.unwrap();
        let p = store.record_extend(PlayerId(1)).await.unwrap();
        assert_eq!(p.dominoes_placed, 2);
    }

    #[tokio::test]
    async fn break_pots_track_the_best_not_the_sum() {
        let store = players();
        store
            .get_or_create(PlayerId(1), "alice", None)
            .await
            .unwrap();

        let p = store.record_break(PlayerId(1), 5, 50).await.unwrap();
        assert_eq!(p.daily_break_pot, 50);
        assert_eq!(p.weekly_break_pot, 50);
        assert_eq!(p.total_pot_won, 50);
        assert_eq!(p.longest_chain_at_break, 5);

        let p = store.record_break(PlayerId(1), 4, 30).await.unwrap();
        assert_eq!(p.daily_break_pot, 50, "smaller break must not lower the best");
        assert_eq!(p.weekly_break_pot, 50);
        assert_eq!(p.total_pot_won, 80, "lifetime total accumulates");
        assert_eq!(p.chains_broken, 2);
        assert_eq!(p.longest_chain_at_break, 5);
        assert_eq!(p.last_break_pot, 30);
    }

    #[tokio::test]
    async fn force_reset_restores_starting_balance() {
        let store = players();
        store
            .get_or_create(PlayerId(1), "alice", None)
            .await
            .unwrap();
        store.adjust_balance(PlayerId(1), -95).await.unwrap();
        store.record_break(PlayerId(1), 3, 40).await.unwrap();

        let p = store.force_reset(PlayerId(1)).await.unwrap();
        assert_eq!(p.points_balance, STARTING_BALANCE);
        assert_eq!(p.daily_break_pot, 0);
        assert_eq!(p.weekly_break_pot, 40, "force reset leaves the weekly best");
    }
}
