//! The global chain/pot state machine.
//!
//! Exactly one chain exists process-wide. Every mutation of it funnels
//! through [`GameEngine`], which holds the single serialization boundary: a
//! [`tokio::sync::Mutex`] acquired for the whole load -> mutate -> store
//! cycle, so concurrent extends and breaks cannot interleave on the shared
//! resource. Player records are keyed per player and use their own
//! sequential read-modify-write inside the same critical section.
//!
//! # State machine
//!
//! Idle (count = 0) -> Building (count 1..N) -> break -> Idle. The only
//! state carried across the break reset is a still-active `reverse` power.

use std::sync::Arc;

use chainpot_store::{Store, keys};
use chainpot_types::{
    ActivePower, ChainState, Domino, GameConstants, LastBreaker, MoveOutcome, Player, PlayerId,
    PowerKind,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tokio::sync::Mutex;

use crate::constants::{
    BOMB_FUSE_SECONDS, BREAK_COST, EXTEND_COST, MIN_DOMINOES_TO_BREAK, game_constants,
};
use crate::error::{EngineError, MoveRejection};
use crate::players::PlayerStore;
use crate::powers;

/// The game-state engine owning the global chain/pot resource.
///
/// Cheap to clone; all clones share the same storage and the same chain
/// lock.
#[derive(Clone)]
pub struct GameEngine {
    store: Store,
    players: PlayerStore,
    /// Serializes every mutation of the global chain record.
    chain_lock: Arc<Mutex<()>>,
}

impl GameEngine {
    /// Create an engine over the given storage facade.
    pub fn new(store: Store) -> Self {
        Self {
            players: PlayerStore::new(store.clone()),
            store,
            chain_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The per-player record store.
    pub const fn players(&self) -> &PlayerStore {
        &self.players
    }

    /// Read-only constants for display.
    pub const fn constants() -> GameConstants {
        game_constants()
    }

    /// Load the chain state, settling an expired bomb first.
    ///
    /// Returns the settled state and whether a bomb went off on this load.
    /// The settled state is persisted before the caller proceeds, so the
    /// detonation is visible even if the triggering operation later
    /// rejects.
    async fn settle_and_load(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(ChainState, bool), EngineError> {
        let mut state: ChainState = self
            .store
            .get_json(keys::GAME_STATE_KEY)
            .await?
            .unwrap_or_default();

        let exploded = powers::settle_bomb(&mut state, now);
        if exploded {
            tracing::info!(pot = 0, "bomb expired; pot nuked to zero");
            self.save_state(&state).await?;
        }

        Ok((state, exploded))
    }

    async fn save_state(&self, state: &ChainState) -> Result<(), EngineError> {
        Ok(self.store.set_json(keys::GAME_STATE_KEY, state).await?)
    }

    /// Fetch the current chain state (after lazy bomb settlement).
    pub async fn state(&self) -> Result<ChainState, EngineError> {
        let _guard = self.chain_lock.lock().await;
        let (state, _) = self.settle_and_load(Utc::now()).await?;
        Ok(state)
    }

    /// Debug-only: wipe the chain back to the Idle default.
    pub async fn reset_game(&self) -> Result<ChainState, EngineError> {
        let _guard = self.chain_lock.lock().await;
        let state = ChainState::default();
        self.save_state(&state).await?;
        tracing::warn!("game state force-reset");
        Ok(state)
    }

    /// Pay the extend cost and append a domino to the chain.
    ///
    /// Pot addition is 10, or 20 when an active `double_down` is consumed.
    /// A bomb may arm while the pot sits in its window (at most once per
    /// game, taking priority over the 7th-slot power); otherwise every 7th
    /// placement carries a random non-bomb power. An already-active
    /// `reverse` loses a turn whenever the placement assigns no new power.
    ///
    /// Insufficient funds and invalid identity reject the move with state
    /// unchanged.
    pub async fn extend(
        &self,
        id: PlayerId,
        username: &str,
        display_name: Option<&str>,
        rng: &mut impl Rng,
    ) -> Result<MoveOutcome, EngineError> {
        let _guard = self.chain_lock.lock().await;
        let now = Utc::now();
        let (mut state, bomb_exploded) = self.settle_and_load(now).await?;

        if username.trim().is_empty() {
            return Ok(MoveOutcome::rejected(
                MoveRejection::InvalidIdentity.to_string(),
                state,
                None,
            ));
        }

        let player = self.players.get_or_create(id, username, display_name).await?;

        if player.points_balance < EXTEND_COST {
            return Ok(MoveOutcome::rejected(
                MoveRejection::InsufficientFunds {
                    have: player.points_balance,
                    need: EXTEND_COST,
                }
                .to_string(),
                state,
                Some(player),
            ));
        }

        self.players.adjust_balance(id, -EXTEND_COST).await?;

        let mut pot_addition = EXTEND_COST;
        let mut power_message = String::new();

        if state.has_active(PowerKind::DoubleDown) {
            pot_addition = EXTEND_COST.saturating_mul(2);
            power_message.push_str(" Double Down! +20 to pot!");
            state.active_power = None;
        }

        let new_index = state.domino_count.saturating_add(1);
        let is_power_slot = powers::is_power_slot(new_index);
        let pot_after = state.pot_points.saturating_add(pot_addition);

        let bomb_armed = powers::should_arm_bomb(
            pot_after,
            state.bomb_used_this_game,
            rng.random::<f64>(),
        );

        let mut assigned_power: Option<ActivePower> = None;
        if bomb_armed {
            let deadline = now
                .checked_add_signed(Duration::seconds(BOMB_FUSE_SECONDS))
                .unwrap_or(now);
            let bomb = ActivePower::with_expiry(PowerKind::Bomb, deadline);
            power_message.push_str(" BOMB PLACED! 60 seconds until detonation!");
            state.bomb_used_this_game = true;
            state.active_power = Some(bomb.clone());
            assigned_power = Some(bomb);
        } else if is_power_slot {
            let power = powers::random_regular_power(rng);
            power_message.push_str(&format!(" POWER DOMINO! {} activated!", power.name));
            state.active_power = Some(power.clone());
            assigned_power = Some(power);
        }

        state.dominoes.push(Domino {
            id: new_index,
            placed_by: id,
            placed_by_username: username.to_owned(),
            top_value: powers::random_face(rng),
            bottom_value: powers::random_face(rng),
            placed_at: now,
            is_power_domino: is_power_slot || bomb_armed,
            power: assigned_power.as_ref().map(|p| p.kind),
        });
        state.domino_count = new_index;
        state.pot_points = pot_after;
        state.last_move_at = Some(now);

        // A placement that assigned no new power burns one reverse turn.
        if assigned_power.is_none() && state.has_active(PowerKind::Reverse) {
            let remaining = state
                .active_power
                .as_ref()
                .and_then(|p| p.turns_remaining)
                .unwrap_or(0)
                .saturating_sub(1);
            if remaining == 0 {
                state.active_power = None;
            } else if let Some(active) = state.active_power.as_mut() {
                active.turns_remaining = Some(remaining);
            }
        }

        self.save_state(&state).await?;
        let updated_player = self.players.record_extend(id).await?;

        let mut message = format!("{username} placed domino #{new_index}!");
        if bomb_exploded {
            message = format!("BOOM! The bomb exploded and nuked the pot! {message}");
        }
        message.push_str(&power_message);

        tracing::debug!(
            player = %id,
            domino = new_index,
            pot = state.pot_points,
            power = ?state.active_power.as_ref().map(|p| p.kind),
            "chain extended"
        );

        Ok(MoveOutcome::applied(message, state, updated_player))
    }

    /// Pay the break cost and claim the pot as leaderboard score.
    ///
    /// Requires balance >= 20, chain length >= 3, and a nonzero pot; any
    /// violation rejects with all state unchanged. The payout is halved
    /// (floor) under an active `shockwave` or `reverse`, and is **never**
    /// credited to the balance -- it feeds only leaderboard scores and
    /// lifetime stats. The chain resets to Idle; only a still-active
    /// `reverse` survives.
    pub async fn break_chain(
        &self,
        id: PlayerId,
        username: &str,
        display_name: Option<&str>,
    ) -> Result<MoveOutcome, EngineError> {
        let _guard = self.chain_lock.lock().await;
        let now = Utc::now();
        let (mut state, _) = self.settle_and_load(now).await?;

        if username.trim().is_empty() {
            return Ok(MoveOutcome::rejected(
                MoveRejection::InvalidIdentity.to_string(),
                state,
                None,
            ));
        }

        let player = self.players.get_or_create(id, username, display_name).await?;

        if player.points_balance < BREAK_COST {
            return Ok(MoveOutcome::rejected(
                MoveRejection::InsufficientFunds {
                    have: player.points_balance,
                    need: BREAK_COST,
                }
                .to_string(),
                state,
                Some(player),
            ));
        }

        if state.domino_count < MIN_DOMINOES_TO_BREAK {
            return Ok(MoveOutcome::rejected(
                MoveRejection::ChainTooShort {
                    min: MIN_DOMINOES_TO_BREAK,
                }
                .to_string(),
                state,
                Some(player),
            ));
        }

        if state.pot_points <= 0 {
            return Ok(MoveOutcome::rejected(
                MoveRejection::EmptyPot.to_string(),
                state,
                Some(player),
            ));
        }

        let chain_length = state.domino_count;
        let mut pot_won = state.pot_points;
        let mut power_message = String::new();

        match state.active_power.as_ref().map(|p| p.kind) {
            Some(PowerKind::Shockwave) => {
                pot_won /= 2;
                power_message.push_str(" Shockwave! Pot was cut in half!");
            }
            Some(PowerKind::Reverse) => {
                pot_won /= 2;
                power_message.push_str(" Reverse! You only got half the pot!");
                let turns = state
                    .active_power
                    .as_ref()
                    .and_then(|p| p.turns_remaining)
                    .unwrap_or(0);
                if turns > 1 {
                    if let Some(active) = state.active_power.as_mut() {
                        active.turns_remaining = Some(turns.saturating_sub(1));
                    }
                } else {
                    state.active_power = None;
                }
            }
            _ => {}
        }

        // Shockwave and bomb never outlive a break.
        if state.has_active(PowerKind::Shockwave) || state.has_active(PowerKind::Bomb) {
            state.active_power = None;
        }

        self.players.adjust_balance(id, -BREAK_COST).await?;
        let updated_player = self.players.record_break(id, chain_length, pot_won).await?;

        state.last_breaker = Some(LastBreaker {
            player: id,
            username: username.to_owned(),
            pot_won,
            chain_length,
        });
        state.domino_count = 0;
        state.pot_points = 0;
        state.dominoes.clear();
        state.last_move_at = Some(now);
        state.bomb_used_this_game = false;

        // Only reverse persists across the reset.
        if state
            .active_power
            .as_ref()
            .is_some_and(|p| !p.kind.persists_across_break())
        {
            state.active_power = None;
        }

        self.save_state(&state).await?;

        tracing::info!(
            player = %id,
            chain_length,
            pot_won,
            "chain broken"
        );

        let message = format!(
            "{username} broke a {chain_length}-domino chain and claimed {pot_won} points!{power_message}"
        );
        let mut outcome = MoveOutcome::applied(message, state, updated_player);
        outcome.points_awarded = Some(pot_won);
        Ok(outcome)
    }

    /// Fetch-or-create a player by id and display name.
    ///
    /// Exposed for the transport layer's player endpoint; applies the same
    /// calendar reset as every other access.
    pub async fn player(
        &self,
        id: PlayerId,
        username: &str,
        display_name: Option<&str>,
    ) -> Result<Player, EngineError> {
        self.players.get_or_create(id, username, display_name).await
    }
}
