//! GameStateStore: lives, cleanliness, streak bookkeeping, timed powerups,
//! the boost action, bullet creation and the game-over transition.

use crate::config::GameConfig;
use crate::entities::{Bullet, GameEvent, GameOverReason, GamePhase, GameState, PowerupKind};

// ── Score & streak ───────────────────────────────────────────────────────────

/// Credit one kill. Every `kills_per_streak`-th kill advances the streak
/// exactly once and starts the streak flash.
pub fn record_kill(state: &mut GameState, config: &GameConfig) -> Option<GameEvent> {
    state.player.kill_count += 1;
    state.run.total_kills += 1;
    let kills = state.player.kill_count;
    if config.kills_per_streak == 0
        || kills % config.kills_per_streak != 0
        || kills == state.run.last_streak_milestone
    {
        return None;
    }
    state.run.last_streak_milestone = kills;
    state.player.streak += 1;
    state.streak_flash_until_ms = Some(state.now_ms + config.streak_flash_ms);
    tracing::debug!(streak = state.player.streak, kills, "streak increased");
    Some(GameEvent::StreakIncreased {
        streak: state.player.streak,
    })
}

/// Hostile contact wipes the combo, however many lives it cost, shielded
/// or not.
pub fn take_damage(state: &mut GameState) {
    state.player.streak = 0;
    state.player.kill_count = 0;
    state.run.last_streak_milestone = 0;
    state.streak_flash_until_ms = None;
}

fn add_cleanliness(state: &mut GameState, config: &GameConfig) {
    state.player.cleanliness =
        (state.player.cleanliness + config.boost_amount).min(config.max_cleanliness);
}

// ── Powerups & boost ─────────────────────────────────────────────────────────

/// Boost applies instantly; timed kinds (re)start their expiry from now.
pub fn activate_powerup(state: &mut GameState, config: &GameConfig, kind: PowerupKind) {
    match kind {
        PowerupKind::Boost => add_cleanliness(state, config),
        PowerupKind::BulletBoost | PowerupKind::Shield => {
            let until = state.now_ms + config.powerup_duration_ms;
            state.active_powerups.set_expiry(kind, until);
        }
    }
    tracing::debug!(?kind, now = state.now_ms, "powerup activated");
}

/// The manual boost action. Returns false while the cooldown runs.
pub fn trigger_boost(state: &mut GameState, config: &GameConfig) -> bool {
    if state.now_ms < state.boost_ready_at_ms {
        return false;
    }
    add_cleanliness(state, config);
    state.boost_ready_at_ms = state.now_ms + config.boost_cooldown_ms;
    state.pending_events.push(GameEvent::BoostUsed {
        cleanliness: state.player.cleanliness,
    });
    true
}

pub fn boost_cooldown_remaining_ms(state: &GameState) -> u64 {
    state.boost_ready_at_ms.saturating_sub(state.now_ms)
}

/// Fire one bullet from the player's current position. Returns its id.
pub fn fire_bullet(state: &mut GameState, config: &GameConfig) -> u64 {
    let boosted = state
        .active_powerups
        .is_active(PowerupKind::BulletBoost, state.now_ms);
    let (damage, knockback) = if boosted {
        (config.boosted_bullet_damage, config.boosted_bullet_knockback)
    } else {
        (config.bullet_damage, config.bullet_knockback)
    };
    let id = state.run.next_id();
    let top = state.player_screen_y(config.player_offset_from_bottom);
    state.bullets.push(Bullet {
        id,
        offset_x: state.player.character_x,
        top,
        damage,
        knockback,
    });
    id
}

// ── Phase transitions ────────────────────────────────────────────────────────

/// Freeze the run. Only the first call has any effect and returns the
/// `GameOver` event; the caller publishes it after the events that caused it.
pub fn trigger_game_over(state: &mut GameState, reason: GameOverReason) -> Option<GameEvent> {
    if state.phase == GamePhase::GameOver {
        return None;
    }
    state.phase = GamePhase::GameOver;
    state.game_over_at_ms = Some(state.now_ms);
    state.game_over_reason = Some(reason);
    tracing::info!(
        ?reason,
        kills = state.run.total_kills,
        streak = state.player.streak,
        missed = state.run.missed_enemies,
        "game over"
    );
    Some(GameEvent::GameOver { reason })
}

/// Whole seconds left on the game-over countdown, or `None` while playing.
pub fn game_over_countdown_secs(state: &GameState, config: &GameConfig) -> Option<u64> {
    let at = state.game_over_at_ms?;
    let remaining = config
        .game_over_countdown_ms
        .saturating_sub(state.now_ms.saturating_sub(at));
    Some(remaining.div_ceil(1000))
}

// ── Event folding ────────────────────────────────────────────────────────────

/// Fold one collision pass's events into the player state, then publish
/// them (plus any streak events they caused) on the snapshot.
pub fn apply_events(state: &mut GameState, config: &GameConfig, events: Vec<GameEvent>) {
    let mut derived = Vec::new();
    let mut damaged = false;

    for event in &events {
        match event {
            GameEvent::EnemyKilled { .. } => {
                if let Some(streak) = record_kill(state, config) {
                    derived.push(streak);
                }
            }
            GameEvent::PlayerDamaged { .. } | GameEvent::ShieldAbsorbed { .. } => damaged = true,
            GameEvent::PowerupCollected { powerup } => {
                activate_powerup(state, config, powerup.kind);
            }
            _ => {}
        }
    }
    if damaged {
        take_damage(state);
    }
    state.events.extend(events);
    state.events.extend(derived);
}
