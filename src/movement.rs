//! Mover: advances everything that falls or flies, culls what leaves the
//! screen, and runs the cosmetic reveal/animation cadences.

use crate::config::GameConfig;
use crate::entities::{EntityKind, GameEvent, GameOverReason, GameState};
use crate::store;

/// Visual scale for an entity at `top`. Bosses never grow.
pub fn scale_for(kind: EntityKind, top: f32, config: &GameConfig) -> f32 {
    if kind.is_boss() {
        return 1.0;
    }
    (1.0 + top.max(0.0) * config.scale_growth_per_px).min(config.max_scale)
}

// ── Entities ─────────────────────────────────────────────────────────────────

/// One movement tick: drift toward the player, fall, rescale.
pub fn move_entities(state: &mut GameState, config: &GameConfig) {
    let target_x = state.player_screen_x();
    for entity in &mut state.entities {
        let drift = (target_x - entity.position.left) * config.drift_factor * entity.speed;
        entity.position.left += drift;
        entity.position.top += config.fall_step * entity.speed;
        entity.scale = scale_for(entity.kind, entity.position.top, config);
    }
}

/// Remove entities that fell past the bottom. An untouched enemy that
/// escapes while the player has been idle counts as missed; enough misses
/// end the run.
pub fn cull_entities(state: &mut GameState, config: &GameConfig) -> Vec<GameEvent> {
    let limit = state.viewport.height + config.cull_margin;
    let idle = state.now_ms.saturating_sub(state.run.last_move_ms) > config.idle_penalty_ms;
    let mut missed = state.run.missed_enemies;
    let mut events = Vec::new();

    state.entities.retain(|e| {
        if e.position.top <= limit {
            return true;
        }
        if idle && e.kind.is_enemy() && !e.is_damaged() && e.is_alive() {
            missed += 1;
            events.push(GameEvent::EnemyMissed { id: e.id, missed });
        }
        false
    });

    if missed > state.run.missed_enemies {
        tracing::debug!(missed, "enemy escaped while idle");
    }
    state.run.missed_enemies = missed;
    if missed >= config.max_missed_enemies {
        events.extend(store::trigger_game_over(state, GameOverReason::TooManyMissed));
    }
    events
}

/// Reset the hit flash on entities whose flash window has passed.
pub fn clear_hit_flags(state: &mut GameState) {
    let now = state.now_ms;
    for entity in &mut state.entities {
        if entity.hit_clear_at_ms.is_some_and(|at| now >= at) {
            entity.was_hit = false;
            entity.knockback = 0.0;
            entity.hit_clear_at_ms = None;
        }
    }
}

/// Entities become visible once their spawn grace window has elapsed.
pub fn reveal_entities(state: &mut GameState, config: &GameConfig) {
    let now = state.now_ms;
    for entity in state.entities.iter_mut().filter(|e| !e.visible) {
        if now.saturating_sub(entity.spawned_at_ms) > config.reveal_delay_ms {
            entity.visible = true;
        }
    }
}

/// Cycle sprite frames 0 → 1 → 2 → 0 on visible zombies.
pub fn animate_entities(state: &mut GameState) {
    for entity in &mut state.entities {
        if entity.visible && entity.kind.is_zombie() {
            entity.frame_index = (entity.frame_index + 1) % 3;
        }
    }
}

// ── Bullets & powerups ───────────────────────────────────────────────────────

/// Advance bullets by `frames` animation frames and discard those that
/// left the top of the screen.
pub fn move_bullets(state: &mut GameState, config: &GameConfig, frames: u32) {
    let travel = config.bullet_speed * frames as f32;
    for bullet in &mut state.bullets {
        bullet.top -= travel;
    }
    state.bullets.retain(|b| b.top >= config.bullet_cull_top);
}

pub fn move_powerups(state: &mut GameState, config: &GameConfig) {
    let limit = state.viewport.height + config.cull_margin;
    for powerup in &mut state.powerups {
        powerup.position.top += config.powerup_fall_speed;
    }
    state.powerups.retain(|p| p.position.top <= limit);
}
