//! CollisionResolver: the three hit passes, run in a fixed order each tick
//! (bullets, then the player body, then powerup pickups).
//!
//! Each pass mutates the entity/bullet/powerup lists in place and returns
//! the events it raised; folding those into score and streak is the
//! store's job.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Entity, GameEvent, GameOverReason, GameState, PowerupKind};
use crate::store;

fn collidable(entity: &Entity, config: &GameConfig) -> bool {
    config.collide_invisible || entity.visible
}

// ── Bullet ↔ entity ──────────────────────────────────────────────────────────

/// Each bullet hits at most the first entity in list order inside its hit
/// box, and an entity hit by an earlier bullet this pass is skipped. Bullets
/// never pierce.
pub fn resolve_bullet_hits(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let center = state.viewport.center_x();
    let mut hit_entities: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();
    let mut hits: Vec<(usize, u32, f32)> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bullet_x = center + bullet.offset_x;
        let target = state.entities.iter().enumerate().position(|(ei, e)| {
            !hit_entities.contains(&ei)
                && collidable(e, config)
                && (bullet_x - e.position.left).abs() < config.bullet_hit_dx
                && (bullet.top - e.position.top).abs() < config.bullet_hit_dy
        });
        if let Some(ei) = target {
            hit_entities.push(ei);
            used_bullets.push(bi);
            hits.push((ei, bullet.damage, bullet.knockback));
        }
    }

    let now = state.now_ms;
    let mut dead: Vec<usize> = Vec::new();
    let mut events = Vec::new();

    for (ei, damage, knockback) in hits {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let entity = &mut state.entities[ei];
        entity.was_hit = true;
        entity.knockback = sign * knockback;
        entity.hit_clear_at_ms = Some(now + config.hit_flash_ms);

        // Bones have no health: the bullet is spent but nothing dies.
        let Some(health) = entity.health else {
            continue;
        };
        let remaining = health.saturating_sub(damage);
        entity.health = Some(remaining);
        if remaining > 0 {
            continue;
        }

        dead.push(ei);
        let (id, kind) = (entity.id, entity.kind);
        if kind.is_enemy() {
            if state.run.killed_ids.insert(id) {
                tracing::debug!(id, ?kind, "enemy killed");
                events.push(GameEvent::EnemyKilled { id, kind });
            }
        } else if kind.is_boss() {
            tracing::debug!(id, "boss defeated");
            events.push(GameEvent::BossDefeated { id });
        }
    }

    state.entities = state
        .entities
        .iter()
        .enumerate()
        .filter(|(i, _)| !dead.contains(i))
        .map(|(_, e)| e.clone())
        .collect();

    state.bullets = state
        .bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    events
}

// ── Player ↔ entity ──────────────────────────────────────────────────────────

/// Everything that reaches the player's feet band is removed. Hostile kinds
/// cost one life each unless the shield is up; reaching zero lives ends the
/// run. The combo reset for hostile contact happens in `store::apply_events`.
pub fn resolve_player_hits(state: &mut GameState, config: &GameConfig) -> Vec<GameEvent> {
    let player_x = state.player_screen_x();
    let player_y = state.player_screen_y(config.player_offset_from_bottom);
    let bottom = state.viewport.height;
    let shielded = state
        .active_powerups
        .is_active(PowerupKind::Shield, state.now_ms);

    let mut lives_lost: u32 = 0;
    let mut events = Vec::new();

    state.entities.retain(|e| {
        if !collidable(e, config) {
            return true;
        }
        let dx = (player_x - e.position.left).abs();
        let feet = e.position.top + e.scale * config.feet_offset;
        if dx >= config.player_hit_dx || feet < player_y || feet > bottom {
            return true;
        }

        events.push(GameEvent::Collision { id: e.id, kind: e.kind });
        if e.kind.is_hostile() {
            if shielded {
                events.push(GameEvent::ShieldAbsorbed { id: e.id, kind: e.kind });
            } else {
                lives_lost += 1;
                events.push(GameEvent::PlayerDamaged { id: e.id, kind: e.kind });
            }
        }
        false
    });

    if lives_lost > 0 {
        state.player.dogz = state.player.dogz.saturating_sub(lives_lost);
        tracing::debug!(lives_lost, dogz = state.player.dogz, "player hit");
        if state.player.dogz == 0 {
            events.extend(store::trigger_game_over(state, GameOverReason::OutOfLives));
        }
    }
    events
}

// ── Player ↔ powerup ─────────────────────────────────────────────────────────

/// Powerups low enough on screen and within reach of the player are
/// collected.
pub fn resolve_powerup_pickups(state: &mut GameState, config: &GameConfig) -> Vec<GameEvent> {
    let player_x = state.player_screen_x();
    let pickup_line = state.viewport.height - config.player_offset_from_bottom;
    let mut events = Vec::new();

    state.powerups.retain(|p| {
        let reached = p.position.top > pickup_line
            && (player_x - p.position.left).abs() < config.player_hit_dx;
        if reached {
            tracing::debug!(id = p.id, kind = ?p.kind, "powerup collected");
            events.push(GameEvent::PowerupCollected { powerup: p.clone() });
        }
        !reached
    });
    events
}
