//! Spawner: creates falling entities and powerups. All randomness comes
//! through the injected RNG so a seeded generator reproduces a run exactly.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Entity, EntityKind, GameState, Position, Powerup, PowerupKind};

// ── Drop tables ──────────────────────────────────────────────────────────────

/// Map one uniform roll in `[0, 1)` to an entity kind. `zombie_variant`
/// (0..3) picks which zombie sprite a zombie roll becomes.
pub fn kind_for_roll(roll: f64, zombie_variant: u8, config: &GameConfig) -> EntityKind {
    if roll > config.boss_threshold {
        EntityKind::BossZombie
    } else if roll < config.bone_threshold {
        EntityKind::Bone
    } else if roll < config.trash_threshold {
        EntityKind::Trash
    } else {
        match zombie_variant % 3 {
            0 => EntityKind::Zombie1,
            1 => EntityKind::Zombie2,
            _ => EntityKind::Zombie3,
        }
    }
}

fn powerup_kind(rng: &mut impl Rng) -> PowerupKind {
    match rng.gen_range(0..3) {
        0 => PowerupKind::Boost,
        1 => PowerupKind::BulletBoost,
        _ => PowerupKind::Shield,
    }
}

/// Uniform horizontal position inside the centred `ratio` of `width`.
/// Collapses to the centre when that band is empty or too narrow to
/// represent at `f32` precision.
pub fn spawn_left(width: f32, ratio: f32, rng: &mut impl Rng) -> f32 {
    let span = (width * ratio.clamp(0.0, 1.0)).max(0.0);
    let margin = (width - span) / 2.0;
    if margin + span <= margin {
        return width / 2.0;
    }
    rng.gen_range(margin..margin + span)
}

fn entity_speed(kind: EntityKind, config: &GameConfig, rng: &mut impl Rng) -> f32 {
    if kind.is_boss() {
        config.boss_speed
    } else if config.min_speed < config.max_speed {
        rng.gen_range(config.min_speed..config.max_speed)
    } else {
        config.min_speed
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Append one new entity above the visible area. Returns its id.
pub fn spawn_entity(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) -> u64 {
    let roll: f64 = rng.gen();
    let variant: u8 = rng.gen_range(0..3);
    let kind = kind_for_roll(roll, variant, config);
    let speed = entity_speed(kind, config, rng);
    let left = spawn_left(state.viewport.width, config.spawn_width_ratio, rng);
    let id = state.run.next_id();
    let max_health = kind.max_health();

    state.entities.push(Entity {
        id,
        kind,
        position: Position {
            top: config.spawn_top,
            left,
        },
        scale: 1.0,
        speed,
        health: max_health,
        max_health,
        was_hit: false,
        hit_clear_at_ms: None,
        knockback: 0.0,
        visible: false,
        spawned_at_ms: state.now_ms,
        frame_index: 0,
    });
    tracing::debug!(id, ?kind, left, speed, "spawned entity");
    id
}

/// Append one new powerup of a random kind. Returns its id.
pub fn spawn_powerup(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) -> u64 {
    let kind = powerup_kind(rng);
    let left = spawn_left(state.viewport.width, config.spawn_width_ratio, rng);
    let id = state.run.next_id();
    state.powerups.push(Powerup {
        id,
        kind,
        position: Position {
            top: config.powerup_spawn_top,
            left,
        },
    });
    tracing::debug!(id, ?kind, left, "spawned powerup");
    id
}
