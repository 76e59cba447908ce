#![allow(dead_code)]

use dogz_defense::compute::init_state;
use dogz_defense::config::GameConfig;
use dogz_defense::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Defaults, minus the intro and the timed spawners, so tests control
/// exactly what is on screen.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        intro_ms: 0,
        spawn_interval_ms: 0,
        powerup_interval_ms: 0,
        ..GameConfig::default()
    }
}

/// 800×600 viewport: player centre x = 400, player row y = 450.
pub fn make_state() -> GameState {
    init_state(Viewport::new(800.0, 600.0), &quiet_config())
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn entity(id: u64, kind: EntityKind, left: f32, top: f32) -> Entity {
    let max_health = kind.max_health();
    Entity {
        id,
        kind,
        position: Position { top, left },
        scale: 1.0,
        speed: 1.0,
        health: max_health,
        max_health,
        was_hit: false,
        hit_clear_at_ms: None,
        knockback: 0.0,
        visible: true,
        spawned_at_ms: 0,
        frame_index: 0,
    }
}

pub fn bullet(id: u64, offset_x: f32, top: f32) -> Bullet {
    Bullet {
        id,
        offset_x,
        top,
        damage: 1,
        knockback: 5.0,
    }
}

pub fn powerup(id: u64, kind: PowerupKind, left: f32, top: f32) -> Powerup {
    Powerup {
        id,
        kind,
        position: Position { top, left },
    }
}

pub fn count_events(state: &GameState, pred: impl Fn(&GameEvent) -> bool) -> usize {
    state.events.iter().filter(|e| pred(e)).count()
}
