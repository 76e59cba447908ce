//! Top-level game functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`. Side effects are limited to the injected RNG.

use rand::Rng;

use crate::collision;
use crate::config::GameConfig;
use crate::entities::{
    ActivePowerups, GameEvent, GamePhase, GameState, Player, RunContext, Viewport,
};
use crate::input::{self, Key};
use crate::movement;
use crate::spawn;
use crate::store;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state for a fresh run.
pub fn init_state(viewport: Viewport, config: &GameConfig) -> GameState {
    GameState {
        viewport,
        entities: Vec::new(),
        bullets: Vec::new(),
        powerups: Vec::new(),
        player: Player {
            dogz: config.starting_dogz,
            cleanliness: 0,
            streak: 0,
            kill_count: 0,
            character_x: 0.0,
        },
        active_powerups: ActivePowerups::default(),
        streak_flash_until_ms: None,
        boost_ready_at_ms: 0,
        phase: if config.intro_ms == 0 {
            GamePhase::Running
        } else {
            GamePhase::Intro
        },
        game_over_at_ms: None,
        game_over_reason: None,
        now_ms: 0,
        run: RunContext::default(),
        events: Vec::new(),
        pending_events: Vec::new(),
    }
}

// ── External inputs ──────────────────────────────────────────────────────────

pub fn press_key(state: &GameState, config: &GameConfig, key: Key) -> GameState {
    let mut next = state.clone();
    input::handle_key(&mut next, config, key);
    next
}

/// Adopt new viewport dimensions, pulling the player back inside the
/// (possibly smaller) movement range.
pub fn resize(state: &GameState, config: &GameConfig, viewport: Viewport) -> GameState {
    let mut next = state.clone();
    next.viewport = viewport;
    let range = input::movement_range(&next, config);
    next.player.character_x = next.player.character_x.clamp(-range, range);
    next
}

/// True when `interval` has elapsed between `prev` and `now`. An interval
/// of 0 never fires.
fn crossed(prev: u64, now: u64, interval: u64) -> bool {
    interval > 0 && now / interval > prev / interval
}

// ── Per-tick step (nearly pure, RNG injected) ───────────────────────────

/// Advance the simulation by one fixed timestep. All randomness comes
/// through `rng` so callers control determinism.
///
/// Order within a tick: housekeeping, spawns, movement and culling, the
/// bullet/player/powerup collision passes, then reveal and animation.
pub fn tick(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.events = std::mem::take(&mut next.pending_events);
    let prev = next.now_ms;
    next.now_ms += config.tick_ms;
    let now = next.now_ms;

    match next.phase {
        GamePhase::GameOver => return next,
        GamePhase::Intro => {
            if now < config.intro_ms {
                return next;
            }
            next.phase = GamePhase::Running;
            tracing::info!(now, "run started");
        }
        GamePhase::Running => {}
    }

    // ── 1. Housekeeping ──────────────────────────────────────────────────────
    for kind in next.active_powerups.expire(now) {
        tracing::debug!(?kind, "powerup expired");
        next.events.push(GameEvent::PowerupExpired { kind });
    }
    movement::clear_hit_flags(&mut next);

    // ── 2. Spawns ────────────────────────────────────────────────────────────
    if crossed(prev, now, config.spawn_interval_ms) {
        spawn::spawn_entity(&mut next, config, rng);
    }
    if crossed(prev, now, config.powerup_interval_ms) {
        spawn::spawn_powerup(&mut next, config, rng);
    }

    // ── 3. Movement ──────────────────────────────────────────────────────────
    movement::move_entities(&mut next, config);
    let missed = movement::cull_entities(&mut next, config);
    next.events.extend(missed);
    movement::move_bullets(&mut next, config, config.bullet_frames_per_tick);
    movement::move_powerups(&mut next, config);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    if next.is_running() {
        let events = collision::resolve_bullet_hits(&mut next, config, rng);
        store::apply_events(&mut next, config, events);
    }
    if next.is_running() {
        let events = collision::resolve_player_hits(&mut next, config);
        store::apply_events(&mut next, config, events);
    }
    if next.is_running() {
        let events = collision::resolve_powerup_pickups(&mut next, config);
        store::apply_events(&mut next, config, events);
    }

    // ── 5. Cosmetic cadences ─────────────────────────────────────────────────
    if crossed(prev, now, config.reveal_interval_ms) {
        movement::reveal_entities(&mut next, config);
    }
    if crossed(prev, now, config.animation_interval_ms) {
        movement::animate_entities(&mut next);
    }

    next
}
