//! InputController: turns key names into player actions.

use crate::config::GameConfig;
use crate::entities::GameState;
use crate::store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
    Boost,
    Other,
}

/// Map a DOM-style key name (`"a"`, `"ArrowLeft"`, `" "`) to an action.
pub fn map_key(name: &str) -> Key {
    match name {
        "a" | "A" | "ArrowLeft" => Key::Left,
        "d" | "D" | "ArrowRight" => Key::Right,
        "w" | "W" | " " | "Space" | "ArrowUp" => Key::Fire,
        "b" | "B" => Key::Boost,
        _ => Key::Other,
    }
}

/// Furthest the player may stand from the centre, either side.
pub fn movement_range(state: &GameState, config: &GameConfig) -> f32 {
    (state.viewport.width * config.move_range_ratio).max(0.0)
}

pub fn move_left(state: &mut GameState, config: &GameConfig) {
    let range = movement_range(state, config);
    state.player.character_x = (state.player.character_x - config.move_step).max(-range);
    state.run.last_move_ms = state.now_ms;
}

pub fn move_right(state: &mut GameState, config: &GameConfig) {
    let range = movement_range(state, config);
    state.player.character_x = (state.player.character_x + config.move_step).min(range);
    state.run.last_move_ms = state.now_ms;
}

/// Apply one key press. Keys are ignored outside the running phase.
/// Returns whether the key did anything.
pub fn handle_key(state: &mut GameState, config: &GameConfig, key: Key) -> bool {
    if !state.is_running() {
        return false;
    }
    match key {
        Key::Left => move_left(state, config),
        Key::Right => move_right(state, config),
        Key::Fire => {
            store::fire_bullet(state, config);
        }
        Key::Boost => return store::trigger_boost(state, config),
        Key::Other => return false,
    }
    true
}
