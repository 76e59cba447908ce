mod common;

use common::*;
use dogz_defense::entities::*;
use dogz_defense::input::*;

#[test]
fn key_bindings() {
    assert_eq!(map_key("a"), Key::Left);
    assert_eq!(map_key("ArrowLeft"), Key::Left);
    assert_eq!(map_key("d"), Key::Right);
    assert_eq!(map_key("ArrowRight"), Key::Right);
    assert_eq!(map_key("w"), Key::Fire);
    assert_eq!(map_key(" "), Key::Fire);
    assert_eq!(map_key("ArrowUp"), Key::Fire);
    assert_eq!(map_key("b"), Key::Boost);
    assert_eq!(map_key("x"), Key::Other);
    assert_eq!(map_key("ArrowDown"), Key::Other);
}

#[test]
fn step_is_thirty_pixels() {
    let cfg = quiet_config();
    let mut s = make_state();
    move_right(&mut s, &cfg);
    assert_eq!(s.player.character_x, 30.0);
    move_left(&mut s, &cfg);
    move_left(&mut s, &cfg);
    assert_eq!(s.player.character_x, -30.0);
}

#[test]
fn hundred_moves_right_clamp_exactly() {
    let cfg = quiet_config();
    let mut s = make_state(); // width 800 → range 300
    for _ in 0..100 {
        handle_key(&mut s, &cfg, Key::Right);
    }
    assert_eq!(s.player.character_x, 0.375 * 800.0);
}

#[test]
fn hundred_moves_left_clamp_exactly() {
    let cfg = quiet_config();
    let mut s = make_state();
    s.viewport = Viewport::new(1000.0, 600.0); // range 375, not a multiple of 30
    for _ in 0..100 {
        handle_key(&mut s, &cfg, Key::Left);
    }
    assert_eq!(s.player.character_x, -375.0);
}

#[test]
fn zero_width_pins_player_to_centre() {
    let cfg = quiet_config();
    let mut s = make_state();
    s.viewport = Viewport::new(0.0, 600.0);
    move_right(&mut s, &cfg);
    assert_eq!(s.player.character_x, 0.0);
    move_left(&mut s, &cfg);
    assert_eq!(s.player.character_x, 0.0);
}

#[test]
fn moving_records_last_move_time() {
    let cfg = quiet_config();
    let mut s = make_state();
    s.now_ms = 1234;
    move_left(&mut s, &cfg);
    assert_eq!(s.run.last_move_ms, 1234);

    // Even a move blocked by the clamp counts as activity
    s.player.character_x = 300.0;
    s.now_ms = 2000;
    move_right(&mut s, &cfg);
    assert_eq!(s.player.character_x, 300.0);
    assert_eq!(s.run.last_move_ms, 2000);
}

#[test]
fn fire_and_boost_keys() {
    let cfg = quiet_config();
    let mut s = make_state();
    assert!(handle_key(&mut s, &cfg, Key::Fire));
    assert!(handle_key(&mut s, &cfg, Key::Fire));
    assert_eq!(s.bullets.len(), 2);

    assert!(handle_key(&mut s, &cfg, Key::Boost));
    assert!(!handle_key(&mut s, &cfg, Key::Boost)); // cooling down
    assert!(!handle_key(&mut s, &cfg, Key::Other));
}

#[test]
fn keys_ignored_outside_running_phase() {
    let cfg = quiet_config();
    for phase in [GamePhase::Intro, GamePhase::GameOver] {
        let mut s = make_state();
        s.phase = phase;
        assert!(!handle_key(&mut s, &cfg, Key::Right));
        assert!(!handle_key(&mut s, &cfg, Key::Fire));
        assert_eq!(s.player.character_x, 0.0);
        assert!(s.bullets.is_empty());
    }
}
