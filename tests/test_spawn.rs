mod common;

use common::*;
use dogz_defense::config::GameConfig;
use dogz_defense::entities::*;
use dogz_defense::spawn::*;

// ── kind_for_roll ─────────────────────────────────────────────────────────────

#[test]
fn roll_table_boundaries() {
    let cfg = GameConfig::default();
    assert_eq!(kind_for_roll(0.0, 0, &cfg), EntityKind::Bone);
    assert_eq!(kind_for_roll(0.2999, 0, &cfg), EntityKind::Bone);
    assert_eq!(kind_for_roll(0.30, 0, &cfg), EntityKind::Trash);
    assert_eq!(kind_for_roll(0.5999, 0, &cfg), EntityKind::Trash);
    assert_eq!(kind_for_roll(0.60, 0, &cfg), EntityKind::Zombie1);
    // Exactly 0.95 is still a zombie; only rolls above it are bosses
    assert_eq!(kind_for_roll(0.95, 0, &cfg), EntityKind::Zombie1);
    assert_eq!(kind_for_roll(0.9501, 0, &cfg), EntityKind::BossZombie);
    assert_eq!(kind_for_roll(0.9999, 2, &cfg), EntityKind::BossZombie);
}

#[test]
fn roll_zombie_variants() {
    let cfg = GameConfig::default();
    assert_eq!(kind_for_roll(0.7, 0, &cfg), EntityKind::Zombie1);
    assert_eq!(kind_for_roll(0.7, 1, &cfg), EntityKind::Zombie2);
    assert_eq!(kind_for_roll(0.7, 2, &cfg), EntityKind::Zombie3);
}

// ── spawn_left ────────────────────────────────────────────────────────────────

#[test]
fn spawn_left_stays_in_central_band() {
    let mut rng = seeded_rng();
    for _ in 0..500 {
        let x = spawn_left(800.0, 0.75, &mut rng);
        assert!((100.0..700.0).contains(&x), "x = {x}");
    }
}

#[test]
fn spawn_left_zero_width_is_centre() {
    let mut rng = seeded_rng();
    assert_eq!(spawn_left(0.0, 0.75, &mut rng), 0.0);
    assert_eq!(spawn_left(400.0, 0.0, &mut rng), 200.0);
}

#[test]
fn spawn_left_sub_precision_band_is_centre() {
    let mut rng = seeded_rng();
    assert_eq!(spawn_left(800.0, 1e-10, &mut rng), 400.0);
}

// ── spawn_entity ──────────────────────────────────────────────────────────────

#[test]
fn spawned_entity_starts_hidden_above_screen() {
    let cfg = quiet_config();
    let mut s = make_state();
    s.now_ms = 2000;
    let id = spawn_entity(&mut s, &cfg, &mut seeded_rng());

    assert_eq!(s.entities.len(), 1);
    let e = &s.entities[0];
    assert_eq!(e.id, id);
    assert_eq!(e.position.top, -100.0);
    assert!(!e.visible);
    assert!(!e.was_hit);
    assert_eq!(e.spawned_at_ms, 2000);
    assert_eq!(e.frame_index, 0);
    assert_eq!(e.health, e.kind.max_health());
    assert_eq!(e.max_health, e.kind.max_health());
}

#[test]
fn spawned_entities_respect_kind_tables() {
    let cfg = quiet_config();
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..300 {
        spawn_entity(&mut s, &cfg, &mut rng);
    }

    let mut last_id = 0;
    for e in &s.entities {
        assert!(e.id > last_id, "ids must increase");
        last_id = e.id;
        assert!((100.0..700.0).contains(&e.position.left));
        if e.kind.is_boss() {
            assert_eq!(e.speed, 0.6);
            assert_eq!(e.health, Some(10));
        } else {
            assert!((1.0..2.5).contains(&e.speed), "speed = {}", e.speed);
        }
    }
}

#[test]
fn drop_rates_follow_roll_table() {
    let cfg = quiet_config();
    let mut s = make_state();
    let mut rng = seeded_rng();
    let n = 4000;
    for _ in 0..n {
        spawn_entity(&mut s, &cfg, &mut rng);
    }
    let share = |pred: fn(EntityKind) -> bool| {
        s.entities.iter().filter(|e| pred(e.kind)).count() as f64 / n as f64
    };

    let bones = share(|k| k == EntityKind::Bone);
    let trash = share(|k| k == EntityKind::Trash);
    let zombies = share(|k| k.is_zombie());
    let bosses = share(|k| k.is_boss());

    assert!((0.25..0.35).contains(&bones), "bones {bones}");
    assert!((0.25..0.35).contains(&trash), "trash {trash}");
    assert!((0.30..0.40).contains(&zombies), "zombies {zombies}");
    assert!((0.02..0.08).contains(&bosses), "bosses {bosses}");
}

// ── spawn_powerup ─────────────────────────────────────────────────────────────

#[test]
fn spawned_powerup_in_band() {
    let cfg = quiet_config();
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        spawn_powerup(&mut s, &cfg, &mut rng);
    }
    assert_eq!(s.powerups.len(), 50);
    for p in &s.powerups {
        assert_eq!(p.position.top, -50.0);
        assert!((100.0..700.0).contains(&p.position.left));
    }
    // All three kinds show up over 50 draws
    for kind in [PowerupKind::Boost, PowerupKind::BulletBoost, PowerupKind::Shield] {
        assert!(s.powerups.iter().any(|p| p.kind == kind), "{kind:?} missing");
    }
}

#[test]
fn spawn_ids_shared_across_lists() {
    let cfg = quiet_config();
    let mut s = make_state();
    let mut rng = seeded_rng();
    let a = spawn_entity(&mut s, &cfg, &mut rng);
    let b = spawn_powerup(&mut s, &cfg, &mut rng);
    let c = spawn_entity(&mut s, &cfg, &mut rng);
    assert!(a < b && b < c);
}
