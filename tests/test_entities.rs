mod common;

use common::*;
use dogz_defense::entities::*;

#[test]
fn kind_predicates() {
    assert!(EntityKind::BossZombie.is_boss());
    assert!(!EntityKind::Zombie1.is_boss());

    for kind in [EntityKind::Zombie1, EntityKind::Zombie2, EntityKind::Zombie3] {
        assert!(kind.is_zombie());
        assert!(kind.is_enemy());
        assert!(kind.is_hostile());
    }

    assert!(EntityKind::Trash.is_enemy());
    assert!(!EntityKind::Trash.is_zombie());

    // Bosses hurt but are not "enemies" for kill credit or miss counting
    assert!(EntityKind::BossZombie.is_hostile());
    assert!(!EntityKind::BossZombie.is_enemy());

    assert!(!EntityKind::Bone.is_hostile());
    assert!(!EntityKind::Bone.is_enemy());
}

#[test]
fn health_table() {
    assert_eq!(EntityKind::Bone.max_health(), None);
    assert_eq!(EntityKind::Trash.max_health(), Some(2));
    assert_eq!(EntityKind::Zombie1.max_health(), Some(3));
    assert_eq!(EntityKind::Zombie2.max_health(), Some(3));
    assert_eq!(EntityKind::Zombie3.max_health(), Some(3));
    assert_eq!(EntityKind::BossZombie.max_health(), Some(10));
}

#[test]
fn damaged_and_alive() {
    let mut z = entity(1, EntityKind::Zombie1, 0.0, 0.0);
    assert!(!z.is_damaged());
    assert!(z.is_alive());

    z.health = Some(2);
    assert!(z.is_damaged());

    z.health = Some(0);
    assert!(!z.is_alive());

    let bone = entity(2, EntityKind::Bone, 0.0, 0.0);
    assert!(!bone.is_damaged());
    assert!(bone.is_alive());
}

#[test]
fn viewport_clamps_bad_dimensions() {
    let v = Viewport::new(-100.0, f32::NAN);
    assert_eq!(v.width, 0.0);
    assert_eq!(v.height, 0.0);
    assert_eq!(v.center_x(), 0.0);

    let v = Viewport::new(800.0, f32::INFINITY);
    assert_eq!(v.width, 800.0);
    assert_eq!(v.height, 0.0);
    assert_eq!(v.center_x(), 400.0);
}

#[test]
fn active_powerups_replace_instead_of_stacking() {
    let mut active = ActivePowerups::default();
    active.set_expiry(PowerupKind::Shield, 8000);
    active.set_expiry(PowerupKind::Shield, 13_000);
    assert_eq!(active.shield_until, Some(13_000));
    assert_eq!(active.remaining_ms(PowerupKind::Shield, 10_000), 3000);
}

#[test]
fn boost_has_no_slot() {
    let mut active = ActivePowerups::default();
    active.set_expiry(PowerupKind::Boost, 10_000);
    assert!(!active.is_active(PowerupKind::Boost, 0));
    assert_eq!(active, ActivePowerups::default());
}

#[test]
fn expire_reports_only_lapsed_kinds() {
    let mut active = ActivePowerups::default();
    active.set_expiry(PowerupKind::BulletBoost, 1000);
    active.set_expiry(PowerupKind::Shield, 3000);

    assert!(active.expire(999).is_empty());
    assert_eq!(active.expire(1000), vec![PowerupKind::BulletBoost]);
    assert!(active.bullet_boost_until.is_none());
    assert!(active.is_active(PowerupKind::Shield, 2000));
    assert_eq!(active.expire(5000), vec![PowerupKind::Shield]);
}

#[test]
fn run_ids_are_monotonic() {
    let mut run = RunContext::default();
    let a = run.next_id();
    let b = run.next_id();
    let c = run.next_id();
    assert!(a < b && b < c);
}

#[test]
fn player_screen_geometry() {
    let mut s = make_state();
    assert_eq!(s.player_screen_x(), 400.0);
    s.player.character_x = -120.0;
    assert_eq!(s.player_screen_x(), 280.0);
    assert_eq!(s.player_screen_y(150.0), 450.0);

    // Never above the top edge on a tiny viewport
    s.viewport = Viewport::new(100.0, 100.0);
    assert_eq!(s.player_screen_y(150.0), 0.0);
}

#[test]
fn game_state_clone_is_independent() {
    let original = make_state();
    let mut cloned = original.clone();

    cloned.player.character_x = 99.0;
    cloned.player.dogz = 0;
    cloned.entities.push(entity(1, EntityKind::Trash, 5.0, 5.0));
    cloned.run.killed_ids.insert(1);

    assert_eq!(original.player.character_x, 0.0);
    assert_eq!(original.player.dogz, 3);
    assert!(original.entities.is_empty());
    assert!(original.run.killed_ids.is_empty());
}
