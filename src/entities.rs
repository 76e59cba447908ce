//! All game entity types: pure data plus the small predicates every
//! subsystem asks of them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Harmless pickup; never costs a life and has no health.
    Bone,
    Trash,
    Zombie1,
    Zombie2,
    Zombie3,
    BossZombie,
}

impl EntityKind {
    pub fn is_boss(self) -> bool {
        self == EntityKind::BossZombie
    }

    pub fn is_zombie(self) -> bool {
        matches!(
            self,
            EntityKind::Zombie1 | EntityKind::Zombie2 | EntityKind::Zombie3
        )
    }

    /// Kinds that earn kill credit and count as missed when they escape.
    pub fn is_enemy(self) -> bool {
        self == EntityKind::Trash || self.is_zombie()
    }

    /// Kinds that cost a life on contact with the player.
    pub fn is_hostile(self) -> bool {
        self.is_enemy() || self.is_boss()
    }

    pub fn max_health(self) -> Option<u32> {
        match self {
            EntityKind::Bone => None,
            EntityKind::Trash => Some(2),
            EntityKind::Zombie1 | EntityKind::Zombie2 | EntityKind::Zombie3 => Some(3),
            EntityKind::BossZombie => Some(10),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Instantly raises cleanliness.
    Boost,
    /// Triple damage and knockback for new bullets while active.
    BulletBoost,
    /// Hostile contact costs no life while active.
    Shield,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Intro,
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    OutOfLives,
    TooManyMissed,
}

/// Screen-pixel position; `top` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f32,
    pub left: f32,
}

// ── Viewport ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Negative or non-finite dimensions collapse to zero so every derived
    /// range stays non-negative.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u64,
    pub kind: EntityKind,
    pub position: Position,
    pub scale: f32,
    /// Multiplier on the per-tick fall and drift.
    pub speed: f32,
    pub health: Option<u32>,
    pub max_health: Option<u32>,
    /// Hit-flash flag, cleared once `hit_clear_at_ms` passes.
    pub was_hit: bool,
    pub hit_clear_at_ms: Option<u64>,
    /// Horizontal render offset while the hit flash lasts.
    pub knockback: f32,
    pub visible: bool,
    pub spawned_at_ms: u64,
    /// Sprite frame 0..=2, zombies only.
    pub frame_index: u8,
}

impl Entity {
    /// True once any bullet has taken health off this entity.
    pub fn is_damaged(&self) -> bool {
        match (self.health, self.max_health) {
            (Some(health), Some(max)) => health < max,
            _ => false,
        }
    }

    /// Bones have no health and are always "alive".
    pub fn is_alive(&self) -> bool {
        self.health.map_or(true, |h| h > 0)
    }
}

// ── Projectiles & pickups ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u64,
    /// Offset from the screen centre, fixed at fire time.
    pub offset_x: f32,
    pub top: f32,
    pub damage: u32,
    pub knockback: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u64,
    pub kind: PowerupKind,
    pub position: Position,
}

/// Expiry timestamps for the timed powerups. One slot per kind, so a
/// re-activation replaces the expiry instead of stacking it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerups {
    pub bullet_boost_until: Option<u64>,
    pub shield_until: Option<u64>,
}

impl ActivePowerups {
    fn slot(&self, kind: PowerupKind) -> Option<u64> {
        match kind {
            PowerupKind::Boost => None,
            PowerupKind::BulletBoost => self.bullet_boost_until,
            PowerupKind::Shield => self.shield_until,
        }
    }

    pub fn is_active(&self, kind: PowerupKind, now_ms: u64) -> bool {
        self.slot(kind).map_or(false, |until| now_ms < until)
    }

    pub fn remaining_ms(&self, kind: PowerupKind, now_ms: u64) -> u64 {
        self.slot(kind)
            .map_or(0, |until| until.saturating_sub(now_ms))
    }

    /// Boost is instant and has no slot; setting it is a no-op.
    pub fn set_expiry(&mut self, kind: PowerupKind, until_ms: u64) {
        match kind {
            PowerupKind::Boost => {}
            PowerupKind::BulletBoost => self.bullet_boost_until = Some(until_ms),
            PowerupKind::Shield => self.shield_until = Some(until_ms),
        }
    }

    /// Drop expired slots. Returns the kinds that just ran out.
    pub fn expire(&mut self, now_ms: u64) -> Vec<PowerupKind> {
        let mut expired = Vec::new();
        if self.bullet_boost_until.is_some_and(|until| now_ms >= until) {
            self.bullet_boost_until = None;
            expired.push(PowerupKind::BulletBoost);
        }
        if self.shield_until.is_some_and(|until| now_ms >= until) {
            self.shield_until = None;
            expired.push(PowerupKind::Shield);
        }
        expired
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

/// Everything observable that happened during one tick or input call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { id: u64, kind: EntityKind },
    /// A boss reached zero health. Does not count toward the streak.
    BossDefeated { id: u64 },
    /// Any entity touched the player, harmless ones included.
    Collision { id: u64, kind: EntityKind },
    PlayerDamaged { id: u64, kind: EntityKind },
    ShieldAbsorbed { id: u64, kind: EntityKind },
    PowerupCollected { powerup: Powerup },
    PowerupExpired { kind: PowerupKind },
    StreakIncreased { streak: u32 },
    EnemyMissed { id: u64, missed: u32 },
    BoostUsed { cleanliness: u32 },
    GameOver { reason: GameOverReason },
}

// ── Player & run bookkeeping ─────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Remaining lives.
    pub dogz: u32,
    pub cleanliness: u32,
    pub streak: u32,
    pub kill_count: u32,
    /// Offset from the screen centre.
    pub character_x: f32,
}

/// Per-run trackers, created at run start and dropped with the state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunContext {
    /// Entities already credited as kills.
    pub killed_ids: HashSet<u64>,
    /// Unhit enemies that escaped while the player idled.
    pub missed_enemies: u32,
    /// Kills over the whole run; unlike `Player::kill_count` never reset.
    pub total_kills: u32,
    pub next_id: u64,
    pub last_move_ms: u64,
    /// Kill count at which the streak was last advanced.
    pub last_streak_milestone: u32,
}

impl RunContext {
    pub fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state. Cloneable so the tick function can return a new
/// snapshot without mutating the original.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub viewport: Viewport,
    pub entities: Vec<Entity>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<Powerup>,
    pub player: Player,
    pub active_powerups: ActivePowerups,
    pub streak_flash_until_ms: Option<u64>,
    pub boost_ready_at_ms: u64,
    pub phase: GamePhase,
    pub game_over_at_ms: Option<u64>,
    pub game_over_reason: Option<GameOverReason>,
    /// Simulation clock; advances by one tick per `tick` call.
    pub now_ms: u64,
    pub run: RunContext,
    /// Events published by the last tick, preceded by any raised by input
    /// before it ran.
    pub events: Vec<GameEvent>,
    /// Events raised by input since the last tick; the next tick publishes
    /// them ahead of its own.
    pub pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Player's horizontal screen position.
    pub fn player_screen_x(&self) -> f32 {
        self.viewport.center_x() + self.player.character_x
    }

    /// Player's screen row, `offset` pixels above the bottom edge.
    pub fn player_screen_y(&self, offset: f32) -> f32 {
        (self.viewport.height - offset).max(0.0)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_streak_flashing(&self) -> bool {
        self.streak_flash_until_ms.is_some_and(|until| self.now_ms < until)
    }
}
