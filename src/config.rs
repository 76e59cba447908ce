use serde::{Deserialize, Serialize};

/// Data-driven tuning for the whole engine. All times are milliseconds of
/// simulation clock, all distances screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep of the simulation.
    pub tick_ms: u64,
    /// Length of the intro phase before gameplay starts.
    pub intro_ms: u64,

    // ── Spawner ──
    /// Entity spawn interval. 0 disables spawning.
    pub spawn_interval_ms: u64,
    /// Powerup spawn interval. 0 disables spawning.
    pub powerup_interval_ms: u64,
    pub spawn_top: f32,
    pub powerup_spawn_top: f32,
    /// Fraction of the width, centred, that spawns land in.
    pub spawn_width_ratio: f32,
    /// Rolls above this become a boss.
    pub boss_threshold: f64,
    /// Rolls below this become a bone.
    pub bone_threshold: f64,
    /// Rolls below this (and at least `bone_threshold`) become trash.
    pub trash_threshold: f64,
    pub boss_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,

    // ── Mover ──
    pub fall_step: f32,
    /// Fraction of the gap to the player closed per tick, times speed.
    pub drift_factor: f32,
    pub scale_growth_per_px: f32,
    pub max_scale: f32,
    /// How far below the bottom edge things travel before being culled.
    pub cull_margin: f32,
    /// Escaped enemies only count as missed once the player has been idle
    /// this long.
    pub idle_penalty_ms: u64,
    pub max_missed_enemies: u32,
    pub reveal_interval_ms: u64,
    pub reveal_delay_ms: u64,
    pub animation_interval_ms: u64,
    pub powerup_fall_speed: f32,

    // ── Bullets ──
    pub bullet_speed: f32,
    /// Animation frames simulated per tick.
    pub bullet_frames_per_tick: u32,
    pub bullet_cull_top: f32,
    pub bullet_damage: u32,
    pub boosted_bullet_damage: u32,
    pub bullet_knockback: f32,
    pub boosted_bullet_knockback: f32,

    // ── Collision ──
    pub bullet_hit_dx: f32,
    pub bullet_hit_dy: f32,
    pub player_hit_dx: f32,
    /// Feet sit `scale × feet_offset` below an entity's top.
    pub feet_offset: f32,
    /// Player row, measured up from the bottom edge.
    pub player_offset_from_bottom: f32,
    pub hit_flash_ms: u64,
    /// Whether entities still inside their spawn grace window can collide.
    pub collide_invisible: bool,

    // ── Player state ──
    pub move_step: f32,
    /// Fraction of the width the player may move either side of centre.
    pub move_range_ratio: f32,
    pub starting_dogz: u32,
    pub max_cleanliness: u32,
    pub boost_amount: u32,
    pub boost_cooldown_ms: u64,
    pub powerup_duration_ms: u64,
    pub kills_per_streak: u32,
    pub streak_flash_ms: u64,
    pub game_over_countdown_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            intro_ms: 1000,
            spawn_interval_ms: 2000,
            powerup_interval_ms: 7000,
            spawn_top: -100.0,
            powerup_spawn_top: -50.0,
            spawn_width_ratio: 0.75,
            boss_threshold: 0.95,
            bone_threshold: 0.30,
            trash_threshold: 0.60,
            boss_speed: 0.6,
            min_speed: 1.0,
            max_speed: 2.5,
            fall_step: 2.0,
            drift_factor: 0.01,
            scale_growth_per_px: 0.004,
            max_scale: 2.5,
            cull_margin: 100.0,
            idle_penalty_ms: 3000,
            max_missed_enemies: 5,
            reveal_interval_ms: 100,
            reveal_delay_ms: 500,
            animation_interval_ms: 150,
            powerup_fall_speed: 5.0,
            bullet_speed: 10.0,
            bullet_frames_per_tick: 3,
            bullet_cull_top: -50.0,
            bullet_damage: 1,
            boosted_bullet_damage: 3,
            bullet_knockback: 5.0,
            boosted_bullet_knockback: 15.0,
            bullet_hit_dx: 25.0,
            bullet_hit_dy: 40.0,
            player_hit_dx: 40.0,
            feet_offset: 20.0,
            player_offset_from_bottom: 150.0,
            hit_flash_ms: 150,
            collide_invisible: true,
            move_step: 30.0,
            move_range_ratio: 0.375,
            starting_dogz: 3,
            max_cleanliness: 100,
            boost_amount: 10,
            boost_cooldown_ms: 5000,
            powerup_duration_ms: 8000,
            kills_per_streak: 5,
            streak_flash_ms: 1200,
            game_over_countdown_ms: 10_000,
        }
    }
}

impl GameConfig {
    /// Load config from the file named by `DOGZ_CONFIG`, else
    /// `config/dogz.toml`. Falls back to defaults if the file is missing or
    /// unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("DOGZ_CONFIG").unwrap_or_else(|_| "config/dogz.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

