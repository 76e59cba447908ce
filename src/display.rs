//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only maps screen
//! pixels onto terminal cells and translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dogz_defense::config::GameConfig;
use dogz_defense::entities::{
    Bullet, Entity, EntityKind, GameOverReason, GamePhase, GameState, Powerup, PowerupKind,
    Viewport,
};
use dogz_defense::store;

/// Screen pixels per terminal column / row.
pub const CELL_W: f32 = 10.0;
pub const CELL_H: f32 = 20.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_CLEAN: Color = Color::Cyan;
const C_HUD_STREAK: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_BONE: Color = Color::White;
const C_TRASH: Color = Color::DarkYellow;
const C_ZOMBIE: Color = Color::Green;
const C_BOSS: Color = Color::Magenta;
const C_HIT: Color = Color::Red;
const C_TELEGRAPH: Color = Color::DarkGrey;
const C_BULLET: Color = Color::Cyan;
const C_BULLET_BOOSTED: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Pixel viewport for a terminal of `width` × `height` cells: everything
/// inside the border, minus the HUD and hint rows.
pub fn viewport_for(width: u16, height: u16) -> Viewport {
    Viewport::new(
        width.saturating_sub(2) as f32 * CELL_W,
        height.saturating_sub(4) as f32 * CELL_H,
    )
}

/// Terminal cell for a screen pixel, if it falls inside the play area.
fn cell(x: f32, y: f32, width: u16, height: u16) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = 1 + (x / CELL_W) as u16;
    let row = 2 + (y / CELL_H) as u16;
    if col >= width.saturating_sub(1) || row >= height.saturating_sub(2) {
        return None;
    }
    Some((col, row))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    config: &GameConfig,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;

    for powerup in &state.powerups {
        draw_powerup(out, powerup, width, height)?;
    }
    for entity in &state.entities {
        draw_entity(out, entity, width, height)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet, state, width, height)?;
    }

    draw_player(out, state, config, width, height)?;
    draw_controls_hint(out, height)?;

    match state.phase {
        GamePhase::Intro => {
            draw_banner(out, "~  the vortex opens  ~", Color::Magenta, width, height)?
        }
        GamePhase::GameOver => draw_game_over(out, state, config, width, height)?,
        GamePhase::Running => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    let p = &state.player;
    out.queue(cursor::MoveTo(1, 0))?;

    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Dogz:{:<4}", "♥".repeat(p.dogz as usize))))?;

    let filled = (p.cleanliness / 10) as usize;
    out.queue(style::SetForegroundColor(C_HUD_CLEAN))?;
    out.queue(Print(format!(
        " Clean:[{}{}]{:>3}",
        "█".repeat(filled),
        " ".repeat(10usize.saturating_sub(filled)),
        p.cleanliness
    )))?;

    let streak_color = if state.is_streak_flashing() {
        Color::White
    } else {
        C_HUD_STREAK
    };
    out.queue(style::SetForegroundColor(streak_color))?;
    out.queue(Print(format!("  Streak:{}  Kills:{}", p.streak, p.kill_count)))?;

    // Active powerups + boost cooldown, right-aligned
    let mut tags = String::new();
    for (kind, label) in [(PowerupKind::BulletBoost, "BULLET"), (PowerupKind::Shield, "SHIELD")] {
        let left = state.active_powerups.remaining_ms(kind, state.now_ms);
        if left > 0 {
            tags.push_str(&format!("[{} {:>2}s] ", label, left.div_ceil(1000)));
        }
    }
    let cooldown = store::boost_cooldown_remaining_ms(state);
    if cooldown > 0 {
        tags.push_str(&format!("Boost:{}s", cooldown.div_ceil(1000)));
    } else {
        tags.push_str("Boost:ready");
    }
    let rx = width.saturating_sub(tags.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&tags))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &GameState,
    config: &GameConfig,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let x = state.player_screen_x();
    let y = state.player_screen_y(config.player_offset_from_bottom);
    let Some((col, row)) = cell(x, y, width, height) else {
        return Ok(());
    };
    // Two-row dog:
    //   ▲▲    ← ears
    //  (••)   ← face
    let shielded = state
        .active_powerups
        .is_active(PowerupKind::Shield, state.now_ms);
    out.queue(style::SetForegroundColor(if shielded { Color::Cyan } else { C_PLAYER }))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(Print("▲▲"))?;
    if row + 1 < height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(2).max(1), row + 1))?;
        out.queue(Print("(••)"))?;
    }
    Ok(())
}

fn entity_sprite(entity: &Entity) -> (&'static str, Color) {
    let zombie_frames = ["Z", "z", "Ƶ"];
    match entity.kind {
        EntityKind::Bone => ("≈", C_BONE),
        EntityKind::Trash => ("▣", C_TRASH),
        EntityKind::Zombie1 | EntityKind::Zombie2 | EntityKind::Zombie3 => {
            (zombie_frames[entity.frame_index as usize % 3], C_ZOMBIE)
        }
        EntityKind::BossZombie => ("▓B▓", C_BOSS),
    }
}

fn draw_entity<W: Write>(
    out: &mut W,
    entity: &Entity,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let x = entity.position.left + entity.knockback;
    let Some((col, row)) = cell(x, entity.position.top, width, height) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;

    // Still inside the spawn grace window: telegraph only.
    if !entity.visible {
        out.queue(style::SetForegroundColor(C_TELEGRAPH))?;
        out.queue(Print("·"))?;
        return Ok(());
    }

    let (sprite, color) = entity_sprite(entity);
    out.queue(style::SetForegroundColor(if entity.was_hit { C_HIT } else { color }))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let x = state.viewport.center_x() + bullet.offset_x;
    let Some((col, row)) = cell(x, bullet.top, width, height) else {
        return Ok(());
    };
    let color = if bullet.damage > 1 { C_BULLET_BOOSTED } else { C_BULLET };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print("║"))?;
    Ok(())
}

/// Draw a falling powerup.
///
/// Symbols:
///   +  (cyan)    : Boost: instant cleanliness
///   ↑  (yellow)  : BulletBoost: heavy bullets for a while
///   ◊  (magenta) : Shield: hostile contact is free for a while
fn draw_powerup<W: Write>(
    out: &mut W,
    powerup: &Powerup,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let Some((col, row)) = cell(powerup.position.left, powerup.position.top, width, height) else {
        return Ok(());
    };
    let (sym, color) = match powerup.kind {
        PowerupKind::Boost => ("+", Color::Cyan),
        PowerupKind::BulletBoost => ("↑", Color::Yellow),
        PowerupKind::Shield => ("◊", Color::Magenta),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sym))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   W / SPACE : Shoot   B : Boost   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    draw_centered(out, &[(text.to_string(), color)], width, height)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    config: &GameConfig,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let reason = match state.game_over_reason {
        Some(GameOverReason::TooManyMissed) => "Too many zombies got through",
        _ => "Out of dogz",
    };
    let countdown = store::game_over_countdown_secs(state, config).unwrap_or(0);
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (reason.to_string(), Color::DarkGrey),
        (
            format!("Kills: {}   Missed: {}", state.run.total_kills, state.run.missed_enemies),
            Color::Yellow,
        ),
        (format!("Back to menu in {countdown}s"), Color::DarkGrey),
        ("R - Play Again  Q - Quit".to_string(), Color::White),
    ];
    draw_centered(out, &lines, width, height)
}
