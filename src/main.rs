mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use dogz_defense::compute::{init_state, press_key, resize, tick};
use dogz_defense::config::GameConfig;
use dogz_defense::entities::{GamePhase, GameState};
use dogz_defense::input::{map_key, Key};
use dogz_defense::store;

const LOG_FILE: &str = "dogz_defense.log";

/// The terminal is in raw/alternate-screen mode, so logs go to a file.
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=dogz_defense=debug`.
fn init_logging() {
    let Ok(file) = std::fs::File::create(LOG_FILE) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// DOM-style name for a terminal key, as understood by `map_key`.
fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Left => Some("ArrowLeft".to_string()),
        KeyCode::Right => Some("ArrowRight".to_string()),
        KeyCode::Up => Some("ArrowUp".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "🐾  DOGZ  DEFENSE  🐾";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let lines: &[(&str, Color)] = &[
        ("Keep the zombies off your dogz.", Color::White),
        ("Five kills in a row build a streak; getting hit wipes it.", Color::DarkGrey),
        ("Let five zombies slip by while standing still and it's over.", Color::DarkGrey),
        ("", Color::DarkGrey),
        ("+ Boost   ↑ Heavy bullets   ◊ Shield", Color::Yellow),
        ("", Color::DarkGrey),
        ("[ENTER] Start   [Q] Quit", Color::Green),
    ];
    for (i, (line, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(4) + i as u16;
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*line))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Each key press or OS key-repeat is applied as it arrives; there is no
/// rate limiting beyond the terminal's own repeat rate. The viewport is
/// re-read every frame so the game follows terminal resizes.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let frame = Duration::from_millis(config.tick_ms.max(1));

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                KeyCode::Char('r') | KeyCode::Char('R') if state.phase == GamePhase::GameOver => {
                    return Ok(false);
                }
                _ => {}
            }
            if let Some(name) = key_name(code) {
                let key = map_key(&name);
                if key != Key::Other {
                    *state = press_key(state, config, key);
                }
            }
        }

        let (width, height) = terminal::size()?;
        let viewport = display::viewport_for(width, height);
        if viewport != state.viewport {
            *state = resize(state, config, viewport);
        }

        *state = tick(state, config, &mut rng);
        display::render(out, state, config, width, height)?;

        if store::game_over_countdown_secs(state, config) == Some(0) {
            return Ok(false);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();
    let config = GameConfig::load();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &config, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let (width, height) = terminal::size()?;
                let mut state = init_state(display::viewport_for(width, height), config);
                tracing::info!(width, height, "starting run");
                let quit = game_loop(out, &mut state, config, rx)?;
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
