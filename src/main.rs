mod cli;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use tracing::info;

use relic_escape::compute::{restart, shoot, start, tick, toggle_pause};
use relic_escape::display;
use relic_escape::entities::{HeldKeys, Hero, World};
use relic_escape::map::Map;

use crate::cli::Cli;

/// Without key-release events a key is considered "held" if its last
/// press/repeat event arrived within this many frames.  The OS key-repeat
/// rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at 60 FPS) is refreshed
/// before expiry once repeats start.
const HOLD_WINDOW: u64 = 8;

/// With `releases` (keyboard-enhanced terminals) a key is held from its press
/// until its release.  Otherwise it must have been seen within the last
/// `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, releases: bool) -> bool {
    match key_frame.get(key) {
        Some(_) if releases => true,
        Some(&last) => frame.saturating_sub(last) <= HOLD_WINDOW,
        None => false,
    }
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, releases: bool) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame, releases))
}

fn held_keys(key_frame: &HashMap<KeyCode, u64>, frame: u64, releases: bool) -> HeldKeys {
    HeldKeys {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
            releases,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
            releases,
        ),
        jump: any_held(
            key_frame,
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Char(' ')],
            frame,
            releases,
        ),
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Hero),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  RELIC  ESCAPE  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Magenta))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(18), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Choose your hero:"))?;

    let colors = [Color::Cyan, Color::Yellow, Color::Red];
    for (i, (hero, color)) in Hero::ALL.iter().zip(colors).enumerate() {
        let traits = hero.traits();
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(18), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{:<12}", hero.name())))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(
            " speed {:.1}  ammo {}  health {}",
            traits.speed, traits.ammo, traits.health
        )))?;
    }

    // Map legend
    out.queue(cursor::MoveTo(cx.saturating_sub(18), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Find the relic, reach the door, defeat the warden:"))?;

    let legend: &[(&str, Color, &str)] = &[
        ("<>", Color::Magenta, " Relic    : +4 ammo, unlocks the door"),
        ("[]", Color::Yellow,  " Door     : the warden waits beyond"),
        ("}{", Color::Green,   " Prisoner : hurts on contact"),
        ("ΩΩ", Color::Red,     " Warden   : three shots to escape"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy + 4 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(18), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(18), cy + 9))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("1-3 : Pick hero   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let Ok(event) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = event {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Hero::Wraith)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Hero::RuneKnight)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Hero::Ironbound)),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(MenuResult::Quit);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Menu,
}

/// Runs frames until the player quits or heads back to hero select.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, and the held direction keys are derived from it each
/// frame.  `releases` says whether the terminal reports key releases.
/// One-shot keys (shoot, pause, restart) act only on a fresh press, i.e.
/// when the key was not already held, so holding J fires once.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
    releases: bool,
) -> std::io::Result<LoopExit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    let fresh = !is_held(&key_frame, &code, frame, releases);
                    let keys = held_keys(&key_frame, frame, releases);
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(LoopExit::Quit),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Esc => return Ok(LoopExit::Menu),
                        KeyCode::Char('j') | KeyCode::Char('J') if fresh => {
                            *world = shoot(world, keys);
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') if fresh => {
                            *world = toggle_pause(world);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if fresh => {
                            *world = restart(world);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        *world = tick(world, held_keys(&key_frame, frame, releases));
        display::render(out, world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.init_logging()?;
    info!(fps = cli.fps, hero = ?cli.hero, "relic escape starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!(keyboard_enhanced, "input mode");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &cli, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    Ok(result?)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cli: &Cli,
    releases: bool,
) -> std::io::Result<()> {
    let map = Arc::new(Map::standard());
    let mut preselected = cli.hero;

    loop {
        let hero = match preselected.take() {
            Some(hero) => hero,
            None => match show_menu(out, rx)? {
                MenuResult::Start(hero) => hero,
                MenuResult::Quit => break,
            },
        };

        let mut world = start(Some(hero), Arc::clone(&map));
        match game_loop(out, &mut world, rx, cli.frame_duration(), releases)? {
            LoopExit::Quit => break,
            LoopExit::Menu => {}
        }
    }
    info!("relic escape exiting");
    Ok(())
}
