//! Terminal runner (default binary).
//!
//! Fixed-step loop: input is polled until the next 16ms tick, every tick
//! advances the round clock, and each frame redraws the snapshot.
//!
//! Logging goes to stderr and is off unless `RUST_LOG` is set, e.g.
//! `RUST_LOG=blockfall_core=debug blockfall 2>blockfall.log`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::core::{RoundConfig, RoundSnapshot, RoundState};
use blockfall::input::{handle_key_event, should_quit, KeyAction};
use blockfall::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::{Control, TICK_MS};

fn main() -> Result<()> {
    env_logger::init();

    let config = RoundConfig::from_env();
    let round = RoundState::new(config).context("invalid round configuration")?;
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, round);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut round: RoundState) -> Result<()> {
    round.start();

    let view = BoardView::default();
    let mut snapshot = RoundSnapshot::default();
    let mut frame = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        round.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut frame);
        term.draw_swap(&mut frame)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit at score {}", round.score());
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(KeyAction::Command(command)) => {
                            round.apply_command(command);
                        }
                        Some(KeyAction::Control(Control::TogglePause)) => {
                            round.toggle_pause();
                        }
                        Some(KeyAction::Control(Control::Reset)) => round.reset(),
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            round.advance_time(TICK_MS);
            // Lock events are for animation; this driver just drains them
            round.take_last_event();
        }
    }
}
