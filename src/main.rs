mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use platformer::compute::{apply_command, init_state, tick, Command};
use platformer::config::{check_terminal, Config};
use platformer::entities::{GameSession, GameStatus, HeldInput};

// ── Terminal session ──────────────────────────────────────────────────────────

/// Raw mode + alternate screen for as long as this value lives.  Dropping it
/// puts the terminal back, whichever way `main` exits.
struct Screen {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

impl Screen {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        // From here on a failed step still restores the terminal on drop.
        let mut screen = Self { out: BufWriter::new(stdout()), keyboard_enhanced: false };
        screen.out.execute(terminal::EnterAlternateScreen)?;
        screen.out.execute(cursor::Hide)?;

        // Release events let movement stop the moment a key comes up.
        // Terminals without the kitty protocol refuse this and we fall back
        // to the hold window below.
        screen.keyboard_enhanced = screen
            .out
            .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .is_ok();
        if !screen.keyboard_enhanced {
            warn!("keyboard enhancement unavailable, using hold window");
        }
        Ok(screen)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Blocking reads happen on their own thread so a frame never waits on input.
fn spawn_input_reader() -> Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });
    rx
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a movement key stays down after its last press or repeat.  OS
/// key-repeat fires well inside 8 frames at 60 FPS, so a held key never
/// lapses on terminals that send no release event.
const HOLD_WINDOW: u64 = 8;

fn is_held(last_seen: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    last_seen
        .get(&key)
        .is_some_and(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
}

fn held_input(last_seen: &HashMap<KeyCode, u64>, frame: u64) -> HeldInput {
    let any = |keys: [KeyCode; 3]| keys.into_iter().any(|k| is_held(last_seen, k, frame));
    HeldInput {
        left: any([KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: any([KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
    }
}

// ── Key → intent ──────────────────────────────────────────────────────────────

enum Intent {
    Quit,
    Command(Command),
}

fn intent_for(code: KeyCode, modifiers: KeyModifiers, status: GameStatus) -> Option<Intent> {
    let intent = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Intent::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Intent::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            if status == GameStatus::Playing {
                Intent::Command(Command::Jump)
            } else {
                Intent::Command(Command::Confirm)
            }
        }
        KeyCode::Enter => Intent::Command(Command::Confirm),
        KeyCode::Char('p') | KeyCode::Char('P') => Intent::Command(Command::Pause),
        KeyCode::Esc => Intent::Command(Command::Back),
        KeyCode::Char('r') | KeyCode::Char('R') => Intent::Command(Command::Restart),
        _ => return None,
    };
    Some(intent)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-timestep loop; returns when the player quits.
///
/// One-shot keys become `Command`s the moment they are pressed.  Movement
/// keys are tracked in `last_seen` (key → frame of its latest press or
/// repeat) and turned into a `HeldInput` every frame: a release event drops
/// the key at once, otherwise it lapses after `HOLD_WINDOW` quiet frames.
fn game_loop<W: Write>(
    out: &mut W,
    config: &Config,
    state: &mut GameSession,
    events: &Receiver<Event>,
) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_time = config.frame_duration();
    let mut last_seen: HashMap<KeyCode, u64> = HashMap::new();

    for frame in 1u64.. {
        let started = Instant::now();

        for ev in events.try_iter() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    last_seen.insert(code, frame);
                    match intent_for(code, modifiers, state.status) {
                        Some(Intent::Quit) => return Ok(()),
                        Some(Intent::Command(command)) => {
                            *state = apply_command(state, command, &mut rng);
                        }
                        None => {}
                    }
                }
                KeyEventKind::Repeat => {
                    last_seen.insert(code, frame);
                }
                KeyEventKind::Release => {
                    last_seen.remove(&code);
                }
            }
        }

        let before = state.status;
        *state = tick(state, held_input(&last_seen, frame), &mut rng);
        if state.status != before {
            debug!("status {:?} -> {:?} at frame {}", before, state.status, frame);
        }

        display::render(out, state)?;

        if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = Config::parse();
    config.validate()?;
    let (width, height) = terminal::size().context("reading terminal size")?;
    check_terminal(width, height)?;
    info!("starting: {config:?}");

    let mut state = init_state(config.start_level, config.collision_mode());
    let result = {
        let mut screen = Screen::enter()?;
        let events = spawn_input_reader();
        game_loop(&mut screen.out, &config, &mut state, &events)
    };

    info!("exiting with score {} on level {}", state.score, state.level.number);
    result
}
