mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_invasion::audio::LogAudio;
use space_invasion::consts::{FPS, GAME_OVER_DELAY_MS};
use space_invasion::render::{draw_game, draw_game_over, draw_menu};
use space_invasion::{FrameInput, FrameOutcome, Game, Heading, InputEvent, Renderer};

use display::TerminalRenderer;

const FRAME: Duration = Duration::from_micros(1_000_000 / FPS as u64);

/// Frames a key stays down after its last press or repeat. Terminals without
/// release events only send repeats (at 15 Hz or faster), which refresh
/// well inside 8 frames.
const HOLD_WINDOW: u64 = 8;

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Last frame each key was pressed or repeated.
#[derive(Default)]
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    fn touch(&mut self, code: KeyCode, frame: u64) {
        self.last_seen.insert(code, frame);
    }

    fn release(&mut self, code: &KeyCode) {
        self.last_seen.remove(code);
    }

    fn any_down(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| {
            self.last_seen
                .get(k)
                .is_some_and(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
        })
    }

    fn heading(&self, frame: u64) -> Heading {
        Heading {
            left: self.any_down(&LEFT_KEYS, frame),
            right: self.any_down(&RIGHT_KEYS, frame),
            up: self.any_down(&UP_KEYS, frame),
            down: self.any_down(&DOWN_KEYS, frame),
        }
    }
}

/// Raw mode plus alternate screen for as long as it lives.
struct Terminal {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

impl Terminal {
    fn enter() -> io::Result<Self> {
        let mut out = BufWriter::new(stdout());
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        // kitty-protocol terminals report releases; the rest fall back on HOLD_WINDOW
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .is_ok();
        Ok(Self { out, keyboard_enhanced })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Forwards terminal events so the frame loop can poll without blocking.
fn spawn_input_thread() -> Receiver<Event> {
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

// ── Menu ──────────────────────────────────────────────────────────────────────

/// Waits on the title screen. `Ok(true)` means the player quit.
///
/// Nothing simulates in the menu, so it sleeps on the input channel instead
/// of running the frame clock.
fn menu_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    game: &mut Game,
    rx: &Receiver<Event>,
) -> io::Result<bool> {
    let mut rng = thread_rng();
    let mut audio = LogAudio;

    draw_menu(renderer);
    renderer.present()?;

    while let Ok(ev) = rx.recv() {
        let event = match ev {
            Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                if is_quit(&code, modifiers) {
                    InputEvent::Quit
                } else if code == KeyCode::Char(' ') {
                    InputEvent::Start
                } else {
                    continue;
                }
            }
            Event::Resize(width, height) => {
                renderer.resize(width, height);
                draw_menu(renderer);
                renderer.present()?;
                continue;
            }
            _ => continue,
        };

        let input = FrameInput { events: vec![event], ..Default::default() };
        match game.frame(&input, &mut rng, &mut audio) {
            FrameOutcome::Quit => return Ok(true),
            FrameOutcome::Started => return Ok(false),
            _ => {}
        }
    }
    // input thread died, so nothing can start a session
    Ok(true)
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Runs one session at a fixed frame rate. `Ok(true)` means the player quit,
/// `Ok(false)` means the ship was destroyed and the menu should come back.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    game: &mut Game,
    rx: &Receiver<Event>,
) -> io::Result<bool> {
    let mut rng = thread_rng();
    let mut audio = LogAudio;
    let mut keys = HeldKeys::default();
    let mut frame: u64 = 0;

    loop {
        let started = Instant::now();
        frame += 1;

        let mut input = FrameInput::default();
        for ev in rx.try_iter() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Release, .. }) => {
                    keys.release(&code);
                }
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind == KeyEventKind::Press {
                        if is_quit(&code, modifiers) {
                            input.events.push(InputEvent::Quit);
                        } else if code == KeyCode::Char(' ') {
                            input.events.push(InputEvent::Fire);
                        }
                    }
                    keys.touch(code, frame);
                }
                Event::Resize(width, height) => renderer.resize(width, height),
                _ => {}
            }
        }
        input.heading = keys.heading(frame);

        let outcome = game.frame(&input, &mut rng, &mut audio);
        if outcome == FrameOutcome::Quit {
            return Ok(true);
        }

        let session = game.session();
        draw_game(renderer, &session.world, session.difficulty.level);
        if let FrameOutcome::GameOver(summary) = outcome {
            draw_game_over(renderer, summary.kills, summary.level);
            renderer.present()?;
            thread::sleep(Duration::from_millis(GAME_OVER_DELAY_MS));
            return Ok(drain_for_quit(rx));
        }
        renderer.present()?;

        if let Some(rest) = FRAME.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

/// Drops keys pressed during the game-over screen, reporting whether any was
/// a quit.
fn drain_for_quit(rx: &Receiver<Event>) -> bool {
    let stale: Vec<Event> = rx.try_iter().collect();
    stale.iter().any(|ev| {
        matches!(ev, Event::Key(KeyEvent { code, modifiers, .. }) if is_quit(code, *modifiers))
    })
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    // logs go to stderr; run with 2>file to keep them off the screen
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = Terminal::enter().and_then(|mut term| {
        let rx = spawn_input_thread();
        run(&mut term.out, &rx)
    });
    if let Err(e) = &result {
        log::error!("terminal error: {}", e);
    }
    result
}

fn run<W: Write>(out: &mut W, rx: &Receiver<Event>) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    log::info!("terminal {}x{}", width, height);
    let mut renderer = TerminalRenderer::new(out, width, height);
    let mut game = Game::new();

    while !menu_loop(&mut renderer, &mut game, rx)? {
        if game_loop(&mut renderer, &mut game, rx)? {
            break;
        }
    }
    Ok(())
}
