//! Fruit Dodge entry point
//!
//! Sets up the terminal and runs the game loop: wait for input or the next
//! timer deadline, advance the game, redraw.

use std::io::{self, stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::{cursor, execute, terminal};

use fruit_dodge::Settings;
use fruit_dodge::game::Game;
use fruit_dodge::persistence::{JsonFileStore, MemoryStore, ScoreStore};
use fruit_dodge::platform::InputEvent;
use fruit_dodge::renderer::{Layout, Renderer, TerminalRenderer};
use fruit_dodge::sim::{Direction, GameEvent};

/// Longest wait between redraws when no timer is due
const IDLE_POLL: Duration = Duration::from_millis(100);

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Map a key press to a game input
fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(InputEvent::Move(Direction::Left)),
        KeyCode::Right => Some(InputEvent::Move(Direction::Right)),
        KeyCode::Char('r') | KeyCode::Enter => Some(InputEvent::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        _ => None,
    }
}

/// Map a mouse event on the hold buttons to game inputs.
///
/// `held` tracks which button the pointer is holding down; dragging off it
/// counts as abandoning the hold.
fn translate_mouse(
    mouse: MouseEvent,
    layout: &Layout,
    held: &mut Option<Direction>,
) -> Vec<InputEvent> {
    let under = layout
        .button_at(mouse.column, mouse.row)
        .map(|b| b.direction);
    let mut inputs = Vec::new();
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // A lost release: drop the stale hold, then handle the press
            if let Some(previous) = held.take() {
                log::debug!("Stale {:?} hold abandoned", previous);
                inputs.push(InputEvent::Abandon);
            }
            if let Some(direction) = under {
                *held = Some(direction);
                inputs.push(InputEvent::HoldStart(direction));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            inputs.extend(held.take().map(InputEvent::HoldEnd));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(direction) = *held {
                if under != Some(direction) {
                    *held = None;
                    inputs.push(InputEvent::Abandon);
                }
            }
        }
        _ => {}
    }
    inputs
}

/// Work for one pass of the loop: timers that fell due while waiting run
/// first, then the inputs that ended the wait. Returns false on quit.
fn step<S: ScoreStore>(
    game: &mut Game<S>,
    now: Duration,
    inputs: Vec<InputEvent>,
    player_name: &str,
) -> bool {
    let events = game.advance(now);
    if events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. }))
    {
        if let Some(rank) = game.pending_rank() {
            log::info!("New high score, rank {}", rank);
            game.submit_score(player_name);
        }
    }

    for input in inputs {
        match input {
            InputEvent::Quit => return false,
            input => game.handle_input(input),
        }
    }
    true
}

fn run<S: ScoreStore>(game: &mut Game<S>) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(stdout(), Layout::new(cols, rows));
    let player_name = game.settings().player_name.clone();
    let mut held: Option<Direction> = None;
    let start = Instant::now();

    renderer.render(game.session(), game.high_scores())?;

    loop {
        let now = start.elapsed();
        let timeout = game
            .next_deadline()
            .map(|due| due.saturating_sub(now))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        let inputs = if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => translate_key(key).into_iter().collect(),
                Event::Mouse(mouse) => translate_mouse(mouse, renderer.layout(), &mut held),
                Event::FocusLost => {
                    held = None;
                    vec![InputEvent::Abandon]
                }
                Event::Resize(c, r) => {
                    renderer.resize(c, r)?;
                    Vec::new()
                }
                _ => Vec::new(),
            }
        } else {
            Vec::new()
        };

        if !step(game, start.elapsed(), inputs, &player_name) {
            return Ok(());
        }

        renderer.render(game.session(), game.high_scores())?;
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Fruit Dodge starting...");

    let settings = Settings::load().with_args(std::env::args().skip(1));
    let seed = settings.seed.unwrap_or_else(time_seed);
    let store: Box<dyn ScoreStore> = match &settings.high_scores_path {
        Some(path) => {
            let store = JsonFileStore::new(path);
            log::info!("High scores kept in {}", store.path().display());
            Box::new(store)
        }
        None => Box::new(MemoryStore::new()),
    };
    let mut game = Game::new(settings, store, seed);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        EnableMouseCapture,
        EnableFocusChange,
    )?;

    let result = run(&mut game);

    execute!(
        out,
        DisableFocusChange,
        DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen,
    )?;
    terminal::disable_raw_mode()?;

    if let Some(best) = game.high_scores().top_score() {
        println!("Best survival time: {}s", best);
    }
    result
}
