//! Terminal renderer
//!
//! Frames are composed into plain text lines first ([`compose`]), then
//! written to the terminal. The game never reads anything back from here.

pub mod layout;

use std::io::{self, Write};

use crossterm::{cursor, queue, style::Print, terminal};

pub use layout::{BUTTON_WIDTH, Button, Layout};

use crate::consts::PLAYER_MAX_X;
use crate::highscores::HighScores;
use crate::sim::{Direction, GameSession};

/// Anything that can show a session snapshot
pub trait Renderer {
    fn render(&mut self, session: &GameSession, scores: &HighScores) -> io::Result<()>;
}

/// Paddle glyphs, facing-dependent
fn paddle(facing: Direction) -> &'static str {
    match facing {
        Direction::Left => "<===",
        Direction::Right => "===>",
    }
}

fn put(grid: &mut [Vec<char>], row: u16, col: u16, text: &str) {
    let Some(line) = grid.get_mut(row as usize) else {
        return;
    };
    for (i, ch) in text.chars().enumerate() {
        if let Some(cell) = line.get_mut(col as usize + i) {
            *cell = ch;
        }
    }
}

fn put_centered(grid: &mut [Vec<char>], row: u16, cols: u16, text: &str) {
    let len = text.chars().count() as u16;
    put(grid, row, cols.saturating_sub(len) / 2, text);
}

/// Compose one frame as `layout.rows` lines of `layout.cols` characters
pub fn compose(session: &GameSession, scores: &HighScores, layout: &Layout) -> Vec<String> {
    let mut grid = vec![vec![' '; layout.cols as usize]; layout.rows as usize];

    let best = scores
        .top_score()
        .map(|s| format!("   Best: {}s", s))
        .unwrap_or_default();
    put(&mut grid, 0, 0, &format!("Survived: {}s{}", session.score, best));

    for fruit in &session.objects {
        put(
            &mut grid,
            layout.row_for(fruit.y),
            layout.column_for(fruit.x),
            &fruit.kind.glyph().to_string(),
        );
    }

    // Paddle spans the width of one PLAYER_MAX_X..100 slice
    let width = (layout.cols as f32 * (100.0 - PLAYER_MAX_X) / 100.0)
        .round()
        .max(1.0) as usize;
    let glyph: String = paddle(session.player.facing)
        .chars()
        .cycle()
        .take(width.max(4))
        .collect();
    put(
        &mut grid,
        layout.player_row(),
        layout.column_for(session.player.x),
        &glyph,
    );

    for direction in [Direction::Left, Direction::Right] {
        let button = Button { direction };
        put(
            &mut grid,
            layout.controls_row(),
            layout.button_col(button),
            button.label(),
        );
    }

    if session.is_over() {
        let mid = layout.rows / 2;
        put_centered(
            &mut grid,
            mid.saturating_sub(3),
            layout.cols,
            &format!("Game Over! Score: {}", session.score),
        );
        for (i, entry) in scores.entries.iter().enumerate() {
            put_centered(
                &mut grid,
                mid.saturating_sub(1) + i as u16,
                layout.cols,
                &format!("{}. {:<20} {:>5}", i + 1, entry.name, entry.score),
            );
        }
        put_centered(
            &mut grid,
            mid + 3,
            layout.cols,
            "r: play again   q: quit",
        );
    }

    grid.into_iter().map(|line| line.into_iter().collect()).collect()
}

/// Draws frames with crossterm
pub struct TerminalRenderer<W: Write> {
    out: W,
    layout: Layout,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, layout: Layout) -> Self {
        Self { out, layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        self.layout = Layout::new(cols, rows);
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, session: &GameSession, scores: &HighScores) -> io::Result<()> {
        for (row, line) in compose(session, scores, &self.layout).iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()
    }
}
