use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use grid_chase::{Game, Glyph, Outcome};
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;
const PROMPT: &str = "Enter move (W - up, S - down, A - left, D - right, U - undo, Q - quit)";

pub struct Renderer {
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Redraws the whole board. `notice` replaces the status line when set.
    pub fn draw(&mut self, stdout: &mut Stdout, game: &Game, notice: Option<&str>) -> io::Result<()> {
        let size = game.size();
        let needed_w = (size * CELL_W) as u16;
        let needed_h = (size + 3) as u16;

        stdout.queue(Clear(ClearType::All))?;
        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(MoveTo(0, 0))?;
            stdout.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            stdout.flush()?;
            return Ok(());
        }
        self.origin_x = (term_w - needed_w) / 2;
        self.origin_y = (term_h - needed_h) / 2 + 1;

        let hud = format!("Items left: {}", game.items_remaining());
        stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;

        let board = game.snapshot();
        for (y, row) in board.rows().enumerate() {
            for (x, glyph) in row.iter().enumerate() {
                self.draw_cell(stdout, x, y, *glyph)?;
            }
        }

        stdout.queue(MoveTo(0, self.origin_y + size as u16 + 1))?;
        match notice {
            Some(msg) => {
                stdout.queue(SetForegroundColor(Color::Yellow))?;
                stdout.queue(Print(msg))?;
                stdout.queue(ResetColor)?;
            }
            None => {
                stdout.queue(Print(PROMPT))?;
            }
        }
        stdout.flush()
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, glyph: Glyph) -> io::Result<()> {
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(glyph_color(glyph)))?;
        stdout.queue(Print(cell_text(glyph)))?;
        stdout.queue(ResetColor)?;
        Ok(())
    }

    pub fn draw_outcome(&self, stdout: &mut Stdout, game: &Game) -> io::Result<()> {
        let Some((msg, color)) = outcome_banner(game.outcome()) else {
            return Ok(());
        };
        stdout.queue(MoveTo(0, self.origin_y + game.size() as u16 + 1))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(msg))?;
        stdout.queue(ResetColor)?;
        stdout.queue(Print("  (press any key to exit)"))?;
        stdout.flush()
    }
}

fn glyph_symbol(glyph: Glyph) -> char {
    match glyph {
        Glyph::Player => 'P',
        Glyph::Pursuer => 'R',
        Glyph::Item => 'I',
        Glyph::Empty => '.',
    }
}

fn glyph_color(glyph: Glyph) -> Color {
    match glyph {
        Glyph::Player => Color::Green,
        Glyph::Pursuer => Color::Red,
        Glyph::Item => Color::Yellow,
        Glyph::Empty => Color::Reset,
    }
}

/// Symbol left-aligned in a cell of `CELL_W` display columns.
fn cell_text(glyph: Glyph) -> String {
    let mut text = glyph_symbol(glyph).to_string();
    let pad = CELL_W.saturating_sub(text.width());
    text.extend(std::iter::repeat(' ').take(pad));
    text
}

/// Closing message for a finished game; `None` while still playing.
pub fn outcome_banner(outcome: Outcome) -> Option<(&'static str, Color)> {
    match outcome {
        Outcome::Playing => None,
        Outcome::Won => Some(("You won!", Color::Green)),
        Outcome::Lost => Some(("Game Over", Color::Red)),
    }
}
