use crate::config::{GameConfig, GlyphSet, Palette, Rgb};
use crate::game_state::GameState;
use crate::geometry::{Direction::*, Position};
use crate::shape::{Corner, SegmentShape};
use crate::term::TermManager;
use crate::{Coords, TermInt};

use anyhow::{bail, Result};
use crossterm::style::Color;

const START_HINT: &str = "steer to start";

/// Draws a read-only view of the game onto the terminal.
pub struct Renderer {
    grid_size: i32,
    cell_width: TermInt,
    glyphs: GlyphSet,
    palette: Palette,
    origin: Coords,
}

impl Renderer {
    /// Centers the board (plus the score line under it) in a terminal of
    /// `term_size`. Fails if it does not fit.
    pub fn new(config: &GameConfig, term_size: Coords) -> Result<Self> {
        let board_width = config.grid_size as TermInt * config.cell_width;
        let board_height = config.grid_size as TermInt + 1;

        if term_size.0 < board_width || term_size.1 < board_height {
            bail!(
                "terminal is {}x{}, the board needs at least {}x{}",
                term_size.0,
                term_size.1,
                board_width,
                board_height
            );
        }

        let origin = ((term_size.0 - board_width) / 2, (term_size.1 - board_height) / 2);

        Ok(Renderer {
            grid_size: config.grid_size,
            cell_width: config.cell_width,
            glyphs: config.glyphs,
            palette: config.palette.clone(),
            origin,
        })
    }

    pub fn draw(&self, term: &mut TermManager, state: &GameState) -> std::io::Result<()> {
        self.draw_grass(term)?;
        self.draw_fruit(term, state.fruit().pos())?;
        self.draw_snake(term, state)?;
        self.draw_score(term, state)
    }

    pub fn draw_message(&self, term: &mut TermManager, lines: &[&str]) -> std::io::Result<()> {
        term.show_message(lines, color(self.palette.grass_light), color(self.palette.text))
    }

    fn draw_grass(&self, term: &mut TermManager) -> std::io::Result<()> {
        let blank = " ".repeat(self.cell_width as usize);
        for row in 0..self.grid_size {
            for col in 0..self.grid_size {
                let pos = Position::new(col, row);
                term.print_at(self.screen_pos(pos), &blank, Color::Reset, self.grass_at(pos))?;
            }
        }
        Ok(())
    }

    fn draw_fruit(&self, term: &mut TermManager, pos: Position) -> std::io::Result<()> {
        if !pos.is_within(self.grid_size) {
            return Ok(());
        }

        let text = format!("{:<width$}", fruit_char(self.glyphs), width = self.cell_width as usize);
        term.print_at(self.screen_pos(pos), &text, color(self.palette.fruit), self.grass_at(pos))
    }

    fn draw_snake(&self, term: &mut TermManager, state: &GameState) -> std::io::Result<()> {
        let snake = state.snake();

        // Tail first so the head wins where segments overlap.
        for (pos, shape) in snake.body().iter().zip(snake.shapes()).rev() {
            if !pos.is_within(self.grid_size) {
                continue;
            }

            let text = glyph(shape, self.cell_width, self.glyphs);
            term.print_at(self.screen_pos(*pos), &text, color(self.palette.snake), self.grass_at(*pos))?;
        }

        Ok(())
    }

    fn draw_score(&self, term: &mut TermManager, state: &GameState) -> std::io::Result<()> {
        let board_width = (self.grid_size as TermInt * self.cell_width) as usize;
        let score = format!("{} {}", fruit_char(self.glyphs), state.score());
        let hint = if state.snake().direction().is_none() { START_HINT } else { "" };
        let text = status_line(hint, &score, board_width);
        let pos = (self.origin.0, self.origin.1 + self.grid_size as TermInt);
        term.print_at(pos, &text, color(self.palette.text), Color::Reset)
    }

    fn screen_pos(&self, pos: Position) -> Coords {
        (
            self.origin.0 + pos.x as TermInt * self.cell_width,
            self.origin.1 + pos.y as TermInt,
        )
    }

    fn grass_at(&self, pos: Position) -> Color {
        if (pos.x + pos.y) % 2 == 0 {
            color(self.palette.grass_light)
        } else {
            color(self.palette.grass_dark)
        }
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

/// Hint on the left, score on the right, padded to the board width. The
/// hint is dropped when both do not fit.
fn status_line(hint: &str, score: &str, width: usize) -> String {
    let used = hint.chars().count() + score.chars().count();
    if used < width {
        format!("{}{}{}", hint, " ".repeat(width - used), score)
    } else {
        format!("{:>width$}", score, width = width)
    }
}

fn fruit_char(glyphs: GlyphSet) -> char {
    match glyphs {
        GlyphSet::Unicode => '●',
        GlyphSet::Ascii => '@',
    }
}

/// Text for one cell: a leading character, then filler that links up with
/// the neighbour on the right when the segment connects that way.
pub fn glyph(shape: Option<SegmentShape>, cell_width: TermInt, glyphs: GlyphSet) -> String {
    let (lead, fill) = match glyphs {
        GlyphSet::Unicode => unicode_glyph(shape),
        GlyphSet::Ascii => ascii_glyph(shape),
    };

    std::iter::once(lead)
        .chain(std::iter::repeat(fill).take(cell_width.saturating_sub(1) as usize))
        .collect()
}

fn unicode_glyph(shape: Option<SegmentShape>) -> (char, char) {
    match shape {
        Some(SegmentShape::Horizontal) => ('━', '━'),
        Some(SegmentShape::Vertical) => ('┃', ' '),
        Some(SegmentShape::Corner(Corner::TopLeft)) => ('┛', ' '),
        Some(SegmentShape::Corner(Corner::TopRight)) => ('┗', '━'),
        Some(SegmentShape::Corner(Corner::BottomLeft)) => ('┓', ' '),
        Some(SegmentShape::Corner(Corner::BottomRight)) => ('┏', '━'),
        Some(SegmentShape::Head(Up)) => ('▲', ' '),
        Some(SegmentShape::Head(Down)) => ('▼', ' '),
        Some(SegmentShape::Head(Left)) => ('◀', '━'),
        Some(SegmentShape::Head(Right)) => ('▶', ' '),
        Some(SegmentShape::Tail(Up)) => ('╻', ' '),
        Some(SegmentShape::Tail(Down)) => ('╹', ' '),
        Some(SegmentShape::Tail(Left)) => ('╺', '━'),
        Some(SegmentShape::Tail(Right)) => ('╸', ' '),
        None => ('█', '█'),
    }
}

fn ascii_glyph(shape: Option<SegmentShape>) -> (char, char) {
    match shape {
        Some(SegmentShape::Horizontal) => ('=', '='),
        Some(SegmentShape::Vertical) => ('|', ' '),
        Some(SegmentShape::Corner(Corner::TopLeft | Corner::BottomLeft)) => ('+', ' '),
        Some(SegmentShape::Corner(Corner::TopRight | Corner::BottomRight)) => ('+', '='),
        Some(SegmentShape::Head(Up)) => ('^', ' '),
        Some(SegmentShape::Head(Down)) => ('v', ' '),
        Some(SegmentShape::Head(Left)) => ('<', '='),
        Some(SegmentShape::Head(Right)) => ('>', ' '),
        Some(SegmentShape::Tail(Left)) => ('-', '='),
        Some(SegmentShape::Tail(_)) => ('.', ' '),
        None => ('#', '#'),
    }
}
