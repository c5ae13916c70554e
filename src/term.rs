use crate::{Coords, TermInt};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{poll, read, Event, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    /// Undoes `setup`. Every step is attempted even if an earlier one fails.
    pub fn restore(&mut self) -> io::Result<()> {
        let raw = terminal::disable_raw_mode();
        let cursor = execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking);
        let screen = execute!(self.stdout, LeaveAlternateScreen);
        raw.and(cursor).and(screen)
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    /// Collects key presses until `deadline`, which also paces the frame.
    pub fn read_key_events_until(&self, deadline: Instant) -> io::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining == Duration::ZERO || !poll(remaining)? {
                break;
            }

            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn print_at(&mut self, pos: Coords, text: &str, fg: Color, bg: Color) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(text)
        )
    }

    /// Draws a box of centered lines in the middle of the screen.
    pub fn show_message(&mut self, lines: &[&str], fg: Color, bg: Color) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        let blank = " ".repeat(msg_width as usize);
        self.print_at(top_left, &blank, fg, bg)?;
        self.print_at((top_left.0, top_left.1 + msg_height - 1), &blank, fg, bg)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            self.print_at((top_left.0, y), &padded_line, fg, bg)?;
        }

        Ok(())
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()
    }
}
