use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::audio::Audio;
use crate::game_state::{GameEvent, GameState};
use crate::geometry::Direction::{self, *};
use crate::log;
use crate::render::Renderer;
use crate::term::TermManager;

const INTRO: &[&str] = &[
    "Arrow keys or WASD to move",
    "Esc or P to pause",
    "Q or CTRL+C to quit",
    "",
    "Press any key to begin",
];

const PAUSED: &[&str] = &["Paused", "Press Esc to resume", "or Q to quit"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Quit,
}

pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(key) {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
        KeyCode::Esc | KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Fixed-interval simulation clock, independent of the frame rate.
pub struct Ticker {
    interval: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Ticker { interval, last: now }
    }

    /// Number of whole intervals elapsed since the last call. The remainder
    /// carries over to the next call.
    pub fn due(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        let ticks = (elapsed.as_nanos() / self.interval.as_nanos()) as u32;
        self.last += self.interval * ticks;
        ticks
    }

    /// Drops any backlog, e.g. after a pause.
    pub fn resync(&mut self, now: Instant) {
        self.last = now;
    }
}

/// Owns the game and drives it from keyboard input and the tick clock.
pub struct App {
    term: TermManager,
    renderer: Renderer,
    state: GameState,
    audio: Box<dyn Audio>,
    frame_interval: Duration,
    tick_interval: Duration,
    paused: bool,
}

impl App {
    pub fn new(term: TermManager, state: GameState, audio: Box<dyn Audio>) -> Result<Self> {
        let config = state.config();
        let renderer = Renderer::new(config, term.get_terminal_size())?;
        let frame_interval = config.frame_interval();
        let tick_interval = config.tick_interval();

        Ok(App {
            term,
            renderer,
            state,
            audio,
            frame_interval,
            tick_interval,
            paused: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("failed to prepare terminal")?;
        let result = self.play();
        let restored = self.term.restore().context("failed to restore terminal");
        result.and(restored)
    }

    fn play(&mut self) -> Result<()> {
        if !self.show_intro()? {
            log!("quit from intro");
            return Ok(());
        }

        let mut ticker = Ticker::new(self.tick_interval, Instant::now());

        loop {
            let next_frame = Instant::now() + self.frame_interval;

            for key in self.term.read_key_events_until(next_frame)? {
                match command_for(&key) {
                    Some(Command::Steer(dir)) if !self.paused => {
                        self.state.set_direction(dir);
                    }
                    Some(Command::TogglePause) => {
                        self.paused = !self.paused;
                        ticker.resync(Instant::now());
                        log!("{}", if self.paused { "paused" } else { "resumed" });
                    }
                    Some(Command::Quit) => {
                        log!("quit with score {}", self.state.score());
                        return Ok(());
                    }
                    _ => {}
                }
            }

            if !self.paused {
                for _ in 0..ticker.due(Instant::now()) {
                    let events = self.state.update();
                    self.handle_events(&events);
                }
            }

            self.draw_frame()?;
        }
    }

    /// Returns false if the player quit instead of starting.
    fn show_intro(&mut self) -> Result<bool> {
        self.term.clear()?;
        self.renderer.draw(&mut self.term, &self.state)?;
        self.renderer.draw_message(&mut self.term, INTRO)?;
        self.term.flush()?;

        let key = self.term.read_key_blocking()?;
        Ok(command_for(&key) != Some(Command::Quit))
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::FruitEaten { .. } = event {
                self.audio.play_crunch();
            }
        }
    }

    fn draw_frame(&mut self) -> Result<()> {
        self.renderer.draw(&mut self.term, &self.state)?;
        if self.paused {
            self.renderer.draw_message(&mut self.term, PAUSED)?;
        }
        self.term.flush()?;
        Ok(())
    }
}
