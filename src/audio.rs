use std::io::{stdout, Write};

/// Fire-and-forget sound cues. Failing to play is never an error.
pub trait Audio {
    fn play_crunch(&mut self);
}

/// Rings the terminal bell.
pub struct TerminalBell;

impl Audio for TerminalBell {
    fn play_crunch(&mut self) {
        let mut out = stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

pub struct Silent;

impl Audio for Silent {
    fn play_crunch(&mut self) {}
}

pub fn from_settings(enabled: bool) -> Box<dyn Audio> {
    if enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    }
}
