use std::io::{Write, stdout};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEvent {
    Move,
    Rotate,
    Lock,
    LineClear,
    GameOver,
}

/// Fire-and-forget sound output. Nothing is ever read back.
pub trait AudioSink {
    fn play(&mut self, event: SoundEvent);
}

/// Rings the terminal bell for the events worth interrupting the player for.
pub struct Bell;

impl AudioSink for Bell {
    fn play(&mut self, event: SoundEvent) {
        if matches!(event, SoundEvent::LineClear | SoundEvent::GameOver) {
            let mut out = stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _event: SoundEvent) {}
}

#[cfg(test)]
pub use recorder::Recorder;
