//! Audio hooks
//!
//! The game only ever fires sound cues; it never reads anything back.
//! The host injects an implementation at construction time: the Web Audio
//! synth in the browser, [`SilentAudio`] everywhere else.

use crate::sim::Direction;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Fire-and-forget sound cues
pub trait AudioHooks {
    /// Lane change beep
    fn on_move(&mut self, direction: Direction);
    fn on_jump(&mut self);
    fn on_crash(&mut self);
    /// New high score fanfare
    fn on_celebrate(&mut self);
    fn start_music(&mut self);
    fn stop_music(&mut self);
    /// Called once per frame so looping music can queue its next bar
    fn pump(&mut self) {}
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioHooks for SilentAudio {
    fn on_move(&mut self, _direction: Direction) {}
    fn on_jump(&mut self) {}
    fn on_crash(&mut self) {}
    fn on_celebrate(&mut self) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Audio cue names, for logging and test doubles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Move(Direction),
    Jump,
    Crash,
    Celebrate,
    MusicOn,
    MusicOff,
}

/// Writes every cue to the debug log (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl LogAudio {
    fn cue(&self, cue: Cue) {
        log::debug!("audio cue: {:?}", cue);
    }
}

impl AudioHooks for LogAudio {
    fn on_move(&mut self, direction: Direction) {
        self.cue(Cue::Move(direction));
    }
    fn on_jump(&mut self) {
        self.cue(Cue::Jump);
    }
    fn on_crash(&mut self) {
        self.cue(Cue::Crash);
    }
    fn on_celebrate(&mut self) {
        self.cue(Cue::Celebrate);
    }
    fn start_music(&mut self) {
        self.cue(Cue::MusicOn);
    }
    fn stop_music(&mut self) {
        self.cue(Cue::MusicOff);
    }
}
