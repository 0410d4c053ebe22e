//! Update-then-render frame loop
//!
//! Each frame callback runs one [`Game::step`], draws the result and asks
//! the scheduler for the next frame. [`FrameLoop::stop`] cancels the
//! pending request and releases the session's audio.

use crate::game::Game;
use crate::sim::GameState;
use crate::tuning::Tuning;

/// Host primitive that calls back once per display frame
pub trait FrameScheduler {
    type Handle;

    /// Ask for one more frame callback
    fn request_frame(&mut self) -> Self::Handle;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Draws a read-only view of the session
pub trait FrameRenderer {
    fn render(&mut self, state: &GameState, tuning: &Tuning, time: f64);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl FrameRenderer for NullRenderer {
    fn render(&mut self, _state: &GameState, _tuning: &Tuning, _time: f64) {}
}

/// Frame-per-second estimate over a 60 frame window
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (ms)
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the one we'll overwrite next; 59 intervals span the window
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

pub struct FrameLoop<S: FrameScheduler, R: FrameRenderer> {
    game: Game,
    scheduler: S,
    renderer: R,
    pending: Option<S::Handle>,
    running: bool,
    frames: u64,
    fps: FpsCounter,
}

impl<S: FrameScheduler, R: FrameRenderer> FrameLoop<S, R> {
    pub fn new(game: Game, scheduler: S, renderer: R) -> Self {
        Self {
            game,
            scheduler,
            renderer,
            pending: None,
            running: false,
            frames: 0,
            fps: FpsCounter::default(),
        }
    }

    /// Request the first frame
    pub fn begin(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = Some(self.scheduler.request_frame());
        log::info!("Frame loop running");
    }

    /// Frame callback: update, render, then schedule the next frame
    pub fn on_frame(&mut self, time: f64) {
        self.pending = None;
        if !self.running {
            return;
        }

        self.game.step();
        self.renderer
            .render(self.game.state(), self.game.tuning(), time);
        self.fps.record(time);
        self.frames += 1;

        if self.running {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Cancel the pending frame and release audio. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.running {
            log::info!("Frame loop stopped after {} frames", self.frames);
        }
        self.running = false;
        self.game.release_audio();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: FrameScheduler, R: FrameRenderer> Drop for FrameLoop<S, R> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Scheduler driven by hand: records requests, the caller fires frames
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    next_id: u32,
    pub outstanding: Option<u32>,
    pub requested: u32,
    pub cancelled: Vec<u32>,
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> u32 {
        self.next_id += 1;
        self.requested += 1;
        self.outstanding = Some(self.next_id);
        self.next_id
    }

    fn cancel_frame(&mut self, handle: u32) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::persistence::MemoryStore;
    use crate::sim::GamePhase;

    fn frame_loop() -> FrameLoop<ManualScheduler, NullRenderer> {
        let game = Game::new(
            3,
            Tuning::default(),
            Box::new(SilentAudio),
            Box::new(MemoryStore::default()),
        );
        FrameLoop::new(game, ManualScheduler::default(), NullRenderer)
    }

    #[test]
    fn test_each_frame_schedules_the_next() {
        let mut lp = frame_loop();
        lp.begin();
        assert_eq!(lp.scheduler().requested, 1);
        lp.game_mut().start();
        for i in 0..5 {
            lp.on_frame(i as f64 * 16.0);
        }
        assert_eq!(lp.frames(), 5);
        assert_eq!(lp.scheduler().requested, 6);
        assert_eq!(lp.game().state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let mut lp = frame_loop();
        lp.begin();
        lp.on_frame(0.0);
        let pending = lp.scheduler().outstanding;
        lp.stop();
        assert!(!lp.has_pending_frame());
        assert_eq!(lp.scheduler().cancelled, vec![pending.unwrap()]);

        // A late callback does nothing
        lp.on_frame(16.0);
        assert_eq!(lp.frames(), 1);
        lp.stop();
        assert_eq!(lp.scheduler().cancelled.len(), 1);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
