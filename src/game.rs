//! Session orchestration
//!
//! [`Game`] owns the simulation state and its three collaborators (audio,
//! high score storage, reward pipeline). Host input is queued as
//! [`Command`]s and applied at the start of the next [`Game::step`], so
//! input can arrive at any time between frames.

use serde::Serialize;

use crate::audio::AudioHooks;
use crate::persistence::{self, HighScoreStore};
use crate::reward::{RewardDispatcher, RewardNotice};
use crate::sim::{Command, GamePhase, GameState, SimEvent, tick};
use crate::tuning::Tuning;

/// What the host binds its HUD to, refreshed every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub score: u64,
    pub is_game_over: bool,
    pub final_score: u64,
}

pub struct Game {
    state: GameState,
    tuning: Tuning,
    audio: Box<dyn AudioHooks>,
    store: Box<dyn HighScoreStore>,
    rewards: Option<RewardDispatcher>,
    commands: Vec<Command>,
    events: Vec<SimEvent>,
    music_playing: bool,
}

impl Game {
    /// Idle session seeded with the stored high score
    pub fn new(
        seed: u64,
        tuning: Tuning,
        audio: Box<dyn AudioHooks>,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let tuning = tuning.sanitized();
        let high_score = persistence::load_or_zero(store.as_ref());
        log::info!("Game created (seed {}, high score {})", seed, high_score);
        Self {
            state: GameState::new(seed, high_score, &tuning),
            tuning,
            audio,
            store,
            rewards: None,
            commands: Vec::with_capacity(8),
            events: Vec::with_capacity(8),
            music_playing: false,
        }
    }

    /// Attach a reward pipeline, fired once per new high score
    pub fn with_rewards(mut self, rewards: RewardDispatcher) -> Self {
        self.rewards = Some(rewards);
        self
    }

    pub fn start(&mut self) {
        self.commands.push(Command::Start);
    }

    pub fn restart(&mut self) {
        self.commands.push(Command::Restart);
    }

    pub fn move_left(&mut self) {
        self.commands.push(Command::MoveLeft);
    }

    pub fn move_right(&mut self) {
        self.commands.push(Command::MoveRight);
    }

    pub fn jump(&mut self) {
        self.commands.push(Command::Jump);
    }

    /// Queue an already-mapped command
    pub fn push_command(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Run one tick and react to what it reported.
    /// Returns the tick's events.
    pub fn step(&mut self) -> &[SimEvent] {
        self.events.clear();
        tick(
            &mut self.state,
            &mut self.commands,
            &self.tuning,
            &mut self.events,
        );

        let events = std::mem::take(&mut self.events);
        for event in &events {
            self.handle(*event);
        }
        self.events = events;

        self.audio.pump();
        &self.events
    }

    fn handle(&mut self, event: SimEvent) {
        match event {
            SimEvent::RunStarted { .. } => {
                if !self.music_playing {
                    self.audio.start_music();
                    self.music_playing = true;
                }
            }
            SimEvent::Moved(direction) => self.audio.on_move(direction),
            SimEvent::Jumped => self.audio.on_jump(),
            SimEvent::Landed | SimEvent::ObstaclePassed => {}
            SimEvent::Crashed { final_score } => {
                self.audio.on_crash();
                self.stop_music();
                self.on_game_over(final_score);
            }
        }
    }

    /// Record a new best and fire the celebration and reward, once
    fn on_game_over(&mut self, final_score: u64) {
        if final_score <= self.state.high_score {
            return;
        }
        log::info!(
            "New high score {} (previous {})",
            final_score,
            self.state.high_score
        );
        self.state.high_score = final_score;
        persistence::save_or_log(self.store.as_mut(), final_score);
        self.audio.on_celebrate();
        if let Some(rewards) = self.rewards.as_mut() {
            rewards.dispatch(final_score);
        }
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            self.audio.stop_music();
            self.music_playing = false;
        }
    }

    /// Silence everything this session started. Safe to call repeatedly.
    pub fn release_audio(&mut self) {
        self.stop_music();
    }

    pub fn view(&self) -> GameView {
        GameView {
            score: self.state.display_score(),
            is_game_over: self.state.phase == GamePhase::GameOver,
            final_score: self.state.final_score,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Reward results that arrived since the last call
    pub fn drain_reward_notices(&self) -> Vec<RewardNotice> {
        self.rewards
            .as_ref()
            .map(|r| r.drain_notices())
            .unwrap_or_default()
    }

    pub fn rewards(&self) -> Option<&RewardDispatcher> {
        self.rewards.as_ref()
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.release_audio();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::persistence::MemoryStore;

    fn game() -> Game {
        Game::new(
            7,
            Tuning::default(),
            Box::new(SilentAudio),
            Box::new(MemoryStore::with_score(25)),
        )
    }

    #[test]
    fn test_loads_stored_high_score() {
        let g = game();
        assert_eq!(g.high_score(), 25);
        assert_eq!(g.view(), GameView {
            score: 0,
            is_game_over: false,
            final_score: 0,
        });
    }

    #[test]
    fn test_commands_apply_on_next_step() {
        let mut g = game();
        g.start();
        assert_eq!(g.state().phase, GamePhase::Idle);
        let events = g.step().to_vec();
        assert_eq!(events[0], SimEvent::RunStarted { restart: false });
        assert!(g.music_playing());

        g.move_left();
        g.move_left();
        g.step();
        assert_eq!(g.state().player.lane, 0);
    }

    #[test]
    fn test_release_audio_is_idempotent() {
        let mut g = game();
        g.start();
        g.step();
        g.release_audio();
        g.release_audio();
        assert!(!g.music_playing());
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let json = serde_json::to_string(&game().view()).unwrap();
        assert!(json.contains("\"isGameOver\":false"));
        assert!(json.contains("\"finalScore\":0"));
    }
}
