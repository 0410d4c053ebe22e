//! Per-frame simulation tick
//!
//! Commands queued since the previous frame are applied first, then the
//! whole update phase runs. Nothing here talks to audio, storage or the
//! renderer; side effects are reported back as [`SimEvent`]s.

use super::collision::first_hit;
use super::difficulty;
use super::particles;
use super::spawner::{self, SpawnRolls};
use super::state::{Direction, GamePhase, GameState};
use crate::tuning::Tuning;

/// Player/host commands, drained at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Idle -> Playing
    Start,
    /// GameOver -> Playing
    Restart,
    MoveLeft,
    MoveRight,
    Jump,
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// A run began (from Start or Restart)
    RunStarted { restart: bool },
    Moved(Direction),
    Jumped,
    Landed,
    /// An obstacle went past the player and its award was granted
    ObstaclePassed,
    /// Unsuppressed collision; the run is over
    Crashed { final_score: u64 },
}

/// Apply one command. Commands that make no sense in the current phase
/// are ignored, so repeated input cannot break the lane/jump invariants.
pub fn apply_command(state: &mut GameState, cmd: Command, tuning: &Tuning, events: &mut Vec<SimEvent>) {
    match (cmd, state.phase) {
        (Command::Start, GamePhase::Idle) => {
            state.begin_run(tuning);
            log::info!("Run started (seed {})", state.seed);
            events.push(SimEvent::RunStarted { restart: false });
        }
        (Command::Restart, GamePhase::GameOver) => {
            state.begin_run(tuning);
            log::info!("Run restarted");
            events.push(SimEvent::RunStarted { restart: true });
        }
        (Command::MoveLeft, GamePhase::Playing) => {
            if state.player.shift_lane(Direction::Left, tuning) {
                events.push(SimEvent::Moved(Direction::Left));
            }
        }
        (Command::MoveRight, GamePhase::Playing) => {
            if state.player.shift_lane(Direction::Right, tuning) {
                events.push(SimEvent::Moved(Direction::Right));
            }
        }
        (Command::Jump, GamePhase::Playing) => {
            if state.player.jump(tuning) {
                events.push(SimEvent::Jumped);
            }
        }
        _ => {}
    }
}

/// Advance the game by one frame.
///
/// `commands` is drained in order before the update phase. Outside of
/// Playing the update phase is a no-op.
pub fn tick(
    state: &mut GameState,
    commands: &mut Vec<Command>,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) {
    for cmd in commands.drain(..) {
        apply_command(state, cmd, tuning, events);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let rolls = SpawnRolls::draw(&mut state.rng, tuning.lane_count);
    update_playing(state, rolls, tuning, events);
}

/// The Playing update phase with the spawn draws supplied by the caller
pub fn update_playing(
    state: &mut GameState,
    rolls: SpawnRolls,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) {
    state.time_ticks += 1;

    difficulty::ramp(&mut state.speed_multiplier, &mut state.spawn_rate, tuning);

    state.road_offset += tuning.obstacle_speed * state.speed_multiplier;

    if state.player.update(tuning) {
        events.push(SimEvent::Landed);
    }

    match spawner::attempt(
        rolls,
        state.spawn_rate,
        state.speed_multiplier,
        &state.obstacles,
        tuning,
    ) {
        Ok(obstacle) => state.obstacles.push(obstacle),
        Err(skip) => log::trace!("No spawn: {:?}", skip),
    }

    // Move obstacles and award each one exactly once as it passes the car
    let player_y = state.player.y;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.advance();
        if !obstacle.passed && obstacle.y > player_y {
            obstacle.passed = true;
            state.score += tuning.pass_award;
            events.push(SimEvent::ObstaclePassed);
        }
    }
    state.obstacles.retain(|o| !o.is_off_screen(tuning));

    particles::step(&mut state.particles);

    if first_hit(&state.player, &state.obstacles, tuning.jump_clearance).is_some() {
        crash(state, tuning, events);
        return;
    }

    state.score += tuning.survival_rate * state.speed_multiplier as f64;
}

/// Playing -> GameOver: debris burst, freeze progression, record the score
fn crash(state: &mut GameState, tuning: &Tuning, events: &mut Vec<SimEvent>) {
    let origin = state.player.center();
    particles::burst(&mut state.particles, origin, &mut state.rng, tuning);

    state.phase = GamePhase::GameOver;
    state.final_score = state.display_score();
    log::info!(
        "Crashed after {} ticks, final score {}",
        state.time_ticks,
        state.final_score
    );
    events.push(SimEvent::Crashed {
        final_score: state.final_score,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleKind};

    const NO_SPAWN: SpawnRolls = SpawnRolls {
        chance: 1.0,
        lane: 0,
        kind: 0,
    };

    fn playing(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(12345, 0, tuning);
        let mut events = Vec::new();
        apply_command(&mut state, Command::Start, tuning, &mut events);
        state
    }

    #[test]
    fn test_idle_to_playing() {
        let t = Tuning::default();
        let mut state = GameState::new(12345, 0, &t);
        let mut events = Vec::new();

        // Tick without start - stays idle, nothing moves
        tick(&mut state, &mut Vec::new(), &t, &mut events);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);

        let mut cmds = vec![Command::Start];
        tick(&mut state, &mut cmds, &t, &mut events);
        assert!(cmds.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(events[0], SimEvent::RunStarted { restart: false });
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_moves_ignored_unless_playing() {
        let t = Tuning::default();
        let mut state = GameState::new(1, 0, &t);
        let mut events = Vec::new();
        apply_command(&mut state, Command::MoveLeft, &t, &mut events);
        apply_command(&mut state, Command::Jump, &t, &mut events);
        assert_eq!(state.player.lane, 1);
        assert!(!state.player.is_jumping);
        assert!(events.is_empty());
    }

    #[test]
    fn test_rapid_moves_stay_in_bounds() {
        let t = Tuning::default();
        let mut state = playing(&t);
        let mut events = Vec::new();
        let mut cmds = vec![Command::MoveRight; 10];
        tick(&mut state, &mut cmds, &t, &mut events);
        assert_eq!(state.player.lane, t.lane_count - 1);
        let moves = events.iter().filter(|e| matches!(e, SimEvent::Moved(_))).count();
        assert_eq!(moves, 1);
    }

    #[test]
    fn test_pass_award_exactly_once() {
        let t = Tuning::default();
        let mut state = playing(&t);
        let mut o = Obstacle::new(ObstacleKind::Barrier, 0, 1.0, &t);
        // Just above the player's y; one step puts it below
        o.y = state.player.y - 1.0;
        state.obstacles.push(o);

        let mut events = Vec::new();
        update_playing(&mut state, NO_SPAWN, &t, &mut events);
        assert!(state.obstacles[0].passed);
        let survival = t.survival_rate * state.speed_multiplier as f64;
        assert!((state.score - (t.pass_award + survival)).abs() < 1e-9);

        let before = state.score;
        update_playing(&mut state, NO_SPAWN, &t, &mut events);
        let passes = events
            .iter()
            .filter(|e| matches!(e, SimEvent::ObstaclePassed))
            .count();
        assert_eq!(passes, 1);
        // Second tick only adds the survival award
        assert!(state.score - before < t.pass_award);
    }

    #[test]
    fn test_collision_ends_run_with_burst() {
        let t = Tuning::default();
        let mut state = playing(&t);
        let mut o = Obstacle::new(ObstacleKind::Barrier, state.player.lane, 1.0, &t);
        o.y = state.player.y;
        o.passed = true;
        state.obstacles.push(o);
        state.score = 41.7;

        let mut events = Vec::new();
        update_playing(&mut state, NO_SPAWN, &t, &mut events);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score, 41);
        assert_eq!(state.particles.len(), t.burst_count);
        assert_eq!(events.last(), Some(&SimEvent::Crashed { final_score: 41 }));
        // No survival award on the crash tick
        assert_eq!(state.score, 41.7);

        // Frozen afterwards
        let snapshot = state.obstacles.clone();
        tick(&mut state, &mut vec![Command::MoveLeft], &t, &mut events);
        assert_eq!(state.obstacles, snapshot);
        assert_eq!(state.particles.len(), t.burst_count);
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let t = Tuning::default();
        let mut state = playing(&t);
        state.player.is_jumping = true;
        state.player.jump_velocity = -10.0;
        state.player.y = state.player.base_y - 90.0;
        let mut o = Obstacle::new(ObstacleKind::Barrier, state.player.lane, 1.0, &t);
        o.y = state.player.y;
        o.passed = true;
        state.obstacles.push(o);

        let mut events = Vec::new();
        update_playing(&mut state, NO_SPAWN, &t, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_resets_everything() {
        let t = Tuning::default();
        let mut state = playing(&t);
        let mut events = Vec::new();
        state.player.shift_lane(Direction::Left, &t);
        state.player.jump(&t);
        state.speed_multiplier = 2.0;
        state.spawn_rate = 0.03;
        state.road_offset = 900.0;
        state.obstacles.push(Obstacle::new(ObstacleKind::Oil, 2, 1.0, &t));
        state.score = 12.0;
        state.phase = GamePhase::GameOver;
        state.particles.clear();
        particles::burst(&mut state.particles, state.player.center(), &mut state.rng, &t);

        // Start is not valid from GameOver
        apply_command(&mut state, Command::Start, &t, &mut events);
        assert_eq!(state.phase, GamePhase::GameOver);

        apply_command(&mut state, Command::Restart, &t, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.speed_multiplier, 1.0);
        assert_eq!(state.spawn_rate, t.spawn_rate);
        assert_eq!(state.road_offset, 0.0);
        assert_eq!(state.player.lane, t.center_lane());
        assert!(!state.player.is_jumping);
        assert_eq!(state.player.y, state.player.base_y);
    }

    #[test]
    fn test_offscreen_obstacles_culled() {
        let t = Tuning::default();
        let mut state = playing(&t);
        let mut o = Obstacle::new(ObstacleKind::Oil, 0, 1.0, &t);
        o.y = t.canvas_height - 1.0;
        o.passed = true;
        state.obstacles.push(o);
        let mut events = Vec::new();
        update_playing(&mut state, NO_SPAWN, &t, &mut events);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let t = Tuning::default();
        let mut state1 = GameState::new(99999, 0, &t);
        let mut state2 = GameState::new(99999, 0, &t);
        let script = [
            vec![Command::Start],
            vec![],
            vec![Command::MoveLeft],
            vec![Command::Jump],
            vec![],
        ];

        let mut events = Vec::new();
        for _ in 0..100 {
            for cmds in &script {
                tick(&mut state1, &mut cmds.clone(), &t, &mut events);
                tick(&mut state2, &mut cmds.clone(), &t, &mut events);
            }
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.phase, state2.phase);
    }
}
