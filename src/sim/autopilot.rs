//! Demo driver - picks commands that dodge incoming traffic
//!
//! Used by the headless runner and for attract mode. Deliberately simple:
//! look a fixed distance ahead, prefer a free neighbouring lane, jump when
//! boxed in.

use super::state::{GamePhase, GameState, Obstacle};
use super::tick::Command;
use crate::tuning::Tuning;

/// How far above the car (in px) traffic counts as a threat
pub const LOOKAHEAD: f32 = 140.0;

fn threatens(o: &Obstacle, lane: usize, state: &GameState) -> bool {
    let p = &state.player;
    o.lane == lane && o.y + o.height > p.base_y - LOOKAHEAD && o.y < p.base_y + p.height
}

fn lane_threatened(state: &GameState, lane: usize) -> bool {
    state.obstacles.iter().any(|o| threatens(o, lane, state))
}

/// Choose the next command, if any
pub fn plan(state: &GameState, tuning: &Tuning) -> Option<Command> {
    match state.phase {
        GamePhase::Idle => return Some(Command::Start),
        GamePhase::GameOver => return None,
        GamePhase::Playing => {}
    }

    let player = &state.player;
    // Still sliding into the last lane choice
    if player.x != player.target_x || player.is_jumping {
        return None;
    }
    if !lane_threatened(state, player.lane) {
        return None;
    }

    let left = player.lane.checked_sub(1);
    let right = (player.lane + 1 < tuning.lane_count).then_some(player.lane + 1);
    for (lane, cmd) in [(left, Command::MoveLeft), (right, Command::MoveRight)] {
        if lane.is_some_and(|l| !lane_threatened(state, l)) {
            return Some(cmd);
        }
    }
    Some(Command::Jump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    fn playing(t: &Tuning) -> GameState {
        let mut s = GameState::new(5, 0, t);
        s.begin_run(t);
        s
    }

    fn incoming(t: &Tuning, lane: usize, y: f32) -> Obstacle {
        let mut o = Obstacle::new(ObstacleKind::Barrier, lane, 1.0, t);
        o.y = y;
        o
    }

    #[test]
    fn test_starts_when_idle() {
        let t = Tuning::default();
        let s = GameState::new(5, 0, &t);
        assert_eq!(plan(&s, &t), Some(Command::Start));
    }

    #[test]
    fn test_dodges_to_free_lane() {
        let t = Tuning::default();
        let mut s = playing(&t);
        s.obstacles.push(incoming(&t, 1, 420.0));
        assert_eq!(plan(&s, &t), Some(Command::MoveLeft));

        s.obstacles.push(incoming(&t, 0, 420.0));
        assert_eq!(plan(&s, &t), Some(Command::MoveRight));
    }

    #[test]
    fn test_jumps_when_boxed_in() {
        let t = Tuning::default();
        let mut s = playing(&t);
        for lane in 0..3 {
            s.obstacles.push(incoming(&t, lane, 420.0));
        }
        assert_eq!(plan(&s, &t), Some(Command::Jump));
    }

    #[test]
    fn test_ignores_distant_traffic() {
        let t = Tuning::default();
        let mut s = playing(&t);
        s.obstacles.push(incoming(&t, 1, 10.0));
        assert_eq!(plan(&s, &t), None);
    }
}
