//! Keyboard mapping
//!
//! Keys are matched on `KeyboardEvent.key` values so the mapping works the
//! same for every layout the browser reports.

use crate::sim::{Command, GamePhase};

/// Command for a key press in the given phase, if any
pub fn command_for_key(key: &str, phase: GamePhase) -> Option<Command> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
        "ArrowUp" | "w" | "W" => Some(Command::Jump),
        " " | "Spacebar" => Some(match phase {
            GamePhase::Idle => Command::Start,
            GamePhase::GameOver => Command::Restart,
            GamePhase::Playing => Command::Jump,
        }),
        "Enter" => match phase {
            GamePhase::Idle => Some(Command::Start),
            GamePhase::GameOver => Some(Command::Restart),
            GamePhase::Playing => None,
        },
        _ => None,
    }
}

/// Whether the browser's default action should be suppressed (page scroll)
pub fn swallows_default(key: &str) -> bool {
    matches!(key, "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown" | " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_depends_on_phase() {
        assert_eq!(command_for_key(" ", GamePhase::Idle), Some(Command::Start));
        assert_eq!(command_for_key(" ", GamePhase::Playing), Some(Command::Jump));
        assert_eq!(
            command_for_key(" ", GamePhase::GameOver),
            Some(Command::Restart)
        );
    }

    #[test]
    fn test_arrows_and_wasd() {
        for key in ["ArrowLeft", "a", "A"] {
            assert_eq!(
                command_for_key(key, GamePhase::Playing),
                Some(Command::MoveLeft)
            );
        }
        assert_eq!(
            command_for_key("d", GamePhase::Playing),
            Some(Command::MoveRight)
        );
        assert_eq!(command_for_key("W", GamePhase::Playing), Some(Command::Jump));
        assert_eq!(command_for_key("Enter", GamePhase::Playing), None);
        assert_eq!(command_for_key("x", GamePhase::Playing), None);
    }

    #[test]
    fn test_scroll_keys_swallowed() {
        assert!(swallows_default(" "));
        assert!(swallows_default("ArrowDown"));
        assert!(!swallows_default("a"));
    }
}
