//! Raw browser input to game commands

use crate::sim::{Command, GamePhase};

/// An input event, stripped of everything but what the game cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Touch,
    Key(String),
}

impl RawInput {
    pub fn key(key: &str) -> Self {
        RawInput::Key(key.to_string())
    }
}

/// What the driver should do in response to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Command(Command),
    ToggleAutopilot,
}

/// Map an input to actions, given the phase when the input arrived.
///
/// A tap or space while waiting both starts the run and flaps.
pub fn actions_for(input: &RawInput, phase: GamePhase) -> Vec<InputAction> {
    use InputAction::Command as Cmd;

    match input {
        RawInput::Touch => match phase {
            GamePhase::NotStarted => vec![Cmd(Command::Start), Cmd(Command::Jump)],
            GamePhase::Playing => vec![Cmd(Command::Jump)],
            GamePhase::Over(_) => vec![Cmd(Command::Reset)],
        },
        RawInput::Key(key) => match (key.as_str(), phase) {
            (" ", GamePhase::NotStarted) => vec![Cmd(Command::Start), Cmd(Command::Jump)],
            (" ", GamePhase::Playing) => vec![Cmd(Command::Jump)],
            ("r" | "R", GamePhase::Over(_)) => vec![Cmd(Command::Reset)],
            ("i" | "I", _) => vec![InputAction::ToggleAutopilot],
            _ => Vec::new(),
        },
    }
}
