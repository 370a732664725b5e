//! Player commands and the queue that serializes them between ticks
//!
//! Input handlers only ever push here; the frame loop drains the queue into
//! the state right before `tick`, so a tick never sees a half-applied command.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// A discrete request from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Jump,
    Reset,
}

impl Command {
    /// Apply to the state. Returns false when the command is not legal in the
    /// current phase and was ignored.
    pub fn apply(self, state: &mut GameState) -> bool {
        match self {
            Command::Start => state.start(),
            Command::Jump => state.jump(),
            Command::Reset => {
                state.reset();
                true
            }
        }
    }
}

/// FIFO of commands waiting for the next frame
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.pending.extend(commands);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every queued command in arrival order. Returns how many took effect.
    pub fn drain_into(&mut self, state: &mut GameState) -> usize {
        let mut applied = 0;
        while let Some(command) = self.pending.pop_front() {
            if command.apply(state) {
                applied += 1;
            } else {
                log::trace!("Ignored {:?} in {:?}", command, state.phase);
            }
        }
        applied
    }
}
