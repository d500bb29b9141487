use std::collections::VecDeque;

use ts_platform::WindowId;

use crate::command::Command;

/// Queued command execution.
///
/// Commands produced while executing a command go to the back of the queue
/// instead of being executed recursively, keeping the order predictable and
/// the stack flat.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        if !matches!(command, Command::None) {
            self.pending.push_back(command);
        }
    }

    pub fn push_batch(&mut self, commands: impl IntoIterator<Item = Command>) {
        for cmd in commands {
            self.push(cmd);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Execute commands until the queue drains.
    pub fn process_all<E: CommandExecutor + ?Sized>(&mut self, executor: &mut E, window: WindowId) {
        // Safety valve against command cycles.
        const MAX_ITERATIONS: usize = 1000;
        let mut iteration = 0;

        while let Some(command) = self.pending.pop_front() {
            let new_commands = executor.execute_command(command, window);
            self.push_batch(new_commands);

            iteration += 1;
            if iteration >= MAX_ITERATIONS {
                log::warn!(
                    "command queue exceeded {MAX_ITERATIONS} iterations, dropping the remainder"
                );
                self.pending.clear();
                break;
            }
        }
    }
}

pub trait CommandExecutor {
    /// Execute one command; any commands it produces are returned.
    fn execute_command(&mut self, command: Command, window: WindowId) -> Vec<Command>;

    fn execute_commands(&mut self, commands: Vec<Command>, window: WindowId) -> Vec<Command> {
        let mut produced = Vec::new();
        for command in commands {
            produced.extend(self.execute_command(command, window));
        }
        produced
    }

    /// Execute a batch plus everything it produces, breadth-first.
    fn execute_command_chain(&mut self, commands: Vec<Command>, window: WindowId) {
        let mut queue = CommandQueue::new();
        queue.push_batch(commands);
        queue.process_all(self, window);
    }
}
