//! Cancellable slot for the one recurring action the timer runs at a time

use tokio::task::JoinHandle;

/// Holds the active recurring task and a generation counter.
///
/// Every task is spawned with the generation current at arming time and must
/// check `is_current` on each fire, so a tick that was already queued when
/// the slot was cancelled does nothing.
#[derive(Debug, Default)]
pub struct RecurringSlot {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl RecurringSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is scheduled and return the generation for a new task
    pub fn arm(&mut self) -> u64 {
        self.cancel();
        self.generation
    }

    /// Store the handle of the task spawned for `generation`
    pub fn install(&mut self, generation: u64, task: JoinHandle<()>) {
        if generation == self.generation {
            self.task = Some(task);
        } else {
            task.abort();
        }
    }

    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}
