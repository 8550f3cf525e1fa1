use std::{collections::BTreeMap, time::Duration};

use shared::{domain::TaskHandle, event::Task};

use crate::platform::Scheduler;

/// Nominal animation-frame spacing (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Deterministic scheduler driven by virtual time. Tasks due at the same
/// instant run in the order they were scheduled.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_handle: u64,
    queue: BTreeMap<(Duration, u64), Task>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_tasks(&self) -> impl Iterator<Item = (Duration, &Task)> {
        self.queue.iter().map(|((due, _), task)| (*due, task))
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.queue.keys().any(|(_, id)| *id == handle.0)
    }

    /// Removes the earliest task due no later than `deadline` and moves the
    /// clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TaskHandle, Task)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > deadline {
            return None;
        }
        let task = self.queue.remove(&(due, id))?;
        self.now = self.now.max(due);
        Some((TaskHandle(id), task))
    }

    pub fn advance_clock_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.next_handle;
        self.next_handle += 1;
        self.queue.insert((self.now + delay, id), task);
        TaskHandle(id)
    }

    fn request_frame(&mut self, task: Task) -> TaskHandle {
        self.schedule(FRAME_INTERVAL, task)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.queue.retain(|(_, id), _| *id != handle.0);
    }
}
