//! Timer service for spawn cadence and delayed callbacks
//!
//! The simulation never reads a real clock. The host shell advances this
//! scheduler with frame time and routes due tasks back into the sim, so tests
//! can drive it with a fake clock.

/// Opaque handle for a scheduled timer, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Work a timer can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Spawn one obstacle at the top of the world
    SpawnObstacle,
    /// Report the final score to the shell after the game-over delay
    ReportGameOver,
}

#[derive(Debug)]
struct Entry {
    handle: TimerHandle,
    deadline_ms: f64,
    /// Some = repeating, re-armed after each fire
    interval_ms: Option<f64>,
    task: TimerTask,
}

/// Deterministic timer queue with a monotonically advancing millisecond clock
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: f64,
    next_handle: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether the given handle is still scheduled
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Schedule a repeating timer firing every `interval_ms`
    pub fn schedule_repeating(&mut self, interval_ms: u32, task: TimerTask) -> TimerHandle {
        // Zero interval would never let `advance` terminate
        let interval = f64::from(interval_ms.max(1));
        self.push(interval, Some(interval), task)
    }

    /// Schedule a one-shot timer firing after `delay_ms`
    pub fn schedule_once(&mut self, delay_ms: u32, task: TimerTask) -> TimerHandle {
        self.push(f64::from(delay_ms), None, task)
    }

    /// Cancel a pending timer; unknown or already-fired handles are ignored
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    /// Drop every pending timer (run teardown)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Advance the clock and collect due tasks in deadline order.
    ///
    /// Repeating timers are re-armed; if more than one interval elapsed they
    /// fire once per missed interval.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<TimerTask> {
        if elapsed_ms > 0.0 {
            self.now_ms += elapsed_ms;
        }

        let mut due = Vec::new();
        loop {
            // Earliest deadline, ties broken by schedule order
            let next = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.deadline_ms <= self.now_ms)
                .min_by(|(_, a), (_, b)| {
                    a.deadline_ms
                        .partial_cmp(&b.deadline_ms)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.handle.0.cmp(&b.handle.0))
                })
                .map(|(i, _)| i);

            let Some(i) = next else { break };
            due.push(self.entries[i].task);
            match self.entries[i].interval_ms {
                Some(interval) => self.entries[i].deadline_ms += interval,
                None => {
                    self.entries.remove(i);
                }
            }
        }
        due
    }

    fn push(&mut self, delay_ms: f64, interval_ms: Option<f64>, task: TimerTask) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.entries.push(Entry {
            handle,
            deadline_ms: self.now_ms + delay_ms,
            interval_ms,
            task,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = Scheduler::new();
        timers.schedule_once(500, TimerTask::SpawnObstacle);

        assert!(timers.advance(499.0).is_empty());
        assert_eq!(timers.advance(1.0), vec![TimerTask::SpawnObstacle]);
        assert!(timers.advance(10_000.0).is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_repeating_rearms_and_catches_up() {
        let mut timers = Scheduler::new();
        timers.schedule_repeating(1500, TimerTask::SpawnObstacle);

        assert_eq!(timers.advance(1500.0).len(), 1);
        // Three intervals pass in one advance
        assert_eq!(timers.advance(4500.0).len(), 3);
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut timers = Scheduler::new();
        let h = timers.schedule_repeating(100, TimerTask::SpawnObstacle);
        assert!(timers.is_scheduled(h));

        timers.cancel(h);
        assert!(!timers.is_scheduled(h));
        assert!(timers.advance(1000.0).is_empty());

        // Double cancel is harmless
        timers.cancel(h);
    }

    #[test]
    fn test_due_tasks_in_deadline_order() {
        let mut timers = Scheduler::new();
        timers.schedule_once(300, TimerTask::ReportGameOver);
        timers.schedule_once(100, TimerTask::SpawnObstacle);

        let due = timers.advance(300.0);
        assert_eq!(due, vec![TimerTask::SpawnObstacle, TimerTask::ReportGameOver]);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut timers = Scheduler::new();
        timers.schedule_repeating(100, TimerTask::SpawnObstacle);
        timers.schedule_once(200, TimerTask::ReportGameOver);

        timers.clear();
        assert_eq!(timers.pending(), 0);
        assert!(timers.advance(1000.0).is_empty());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut timers = Scheduler::new();
        timers.advance(100.0);
        timers.advance(-50.0);
        assert_eq!(timers.now_ms(), 100.0);
    }
}
