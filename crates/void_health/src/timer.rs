//! Cancelable delayed actions driven by simulation time

/// Timer ID returned when scheduling
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Deferred work of a health controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimedAction {
    /// End the post-hit invulnerability window
    ClearInvulnerability,
    /// Run the destruction step after death
    Destroy,
}

#[derive(Debug, Clone)]
struct Timer<A> {
    id: TimerId,
    deadline: f64,
    action: A,
}

/// Per-entity queue of delayed actions
///
/// Nothing runs on its own: `advance` moves the clock forward and hands back
/// the actions whose deadline has been reached, earliest first. Actions due
/// at the same instant come back in scheduling order.
///
/// The clock is kept in `f64` so frame-sized steps still register after
/// days of accumulated simulation time.
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    timers: Vec<Timer<A>>,
    now: f64,
    next_id: u64,
}

impl<A> TimerQueue<A> {
    /// Create an empty queue at time zero
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            now: 0.0,
            next_id: 1,
        }
    }

    /// Simulation time seen by this queue
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule an action `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            deadline: self.now + f64::from(delay.max(0.0)),
            action,
        });
        id
    }

    /// Cancel a single timer; returns false if it already fired or was canceled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer whose action matches; returns how many were removed
    pub fn cancel_matching<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&A) -> bool,
    {
        let before = self.timers.len();
        self.timers.retain(|timer| !predicate(&timer.action));
        before - self.timers.len()
    }

    /// Cancel everything
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Check if a timer is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    /// Seconds until a timer fires
    pub fn remaining(&self, id: TimerId) -> Option<f32> {
        self.timers
            .iter()
            .find(|timer| timer.id == id)
            .map(|timer| (timer.deadline - self.now).max(0.0) as f32)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance the clock and return the actions that became due
    pub fn advance(&mut self, delta_time: f32) -> Vec<A> {
        if delta_time > 0.0 {
            self.now += f64::from(delta_time);
        }

        let now = self.now;
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.timers.len() {
            if self.timers[index].deadline <= now {
                due.push(self.timers.remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by(|a, b| {
            a.deadline
                .total_cmp(&b.deadline)
                .then_with(|| a.id.cmp(&b.id))
        });
        due.into_iter().map(|timer| timer.action).collect()
    }
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = TimerQueue::new();
        timers.schedule(2.0, TimedAction::ClearInvulnerability);

        assert!(timers.advance(1.0).is_empty());
        assert_eq!(timers.advance(1.0), vec![TimedAction::ClearInvulnerability]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(3.0, "late");
        timers.schedule(1.0, "early");
        timers.schedule(1.0, "early-second");

        assert_eq!(timers.advance(5.0), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let destroy = timers.schedule(3.0, TimedAction::Destroy);
        timers.schedule(1.0, TimedAction::ClearInvulnerability);

        assert!(timers.is_pending(destroy));
        assert_eq!(timers.remaining(destroy), Some(3.0));
        assert!(timers.cancel(destroy));
        assert!(!timers.cancel(destroy));

        assert_eq!(timers.advance(5.0), vec![TimedAction::ClearInvulnerability]);
    }

    #[test]
    fn test_cancel_matching_and_all() {
        let mut timers = TimerQueue::new();
        timers.schedule(1.0, TimedAction::Destroy);
        timers.schedule(1.0, TimedAction::ClearInvulnerability);
        timers.schedule(2.0, TimedAction::ClearInvulnerability);

        assert_eq!(
            timers.cancel_matching(|action| *action == TimedAction::ClearInvulnerability),
            2
        );
        assert_eq!(timers.len(), 1);

        timers.cancel_all();
        assert!(timers.advance(10.0).is_empty());
    }

    #[test]
    fn test_small_steps_after_long_session() {
        let mut timers = TimerQueue::new();
        for _ in 0..6 {
            timers.advance(100_000.0);
        }
        timers.schedule(0.5, TimedAction::ClearInvulnerability);

        let mut fired = Vec::new();
        for _ in 0..60 {
            fired.extend(timers.advance(1.0 / 60.0));
        }
        assert_eq!(fired, vec![TimedAction::ClearInvulnerability]);
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut timers = TimerQueue::new();
        timers.advance(4.0);
        timers.schedule(0.0, TimedAction::Destroy);
        assert_eq!(timers.now(), 4.0);
        assert_eq!(timers.advance(0.0), vec![TimedAction::Destroy]);
    }
}
