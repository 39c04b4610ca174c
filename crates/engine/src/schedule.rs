//! Gravity tick schedule.
//!
//! Holds at most one pending deadline. Restarting replaces the deadline
//! rather than adding a second one, so there is never more than one tick
//! source no matter how often a game is started.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct TickSchedule {
    period: Duration,
    deadline: Option<Instant>,
    /// Bumped every time the schedule is (re)armed.
    generation: u64,
}

impl TickSchedule {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            deadline: None,
            generation: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arm the schedule one period after `now`, dropping any pending deadline.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consume the deadline if it has passed and schedule the next one.
    ///
    /// Late wakeups fire once; the next deadline is a full period after `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_schedule_never_fires() {
        let mut schedule = TickSchedule::new(Duration::from_secs(1));
        let now = Instant::now();
        assert!(!schedule.is_armed());
        assert!(!schedule.fire(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_fire_only_after_deadline() {
        let mut schedule = TickSchedule::new(Duration::from_secs(1));
        let now = Instant::now();
        schedule.restart(now);
        assert!(!schedule.fire(now + Duration::from_millis(999)));
        assert!(schedule.fire(now + Duration::from_secs(1)));
        assert_eq!(schedule.deadline(), Some(now + Duration::from_secs(2)));
    }

    #[test]
    fn test_restart_replaces_pending_deadline() {
        let mut schedule = TickSchedule::new(Duration::from_secs(1));
        let now = Instant::now();
        schedule.restart(now);
        let later = now + Duration::from_millis(500);
        schedule.restart(later);
        assert_eq!(schedule.deadline(), Some(later + Duration::from_secs(1)));
        assert!(!schedule.fire(now + Duration::from_secs(1)));
        assert_eq!(schedule.generation(), 2);
    }

    #[test]
    fn test_cancel_clears_deadline() {
        let mut schedule = TickSchedule::new(Duration::from_secs(1));
        let now = Instant::now();
        schedule.restart(now);
        schedule.cancel();
        assert!(!schedule.fire(now + Duration::from_secs(5)));
        assert_eq!(schedule.deadline(), None);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let schedule = TickSchedule::new(Duration::ZERO);
        assert_eq!(schedule.period(), Duration::from_millis(1));
    }
}
