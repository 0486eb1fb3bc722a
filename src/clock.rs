use std::time::Instant;

use crate::config::TickPeriod;

/// Fixed-period tick scheduler driven by caller-supplied instants.
///
/// The clock never reads the system time itself, so tests can step it with
/// synthetic instants.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    period: TickPeriod,
    next_due: Option<Instant>,
}

impl TickClock {
    /// Creates a stopped clock.
    #[must_use]
    pub fn new(period: TickPeriod) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Starts (or restarts) the clock; the first tick is due one period after `now`.
    pub fn start(&mut self, period: TickPeriod, now: Instant) {
        self.period = period;
        self.next_due = Some(now + period.as_duration());
        log::debug!("clock started, period {:?}", period.as_duration());
    }

    /// Stops the clock. No tick is reported until the next `start`.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn period(&self) -> TickPeriod {
        self.period
    }

    /// Returns true when a tick is due at `now` and schedules the following one.
    ///
    /// At most one tick is reported per call; a late poll does not replay
    /// missed periods.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period.as_duration());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickClock;
    use crate::config::TickPeriod;

    fn period(ms: u64) -> TickPeriod {
        TickPeriod::from_millis(ms).expect("period is positive")
    }

    #[test]
    fn stopped_clock_never_fires() {
        let mut clock = TickClock::new(period(100));
        let now = Instant::now();

        assert!(!clock.is_running());
        assert!(!clock.poll(now + Duration::from_secs(10)));
    }

    #[test]
    fn clock_fires_once_per_period() {
        let mut clock = TickClock::new(period(100));
        let start = Instant::now();
        clock.start(period(100), start);

        assert!(!clock.poll(start + Duration::from_millis(99)));
        assert!(clock.poll(start + Duration::from_millis(100)));
        assert!(!clock.poll(start + Duration::from_millis(150)));
        assert!(clock.poll(start + Duration::from_millis(200)));
    }

    #[test]
    fn late_poll_fires_only_once() {
        let mut clock = TickClock::new(period(100));
        let start = Instant::now();
        clock.start(period(100), start);

        let late = start + Duration::from_millis(1_000);
        assert!(clock.poll(late));
        assert!(!clock.poll(late));
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let mut clock = TickClock::new(period(100));
        let start = Instant::now();
        clock.start(period(100), start);

        clock.stop();

        assert!(!clock.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn restart_adopts_new_period() {
        let mut clock = TickClock::new(period(300));
        let start = Instant::now();
        clock.start(period(300), start);

        clock.start(period(120), start);

        assert_eq!(clock.period(), period(120));
        assert!(clock.poll(start + Duration::from_millis(120)));
    }
}
