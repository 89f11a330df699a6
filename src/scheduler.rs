//! Cooperative refresh scheduling.
//!
//! One logical timer drives all ingestion: the TUI event loop asks the
//! scheduler whether a refresh cycle is due on each pass. A cycle that
//! is still in flight when the next tick falls due causes that tick to
//! be dropped outright, never queued, so overlapping fetches cannot
//! produce duplicate ingestion or out-of-order view updates.

use std::time::{Duration, Instant};

/// Drives periodic refresh cycles with a reentrancy guard.
///
/// The guard is a mutual-exclusion flag, not a queue: work for a tick
/// that arrives mid-cycle is dropped, not deferred.
#[derive(Debug)]
pub struct RefreshScheduler {
    period: Duration,
    enabled: bool,
    last_tick: Option<Instant>,
    in_flight: bool,
}

impl RefreshScheduler {
    /// Create a stopped scheduler with the given period.
    pub fn new(period: Duration) -> Self {
        Self { period, enabled: false, last_tick: None, in_flight: false }
    }

    /// Start (or restart) the timer with a new period.
    ///
    /// Cancels any existing schedule; the first tick falls due one full
    /// period from now.
    pub fn start(&mut self, period: Duration, now: Instant) {
        self.period = period;
        self.enabled = true;
        self.last_tick = Some(now);
    }

    /// Stop the timer. Idempotent; an in-flight cycle runs to
    /// completion.
    pub fn stop(&mut self) {
        self.enabled = false;
        self.last_tick = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a tick is due and a cycle may begin.
    ///
    /// Consumes the tick either way: when a cycle is in flight the due
    /// tick is dropped and `false` is returned. On `true` the caller
    /// must run the cycle and call [`complete_cycle`](Self::complete_cycle)
    /// when its I/O finishes.
    pub fn try_begin_cycle(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        let due = match self.last_tick {
            None => true,
            Some(last) => now.duration_since(last) >= self.period,
        };
        if !due {
            return false;
        }
        self.last_tick = Some(now);
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Mark the current cycle's I/O as finished, releasing the guard.
    pub fn complete_cycle(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_tick_fires_once_per_period() {
        let t0 = Instant::now();
        let mut sched = RefreshScheduler::new(ms(100));
        sched.start(ms(100), t0);

        assert!(!sched.try_begin_cycle(t0 + ms(50)));
        assert!(sched.try_begin_cycle(t0 + ms(100)));
        sched.complete_cycle();
        assert!(!sched.try_begin_cycle(t0 + ms(150)));
        assert!(sched.try_begin_cycle(t0 + ms(200)));
    }

    #[test]
    fn test_overlapping_ticks_are_dropped_not_queued() {
        let t0 = Instant::now();
        let mut sched = RefreshScheduler::new(ms(100));
        sched.start(ms(100), t0);

        // Cycle begins at t=100 and takes 250ms
        assert!(sched.try_begin_cycle(t0 + ms(100)));

        // Ticks at t=200 and t=300 fall due mid-cycle and are dropped
        assert!(!sched.try_begin_cycle(t0 + ms(200)));
        assert!(!sched.try_begin_cycle(t0 + ms(300)));

        sched.complete_cycle();

        // Dropped ticks were not queued: nothing fires until a full
        // period after the last consumed tick
        assert!(!sched.try_begin_cycle(t0 + ms(350)));
        assert!(sched.try_begin_cycle(t0 + ms(400)));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let t0 = Instant::now();
        let mut sched = RefreshScheduler::new(ms(100));
        sched.start(ms(100), t0);
        sched.stop();
        sched.stop();
        assert!(!sched.is_enabled());
        assert!(!sched.try_begin_cycle(t0 + ms(1000)));
    }

    #[test]
    fn test_restart_applies_new_period() {
        let t0 = Instant::now();
        let mut sched = RefreshScheduler::new(ms(100));
        sched.start(ms(100), t0);

        // Restarting at t=50 with a 500ms period resets the schedule
        sched.start(ms(500), t0 + ms(50));
        assert!(!sched.try_begin_cycle(t0 + ms(100)));
        assert!(!sched.try_begin_cycle(t0 + ms(500)));
        assert!(sched.try_begin_cycle(t0 + ms(550)));
    }

    #[test]
    fn test_stopped_scheduler_never_fires() {
        let t0 = Instant::now();
        let mut sched = RefreshScheduler::new(ms(100));
        assert!(!sched.try_begin_cycle(t0 + ms(1000)));
    }
}
