use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic clock. Timed input only ever asks how much time has gone
/// by, so readings are offsets from some fixed point.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// wall clock time since the clock was made
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a
/// test can hand one to the session and keep another to advance.
#[derive(Clone, Default)]
pub struct DummyClock {
    now: Rc<Cell<Duration>>,
}

impl DummyClock {
    pub fn new() -> Self {
        DummyClock::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for DummyClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_moves() {
        let c = SystemClock::new();
        let before = c.now();
        spin_sleep::sleep(Duration::from_millis(20));
        assert!(c.now() - before >= Duration::from_millis(20));
    }

    #[test]
    fn test_dummy_clock_shared() {
        let c = DummyClock::new();
        let handle = c.clone();
        handle.advance(Duration::from_millis(1500));
        assert_eq!(c.now(), Duration::from_millis(1500));
    }
}
