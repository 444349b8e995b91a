//! # time budget
//!
//! Timed input without interrupts. Nothing stops a read part-way; instead
//! the time a line took to arrive is measured afterwards, scaled by the
//! speed factor, and charged against the timeout the story asked for.
//!
//! Time the user spends beyond a timeout isn't lost: it goes into a
//! bank, and later timeouts are paid out of the bank first. A user who
//! types several keys on one line therefore sees the same sequence of
//! timeouts as one who typed them slowly, one at a time.
//!
//! All amounts are in tenths of a second.
use std::time::Duration;

pub const TENTHS_PER_SECOND: f64 = 10.0;

/// real elapsed time to simulated tenths, truncating; saturates at
/// `u32::MAX`, so a huge speed factor times out at once
pub fn simulated_tenths(real: Duration, speed: f32) -> u32 {
    let tenths = real.as_secs_f64() * TENTHS_PER_SECOND * f64::from(speed);
    if tenths.is_nan() || tenths <= 0.0 {
        0
    } else if tenths >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        tenths as u32
    }
}

/// How charging some elapsed time against a remaining timeout came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    /// the timeout ran out; `carry` is how far past it we went
    TimedOut { carry: u32 },
    /// still waiting, with this much left
    Remaining(u32),
}

/// the core policy: `elapsed` against `remaining`
pub fn charge(elapsed: u32, remaining: u32) -> Charge {
    if elapsed >= remaining {
        Charge::TimedOut {
            carry: elapsed - remaining,
        }
    } else {
        Charge::Remaining(remaining - elapsed)
    }
}

/// What a blocking read has to do once the bank has been consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    /// the bank covers the whole timeout; don't read at all
    Expired,
    /// no timeout: wait as long as it takes
    Untimed,
    /// wait, but no longer than this
    Wait(u32),
}

/// The bank of simulated time the user is ahead of the story.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimeBudget {
    ahead: u32,
}

impl TimeBudget {
    pub fn new() -> Self {
        TimeBudget { ahead: 0 }
    }

    pub fn ahead(&self) -> u32 {
        self.ahead
    }

    /// Serving read-ahead input: should this request time out instead?
    ///
    /// Only a timeout the bank fully covers does; it is paid for out of
    /// the bank. Otherwise the bank is emptied.
    pub fn check_cached(&mut self, timeout: u32) -> bool {
        if timeout == 0 || timeout > self.ahead {
            self.ahead = 0;
            false
        } else {
            self.ahead -= timeout;
            log::debug!("timeout {} served from bank, {} left", timeout, self.ahead);
            true
        }
    }

    /// Starting a blocking read with `timeout`.
    pub fn begin(&mut self, timeout: u32) -> Start {
        if timeout == 0 {
            self.ahead = 0;
            return Start::Untimed;
        }
        if self.ahead >= timeout {
            self.ahead -= timeout;
            log::debug!("timeout {} served from bank, {} left", timeout, self.ahead);
            return Start::Expired;
        }
        let wait = timeout - self.ahead;
        self.ahead = 0;
        Start::Wait(wait)
    }

    /// Charge `elapsed` to an active wait, banking any overrun.
    pub fn settle(&mut self, elapsed: u32, remaining: u32) -> Charge {
        let c = charge(elapsed, remaining);
        if let Charge::TimedOut { carry } = c {
            log::debug!("timed out after {} tenths, banking {}", elapsed, carry);
            self.ahead = carry;
        }
        c
    }

    /// time out right now, with nothing carried forward
    pub fn force(&mut self) {
        self.ahead = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_tenths() {
        assert_eq!(simulated_tenths(Duration::from_secs(1), 1.0), 10);
        assert_eq!(simulated_tenths(Duration::from_secs(1), 2.0), 20);
        assert_eq!(simulated_tenths(Duration::from_millis(1250), 1.0), 12);
        assert_eq!(simulated_tenths(Duration::from_secs(30), 0.0), 0);
        assert_eq!(simulated_tenths(Duration::from_secs(1), -1.0), 0);
    }

    #[test]
    fn test_huge_speed_factor_saturates() {
        assert_eq!(simulated_tenths(Duration::from_millis(1), f32::INFINITY), u32::MAX);
        assert_eq!(simulated_tenths(Duration::from_secs(1), f32::MAX), u32::MAX);
        // no time at all is still no time
        assert_eq!(simulated_tenths(Duration::ZERO, f32::INFINITY), 0);
        assert_eq!(charge(u32::MAX, 50), Charge::TimedOut { carry: u32::MAX - 50 });
    }

    #[test]
    fn test_charge_policy() {
        for speed in [0.5f32, 1.0, 2.0, 4.0] {
            for timeout in [1u32, 5, 10, 50] {
                for delay_ms in [0u64, 100, 900, 2500] {
                    let e = simulated_tenths(Duration::from_millis(delay_ms), speed);
                    match charge(e, timeout) {
                        Charge::TimedOut { carry } => {
                            assert!(e >= timeout);
                            assert_eq!(carry, e - timeout);
                        }
                        Charge::Remaining(left) => {
                            assert!(e < timeout);
                            assert_eq!(left, timeout - e);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_untimed_empties_bank() {
        let mut b = TimeBudget { ahead: 7 };
        assert_eq!(b.begin(0), Start::Untimed);
        assert_eq!(b.ahead(), 0);
    }

    #[test]
    fn test_bank_covers_timeout() {
        let mut b = TimeBudget { ahead: 25 };
        assert_eq!(b.begin(10), Start::Expired);
        assert_eq!(b.ahead(), 15);
        assert_eq!(b.begin(15), Start::Expired);
        assert_eq!(b.ahead(), 0);
    }

    #[test]
    fn test_bank_partly_covers_timeout() {
        let mut b = TimeBudget { ahead: 4 };
        assert_eq!(b.begin(10), Start::Wait(6));
        assert_eq!(b.ahead(), 0);
    }

    #[test]
    fn test_check_cached() {
        let mut b = TimeBudget { ahead: 10 };
        assert!(b.check_cached(4));
        assert_eq!(b.ahead(), 6);
        assert!(!b.check_cached(8));
        assert_eq!(b.ahead(), 0);
        let mut b = TimeBudget { ahead: 10 };
        assert!(!b.check_cached(0));
        assert_eq!(b.ahead(), 0);
    }

    #[test]
    fn test_settle_banks_overrun() {
        let mut b = TimeBudget::new();
        assert_eq!(b.settle(20, 10), Charge::TimedOut { carry: 10 });
        assert_eq!(b.ahead(), 10);
        let mut b = TimeBudget::new();
        assert_eq!(b.settle(3, 10), Charge::Remaining(7));
        assert_eq!(b.ahead(), 0);
    }
}
