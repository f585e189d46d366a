//! Monotonic time source used to bound busy-waits.
use embassy_time::Instant;

/// Clock abstraction; implementations must never go backwards.
pub trait MonotonicClock {
    fn now(&self) -> Instant;
}

/// Clock backed by the global `embassy-time` driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl MonotonicClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
