//! Thread-sleeping delay for hosted targets

use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

/// [`DelayNs`] implementation that sleeps the calling thread
///
/// Waits against a monotonic deadline, so an early wakeup sleeps again for
/// the remainder instead of cutting the pause short.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl StdDelay {
    fn sleep_for(duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(deadline - now);
        }
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        Self::sleep_for(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        Self::sleep_for(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        Self::sleep_for(Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_waits_at_least_requested_time() {
        let start = Instant::now();
        StdDelay.delay_ms(20);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_zero_delay_returns() {
        let mut delay = StdDelay;
        delay.delay_ns(0);
        delay.delay_ms(0);
    }
}
