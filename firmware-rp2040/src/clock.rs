//! Microsecond clock backed by the embassy time driver.

use embassy_time::Instant;
use sensor_core::MicrosClock;

/// Monotonic clock reading [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    #[inline]
    fn now_us(&mut self) -> u64 {
        Instant::now().as_micros()
    }
}
