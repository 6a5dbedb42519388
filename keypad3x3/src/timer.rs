use keypad3x3_lib::clock::{Instant, MonotonicClock};
use rp2040_hal::Timer;

/// Millisecond view of the free-running 64-bit microsecond timer.
#[derive(Copy, Clone)]
pub struct TimerClock {
    timer: Timer,
}

impl TimerClock {
    pub const fn new(timer: Timer) -> Self {
        Self { timer }
    }
}

impl MonotonicClock for TimerClock {
    #[inline]
    #[expect(clippy::cast_possible_truncation)]
    fn now(&self) -> Instant {
        // Truncating to u32 millis wraps every ~49 days, instant ordering handles it
        Instant::from_ticks((self.timer.get_counter().ticks() / 1_000) as u32)
    }
}
