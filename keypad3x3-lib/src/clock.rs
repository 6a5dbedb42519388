/// Millisecond timestamp. Ordering is wrap-aware, so a free-running `u32`
/// millisecond counter can roll over without confusing deadline checks.
pub type Instant = fugit::TimerInstantU32<1_000>;

pub type Duration = fugit::MillisDurationU32;

pub trait MonotonicClock {
    fn now(&self) -> Instant;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_compare_survives_rollover() {
        let armed = Instant::from_ticks(u32::MAX - 5);
        let deadline = armed + Duration::from_ticks(20);
        assert_eq!(14, deadline.ticks());
        assert!(Instant::from_ticks(u32::MAX) < deadline);
        assert!(Instant::from_ticks(13) < deadline);
        assert!(Instant::from_ticks(14) >= deadline);
        assert!(Instant::from_ticks(15) >= deadline);
    }
}
