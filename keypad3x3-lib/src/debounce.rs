use crate::clock::{Duration, Instant};

/// A raw sample has to disagree with the stable state for this long before it's accepted.
pub const DEBOUNCE_TIME: Duration = Duration::from_ticks(20);

/// Debounce state for one matrix intersection.
///
/// `deadline` is armed the first time a raw sample disagrees with `stable`
/// and is cleared whenever a sample agrees with it again, so contact bounce
/// that settles back to the old state never produces a transition.
#[derive(Copy, Clone, Debug, Default)]
pub struct KeyDebouncer {
    stable: bool,
    deadline: Option<Instant>,
}

impl KeyDebouncer {
    pub const fn new() -> Self {
        Self {
            stable: false,
            deadline: None,
        }
    }

    /// Last confirmed state, `true` is pressed.
    #[inline]
    #[must_use]
    pub const fn stable(&self) -> bool {
        self.stable
    }

    #[inline]
    #[must_use]
    pub const fn is_settling(&self) -> bool {
        self.deadline.is_some()
    }

    /// Feed one raw sample taken at `now`, returns the new stable state on a commit.
    pub fn try_submit(&mut self, now: Instant, raw: bool) -> Option<bool> {
        if raw == self.stable {
            self.deadline = None;
            return None;
        }
        let Some(deadline) = self.deadline else {
            self.deadline = Some(now + DEBOUNCE_TIME);
            return None;
        };
        if now < deadline {
            return None;
        }
        self.stable = raw;
        self.deadline = None;
        Some(raw)
    }
}
