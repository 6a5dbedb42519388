use crate::keycodes::{KeyCode, Modifier};
use crate::transmit::{ReportTransmitter, ReportTransport};

/// Boot keyboards can only report this many non-modifier keys at once.
pub const MAX_HELD_KEYS: usize = 6;

pub const REPORT_LEN: usize = 8;

/// Boot-protocol keyboard input report.
///
/// Byte 0 is the modifier mask, byte 1 is reserved, bytes 2..8 are held
/// usage codes padded with zeroes. The reserved byte has no field, so it is
/// always zero on the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Report {
    pub modifier: u8,
    pub keycodes: [u8; MAX_HELD_KEYS],
}

impl Report {
    pub const EMPTY: Self = Self {
        modifier: 0,
        keycodes: [0; MAX_HELD_KEYS],
    };

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let k = self.keycodes;
        [
            self.modifier,
            0,
            k[0],
            k[1],
            k[2],
            k[3],
            k[4],
            k[5],
        ]
    }
}

/// Accumulates held keys and the modifier byte into a [`Report`].
///
/// Held keys are kept in press order and packed to the front, a release
/// shifts later keys down so the report never has holes.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    held: heapless::Vec<KeyCode, MAX_HELD_KEYS>,
    modifier: Modifier,
    current: Report,
}

impl ReportAssembler {
    pub const fn new() -> Self {
        Self {
            held: heapless::Vec::new(),
            modifier: Modifier::NONE,
            current: Report::EMPTY,
        }
    }

    /// Returns `true` if the key was added. `NONE`, a key that's already
    /// held, and a seventh simultaneous key are ignored.
    pub fn press(&mut self, key: KeyCode) -> bool {
        if key.is_none() || self.held.contains(&key) {
            return false;
        }
        if self.held.push(key).is_err() {
            return false;
        }
        self.rebuild();
        true
    }

    /// Returns `true` if the key was held and is now removed.
    pub fn release(&mut self, key: KeyCode) -> bool {
        if key.is_none() {
            return false;
        }
        let Some(pos) = self.held.iter().position(|k| *k == key) else {
            return false;
        };
        self.held.remove(pos);
        self.rebuild();
        true
    }

    pub fn release_all(&mut self) {
        self.held.clear();
        self.modifier = Modifier::NONE;
        self.rebuild();
    }

    pub fn set_modifier(&mut self, modifier: Modifier) {
        self.modifier = modifier;
        self.rebuild();
    }

    pub fn clear_modifier(&mut self) {
        self.set_modifier(Modifier::NONE);
    }

    #[inline]
    #[must_use]
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    #[inline]
    #[must_use]
    pub fn held_keys(&self) -> &[KeyCode] {
        &self.held
    }

    #[inline]
    #[must_use]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Apply one confirmed transition. Modifier usages toggle their bit in
    /// byte 0 instead of taking a key slot. Returns `true` if the state changed.
    pub fn apply(&mut self, key: KeyCode, pressed: bool) -> bool {
        if let Some(bit) = key.modifier() {
            let next = if pressed {
                self.modifier.union(bit)
            } else {
                self.modifier.without(bit)
            };
            if next == self.modifier {
                return false;
            }
            self.set_modifier(next);
            return true;
        }
        if pressed {
            self.press(key)
        } else {
            self.release(key)
        }
    }

    /// Apply a transition and hand the resulting report to the transmitter.
    /// Returns `true` if a report went out.
    pub fn handle_matrix_event<T: ReportTransport>(
        &mut self,
        key: KeyCode,
        pressed: bool,
        transmitter: &mut ReportTransmitter<T>,
    ) -> bool {
        self.apply(key, pressed);
        transmitter.maybe_send(&self.current)
    }

    /// Derive the report from the held keys and modifier.
    #[must_use]
    pub fn build_report(&self) -> Report {
        let mut report = Report {
            modifier: self.modifier.0,
            ..Report::EMPTY
        };
        for (slot, key) in report.keycodes.iter_mut().zip(self.held.iter()) {
            *slot = key.0;
        }
        report
    }

    /// Most recently built report.
    #[inline]
    #[must_use]
    pub fn report(&self) -> &Report {
        &self.current
    }

    /// Copy the most recently built report into `out`, returns the number of bytes written.
    pub fn get_report(&self, out: &mut [u8]) -> usize {
        let bytes = self.current.to_bytes();
        let len = out.len().min(REPORT_LEN);
        out[..len].copy_from_slice(&bytes[..len]);
        len
    }

    #[inline]
    fn rebuild(&mut self) {
        self.current = self.build_report();
    }
}
