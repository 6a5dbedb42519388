//! HID keyboard usage codes (usage page 0x07) and boot-protocol modifier bits.

#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct KeyCode(pub u8);

impl KeyCode {
    /// Reserved "no key" usage, never occupies a report slot.
    pub const NONE: Self = Self(0x00);

    pub const A: Self = Self(0x04);
    pub const B: Self = Self(0x05);
    pub const C: Self = Self(0x06);
    pub const D: Self = Self(0x07);
    pub const E: Self = Self(0x08);
    pub const F: Self = Self(0x09);
    pub const G: Self = Self(0x0A);
    pub const H: Self = Self(0x0B);
    pub const I: Self = Self(0x0C);
    pub const J: Self = Self(0x0D);
    pub const K: Self = Self(0x0E);
    pub const L: Self = Self(0x0F);
    pub const M: Self = Self(0x10);
    pub const N: Self = Self(0x11);
    pub const O: Self = Self(0x12);
    pub const P: Self = Self(0x13);
    pub const Q: Self = Self(0x14);
    pub const R: Self = Self(0x15);
    pub const S: Self = Self(0x16);
    pub const T: Self = Self(0x17);
    pub const U: Self = Self(0x18);
    pub const V: Self = Self(0x19);
    pub const W: Self = Self(0x1A);
    pub const X: Self = Self(0x1B);
    pub const Y: Self = Self(0x1C);
    pub const Z: Self = Self(0x1D);

    pub const N1: Self = Self(0x1E);
    pub const N2: Self = Self(0x1F);
    pub const N3: Self = Self(0x20);
    pub const N4: Self = Self(0x21);
    pub const N5: Self = Self(0x22);
    pub const N6: Self = Self(0x23);
    pub const N7: Self = Self(0x24);
    pub const N8: Self = Self(0x25);
    pub const N9: Self = Self(0x26);
    pub const N0: Self = Self(0x27);

    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const BACKSPACE: Self = Self(0x2A);
    pub const TAB: Self = Self(0x2B);
    pub const SPACE: Self = Self(0x2C);
    pub const MINUS: Self = Self(0x2D);
    pub const EQUAL: Self = Self(0x2E);
    pub const LEFT_BRACE: Self = Self(0x2F);
    pub const RIGHT_BRACE: Self = Self(0x30);
    pub const BACKSLASH: Self = Self(0x31);
    pub const SEMICOLON: Self = Self(0x33);
    pub const APOSTROPHE: Self = Self(0x34);
    pub const GRAVE: Self = Self(0x35);
    pub const COMMA: Self = Self(0x36);
    pub const DOT: Self = Self(0x37);
    pub const SLASH: Self = Self(0x38);
    pub const CAPS_LOCK: Self = Self(0x39);

    pub const F1: Self = Self(0x3A);
    pub const F2: Self = Self(0x3B);
    pub const F3: Self = Self(0x3C);
    pub const F4: Self = Self(0x3D);
    pub const F5: Self = Self(0x3E);
    pub const F6: Self = Self(0x3F);
    pub const F7: Self = Self(0x40);
    pub const F8: Self = Self(0x41);
    pub const F9: Self = Self(0x42);
    pub const F10: Self = Self(0x43);
    pub const F11: Self = Self(0x44);
    pub const F12: Self = Self(0x45);

    pub const HOME: Self = Self(0x4A);
    pub const PAGE_UP: Self = Self(0x4B);
    pub const DELETE: Self = Self(0x4C);
    pub const END: Self = Self(0x4D);
    pub const PAGE_DOWN: Self = Self(0x4E);
    pub const RIGHT: Self = Self(0x4F);
    pub const LEFT: Self = Self(0x50);
    pub const DOWN: Self = Self(0x51);
    pub const UP: Self = Self(0x52);

    pub const LEFT_CONTROL: Self = Self(0xE0);
    pub const LEFT_SHIFT: Self = Self(0xE1);
    pub const LEFT_ALT: Self = Self(0xE2);
    pub const LEFT_GUI: Self = Self(0xE3);
    pub const RIGHT_CONTROL: Self = Self(0xE4);
    pub const RIGHT_SHIFT: Self = Self(0xE5);
    pub const RIGHT_ALT: Self = Self(0xE6);
    pub const RIGHT_GUI: Self = Self(0xE7);

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    #[inline]
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        self.0 >= Self::LEFT_CONTROL.0 && self.0 <= Self::RIGHT_GUI.0
    }

    /// The modifier bit this usage maps to in byte 0 of a boot report.
    #[inline]
    #[must_use]
    pub const fn modifier(self) -> Option<Modifier> {
        if self.is_modifier() {
            Some(Modifier(1 << (self.0 - Self::LEFT_CONTROL.0)))
        } else {
            None
        }
    }
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Modifier(pub u8);

impl Modifier {
    pub const NONE: Self = Self(0);
    pub const LEFT_CONTROL: Self = Self(0x01);
    pub const LEFT_SHIFT: Self = Self(0x02);
    pub const LEFT_ALT: Self = Self(0x04);
    pub const LEFT_GUI: Self = Self(0x08);
    pub const RIGHT_CONTROL: Self = Self(0x10);
    pub const RIGHT_SHIFT: Self = Self(0x20);
    pub const RIGHT_ALT: Self = Self(0x40);
    pub const RIGHT_GUI: Self = Self(0x80);

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_usages_map_to_report_bits() {
        assert_eq!(Some(Modifier::LEFT_CONTROL), KeyCode::LEFT_CONTROL.modifier());
        assert_eq!(Some(Modifier::LEFT_SHIFT), KeyCode::LEFT_SHIFT.modifier());
        assert_eq!(Some(Modifier::RIGHT_ALT), KeyCode::RIGHT_ALT.modifier());
        assert_eq!(Some(Modifier::RIGHT_GUI), KeyCode::RIGHT_GUI.modifier());
        assert_eq!(None, KeyCode::N1.modifier());
        assert_eq!(None, KeyCode::NONE.modifier());
    }

    #[test]
    fn modifier_set_ops() {
        let both = Modifier::LEFT_SHIFT.union(Modifier::RIGHT_CONTROL);
        assert_eq!(0x12, both.0);
        assert!(both.contains(Modifier::LEFT_SHIFT));
        assert!(!both.contains(Modifier::LEFT_ALT));
        assert_eq!(Modifier::RIGHT_CONTROL, both.without(Modifier::LEFT_SHIFT));
    }
}
