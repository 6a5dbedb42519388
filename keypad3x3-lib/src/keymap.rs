use crate::keycodes::KeyCode;
use crate::matrix::{ColIndex, MatrixIndex, RowIndex, TOTAL_KEYS};

/// Fixed translation from switch position to usage code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyMap([KeyCode; TOTAL_KEYS]);

/// ```text
/// 0 1 2      1 2 3
/// 3 4 5  ->  4 5 6
/// 6 7 8      7 8 9
/// ```
pub const DEFAULT_KEYMAP: KeyMap = KeyMap::new([
    KeyCode::N1,
    KeyCode::N2,
    KeyCode::N3,
    KeyCode::N4,
    KeyCode::N5,
    KeyCode::N6,
    KeyCode::N7,
    KeyCode::N8,
    KeyCode::N9,
]);

impl KeyMap {
    #[must_use]
    pub const fn new(codes: [KeyCode; TOTAL_KEYS]) -> Self {
        Self(codes)
    }

    #[inline]
    #[must_use]
    pub const fn lookup(&self, index: MatrixIndex) -> KeyCode {
        self.0[index.index()]
    }

    #[inline]
    #[must_use]
    pub const fn at(&self, row: RowIndex, col: ColIndex) -> KeyCode {
        self.lookup(MatrixIndex::from_row_col(row, col))
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        DEFAULT_KEYMAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_is_digits_one_through_nine() {
        for i in 0..TOTAL_KEYS as u8 {
            let ind = MatrixIndex::try_from_value(i).unwrap();
            assert_eq!(KeyCode(KeyCode::N1.0 + i), DEFAULT_KEYMAP.lookup(ind));
        }
    }

    #[test]
    fn center_key_is_five() {
        assert_eq!(
            KeyCode::N5,
            DEFAULT_KEYMAP.at(RowIndex::from_value(1), ColIndex::from_value(1))
        );
        assert_eq!(0x22, KeyCode::N5.0);
    }
}
