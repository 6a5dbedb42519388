pub const NUM_ROWS: u8 = 3;
pub const NUM_COLS: u8 = 3;
pub const TOTAL_KEYS: usize = (NUM_ROWS * NUM_COLS) as usize;

#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RowIndex(u8);

impl RowIndex {
    pub const ALL: [Self; NUM_ROWS as usize] = [Self(0), Self(1), Self(2)];

    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub const fn from_value(ind: u8) -> Self {
        assert!(
            ind < NUM_ROWS,
            "Tried to construct row index from a bad value"
        );
        Self(ind)
    }

    #[inline]
    #[must_use]
    pub const fn try_from_value(ind: u8) -> Option<Self> {
        if ind < NUM_ROWS {
            Some(Self(ind))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn byte(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ColIndex(u8);

impl ColIndex {
    pub const ALL: [Self; NUM_COLS as usize] = [Self(0), Self(1), Self(2)];

    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub const fn from_value(ind: u8) -> Self {
        assert!(
            ind < NUM_COLS,
            "Tried to construct col index from a bad value"
        );
        Self(ind)
    }

    #[inline]
    #[must_use]
    pub const fn try_from_value(ind: u8) -> Option<Self> {
        if ind < NUM_COLS {
            Some(Self(ind))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn byte(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Linear position of a switch, `row * NUM_COLS + col`, in `0..TOTAL_KEYS`.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MatrixIndex(u8);

impl MatrixIndex {
    #[inline]
    #[must_use]
    pub const fn from_row_col(row_index: RowIndex, col_index: ColIndex) -> Self {
        Self(row_index.0 * NUM_COLS + col_index.0)
    }

    #[inline]
    #[must_use]
    pub const fn try_from_value(ind: u8) -> Option<Self> {
        if (ind as usize) < TOTAL_KEYS {
            Some(Self(ind))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn row(self) -> RowIndex {
        RowIndex(self.0 / NUM_COLS)
    }

    #[inline]
    #[must_use]
    pub const fn col(self) -> ColIndex {
        ColIndex(self.0 % NUM_COLS)
    }

    #[must_use]
    #[inline(always)]
    pub const fn byte(&self) -> u8 {
        self.0
    }

    #[must_use]
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_from_row_col() {
        const R1: RowIndex = RowIndex::from_value(1);
        const C2: ColIndex = ColIndex::from_value(2);
        const M: MatrixIndex = MatrixIndex::from_row_col(R1, C2);
        assert_eq!(5, M.byte());
        assert_eq!(R1, M.row());
        assert_eq!(C2, M.col());
    }

    #[test]
    fn every_cell_has_a_unique_index() {
        let mut seen = [false; TOTAL_KEYS];
        for row in RowIndex::ALL {
            for col in ColIndex::ALL {
                let ind = MatrixIndex::from_row_col(row, col);
                assert!(!seen[ind.index()], "duplicate index {}", ind.byte());
                seen[ind.index()] = true;
                assert_eq!(row, ind.row());
                assert_eq!(col, ind.col());
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn checked_construction_rejects_out_of_range() {
        assert!(RowIndex::try_from_value(3).is_none());
        assert!(ColIndex::try_from_value(200).is_none());
        assert!(MatrixIndex::try_from_value(9).is_none());
        assert_eq!(Some(8), MatrixIndex::try_from_value(8).map(|m| m.byte()));
    }
}
