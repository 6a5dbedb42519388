use crate::clock::{Instant, MonotonicClock};
use crate::debounce::KeyDebouncer;
use crate::event::{KeyEvent, KeyEventSink};
use crate::keymap::KeyMap;
use crate::matrix::{ColIndex, MatrixIndex, RowIndex, NUM_COLS, NUM_ROWS, TOTAL_KEYS};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Time allowed for a freshly driven row to propagate to the column inputs.
pub const SETTLE_MICROS: u32 = 1;

/// Electrical access to the switch matrix.
pub trait MatrixPort {
    /// Drive a row to its active (selected) or inactive level.
    fn drive_row(&mut self, row: RowIndex, active: bool);

    /// `true` if the switch between the active row and this column conducts.
    fn sample_column(&mut self, col: ColIndex) -> bool;

    /// Wait for the lines to settle after a row change.
    fn settle(&mut self) {}
}

/// [`MatrixPort`] over plain GPIO: rows are active-low outputs, columns are
/// inputs with pull-ups, so a closed switch reads low while its row is driven.
pub struct PinMatrix<R, C, D> {
    rows: [R; NUM_ROWS as usize],
    cols: [C; NUM_COLS as usize],
    delay: D,
}

impl<R, C, D> PinMatrix<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    pub fn new(rows: [R; NUM_ROWS as usize], cols: [C; NUM_COLS as usize], delay: D) -> Self {
        let mut matrix = Self { rows, cols, delay };
        for row in RowIndex::ALL {
            matrix.drive_row(row, false);
        }
        matrix
    }

    pub fn release(self) -> ([R; NUM_ROWS as usize], [C; NUM_COLS as usize], D) {
        (self.rows, self.cols, self.delay)
    }
}

impl<R, C, D> MatrixPort for PinMatrix<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    #[inline]
    fn drive_row(&mut self, row: RowIndex, active: bool) {
        let pin = &mut self.rows[row.index()];
        let _ = if active { pin.set_low() } else { pin.set_high() };
    }

    #[inline]
    fn sample_column(&mut self, col: ColIndex) -> bool {
        // A pin that fails to read is treated as an open switch
        matches!(self.cols[col.index()].is_low(), Ok(true))
    }

    #[inline]
    fn settle(&mut self) {
        self.delay.delay_us(SETTLE_MICROS);
    }
}

/// Row-by-row scanner with a [`KeyDebouncer`] per intersection.
pub struct MatrixScanner<P> {
    port: P,
    keymap: KeyMap,
    cells: [[KeyDebouncer; NUM_COLS as usize]; NUM_ROWS as usize],
}

impl<P: MatrixPort> MatrixScanner<P> {
    pub fn new(port: P, keymap: KeyMap) -> Self {
        Self {
            port,
            keymap,
            cells: [[KeyDebouncer::new(); NUM_COLS as usize]; NUM_ROWS as usize],
        }
    }

    /// Run one full pass, reading the clock once.
    pub fn scan<K: MonotonicClock, S: KeyEventSink>(&mut self, clock: &K, sink: &mut S) -> usize {
        self.scan_at(clock.now(), sink)
    }

    /// Run one full pass over all cells sampled at `now`, returns the number of events emitted.
    pub fn scan_at<S: KeyEventSink>(&mut self, now: Instant, sink: &mut S) -> usize {
        let mut emitted = 0;
        for row in RowIndex::ALL {
            for other in RowIndex::ALL {
                self.port.drive_row(other, other == row);
            }
            self.port.settle();
            for col in ColIndex::ALL {
                let raw = self.port.sample_column(col);
                let cell = &mut self.cells[row.index()][col.index()];
                let Some(pressed) = cell.try_submit(now, raw) else {
                    continue;
                };
                sink.on_key_event(KeyEvent {
                    index: MatrixIndex::from_row_col(row, col),
                    key: self.keymap.at(row, col),
                    pressed,
                });
                emitted += 1;
            }
        }
        for row in RowIndex::ALL {
            self.port.drive_row(row, false);
        }
        emitted
    }

    /// Stable state of one switch, out of range positions read as released.
    #[must_use]
    pub fn get_key_status(&self, row: u8, col: u8) -> bool {
        match (RowIndex::try_from_value(row), ColIndex::try_from_value(col)) {
            (Some(row), Some(col)) => self.cells[row.index()][col.index()].stable(),
            _ => false,
        }
    }

    /// Stable state of every switch, indexed by [`MatrixIndex`].
    #[must_use]
    pub fn pressed_keys(&self) -> [bool; TOTAL_KEYS] {
        let mut out = [false; TOTAL_KEYS];
        for row in RowIndex::ALL {
            for col in ColIndex::ALL {
                out[MatrixIndex::from_row_col(row, col).index()] =
                    self.cells[row.index()][col.index()].stable();
            }
        }
        out
    }

    /// Forget every stable state and pending deadline without emitting events.
    /// Pair with a release-all on the report side.
    pub fn reset(&mut self) {
        self.cells = [[KeyDebouncer::new(); NUM_COLS as usize]; NUM_ROWS as usize];
    }

    #[inline]
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    #[inline]
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}
