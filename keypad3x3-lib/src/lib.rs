//! Matrix scanning, debouncing and boot-keyboard report assembly for a 3x3 keypad.
//!
//! Data flows GPIO -> [`scanner::MatrixScanner`] -> [`event::KeyEvent`] ->
//! [`report::ReportAssembler`] -> [`transmit::ReportTransmitter`] -> host.
//! Nothing here touches hardware directly, the firmware supplies a
//! [`scanner::MatrixPort`], a [`clock::MonotonicClock`] and a
//! [`transmit::ReportTransport`].
#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod debounce;
pub mod event;
pub mod keycodes;
pub mod keymap;
pub mod matrix;
pub mod report;
pub mod scanner;
pub mod transmit;

#[cfg(test)]
mod tests {
    use crate::clock::Instant;
    use crate::event::KeyEvent;
    use crate::keymap::DEFAULT_KEYMAP;
    use crate::matrix::{ColIndex, MatrixIndex, RowIndex, TOTAL_KEYS};
    use crate::report::REPORT_LEN;
    use crate::scanner::{MatrixPort, MatrixScanner};
    use crate::transmit::{KeyboardPipeline, ReportTransport};

    struct Switches {
        closed: [bool; TOTAL_KEYS],
        row: Option<RowIndex>,
    }

    impl MatrixPort for Switches {
        fn drive_row(&mut self, row: RowIndex, active: bool) {
            if active {
                self.row = Some(row);
            } else if self.row == Some(row) {
                self.row = None;
            }
        }

        fn sample_column(&mut self, col: ColIndex) -> bool {
            self.row
                .is_some_and(|row| self.closed[MatrixIndex::from_row_col(row, col).index()])
        }
    }

    #[derive(Default)]
    struct Host {
        reports: Vec<[u8; REPORT_LEN]>,
    }

    impl ReportTransport for Host {
        fn send(&mut self, report: &[u8; REPORT_LEN]) {
            self.reports.push(*report);
        }
    }

    /// Scans every 5ms from `from` (inclusive) to `to` (exclusive).
    fn run(
        scanner: &mut MatrixScanner<Switches>,
        pipeline: &mut KeyboardPipeline<Host>,
        from: u32,
        to: u32,
    ) {
        let mut queue: heapless::Deque<KeyEvent, TOTAL_KEYS> = heapless::Deque::new();
        for t in (from..to).step_by(5) {
            scanner.scan_at(Instant::from_ticks(t), &mut queue);
            while let Some(event) = queue.pop_front() {
                pipeline.handle_matrix_event(event);
            }
        }
    }

    #[test]
    fn bouncy_press_and_release_reach_the_host_once_each() {
        let mut scanner = MatrixScanner::new(
            Switches {
                closed: [false; TOTAL_KEYS],
                row: None,
            },
            DEFAULT_KEYMAP,
        );
        let mut pipeline = KeyboardPipeline::new(Host::default());

        // Contact chatter on key 0 at 0ms and 5ms, then it settles closed
        scanner.port_mut().closed[0] = true;
        run(&mut scanner, &mut pipeline, 0, 5);
        scanner.port_mut().closed[0] = false;
        run(&mut scanner, &mut pipeline, 5, 10);
        scanner.port_mut().closed[0] = true;
        run(&mut scanner, &mut pipeline, 10, 30);
        assert!(pipeline.transmitter().transport().reports.is_empty());
        run(&mut scanner, &mut pipeline, 30, 35);
        assert_eq!(1, pipeline.transmitter().transport().reports.len());

        scanner.port_mut().closed[4] = true;
        run(&mut scanner, &mut pipeline, 35, 100);
        scanner.port_mut().closed[0] = false;
        scanner.port_mut().closed[4] = false;
        run(&mut scanner, &mut pipeline, 100, 200);

        assert_eq!(
            vec![
                [0x00, 0x00, 0x1E, 0x00, 0x00, 0x00, 0x00, 0x00],
                [0x00, 0x00, 0x1E, 0x22, 0x00, 0x00, 0x00, 0x00],
                [0x00, 0x00, 0x22, 0x00, 0x00, 0x00, 0x00, 0x00],
                [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
            ],
            pipeline.transmitter().transport().reports
        );
        assert_eq!([false; TOTAL_KEYS], scanner.pressed_keys());
    }

    #[test]
    fn key_held_across_reset_and_release_all_is_reported_again() {
        let mut scanner = MatrixScanner::new(
            Switches {
                closed: [false; TOTAL_KEYS],
                row: None,
            },
            DEFAULT_KEYMAP,
        );
        let mut pipeline = KeyboardPipeline::new(Host::default());

        scanner.port_mut().closed[0] = true;
        run(&mut scanner, &mut pipeline, 0, 25);
        assert_eq!(1, pipeline.transmitter().transport().reports.len());

        // Host went to sleep with the key still down
        scanner.reset();
        pipeline.release_all();
        assert_eq!([false; TOTAL_KEYS], scanner.pressed_keys());

        run(&mut scanner, &mut pipeline, 100, 200);
        assert_eq!(
            vec![
                [0x00, 0x00, 0x1E, 0x00, 0x00, 0x00, 0x00, 0x00],
                [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
                [0x00, 0x00, 0x1E, 0x00, 0x00, 0x00, 0x00, 0x00],
            ],
            pipeline.transmitter().transport().reports
        );
        assert!(scanner.pressed_keys()[0]);
        assert!(pipeline.assembler().is_held(crate::keycodes::KeyCode::N1));
    }
}
