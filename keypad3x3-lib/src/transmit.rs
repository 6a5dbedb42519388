use crate::event::{KeyEvent, KeyEventSink};
use crate::report::{Report, ReportAssembler, REPORT_LEN};

/// Whatever carries reports to the host. Retries and backoff belong to the implementor.
pub trait ReportTransport {
    fn send(&mut self, report: &[u8; REPORT_LEN]);
}

/// Forwards a report only when it differs from the last one sent, so the
/// host sees every state exactly once and never a repeat.
pub struct ReportTransmitter<T> {
    transport: T,
    last_sent: Report,
}

impl<T: ReportTransport> ReportTransmitter<T> {
    /// The host starts out assuming nothing is held, so an empty report is never sent first.
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            last_sent: Report::EMPTY,
        }
    }

    /// Returns `true` if `candidate` was handed to the transport.
    pub fn maybe_send(&mut self, candidate: &Report) -> bool {
        if candidate.to_bytes() == self.last_sent.to_bytes() {
            return false;
        }
        self.transport.send(&candidate.to_bytes());
        self.last_sent = *candidate;
        true
    }

    #[inline]
    #[must_use]
    pub fn last_sent(&self) -> &Report {
        &self.last_sent
    }

    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

/// Assembler and transmitter wired together, consumes scanner events directly.
pub struct KeyboardPipeline<T> {
    assembler: ReportAssembler,
    transmitter: ReportTransmitter<T>,
}

impl<T: ReportTransport> KeyboardPipeline<T> {
    pub const fn new(transport: T) -> Self {
        Self {
            assembler: ReportAssembler::new(),
            transmitter: ReportTransmitter::new(transport),
        }
    }

    /// Returns `true` if a report went out.
    pub fn handle_matrix_event(&mut self, event: KeyEvent) -> bool {
        self.assembler
            .handle_matrix_event(event.key, event.pressed, &mut self.transmitter)
    }

    /// Drop every held key and modifier and tell the host, used to recover
    /// from stuck keys and on host suspend.
    pub fn release_all(&mut self) -> bool {
        self.assembler.release_all();
        self.transmitter.maybe_send(self.assembler.report())
    }

    #[inline]
    pub fn assembler(&self) -> &ReportAssembler {
        &self.assembler
    }

    #[inline]
    pub fn transmitter(&self) -> &ReportTransmitter<T> {
        &self.transmitter
    }

    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        self.transmitter.transport_mut()
    }
}

impl<T: ReportTransport> KeyEventSink for KeyboardPipeline<T> {
    #[inline]
    fn on_key_event(&mut self, event: KeyEvent) {
        self.handle_matrix_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes::{KeyCode, Modifier};
    use crate::matrix::MatrixIndex;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<[u8; REPORT_LEN]>,
    }

    impl ReportTransport for Recorder {
        fn send(&mut self, report: &[u8; REPORT_LEN]) {
            self.sent.push(*report);
        }
    }

    fn event(ind: u8, pressed: bool) -> KeyEvent {
        KeyEvent {
            index: MatrixIndex::try_from_value(ind).unwrap(),
            key: crate::keymap::DEFAULT_KEYMAP.lookup(MatrixIndex::try_from_value(ind).unwrap()),
            pressed,
        }
    }

    #[test]
    fn identical_reports_are_sent_once() {
        let mut tx = ReportTransmitter::new(Recorder::default());
        let report = Report {
            keycodes: [0x04, 0, 0, 0, 0, 0],
            ..Report::EMPTY
        };
        assert!(tx.maybe_send(&report));
        assert!(!tx.maybe_send(&report));
        assert_eq!(1, tx.transport().sent.len());
        assert_eq!(report, *tx.last_sent());
    }

    #[test]
    fn initial_empty_report_is_suppressed() {
        let mut tx = ReportTransmitter::new(Recorder::default());
        assert!(!tx.maybe_send(&Report::EMPTY));
        assert!(tx.transport().sent.is_empty());
    }

    #[test]
    fn every_change_goes_out() {
        let mut tx = ReportTransmitter::new(Recorder::default());
        let mut asm = ReportAssembler::new();
        assert!(asm.handle_matrix_event(KeyCode::N1, true, &mut tx));
        asm.set_modifier(Modifier::LEFT_SHIFT);
        // Already held, but the modifier changed since the last send
        assert!(asm.handle_matrix_event(KeyCode::N1, true, &mut tx));
        assert!(!asm.handle_matrix_event(KeyCode::N1, true, &mut tx));
        assert!(asm.handle_matrix_event(KeyCode::N1, false, &mut tx));
        assert_eq!(
            vec![
                [0x00, 0x00, 0x1E, 0, 0, 0, 0, 0],
                [0x02, 0x00, 0x1E, 0, 0, 0, 0, 0],
                [0x02, 0x00, 0x00, 0, 0, 0, 0, 0],
            ],
            tx.transport().sent
        );
    }

    #[test]
    fn pipeline_reports_press_order() {
        let mut pipeline = KeyboardPipeline::new(Recorder::default());
        pipeline.on_key_event(event(0, true));
        pipeline.on_key_event(event(4, true));
        assert_eq!(
            Some(&[0x00, 0x00, 0x1E, 0x22, 0x00, 0x00, 0x00, 0x00]),
            pipeline.transmitter().transport().sent.last()
        );
        pipeline.on_key_event(event(0, false));
        assert_eq!(
            Some(&[0x00, 0x00, 0x22, 0x00, 0x00, 0x00, 0x00, 0x00]),
            pipeline.transmitter().transport().sent.last()
        );
        assert_eq!(3, pipeline.transport_mut().sent.len());
    }

    #[test]
    fn dropped_seventh_key_sends_nothing() {
        let mut pipeline = KeyboardPipeline::new(Recorder::default());
        for ind in 0..6 {
            pipeline.on_key_event(event(ind, true));
        }
        assert_eq!(6, pipeline.transmitter().transport().sent.len());
        pipeline.on_key_event(event(6, true));
        assert_eq!(6, pipeline.transmitter().transport().sent.len());
        assert_eq!(
            [0x1E, 0x1F, 0x20, 0x21, 0x22, 0x23],
            pipeline.assembler().report().keycodes
        );
        // Releasing the dropped key is a no-op too
        pipeline.on_key_event(event(6, false));
        assert_eq!(6, pipeline.transmitter().transport().sent.len());
    }

    #[test]
    fn release_all_sends_one_empty_report() {
        let mut pipeline = KeyboardPipeline::new(Recorder::default());
        assert!(!pipeline.release_all());
        pipeline.on_key_event(event(2, true));
        pipeline.on_key_event(event(3, true));
        assert!(pipeline.release_all());
        assert!(!pipeline.release_all());
        assert_eq!(
            Some(&[0u8; REPORT_LEN]),
            pipeline.transmitter().transport().sent.last()
        );
        assert_eq!(3, pipeline.transmitter().transport().sent.len());
    }
}
