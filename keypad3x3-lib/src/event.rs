use crate::keycodes::KeyCode;
use crate::matrix::MatrixIndex;

/// One confirmed transition of a switch.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub index: MatrixIndex,
    pub key: KeyCode,
    pub pressed: bool,
}

/// Receives confirmed transitions synchronously, in scan order.
pub trait KeyEventSink {
    fn on_key_event(&mut self, event: KeyEvent);
}

impl<F> KeyEventSink for F
where
    F: FnMut(KeyEvent),
{
    #[inline]
    fn on_key_event(&mut self, event: KeyEvent) {
        self(event);
    }
}

/// Buffers events so the scan and the report path can run at different points of the loop.
/// A full queue drops the newest event, size it to at least one scan's worth.
impl<const N: usize> KeyEventSink for heapless::Deque<KeyEvent, N> {
    #[inline]
    fn on_key_event(&mut self, event: KeyEvent) {
        let _ = self.push_back(event);
    }
}
