use crate::keyboard::Keypad;
use crate::timer::TimerClock;
use keypad3x3_lib::clock::{Duration, Instant, MonotonicClock};
use keypad3x3_lib::event::KeyEvent;
use keypad3x3_lib::transmit::{KeyboardPipeline, ReportTransport};
use usb_device::device::UsbDeviceState;

#[cfg(feature = "hiddev")]
pub type Transport<'a> = crate::hid::usb_hiddev::UsbHiddev<'a>;

#[cfg(feature = "serial")]
pub type Transport<'a> = crate::keyboard::usb_serial::UsbConsole<'a>;

/// Time between two full matrix passes.
pub const SCAN_PERIOD: Duration = Duration::from_ticks(5);

/// Confirmed transitions that may queue up in a single pass, every cell can flip at most once.
const EVENT_QUEUE_LEN: usize = 16;

/// The USB device half of a transport, needs polling to keep the host happy.
pub trait UsbLink {
    /// Returns `true` if the device may have data to read.
    fn poll(&mut self) -> bool;

    fn state(&self) -> UsbDeviceState;

    /// Diagnostic output, only the serial console prints anything.
    fn log(&mut self, _args: core::fmt::Arguments<'_>) {}
}

#[inline(never)]
pub fn run<T>(mut keypad: Keypad, transport: T, clock: TimerClock) -> !
where
    T: ReportTransport + UsbLink,
{
    let mut pipeline = KeyboardPipeline::new(transport);
    let mut queue: heapless::Deque<KeyEvent, EVENT_QUEUE_LEN> = heapless::Deque::new();
    let mut last_state = pipeline.transport_mut().state();
    let mut next_scan: Instant = clock.now();
    loop {
        pipeline.transport_mut().poll();
        let state = pipeline.transport_mut().state();
        if state != last_state {
            on_usb_state_change(&mut keypad, &mut pipeline, last_state, state);
            last_state = state;
        }
        let now = clock.now();
        if now < next_scan {
            continue;
        }
        next_scan = now + SCAN_PERIOD;
        keypad.scan_at(now, &mut queue);
        while let Some(event) = queue.pop_front() {
            pipeline.transport_mut().log(format_args!(
                "M{} R{} C{} {:02x} -> {}\r\n",
                event.index.byte(),
                event.index.row().byte(),
                event.index.col().byte(),
                event.key.0,
                if event.pressed { "pressed" } else { "released" }
            ));
            pipeline.handle_matrix_event(event);
        }
    }
}

fn on_usb_state_change<T>(
    keypad: &mut Keypad,
    pipeline: &mut KeyboardPipeline<T>,
    from: UsbDeviceState,
    to: UsbDeviceState,
) where
    T: ReportTransport + UsbLink,
{
    pipeline
        .transport_mut()
        .log(format_args!("usb: {from:?} -> {to:?}\r\n"));
    if to == UsbDeviceState::Suspend {
        // Keys held across a suspend would otherwise come back stuck, or
        // never come back at all if the scanner still thinks they're down
        keypad.reset();
        pipeline.release_all();
    }
}
