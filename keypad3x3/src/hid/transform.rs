use keypad3x3_lib::report::REPORT_LEN;
use usbd_hid::descriptor::KeyboardReport;

pub fn transform_report(bytes: &[u8; REPORT_LEN]) -> KeyboardReport {
    let mut keycodes = [0u8; 6];
    keycodes.copy_from_slice(&bytes[2..]);
    KeyboardReport {
        modifier: bytes[0],
        reserved: bytes[1],
        leds: 0,
        keycodes,
    }
}
