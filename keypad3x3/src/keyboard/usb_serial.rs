use crate::runtime::UsbLink;
use core::fmt::Write;
use keypad3x3_lib::report::REPORT_LEN;
use keypad3x3_lib::transmit::ReportTransport;
use rp2040_hal::rom_data::reset_to_usb_boot;
use rp2040_hal::usb::UsbBus;
use usb_device::bus::UsbBusAllocator;
use usb_device::device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid};
use usb_device::UsbError;
use usbd_serial::SerialPort;

/// Polls allowed while the serial IN endpoint is full before output is dropped.
const MAX_BUSY_POLLS: u32 = 10_000;

/// Debug console, reports are printed as hex instead of going out over HID.
pub struct UsbConsole<'a> {
    serial: SerialPort<'a, UsbBus>,
    dev: UsbDevice<'a, UsbBus>,
    last_chars: [u8; 8],
}

impl<'a> UsbConsole<'a> {
    pub fn new(allocator: &'a UsbBusAllocator<UsbBus>) -> Self {
        // Ordering here is important, serial before device.
        let serial = SerialPort::new(allocator);
        let dev = UsbDeviceBuilder::new(allocator, UsbVidPid(0x16c0, 0x27dd))
            .strings(&[StringDescriptors::default()
                .manufacturer("keypad3x3")
                .product("3x3 Keypad console")
                .serial_number("1")])
            .unwrap()
            .device_class(usbd_serial::USB_CLASS_CDC)
            .build();
        Self {
            serial,
            dev,
            last_chars: [0u8; 8],
        }
    }

    fn write_all(&mut self, buf: &[u8]) {
        if self.dev.state() != UsbDeviceState::Configured {
            return;
        }
        let mut busy = 0;
        for chunk in buf.chunks(16) {
            let mut rem = chunk;
            while !rem.is_empty() {
                match self.serial.write(rem) {
                    Ok(wrote) => {
                        rem = &rem[wrote..];
                    }
                    Err(UsbError::WouldBlock) if busy < MAX_BUSY_POLLS => {
                        busy += 1;
                        self.dev.poll(&mut [&mut self.serial]);
                    }
                    Err(_e) => {
                        return;
                    }
                }
            }
        }
    }

    /// Typing `boot` into the console drops the chip into the USB bootloader.
    fn drain_input(&mut self) {
        let mut buf = [0u8; 64];
        let Ok(count) = self.serial.read(&mut buf) else {
            return;
        };
        let len = self.last_chars.len();
        for byte in &buf[..count] {
            self.last_chars.copy_within(1..len, 0);
            self.last_chars[len - 1] = *byte;
            if self.last_chars.ends_with(b"boot") {
                let _ = self.write_str("BOOT\r\n");
                reset_to_usb_boot(0, 0);
            }
        }
    }
}

impl Write for UsbConsole<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_all(s.as_bytes());
        Ok(())
    }
}

impl UsbLink for UsbConsole<'_> {
    fn poll(&mut self) -> bool {
        let ready = self.dev.poll(&mut [&mut self.serial]);
        if ready {
            self.drain_input();
        }
        ready
    }

    #[inline]
    fn state(&self) -> UsbDeviceState {
        self.dev.state()
    }

    fn log(&mut self, args: core::fmt::Arguments<'_>) {
        let _ = self.write_fmt(args);
    }
}

impl ReportTransport for UsbConsole<'_> {
    fn send(&mut self, report: &[u8; REPORT_LEN]) {
        let _ = self.write_str("report:");
        for byte in report {
            let _ = write!(self, " {byte:02x}");
        }
        let _ = self.write_str("\r\n");
    }
}
