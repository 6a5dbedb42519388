use crate::hid::transform::transform_report;
use crate::runtime::UsbLink;
use keypad3x3_lib::report::REPORT_LEN;
use keypad3x3_lib::transmit::ReportTransport;
use rp2040_hal::usb::UsbBus;
use usb_device::bus::UsbBusAllocator;
use usb_device::device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid};
use usb_device::UsbError;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};
use usbd_hid::hid_class::HIDClass;

/// Host polling interval for the interrupt IN endpoint.
const POLL_MS: u8 = 1;

/// Polls allowed while the IN endpoint is busy before a report is given up on.
const MAX_BUSY_POLLS: u32 = 10_000;

pub struct UsbHiddev<'a> {
    hid: HIDClass<'a, UsbBus>,
    dev: UsbDevice<'a, UsbBus>,
}

impl<'a> UsbHiddev<'a> {
    pub fn new(allocator: &'a UsbBusAllocator<UsbBus>) -> Self {
        let hid = HIDClass::new_ep_in(allocator, KeyboardReport::desc(), POLL_MS);
        let dev = UsbDeviceBuilder::new(allocator, UsbVidPid(0x16c0, 0x27db))
            .strings(&[StringDescriptors::default()
                .manufacturer("keypad3x3")
                .product("3x3 Keypad")
                .serial_number("1")])
            .unwrap()
            .device_class(0)
            .build();
        Self { hid, dev }
    }

    pub fn submit_blocking(&mut self, keyboard_report: &KeyboardReport) -> bool {
        let mut busy = 0;
        loop {
            match self.hid.push_input(keyboard_report) {
                Err(UsbError::WouldBlock) if busy < MAX_BUSY_POLLS => {
                    busy += 1;
                    self.poll();
                }
                Ok(_) => {
                    break true;
                }
                Err(_) => {
                    break false;
                }
            }
        }
    }
}

impl UsbLink for UsbHiddev<'_> {
    #[inline]
    fn poll(&mut self) -> bool {
        self.dev.poll(&mut [&mut self.hid])
    }

    #[inline]
    fn state(&self) -> UsbDeviceState {
        self.dev.state()
    }
}

impl ReportTransport for UsbHiddev<'_> {
    fn send(&mut self, report: &[u8; REPORT_LEN]) {
        // Nobody to talk to until the host has configured us
        if self.dev.state() != UsbDeviceState::Configured {
            return;
        }
        let _ = self.submit_blocking(&transform_report(report));
    }
}
