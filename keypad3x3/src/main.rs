#![no_std]
#![no_main]

#[cfg(feature = "hiddev")]
mod hid;
pub(crate) mod keyboard;
pub(crate) mod runtime;
mod timer;

use rp2040_hal as hal;
use rp2040_hal::pac;
use usb_device::bus::UsbBusAllocator;

#[cfg(all(feature = "serial", feature = "hiddev"))]
const _ILLEGAL_FEATURES: () = assert!(false, "Can't compile as both serial and hiddev");

#[cfg(not(any(feature = "serial", feature = "hiddev")))]
const _NO_TRANSPORT: () = assert!(false, "Needs one of serial or hiddev");

/// Second stage bootloader for the W25Q080 flash found on most boards.
#[link_section = ".boot2"]
#[used]
pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

/// External crystal, 12Mhz on the pico and every clone worth buying.
const XOSC_CRYSTAL_FREQ: u32 = 12_000_000;

/// Entry point to our bare-metal application.
///
/// The `#[entry]` macro ensures the Cortex-M start-up code calls this function
/// as soon as all global variables are initialised.
#[hal::entry]
fn main() -> ! {
    setup_keypad()
}

fn setup_keypad() -> ! {
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);
    let clocks = hal::clocks::init_clocks_and_plls(
        XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let keypad = keyboard::keypad(
        (pins.gpio2, pins.gpio3, pins.gpio4),
        (pins.gpio5, pins.gpio6, pins.gpio7),
        timer,
    );

    // Set up the USB driver
    let usb_bus = UsbBusAllocator::new(hal::usb::UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        clocks.usb_clock,
        true,
        &mut pac.RESETS,
    ));
    let transport = runtime::Transport::new(&usb_bus);
    runtime::run(keypad, transport, timer::TimerClock::new(timer))
}

#[panic_handler]
#[inline(never)]
fn halt(_info: &core::panic::PanicInfo) -> ! {
    loop {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}
