#[cfg(feature = "serial")]
pub(crate) mod usb_serial;

use keypad3x3_lib::keymap::DEFAULT_KEYMAP;
use keypad3x3_lib::scanner::{MatrixScanner, PinMatrix};
use rp2040_hal::gpio::bank0::{Gpio2, Gpio3, Gpio4, Gpio5, Gpio6, Gpio7};
use rp2040_hal::gpio::{
    DynPinId, FunctionNull, FunctionSio, Pin, PinState, PullDown, PullUp, SioInput, SioOutput,
};
use rp2040_hal::Timer;

type RowPin = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;
type ColPin = Pin<DynPinId, FunctionSio<SioInput>, PullUp>;
type ResetPin<Id> = Pin<Id, FunctionNull, PullDown>;

pub type Keypad = MatrixScanner<PinMatrix<RowPin, ColPin, Timer>>;

/// Wiring:
/// ```text
///            COL0(GP5) COL1(GP6) COL2(GP7)
/// ROW0(GP2)     0         1         2
/// ROW1(GP3)     3         4         5
/// ROW2(GP4)     6         7         8
/// ```
pub fn keypad(
    rows: (ResetPin<Gpio2>, ResetPin<Gpio3>, ResetPin<Gpio4>),
    cols: (ResetPin<Gpio5>, ResetPin<Gpio6>, ResetPin<Gpio7>),
    timer: Timer,
) -> Keypad {
    let pins = PinMatrix::new(
        [
            rows.0
                .into_push_pull_output_in_state(PinState::High)
                .into_dyn_pin(),
            rows.1
                .into_push_pull_output_in_state(PinState::High)
                .into_dyn_pin(),
            rows.2
                .into_push_pull_output_in_state(PinState::High)
                .into_dyn_pin(),
        ],
        [
            cols.0.into_pull_up_input().into_dyn_pin(),
            cols.1.into_pull_up_input().into_dyn_pin(),
            cols.2.into_pull_up_input().into_dyn_pin(),
        ],
        timer,
    );
    MatrixScanner::new(pins, DEFAULT_KEYMAP)
}
