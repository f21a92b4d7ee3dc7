#![no_main]
#![no_std]

// Flicker only: the flame stays lit and blinks off at random. No microphone, no tilt switch.

use msp430_candle::{
    board::Board,
    flame::{Flicker, FlickerConfig},
    rand::Lcg,
};
use msp430_rt::entry;
use panic_msp430 as _;

#[entry]
fn main() -> ! {
    let Some(periph) = msp430fr2355::Peripherals::take() else { loop {} };
    let mut board = Board::new(periph);

    let mut rng = Lcg::default();
    let mut flicker = Flicker::new(FlickerConfig::default());

    loop {
        board.flame.show(flicker.next(&mut rng)).ok();
    }
}

// The compiler will emit calls to the abort() compiler intrinsic if debug assertions are
// enabled (default for dev profile). MSP430 does not actually have meaningful abort() support
// so for now, we create our own in each application where debug assertions are present.
#[no_mangle]
extern "C" fn abort() -> ! {
    panic!();
}
