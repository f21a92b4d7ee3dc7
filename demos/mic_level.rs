#![no_main]
#![no_std]

// Prints the microphone level to the debugger console: the mean of every 5 readings, in ADC
// counts, one per line. Blow on the microphone to see the readings move.

use msp430_candle::{
    board::Board,
    cio::{CioConsole, DebuggerHost},
    mic::SampleWindow,
    printf,
};
use msp430_rt::entry;
use panic_msp430 as _;

#[entry]
fn main() -> ! {
    let Some(periph) = msp430fr2355::Peripherals::take() else { loop {} };
    let mut board = Board::new(periph);
    board.flame.off().ok();

    let mut console = CioConsole::new(DebuggerHost::new());
    let mut window = SampleWindow::new(SampleWindow::DEFAULT_LEN);

    loop {
        let sample = board.isr.mic.read_blocking();
        if let Some(stats) = window.push(sample) {
            printf!(&mut console, "%i\r\n", stats.mean).ok();
        }
    }
}

// The compiler will emit calls to the abort() compiler intrinsic if debug assertions are
// enabled (default for dev profile). MSP430 does not actually have meaningful abort() support
// so for now, we create our own in each application where debug assertions are present.
#[no_mangle]
extern "C" fn abort() -> ! {
    panic!();
}
