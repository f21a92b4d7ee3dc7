#![no_main]
#![no_std]
#![feature(abi_msp430_interrupt)]

// The candle firmware. Blow on the microphone to put the flame out, shake the board to relight
// it, press S2 to toggle it either way. State changes are printed to the debugger console.

use core::cell::RefCell;
use critical_section::{with, Mutex};
use msp430::interrupt::enable;
use msp430_candle::{
    board::{Board, IsrParts},
    candle::{Candle, CandleConfig, Inputs, Transition},
    cio::{CioConsole, DebuggerHost},
    events::{EventLatch, Events},
    gpio::Port2Source,
    printf,
    watchdog::WdtClkPeriods,
};
use msp430_rt::entry;
use msp430fr2355::interrupt;
use panic_msp430 as _;

static EVENTS: EventLatch = EventLatch::new();
static ISR_PARTS: Mutex<RefCell<Option<IsrParts>>> = Mutex::new(RefCell::new(None));

const SEED: u32 = 1;

#[entry]
fn main() -> ! {
    let Some(periph) = msp430fr2355::Peripherals::take() else { loop {} };
    let Board {
        mut flame,
        switch,
        mut wdt,
        mut isr,
        ..
    } = Board::new(periph);

    let mut console = CioConsole::new(DebuggerHost::new());
    let mut candle = Candle::new(CandleConfig::default(), SEED);
    printf!(&mut console, "candle lit\r\n").ok();

    isr.enable_interrupts();
    with(|cs| *ISR_PARTS.borrow_ref_mut(cs) = Some(isr));
    wdt.start(WdtClkPeriods::_32K);
    unsafe { enable() };

    let mut now: u16 = 0;
    loop {
        let Some(pending) = EVENTS.take_if(Events::TICK) else { continue };
        now = now.wrapping_add(1);

        let inputs = Inputs {
            now,
            sample: pending.sample(),
            tilt_edges: pending.tilt_edges,
            switch_pressed: switch.is_pressed(),
        };
        if let Some(Transition { to, cause }) = candle.tick(inputs) {
            printf!(&mut console, "%s (%s)\r\n", to.as_str(), cause.as_str()).ok();
        }
        flame.show(candle.color()).ok();
        wdt.feed();
    }
}

#[interrupt]
fn TIMER0_B0() {
    with(|cs| {
        let mut parts = ISR_PARTS.borrow_ref_mut(cs);
        let Some(parts) = parts.as_mut() else { return; };
        parts.mic.start_conversion();
    });
    EVENTS.raise(Events::TICK);
}

#[interrupt]
fn ADC() {
    with(|cs| {
        let mut parts = ISR_PARTS.borrow_ref_mut(cs);
        let Some(parts) = parts.as_mut() else { return; };
        if let Some(sample) = parts.mic.take_result() {
            EVENTS.record_sample(sample);
        }
    });
}

#[interrupt]
fn PORT2() {
    with(|cs| {
        let mut parts = ISR_PARTS.borrow_ref_mut(cs);
        let Some(parts) = parts.as_mut() else { return; };
        while let Some(source) = parts.p2iv.take() {
            if source == Port2Source::Tilt {
                parts.tilt.flip_edge();
                EVENTS.record_tilt_edge();
            }
        }
    });
}

// The compiler will emit calls to the abort() compiler intrinsic if debug assertions are
// enabled (default for dev profile). MSP430 does not actually have meaningful abort() support
// so for now, we create our own in each application where debug assertions are present.
#[no_mangle]
extern "C" fn abort() -> ! {
    panic!();
}
