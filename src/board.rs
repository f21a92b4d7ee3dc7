//! Board bring-up
//!
//! [`Board::new`] configures every peripheral the candle uses and splits them into the parts
//! the main loop drives and the parts the interrupt handlers need. Clocks are left at their reset
//! configuration: MCLK and SMCLK run from the DCO at about 1 MHz.

use crate::adc::MicAdc;
use crate::flame::Flame;
use crate::gpio::{BluePin, Pins, Port2Vector, SwitchPin, TiltPin};
use crate::pmm::Pmm;
use crate::pwm::{flame_pwm, GreenPwm, RedPwm};
use crate::timer::Ticker;
use crate::watchdog::Wdt;
use embedded_hal::digital::OutputPin;
use msp430fr2355 as pac;

/// The flame on TB3
pub type BoardFlame = Flame<RedPwm, GreenPwm>;

/// Parts used from interrupt handlers
pub struct IsrParts {
    /// Sample tick, `TIMER0_B0`
    pub ticker: Ticker,
    /// Microphone ADC, `ADC`
    pub mic: MicAdc,
    /// Tilt switch, `PORT2`
    pub tilt: TiltPin,
    /// Port 2 interrupt source
    pub p2iv: Port2Vector,
}

impl IsrParts {
    /// Enable the tick and tilt interrupts. The ADC interrupt is always enabled. Interrupts still
    /// need to be enabled globally.
    pub fn enable_interrupts(&mut self) {
        self.ticker.enable_interrupts();
        self.tilt.enable_interrupts();
    }
}

/// Everything the candle runs on
pub struct Board {
    /// Red/green flame
    pub flame: BoardFlame,
    /// Blue LED, held low
    pub blue: BluePin,
    /// Push-button, polled from the main loop
    pub switch: SwitchPin,
    /// Watchdog, stopped
    pub wdt: Wdt,
    /// Handed over to the interrupt handlers
    pub isr: IsrParts,
}

impl Board {
    /// Bring up the board. Stops the watchdog first.
    pub fn new(periph: pac::Peripherals) -> Self {
        let wdt = Wdt::constrain(periph.WDT_A);
        let pmm = Pmm::new(periph.PMM);
        let pins = Pins::new(periph.P1, periph.P2, periph.P6, &pmm);

        let (red, green) = flame_pwm(periph.TB3, pins.flame);
        let flame = Flame::new(red, green);

        let mut blue = pins.blue;
        blue.set_low().ok();

        let mic = MicAdc::new(periph.ADC, pins.mic);
        let ticker = Ticker::new(periph.TB0);
        debug!("board up");

        Board {
            flame,
            blue,
            switch: pins.switch,
            wdt,
            isr: IsrParts {
                ticker,
                mic,
                tilt: pins.tilt,
                p2iv: pins.p2iv,
            },
        }
    }
}
