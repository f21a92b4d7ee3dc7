//! Candle pins
//!
//! | Pin  | Use                                   |
//! |------|---------------------------------------|
//! | P6.0 | red LED, TB3.1 output                 |
//! | P6.1 | green LED, TB3.2 output               |
//! | P6.2 | blue LED, plain output held low       |
//! | P1.1 | microphone, ADC channel A1            |
//! | P2.3 | push-button S2 (active low, pull-up)  |
//! | P2.4 | tilt switch (active low, pull-up)     |
//!
//! Pin settings only take effect once the LOCKLPM5 bit is cleared, so [`Pins::new`] needs a
//! [`Pmm`].

use crate::hw_traits::gpio::{GpioPeriph, IntrPeriph};
use crate::hw_traits::Steal;
use crate::pmm::Pmm;
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use msp430fr2355 as pac;

const RED: u8 = 1 << 0;
const GREEN: u8 = 1 << 1;
const BLUE: u8 = 1 << 2;
const MIC: u8 = 1 << 1;
const SWITCH: u8 = 1 << 3;
const TILT: u8 = 1 << 4;

// P2IV reports pin n as 2 * (n + 1)
const P2IV_TILT: u16 = 0x0A;

/// All candle pins, configured
pub struct Pins {
    /// Red and green PWM outputs
    pub flame: FlamePins,
    /// Blue LED
    pub blue: BluePin,
    /// Microphone input
    pub mic: MicPin,
    /// Push-button
    pub switch: SwitchPin,
    /// Tilt switch
    pub tilt: TiltPin,
    /// Port 2 interrupt vector
    pub p2iv: Port2Vector,
}

impl Pins {
    /// Configure every candle pin. Takes the port peripherals so nothing else can reconfigure
    /// them.
    pub fn new(p1: pac::P1, p2: pac::P2, p6: pac::P6, _pmm: &Pmm) -> Self {
        // PWM outputs: direction out, primary module function (TB3)
        p6.pxdir_set(RED | GREEN | BLUE);
        p6.pxsel1_clear(RED | GREEN | BLUE);
        p6.pxsel0_clear(BLUE);
        p6.pxsel0_set(RED | GREEN);
        p6.pxout_clear(BLUE);

        // Analog input: both select bits
        p1.pxdir_clear(MIC);
        p1.pxsel0_set(MIC);
        p1.pxsel1_set(MIC);

        // Switches: inputs with pull-ups
        p2.pxsel0_clear(SWITCH | TILT);
        p2.pxsel1_clear(SWITCH | TILT);
        p2.pxdir_clear(SWITCH | TILT);
        p2.pxout_set(SWITCH | TILT);
        p2.pxren_set(SWITCH | TILT);

        Pins {
            flame: FlamePins(()),
            blue: BluePin(()),
            mic: MicPin(()),
            switch: SwitchPin(()),
            tilt: TiltPin(()),
            p2iv: Port2Vector(()),
        }
    }
}

/// P6.0 and P6.1 routed to TB3
pub struct FlamePins(());

/// P1.1 routed to the ADC
pub struct MicPin(());

/// Blue LED on P6.2
pub struct BluePin(());

impl ErrorType for BluePin {
    type Error = Infallible;
}

impl OutputPin for BluePin {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        unsafe { pac::P6::steal() }.pxout_clear(BLUE);
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        unsafe { pac::P6::steal() }.pxout_set(BLUE);
        Ok(())
    }
}

/// Push-button S2 on P2.3. Reads low while pressed.
pub struct SwitchPin(());

impl SwitchPin {
    /// Whether the button is held down right now (not debounced)
    #[inline]
    pub fn is_pressed(&self) -> bool {
        unsafe { pac::P2::steal() }.pxin_rd() & SWITCH == 0
    }
}

impl ErrorType for SwitchPin {
    type Error = Infallible;
}

impl InputPin for SwitchPin {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_pressed())
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_pressed())
    }
}

/// Tilt switch on P2.4
///
/// A GPIO interrupt only fires on one edge. To see both, the handler calls
/// [`flip_edge`](TiltPin::flip_edge) after every edge so the next one is the opposite direction.
pub struct TiltPin(());

impl TiltPin {
    /// Whether the switch is closed
    #[inline]
    pub fn is_closed(&self) -> bool {
        unsafe { pac::P2::steal() }.pxin_rd() & TILT == 0
    }

    /// Arm the interrupt on whichever edge leaves the current level
    pub fn enable_interrupts(&mut self) {
        let p2 = unsafe { pac::P2::steal() };
        if self.is_closed() {
            p2.pxies_clear(TILT);
        } else {
            p2.pxies_set(TILT);
        }
        // Changing the edge select can set the flag
        p2.pxifg_clear(TILT);
        p2.pxie_set(TILT);
    }

    /// Swap the interrupt edge
    #[inline]
    pub fn flip_edge(&mut self) {
        unsafe { pac::P2::steal() }.pxies_toggle(TILT);
    }
}

/// What raised a port 2 interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port2Source {
    /// Tilt switch edge
    Tilt,
    /// Some other pin, by P2IV value
    Other(u16),
}

/// Port 2 interrupt vector register
pub struct Port2Vector(());

impl Port2Vector {
    /// Read and clear the highest-priority pending port 2 interrupt, if any
    #[inline]
    pub fn take(&mut self) -> Option<Port2Source> {
        match unsafe { pac::P2::steal() }.pxiv_rd() {
            0 => None,
            P2IV_TILT => Some(Port2Source::Tilt),
            other => Some(Port2Source::Other(other)),
        }
    }
}
