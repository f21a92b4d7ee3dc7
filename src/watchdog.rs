//! Watchdog timer
//!
//! **Note**: MSP430 devices will reset after bootup if watchdog is not stopped after an initial 32
//! ms interval (roughly). Call `Wdt::constrain()` as early in the application as possible.
//!
//! The candle main loop runs once per sample tick, so it can keep the watchdog running from VLOCLK
//! and feed it on every pass.

use msp430fr2355 as pac;
use pac::wdt_a::wdtctl::WDTSSEL_A;

const PASSWORD: u8 = 0x5A;

pub use pac::wdt_a::wdtctl::WDTIS_A as WdtClkPeriods;

type WdtWriter = pac::wdt_a::wdtctl::W;

/// Watchdog timer in watchdog mode
pub struct Wdt {
    periph: pac::WDT_A,
}

impl Wdt {
    /// Stop the watchdog and set its clock source to VLOCLK.
    pub fn constrain(wdt: pac::WDT_A) -> Self {
        wdt.wdtctl.write(|w| {
            unsafe { w.wdtpw().bits(PASSWORD) }
                .wdthold()
                .hold()
                .wdtssel()
                .variant(WDTSSEL_A::VLOCLK)
        });
        Wdt { periph: wdt }
    }

    #[inline(always)]
    fn prewrite(w: &mut WdtWriter, bits: u16) -> &mut WdtWriter {
        // Password has to accompany every write, and the mode bit stays at watchdog mode
        unsafe { w.bits(bits).wdtpw().bits(PASSWORD) }
            .wdttmsel()
            .clear_bit()
    }

    /// Restart the countdown with the given timeout, counted in VLOCLK periods
    pub fn start(&mut self, periods: WdtClkPeriods) {
        self.periph.wdtctl.modify(|r, w| {
            Self::prewrite(w, r.bits())
                .wdtcntcl()
                .set_bit()
                .wdthold()
                .unhold()
                .wdtis()
                .variant(periods)
        });
    }

    /// Restart the countdown
    #[inline]
    pub fn feed(&mut self) {
        self.periph
            .wdtctl
            .modify(|r, w| Self::prewrite(w, r.bits()).wdtcntcl().set_bit());
    }

    /// Pause the countdown
    #[inline]
    pub fn pause(&mut self) {
        self.periph
            .wdtctl
            .modify(|r, w| Self::prewrite(w, r.bits()).wdthold().hold());
    }
}
