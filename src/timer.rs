//! Sample tick
//!
//! TB0 counts SMCLK in up mode and raises its CCR0 interrupt (`TIMER0_B0`) once per tick. The
//! handler starts an ADC conversion and tells the main loop a tick has passed. CCR0's interrupt
//! flag clears itself when the interrupt is serviced.

use crate::hw_traits::timerb::{SubTimerB, Tbssel, TimerB, TimerDiv, CCR0};
use msp430fr2355 as pac;

/// SMCLK frequency after reset
pub const SMCLK_HZ: u32 = 1_000_000;
/// Ticks per second
pub const TICK_HZ: u16 = 1000;

/// Periodic tick source on TB0
pub struct Ticker {
    timer: pac::TB0,
}

impl Ticker {
    /// Start ticking. Interrupts stay disabled until [`enable_interrupts`](Ticker::enable_interrupts).
    pub fn new(timer: pac::TB0) -> Self {
        timer.config_clock(Tbssel::Smclk, TimerDiv::_1);
        timer.reset();
        SubTimerB::<CCR0>::set_ccrn(&timer, (SMCLK_HZ / TICK_HZ as u32 - 1) as u16);
        SubTimerB::<CCR0>::ccifg_clr(&timer);
        timer.upmode();
        Ticker { timer }
    }

    /// Raise `TIMER0_B0` on every tick
    #[inline]
    pub fn enable_interrupts(&mut self) {
        SubTimerB::<CCR0>::ccifg_clr(&self.timer);
        SubTimerB::<CCR0>::ccie_set(&self.timer);
    }

    /// Stop raising interrupts. The timer keeps counting.
    #[inline]
    pub fn disable_interrupts(&mut self) {
        SubTimerB::<CCR0>::ccie_clr(&self.timer);
    }
}
