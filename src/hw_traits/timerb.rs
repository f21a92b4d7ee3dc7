use super::Steal;
use msp430fr2355 as pac;

/// Timer clock source
#[allow(dead_code)]
pub enum Tbssel {
    Tbxclk,
    Aclk,
    Smclk,
    Inclk,
}

/// Timer clock divider
#[allow(dead_code)]
pub enum TimerDiv {
    /// No division
    _1,
    /// Divide by 2
    _2,
    /// Divide by 4
    _4,
    /// Divide by 8
    _8,
}

/// Capture-compare output mode
#[allow(dead_code)]
pub enum Outmod {
    Out,
    Set,
    ToggleReset,
    SetReset,
    Toggle,
    Reset,
    ToggleSet,
    ResetSet,
}

pub trait TimerB: Steal {
    /// Reset timer countdown
    fn reset(&self);

    /// Set to upmode, reset timer, and clear interrupts
    fn upmode(&self);

    /// Apply clock select settings. Stops the timer.
    fn config_clock(&self, tbssel: Tbssel, div: TimerDiv);
}

pub struct CCR0;
pub struct CCR1;
pub struct CCR2;

pub trait SubTimerB<CCRn>: TimerB {
    fn set_ccrn(&self, count: u16);
    fn get_ccrn(&self) -> u16;

    fn config_cmp_mode(&self, outmod: Outmod);

    fn ccifg_clr(&self);

    fn ccie_set(&self);
    fn ccie_clr(&self);
}

macro_rules! subtimer_impl {
    ($CCRn:ident, $TBx:ident, $tbxcctln:ident, $tbxccrn:ident) => {
        impl SubTimerB<$CCRn> for pac::$TBx {
            #[inline(always)]
            fn set_ccrn(&self, count: u16) {
                self.$tbxccrn.write(|w| unsafe { w.bits(count) });
            }

            #[inline(always)]
            fn get_ccrn(&self) -> u16 {
                self.$tbxccrn.read().bits()
            }

            #[inline(always)]
            fn config_cmp_mode(&self, outmod: Outmod) {
                self.$tbxcctln.write(|w| w.outmod().bits(outmod as u8));
            }

            #[inline(always)]
            fn ccifg_clr(&self) {
                unsafe { self.$tbxcctln.clear_bits(|w| w.ccifg().clear_bit()) };
            }

            #[inline(always)]
            fn ccie_set(&self) {
                unsafe { self.$tbxcctln.set_bits(|w| w.ccie().set_bit()) };
            }

            #[inline(always)]
            fn ccie_clr(&self) {
                unsafe { self.$tbxcctln.clear_bits(|w| w.ccie().clear_bit()) };
            }
        }
    };
}

macro_rules! timerb_impl {
    ($TBx:ident, $tbxctl:ident, $([$CCRn:ident, $tbxcctln:ident, $tbxccrn:ident]),*) => {
        impl Steal for pac::$TBx {
            #[inline(always)]
            unsafe fn steal() -> Self {
                pac::Peripherals::steal().$TBx
            }
        }

        impl TimerB for pac::$TBx {
            #[inline(always)]
            fn reset(&self) {
                unsafe { self.$tbxctl.set_bits(|w| w.tbclr().set_bit()) };
            }

            #[inline(always)]
            fn upmode(&self) {
                self.$tbxctl.modify(|r, w| {
                    unsafe { w.bits(r.bits()) }
                        .tbclr()
                        .set_bit()
                        .tbifg()
                        .clear_bit()
                        .mc()
                        .up()
                });
            }

            #[inline(always)]
            fn config_clock(&self, tbssel: Tbssel, div: TimerDiv) {
                self.$tbxctl
                    .write(|w| w.tbssel().bits(tbssel as u8).id().bits(div as u8));
            }
        }

        $(subtimer_impl!($CCRn, $TBx, $tbxcctln, $tbxccrn);)*
    };
}

// Sample tick
timerb_impl!(TB0, tb0ctl, [CCR0, tb0cctl0, tb0ccr0]);

// Flame PWM
timerb_impl!(
    TB3,
    tb3ctl,
    [CCR0, tb3cctl0, tb3ccr0],
    [CCR1, tb3cctl1, tb3ccr1],
    [CCR2, tb3cctl2, tb3ccr2]
);
