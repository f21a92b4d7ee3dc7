//! Flame PWM
//!
//! TB3 runs in up mode from SMCLK with CCR0 as the period. CCR1 (red) and CCR2 (green) use the
//! reset/set output mode: the output is set when the count wraps at CCR0 and reset when it
//! reaches CCRn, so CCRn is the duty in timer counts.

use crate::gpio::FlamePins;
use crate::hw_traits::timerb::{Outmod, SubTimerB, Tbssel, TimerB, TimerDiv, CCR0, CCR1, CCR2};
use crate::hw_traits::Steal;
use core::convert::Infallible;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use msp430fr2355 as pac;

/// PWM period in SMCLK cycles. At 1 MHz this gives a 1 kHz flame.
pub const PWM_PERIOD: u16 = 1000;

/// Start the flame timer and hand out its two channels. Both channels start at full duty.
pub fn flame_pwm(timer: pac::TB3, _pins: FlamePins) -> (RedPwm, GreenPwm) {
    timer.config_clock(Tbssel::Smclk, TimerDiv::_1);
    timer.reset();
    SubTimerB::<CCR0>::set_ccrn(&timer, PWM_PERIOD);

    SubTimerB::<CCR1>::config_cmp_mode(&timer, Outmod::ResetSet);
    SubTimerB::<CCR1>::set_ccrn(&timer, PWM_PERIOD);
    SubTimerB::<CCR2>::config_cmp_mode(&timer, Outmod::ResetSet);
    SubTimerB::<CCR2>::set_ccrn(&timer, PWM_PERIOD);

    timer.upmode();
    (RedPwm(()), GreenPwm(()))
}

macro_rules! pwm_channel {
    ($Name:ident, $CCRn:ident, $doc:literal) => {
        #[doc = $doc]
        pub struct $Name(());

        impl ErrorType for $Name {
            type Error = Infallible;
        }

        impl SetDutyCycle for $Name {
            /// Maximum duty equals the period. A duty above the period keeps the output high.
            #[inline]
            fn max_duty_cycle(&self) -> u16 {
                let timer = unsafe { pac::TB3::steal() };
                SubTimerB::<CCR0>::get_ccrn(&timer)
            }

            #[inline]
            fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
                let timer = unsafe { pac::TB3::steal() };
                SubTimerB::<$CCRn>::set_ccrn(&timer, duty);
                Ok(())
            }
        }
    };
}

pwm_channel!(RedPwm, CCR1, "Red channel, TB3.1 on P6.0");
pwm_channel!(GreenPwm, CCR2, "Green channel, TB3.2 on P6.1");
