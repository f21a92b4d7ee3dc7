//! Microphone ADC
//!
//! Single-channel, single conversions on A1 (P1.1) against AVCC, 10-bit results. The sample and
//! hold time is 16 ADCCLK cycles from MODCLK. Conversions are started by the tick handler and
//! finish in the `ADC` interrupt.

use crate::gpio::MicPin;
use crate::hw_traits::adc::AdcPeriph;
use msp430fr2355 as pac;

// ADCSHT field: 16 ADCCLK cycles
const SAMPLE_TIME_16: u8 = 0b0010;
// ADCRES field: 10-bit result
const RESOLUTION_10BIT: u8 = 0b01;
const CHANNEL_A1: u8 = 1;

/// The ADC, configured for the microphone
pub struct MicAdc {
    adc: pac::ADC,
}

impl MicAdc {
    /// Configure the ADC and enable its conversion-complete interrupt
    pub fn new(adc: pac::ADC, _pin: MicPin) -> Self {
        adc.adc_disable();
        adc.adcsht_wr(SAMPLE_TIME_16);
        adc.adcctl1_pulse_mode();
        adc.adcres_wr(RESOLUTION_10BIT);
        adc.adcinch_wr(CHANNEL_A1);
        adc.adcie0_set();
        adc.adc_enable();
        MicAdc { adc }
    }

    /// Whether a conversion is running
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.adc.adcbusy_rd()
    }

    /// Start a conversion unless one is still running
    #[inline]
    pub fn start_conversion(&mut self) {
        if !self.is_busy() {
            self.adc.adc_start();
        }
    }

    /// The result of a finished conversion, if there is one. Reading the result clears the
    /// interrupt flag.
    #[inline]
    pub fn take_result(&mut self) -> Option<u16> {
        self.adc
            .adcifg0_rd()
            .then(|| self.adc.adcmem0_rd())
    }

    /// Start a conversion and wait for it
    pub fn read_blocking(&mut self) -> u16 {
        while self.is_busy() {}
        self.adc.adc_start();
        while self.is_busy() {}
        self.adc.adcmem0_rd()
    }
}
