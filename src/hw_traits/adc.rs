use super::Steal;
use msp430fr2355 as pac;

pub trait AdcPeriph: Steal {
    /// Turn the ADC core off and clear ADCENC. Most settings can only change in this state.
    fn adc_disable(&self);
    /// Turn the ADC core on
    fn adc_enable(&self);
    /// Set ENC and SC together to start one conversion
    fn adc_start(&self);

    fn adcsht_wr(&self, sht: u8);
    /// MODCLK, no division, sample timer pulse mode
    fn adcctl1_pulse_mode(&self);
    fn adcres_wr(&self, res: u8);
    /// Select the input channel with AVCC/AVSS as the reference
    fn adcinch_wr(&self, inch: u8);

    fn adcbusy_rd(&self) -> bool;
    fn adcie0_set(&self);
    fn adcifg0_rd(&self) -> bool;
    fn adcmem0_rd(&self) -> u16;
}

impl Steal for pac::ADC {
    #[inline(always)]
    unsafe fn steal() -> Self {
        pac::Peripherals::steal().ADC
    }
}

impl AdcPeriph for pac::ADC {
    #[inline(always)]
    fn adc_disable(&self) {
        unsafe {
            self.adcctl0
                .clear_bits(|w| w.adcon().clear_bit().adcenc().clear_bit())
        }
    }

    #[inline(always)]
    fn adc_enable(&self) {
        unsafe { self.adcctl0.set_bits(|w| w.adcon().set_bit()) }
    }

    #[inline(always)]
    fn adc_start(&self) {
        unsafe {
            self.adcctl0
                .set_bits(|w| w.adcenc().set_bit().adcsc().set_bit())
        }
    }

    #[inline(always)]
    fn adcsht_wr(&self, sht: u8) {
        self.adcctl0.write(|w| w.adcsht().bits(sht));
    }

    #[inline(always)]
    fn adcctl1_pulse_mode(&self) {
        self.adcctl1.write(|w| w.adcssel().bits(0).adcshp().adcshp_1().adcdiv().bits(0));
    }

    #[inline(always)]
    fn adcres_wr(&self, res: u8) {
        self.adcctl2.write(|w| w.adcres().bits(res));
    }

    #[inline(always)]
    fn adcinch_wr(&self, inch: u8) {
        self.adcmctl0.write(|w| w.adcinch().bits(inch));
    }

    #[inline(always)]
    fn adcbusy_rd(&self) -> bool {
        self.adcctl1.read().adcbusy().bit_is_set()
    }

    #[inline(always)]
    fn adcie0_set(&self) {
        unsafe { self.adcie.set_bits(|w| w.adcie0().set_bit()) }
    }

    #[inline(always)]
    fn adcifg0_rd(&self) -> bool {
        self.adcifg.read().adcifg0().bit_is_set()
    }

    #[inline(always)]
    fn adcmem0_rd(&self) -> u16 {
        self.adcmem0.read().bits()
    }
}
