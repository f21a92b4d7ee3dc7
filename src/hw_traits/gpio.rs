use super::Steal;
use msp430fr2355 as pac;

pub trait GpioPeriph: Steal {
    fn pxin_rd(&self) -> u8;

    fn pxout_set(&self, bits: u8);
    fn pxout_clear(&self, bits: u8);

    fn pxdir_set(&self, bits: u8);
    fn pxdir_clear(&self, bits: u8);

    fn pxren_set(&self, bits: u8);

    fn pxsel0_set(&self, bits: u8);
    fn pxsel0_clear(&self, bits: u8);

    fn pxsel1_set(&self, bits: u8);
    fn pxsel1_clear(&self, bits: u8);
}

pub trait IntrPeriph: GpioPeriph {
    fn pxies_set(&self, bits: u8);
    fn pxies_clear(&self, bits: u8);
    fn pxies_toggle(&self, bits: u8);

    fn pxie_set(&self, bits: u8);

    fn pxifg_clear(&self, bits: u8);

    fn pxiv_rd(&self) -> u16;
}

macro_rules! reg_methods {
    ($reg:ident, $set:ident, $clear:ident) => {
        #[inline(always)]
        fn $set(&self, bits: u8) {
            unsafe { self.$reg.set_bits(|w| w.bits(bits)) }
        }

        #[inline(always)]
        fn $clear(&self, bits: u8) {
            unsafe { self.$reg.clear_bits(|w| w.bits(bits)) }
        }
    };
}

macro_rules! gpio_impl {
    ($px:ident: $Px:ident =>
     $pxin:ident, $pxout:ident, $pxdir:ident, $pxren:ident, $pxsel0:ident, $pxsel1:ident
     $(, [$pxies:ident, $pxie:ident, $pxifg:ident, $pxiv:ident])?
    ) => {
        mod $px {
            use super::*;

            impl Steal for pac::$Px {
                #[inline(always)]
                unsafe fn steal() -> Self {
                    pac::Peripherals::steal().$Px
                }
            }

            impl GpioPeriph for pac::$Px {
                #[inline(always)]
                fn pxin_rd(&self) -> u8 {
                    self.$pxin.read().bits()
                }

                #[inline(always)]
                fn pxren_set(&self, bits: u8) {
                    unsafe { self.$pxren.set_bits(|w| w.bits(bits)) }
                }

                reg_methods!($pxout, pxout_set, pxout_clear);
                reg_methods!($pxdir, pxdir_set, pxdir_clear);
                reg_methods!($pxsel0, pxsel0_set, pxsel0_clear);
                reg_methods!($pxsel1, pxsel1_set, pxsel1_clear);
            }

            $(
                impl IntrPeriph for pac::$Px {
                    reg_methods!($pxies, pxies_set, pxies_clear);

                    #[inline(always)]
                    fn pxies_toggle(&self, bits: u8) {
                        unsafe { self.$pxies.toggle_bits(|w| w.bits(bits)) };
                    }

                    #[inline(always)]
                    fn pxie_set(&self, bits: u8) {
                        unsafe { self.$pxie.set_bits(|w| w.bits(bits)) }
                    }

                    #[inline(always)]
                    fn pxifg_clear(&self, bits: u8) {
                        unsafe { self.$pxifg.clear_bits(|w| w.bits(bits)) }
                    }

                    #[inline(always)]
                    fn pxiv_rd(&self) -> u16 {
                        self.$pxiv.read().bits()
                    }
                }
            )?
        }
    };
}

gpio_impl!(p1: P1 => p1in, p1out, p1dir, p1ren, p1sel0, p1sel1, [p1ies, p1ie, p1ifg, p1iv]);
gpio_impl!(p2: P2 => p2in, p2out, p2dir, p2ren, p2sel0, p2sel1, [p2ies, p2ie, p2ifg, p2iv]);
gpio_impl!(p6: P6 => p6in, p6out, p6dir, p6ren, p6sel0, p6sel1);
