//! Power management module

use msp430fr2355::PMM;

/// PMM type. Existence of a `Pmm` proves the GPIO configuration has been unlocked.
pub struct Pmm(PMM);

impl Pmm {
    /// Clears the LOCKLPM5 bit and returns a `Pmm`. Until this runs, pin settings written to the
    /// port registers do not reach the pins.
    pub fn new(pmm: PMM) -> Pmm {
        pmm.pm5ctl0.write(|w| w.locklpm5().locklpm5_0());
        Pmm(pmm)
    }
}
