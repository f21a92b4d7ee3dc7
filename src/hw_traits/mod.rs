//! Register-level access to the peripherals the candle uses. Drivers go through these traits
//! instead of touching PAC registers directly.

pub mod adc;
pub mod gpio;
pub mod timerb;

pub trait Steal {
    // Create a handle to a peripheral that is already owned elsewhere. Only for registers the
    // caller has exclusive use of, e.g. its own capture-compare channel.
    unsafe fn steal() -> Self;
}
