//! Flickering RGB candle for the MSP430FR2355.
//!
//! The candle flickers a red/green flame on two TimerB PWM outputs, goes out when the
//! microphone hears a sustained blow, and relights when the tilt switch is shaken. The
//! push-button toggles it either way. Here are the [`datasheet`] and [`User's guide`]
//! for reference.
//!
//! [`datasheet`]: http://www.ti.com/lit/ds/symlink/msp430fr2355.pdf
//! [`User's guide`]: http://www.ti.com/lit/ug/slau445i/slau445i.pdf
//!
//! # Usage
//!
//! The flame model, the detectors and the console formatting are hardware independent and
//! build on any target. The peripheral drivers are behind the `msp430fr2355` feature.
//!
//! Requires `msp430-elf-gcc` installed and in $PATH to build for the device.
//!
//! # Demos
//!
//! The `demos/` directory contains the firmware binaries. To flash them, make sure you have
//! `mspdebug` with `tilib` support installed and in $PATH, then invoke
//! `cargo run --release --target msp430-none-elf -Z build-std=core --features msp430fr2355
//! --example candle` with the Launchpad plugged in. Host builds run the unit tests with plain
//! `cargo test`.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(
    all(target_arch = "msp430", feature = "msp430fr2355"),
    feature(asm_experimental_arch)
)]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

pub mod candle;
pub mod cio;
pub mod console;
pub mod debounce;
pub mod events;
pub mod flame;
pub mod mic;
pub mod printf;
pub mod rand;
pub mod shake;

#[cfg(feature = "msp430fr2355")]
pub mod adc;
#[cfg(feature = "msp430fr2355")]
pub mod board;
#[cfg(feature = "msp430fr2355")]
pub mod gpio;
#[cfg(feature = "msp430fr2355")]
pub mod pmm;
#[cfg(feature = "msp430fr2355")]
pub mod pwm;
#[cfg(feature = "msp430fr2355")]
pub mod timer;
#[cfg(feature = "msp430fr2355")]
pub mod watchdog;

#[cfg(feature = "msp430fr2355")]
mod hw_traits;

#[cfg(feature = "msp430fr2355")]
pub use msp430fr2355 as pac;
