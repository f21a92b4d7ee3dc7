//! Pseudo-random numbers for the flame flicker.
//!
//! A linear congruential generator with the same recurrence and output range as the classic C
//! library `rand()`, so a given seed produces the familiar sequence (seed 1 starts 16838, 5758,
//! 10113, ...). It is not suitable for anything but visual noise.

const MULTIPLIER: u32 = 1_103_515_245;
const INCREMENT: u32 = 12_345;

/// Largest value returned by [`Lcg::next_u15`]
pub const RAND_MAX: u16 = 0x7FFF;

/// Linear congruential generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from a seed
    pub const fn new(seed: u32) -> Self {
        Lcg { state: seed }
    }

    /// Next value in `0..=RAND_MAX`
    pub fn next_u15(&mut self) -> u16 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        ((self.state >> 16) as u16) & RAND_MAX
    }

    /// Next value reduced modulo `n`, or 0 if `n` is 0
    pub fn below(&mut self, n: u16) -> u16 {
        let r = self.next_u15();
        if n == 0 {
            0
        } else {
            r % n
        }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Lcg::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_c_library_sequence() {
        let mut rng = Lcg::default();
        let seq: [u16; 5] = core::array::from_fn(|_| rng.next_u15());
        assert_eq!(seq, [16838, 5758, 10113, 17515, 31051]);
    }

    #[test]
    fn below_reduces_modulo() {
        let mut rng = Lcg::new(42);
        let seq: [u16; 4] = core::array::from_fn(|_| rng.below(20));
        assert_eq!(seq, [1, 13, 9, 1]);
    }

    #[test]
    fn below_zero_still_advances() {
        let mut a = Lcg::new(7);
        let mut b = Lcg::new(7);
        assert_eq!(a.below(0), 0);
        b.next_u15();
        assert_eq!(a, b);
    }
}
