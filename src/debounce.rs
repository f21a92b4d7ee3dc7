//! Push-button debouncing
//!
//! The button is sampled once per tick. The debounced state only changes after the raw input has
//! disagreed with it for `threshold` samples in a row.

/// A debounced state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Button went down
    Pressed,
    /// Button came back up
    Released,
}

/// Integrating debouncer
#[derive(Debug, Clone)]
pub struct Debouncer {
    threshold: u8,
    count: u8,
    pressed: bool,
}

impl Debouncer {
    /// Samples needed by default before a change is accepted
    pub const DEFAULT_THRESHOLD: u8 = 20;

    /// Create a debouncer that starts released. A threshold of 0 is treated as 1.
    pub fn new(threshold: u8) -> Self {
        Debouncer {
            threshold: threshold.max(1),
            count: 0,
            pressed: false,
        }
    }

    /// Debounced state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one raw sample. Returns the edge when the debounced state changes.
    pub fn update(&mut self, raw_pressed: bool) -> Option<Edge> {
        if raw_pressed == self.pressed {
            self.count = 0;
            return None;
        }

        self.count += 1;
        if self.count < self.threshold {
            return None;
        }

        self.count = 0;
        self.pressed = raw_pressed;
        Some(if raw_pressed {
            Edge::Pressed
        } else {
            Edge::Released
        })
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(Self::DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_press_and_release() {
        let mut db = Debouncer::new(3);
        assert_eq!(db.update(true), None);
        assert_eq!(db.update(true), None);
        assert_eq!(db.update(true), Some(Edge::Pressed));
        assert!(db.is_pressed());
        assert_eq!(db.update(true), None);

        assert_eq!(db.update(false), None);
        assert_eq!(db.update(false), None);
        assert_eq!(db.update(false), Some(Edge::Released));
        assert!(!db.is_pressed());
    }

    #[test]
    fn bounce_resets_the_count() {
        let mut db = Debouncer::new(3);
        assert_eq!(db.update(true), None);
        assert_eq!(db.update(true), None);
        assert_eq!(db.update(false), None);
        assert_eq!(db.update(true), None);
        assert_eq!(db.update(true), None);
        assert!(!db.is_pressed());
        assert_eq!(db.update(true), Some(Edge::Pressed));
    }

    #[test]
    fn zero_threshold_follows_input() {
        let mut db = Debouncer::new(0);
        assert_eq!(db.update(true), Some(Edge::Pressed));
        assert_eq!(db.update(false), Some(Edge::Released));
    }
}
