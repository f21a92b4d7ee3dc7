//! Shake detection on the tilt switch
//!
//! A tilt switch chatters open and closed while it is shaken and sits still otherwise. The
//! detector counts switch edges against the tick counter: enough edges inside one window is a
//! shake. After a shake the detector ignores the switch for a cooldown period, so one vigorous
//! shake is not reported twice.
//!
//! Tick counts wrap, so all comparisons use wrapping arithmetic.

/// Shake detector tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShakeConfig {
    /// Tilt edges needed inside one window
    pub min_edges: u8,
    /// Length of the counting window in ticks
    pub window_ticks: u16,
    /// Ticks to ignore the switch after a shake
    pub cooldown_ticks: u16,
}

impl ShakeConfig {
    /// Creates a shake detector configuration. A default is also available through `::default()`
    pub fn new(min_edges: u8, window_ticks: u16, cooldown_ticks: u16) -> Self {
        ShakeConfig {
            min_edges,
            window_ticks,
            cooldown_ticks,
        }
    }
}

impl Default for ShakeConfig {
    fn default() -> Self {
        ShakeConfig::new(6, 400, 500)
    }
}

/// Detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShakeState {
    /// Waiting for the first edge
    Idle,
    /// Counting edges in a window opened at `since`
    Counting {
        /// Tick the window opened on
        since: u16,
        /// Edges seen so far
        edges: u8,
    },
    /// Ignoring the switch after a shake reported at `since`
    Cooldown {
        /// Tick the shake was reported on
        since: u16,
    },
}

/// Counts tilt edges into shakes
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    config: ShakeConfig,
    state: ShakeState,
}

impl ShakeDetector {
    /// Create a detector
    pub fn new(config: ShakeConfig) -> Self {
        ShakeDetector {
            config,
            state: ShakeState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> ShakeState {
        self.state
    }

    /// Feed the tilt edges seen since the last call at tick `now`. Returns `true` on the tick a
    /// shake is recognised.
    pub fn update(&mut self, now: u16, edges: u8) -> bool {
        match self.state {
            ShakeState::Cooldown { since } => {
                if now.wrapping_sub(since) >= self.config.cooldown_ticks {
                    self.state = ShakeState::Idle;
                }
                false
            }
            ShakeState::Counting { since, edges: seen } => {
                if now.wrapping_sub(since) > self.config.window_ticks {
                    trace!("shake window expired with {} edges", seen);
                    self.state = ShakeState::Idle;
                    return self.open(now, edges);
                }
                self.count(now, since, seen.saturating_add(edges))
            }
            ShakeState::Idle => self.open(now, edges),
        }
    }

    fn open(&mut self, now: u16, edges: u8) -> bool {
        if edges == 0 {
            return false;
        }
        self.count(now, now, edges)
    }

    fn count(&mut self, now: u16, since: u16, edges: u8) -> bool {
        if edges >= self.config.min_edges {
            debug!("shake: {} edges in {} ticks", edges, now.wrapping_sub(since));
            self.state = ShakeState::Cooldown { since: now };
            true
        } else {
            self.state = ShakeState::Counting { since, edges };
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ShakeDetector {
        ShakeDetector::new(ShakeConfig::new(4, 100, 50))
    }

    #[test]
    fn edges_inside_window_make_a_shake() {
        let mut det = detector();
        assert!(!det.update(10, 1));
        assert_eq!(det.state(), ShakeState::Counting { since: 10, edges: 1 });
        assert!(!det.update(30, 0));
        assert!(!det.update(40, 2));
        assert!(det.update(90, 1));
        assert_eq!(det.state(), ShakeState::Cooldown { since: 90 });
    }

    #[test]
    fn slow_edges_expire() {
        let mut det = detector();
        assert!(!det.update(0, 2));
        assert!(!det.update(50, 1));
        // Window has passed: the run is dropped and this edge opens a new window
        assert!(!det.update(101, 1));
        assert_eq!(det.state(), ShakeState::Counting { since: 101, edges: 1 });
        assert!(!det.update(150, 0));
        assert!(!det.update(202, 0));
        assert_eq!(det.state(), ShakeState::Idle);
    }

    #[test]
    fn last_tick_of_window_still_counts() {
        let mut det = detector();
        assert!(!det.update(0, 3));
        assert!(det.update(100, 1));
        assert_eq!(det.state(), ShakeState::Cooldown { since: 100 });
    }

    #[test]
    fn burst_on_one_tick_counts() {
        let mut det = detector();
        assert!(det.update(5, 9));
    }

    #[test]
    fn cooldown_ignores_edges() {
        let mut det = detector();
        assert!(det.update(0, 4));
        assert!(!det.update(10, 10));
        assert!(!det.update(49, 10));
        assert!(!det.update(50, 10));
        assert_eq!(det.state(), ShakeState::Idle);
        assert!(det.update(51, 4));
    }

    #[test]
    fn tick_counter_wraps() {
        let mut det = detector();
        assert!(!det.update(u16::MAX - 10, 2));
        assert!(det.update(20, 2));
    }
}
