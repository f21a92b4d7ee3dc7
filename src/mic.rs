//! Microphone sampling and blow detection
//!
//! Raw ADC readings are grouped into short windows. Each window reports its mean (the level shown
//! on the console) and its spread. Blowing across an electret microphone swings the output far
//! and for a long time compared to speech or knocks, so a blow is a run of consecutive windows
//! whose peak-to-peak amplitude stays above a threshold.

/// Full-scale count of a 10-bit conversion
pub const ADC_FULL_SCALE: u16 = 1 << 10;
/// Reference voltage of the conversion in millivolts (AVCC)
pub const REF_MV: u32 = 3300;

/// Convert a 10-bit ADC count to millivolts. Counts past full scale read as full scale.
pub fn count_to_mv(count: u16) -> u16 {
    let count = count.min(ADC_FULL_SCALE - 1);
    ((count as u32 * REF_MV) / ADC_FULL_SCALE as u32) as u16
}

/// Summary of one window of samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowStats {
    /// Average reading
    pub mean: u16,
    /// Smallest reading
    pub min: u16,
    /// Largest reading
    pub max: u16,
}

impl WindowStats {
    /// Difference between the largest and smallest reading, 0 if `min` exceeds `max`
    pub fn peak_to_peak(&self) -> u16 {
        self.max.saturating_sub(self.min)
    }
}

/// Accumulates readings into fixed-length windows
#[derive(Debug, Clone)]
pub struct SampleWindow {
    len: u8,
    count: u8,
    sum: u32,
    min: u16,
    max: u16,
}

impl SampleWindow {
    /// Number of readings averaged by default
    pub const DEFAULT_LEN: u8 = 5;

    /// Create a window of `len` readings. A length of 0 is treated as 1.
    pub fn new(len: u8) -> Self {
        SampleWindow {
            len: len.max(1),
            count: 0,
            sum: 0,
            min: u16::MAX,
            max: 0,
        }
    }

    /// Add a reading. Returns the window summary once the window is full, and starts a new one.
    pub fn push(&mut self, sample: u16) -> Option<WindowStats> {
        self.sum += sample as u32;
        self.min = self.min.min(sample);
        self.max = self.max.max(sample);
        self.count += 1;

        if self.count < self.len {
            return None;
        }

        let stats = WindowStats {
            mean: (self.sum / self.count as u32) as u16,
            min: self.min,
            max: self.max,
        };
        *self = SampleWindow::new(self.len);
        Some(stats)
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        SampleWindow::new(Self::DEFAULT_LEN)
    }
}

/// Blow detector tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlowConfig {
    /// Minimum peak-to-peak amplitude of a window, in ADC counts
    pub threshold: u16,
    /// Number of consecutive loud windows that make a blow
    pub hold: u8,
}

impl BlowConfig {
    /// Creates a blow detector configuration. A default is also available through `::default()`
    pub fn new(threshold: u16, hold: u8) -> Self {
        BlowConfig { threshold, hold }
    }
}

impl Default for BlowConfig {
    fn default() -> Self {
        BlowConfig::new(200, 3)
    }
}

/// Detects a sustained blow on the microphone
#[derive(Debug, Clone)]
pub struct BlowDetector {
    config: BlowConfig,
    loud: u8,
    fired: bool,
}

impl BlowDetector {
    /// Create a detector
    pub fn new(config: BlowConfig) -> Self {
        BlowDetector {
            config,
            loud: 0,
            fired: false,
        }
    }

    /// Feed one window. Returns `true` once per blow, when the run of loud windows reaches the
    /// configured length. A quiet window re-arms the detector.
    pub fn update(&mut self, stats: &WindowStats) -> bool {
        if stats.peak_to_peak() < self.config.threshold {
            self.loud = 0;
            self.fired = false;
            return false;
        }

        self.loud = self.loud.saturating_add(1);
        if !self.fired && self.loud >= self.config.hold.max(1) {
            self.fired = true;
            debug!("blow: {} loud windows, p2p {}", self.loud, stats.peak_to_peak());
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(min: u16, max: u16) -> WindowStats {
        WindowStats {
            mean: (min + max) / 2,
            min,
            max,
        }
    }

    #[test]
    fn mean_of_five_readings() {
        let mut w = SampleWindow::default();
        for s in [100, 200, 300, 400] {
            assert_eq!(w.push(s), None);
        }
        let stats = w.push(500).unwrap();
        assert_eq!(stats.mean, 300);
        assert_eq!(stats.min, 100);
        assert_eq!(stats.max, 500);
        assert_eq!(stats.peak_to_peak(), 400);

        // Next window starts fresh
        for _ in 0..4 {
            assert_eq!(w.push(7), None);
        }
        assert_eq!(w.push(7), Some(WindowStats { mean: 7, min: 7, max: 7 }));
    }

    #[test]
    fn zero_length_window_reports_every_sample() {
        let mut w = SampleWindow::new(0);
        assert_eq!(w.push(12).map(|s| s.mean), Some(12));
        assert_eq!(w.push(13).map(|s| s.mean), Some(13));
    }

    #[test]
    fn millivolts() {
        assert_eq!(count_to_mv(0), 0);
        assert_eq!(count_to_mv(512), 1650);
        assert_eq!(count_to_mv(1023), 3296);
    }

    #[test]
    fn millivolts_clamp_at_full_scale() {
        assert_eq!(count_to_mv(1023), 3296);
        assert_eq!(count_to_mv(1024), 3296);
        assert_eq!(count_to_mv(u16::MAX), 3296);
    }

    #[test]
    fn inverted_window_has_no_spread() {
        let stats = WindowStats {
            mean: 500,
            min: 600,
            max: 400,
        };
        assert_eq!(stats.peak_to_peak(), 0);
    }

    #[test]
    fn blow_needs_consecutive_loud_windows() {
        let mut det = BlowDetector::new(BlowConfig::new(200, 3));
        assert!(!det.update(&window(400, 700)));
        assert!(!det.update(&window(400, 700)));
        // Quiet window breaks the run
        assert!(!det.update(&window(500, 520)));
        assert!(!det.update(&window(400, 700)));
        assert!(!det.update(&window(400, 700)));
        assert!(det.update(&window(300, 900)));
    }

    #[test]
    fn blow_fires_once_until_quiet() {
        let mut det = BlowDetector::new(BlowConfig::new(100, 1));
        assert!(det.update(&window(0, 1000)));
        assert!(!det.update(&window(0, 1000)));
        assert!(!det.update(&window(0, 1000)));
        assert!(!det.update(&window(500, 510)));
        assert!(det.update(&window(0, 1000)));
    }
}
