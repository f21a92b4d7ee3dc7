//! The candle
//!
//! [`Candle`] owns the detectors and decides, once per tick, whether the candle is lit. Blowing
//! on the microphone puts it out, shaking the tilt switch relights it, and the push-button
//! toggles it either way. While lit, [`Candle::color`] produces the flickering flame.

use crate::debounce::{Debouncer, Edge};
use crate::flame::{FlameColor, Flicker, FlickerConfig};
use crate::mic::{BlowConfig, BlowDetector, SampleWindow, WindowStats};
use crate::rand::Lcg;
use crate::shake::{ShakeConfig, ShakeDetector};

/// Whole-candle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CandleConfig {
    /// Flame colour and flicker rate
    pub flicker: FlickerConfig,
    /// Blow detection
    pub blow: BlowConfig,
    /// Shake detection
    pub shake: ShakeConfig,
    /// Ticks the button must be stable for
    pub debounce_ticks: u8,
    /// Microphone readings per window
    pub window_len: u8,
    /// Ticks after a shake relight during which blows are ignored
    pub relight_holdoff_ticks: u16,
}

impl Default for CandleConfig {
    fn default() -> Self {
        CandleConfig {
            flicker: FlickerConfig::default(),
            blow: BlowConfig::default(),
            shake: ShakeConfig::default(),
            debounce_ticks: Debouncer::DEFAULT_THRESHOLD,
            window_len: SampleWindow::DEFAULT_LEN,
            relight_holdoff_ticks: 300,
        }
    }
}

/// Whether the candle is burning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Flame is flickering
    Lit,
    /// Flame is dark
    Out,
}

impl State {
    /// Lower-case name, for console output
    pub fn as_str(self) -> &'static str {
        match self {
            State::Lit => "lit",
            State::Out => "out",
        }
    }

    fn toggled(self) -> State {
        match self {
            State::Lit => State::Out,
            State::Out => State::Lit,
        }
    }
}

/// What caused a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cause {
    /// Microphone heard a blow
    Blown,
    /// Tilt switch was shaken
    Shaken,
    /// Push-button was pressed
    Switch,
}

impl Cause {
    /// Lower-case name, for console output
    pub fn as_str(self) -> &'static str {
        match self {
            Cause::Blown => "blown",
            Cause::Shaken => "shaken",
            Cause::Switch => "switch",
        }
    }
}

/// A state change reported by [`Candle::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// New state
    pub to: State,
    /// Why it changed
    pub cause: Cause,
}

/// Inputs gathered over one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inputs {
    /// Tick counter
    pub now: u16,
    /// Microphone reading, if a conversion finished
    pub sample: Option<u16>,
    /// Tilt edges since the previous tick
    pub tilt_edges: u8,
    /// Raw (undebounced) button level
    pub switch_pressed: bool,
}

/// Candle state machine
pub struct Candle {
    state: State,
    rng: Lcg,
    flicker: Flicker,
    window: SampleWindow,
    blow: BlowDetector,
    shake: ShakeDetector,
    switch: Debouncer,
    holdoff_ticks: u16,
    holdoff_since: Option<u16>,
    last_window: Option<WindowStats>,
}

impl Candle {
    /// Create a lit candle. `seed` seeds the flicker.
    pub fn new(config: CandleConfig, seed: u32) -> Self {
        Candle {
            state: State::Lit,
            rng: Lcg::new(seed),
            flicker: Flicker::new(config.flicker),
            window: SampleWindow::new(config.window_len),
            blow: BlowDetector::new(config.blow),
            shake: ShakeDetector::new(config.shake),
            switch: Debouncer::new(config.debounce_ticks),
            holdoff_ticks: config.relight_holdoff_ticks,
            holdoff_since: None,
            last_window: None,
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Most recent microphone window
    pub fn last_window(&self) -> Option<WindowStats> {
        self.last_window
    }

    /// Run the detectors on one tick of input and apply any resulting state change.
    pub fn tick(&mut self, inputs: Inputs) -> Option<Transition> {
        let blown = match inputs.sample.and_then(|s| self.window.push(s)) {
            Some(stats) => {
                self.last_window = Some(stats);
                self.blow.update(&stats)
            }
            None => false,
        };
        let shaken = self.shake.update(inputs.now, inputs.tilt_edges);
        let pressed = self.switch.update(inputs.switch_pressed) == Some(Edge::Pressed);

        if let Some(since) = self.holdoff_since {
            if inputs.now.wrapping_sub(since) >= self.holdoff_ticks {
                self.holdoff_since = None;
            }
        }

        let transition = self.decide(pressed, blown, shaken)?;
        self.state = transition.to;
        self.holdoff_since = match transition.cause {
            Cause::Shaken => Some(inputs.now),
            _ => None,
        };
        info!("candle {} ({})", transition.to, transition.cause);
        Some(transition)
    }

    fn decide(&self, pressed: bool, blown: bool, shaken: bool) -> Option<Transition> {
        if pressed {
            return Some(Transition {
                to: self.state.toggled(),
                cause: Cause::Switch,
            });
        }
        match self.state {
            State::Lit if blown && self.holdoff_since.is_none() => Some(Transition {
                to: State::Out,
                cause: Cause::Blown,
            }),
            State::Out if shaken => Some(Transition {
                to: State::Lit,
                cause: Cause::Shaken,
            }),
            _ => None,
        }
    }

    /// Colour to show for this step
    pub fn color(&mut self) -> FlameColor {
        match self.state {
            State::Lit => self.flicker.next(&mut self.rng),
            State::Out => FlameColor::OFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CandleConfig {
        CandleConfig {
            blow: BlowConfig::new(200, 2),
            shake: ShakeConfig::new(3, 100, 50),
            debounce_ticks: 2,
            window_len: 2,
            relight_holdoff_ticks: 20,
            ..CandleConfig::default()
        }
    }

    struct Rig {
        candle: Candle,
        now: u16,
    }

    impl Rig {
        fn new() -> Self {
            Rig {
                candle: Candle::new(config(), 1),
                now: 0,
            }
        }

        fn step(&mut self, inputs: Inputs) -> Option<Transition> {
            self.now = self.now.wrapping_add(1);
            self.candle.tick(Inputs {
                now: self.now,
                ..inputs
            })
        }

        fn quiet(&mut self) -> Option<Transition> {
            self.step(Inputs {
                sample: Some(512),
                ..Inputs::default()
            })
        }

        // Alternating extremes: every window has a 1000 count spread
        fn blow(&mut self, ticks: usize) -> Option<Transition> {
            let mut out = None;
            for i in 0..ticks {
                let sample = if i % 2 == 0 { 0 } else { 1000 };
                out = out.or(self.step(Inputs {
                    sample: Some(sample),
                    ..Inputs::default()
                }));
            }
            out
        }

        fn shake(&mut self) -> Option<Transition> {
            let mut out = None;
            for _ in 0..3 {
                out = out.or(self.step(Inputs {
                    sample: Some(512),
                    tilt_edges: 1,
                    ..Inputs::default()
                }));
            }
            out
        }

        fn press(&mut self) -> Option<Transition> {
            let mut out = None;
            for _ in 0..2 {
                out = out.or(self.step(Inputs {
                    switch_pressed: true,
                    ..Inputs::default()
                }));
            }
            for _ in 0..2 {
                out = out.or(self.step(Inputs::default()));
            }
            out
        }
    }

    #[test]
    fn starts_lit_and_flickers() {
        let mut rig = Rig::new();
        assert_eq!(rig.candle.state(), State::Lit);
        assert_eq!(rig.candle.color(), FlameColor::CANDLE);
        for _ in 0..10 {
            assert_eq!(rig.quiet(), None);
        }
        assert_eq!(
            rig.candle.last_window(),
            Some(WindowStats { mean: 512, min: 512, max: 512 })
        );
    }

    #[test]
    fn blow_puts_it_out() {
        let mut rig = Rig::new();
        let t = rig.blow(4).unwrap();
        assert_eq!(
            t,
            Transition {
                to: State::Out,
                cause: Cause::Blown
            }
        );
        assert_eq!(rig.candle.color(), FlameColor::OFF);
        // More blowing does nothing
        assert_eq!(rig.blow(8), None);
    }

    #[test]
    fn shake_relights_and_holds_off_blows() {
        let mut rig = Rig::new();
        rig.blow(4).unwrap();
        // Let the blow detector re-arm
        rig.quiet();
        rig.quiet();

        let t = rig.shake().unwrap();
        assert_eq!(t.to, State::Lit);
        assert_eq!(t.cause, Cause::Shaken);

        // Blowing right after relighting is ignored
        assert_eq!(rig.blow(4), None);
        assert_eq!(rig.candle.state(), State::Lit);

        for _ in 0..20 {
            rig.quiet();
        }
        assert_eq!(rig.blow(4).map(|t| t.cause), Some(Cause::Blown));
    }

    #[test]
    fn shake_while_lit_is_ignored() {
        let mut rig = Rig::new();
        assert_eq!(rig.shake(), None);
        assert_eq!(rig.candle.state(), State::Lit);
    }

    #[test]
    fn button_toggles() {
        let mut rig = Rig::new();
        let t = rig.press().unwrap();
        assert_eq!(
            t,
            Transition {
                to: State::Out,
                cause: Cause::Switch
            }
        );
        let t = rig.press().unwrap();
        assert_eq!(t.to, State::Lit);
        assert_eq!(rig.candle.state(), State::Lit);
    }

    #[test]
    fn button_wins_over_blow() {
        let mut rig = Rig::new();
        rig.step(Inputs {
            sample: Some(0),
            ..Inputs::default()
        });
        rig.step(Inputs {
            sample: Some(1000),
            ..Inputs::default()
        });
        rig.step(Inputs {
            sample: Some(0),
            switch_pressed: true,
            ..Inputs::default()
        });
        // Second loud window and the debounced press land on the same tick
        let t = rig.step(Inputs {
            sample: Some(1000),
            switch_pressed: true,
            ..Inputs::default()
        });
        assert_eq!(
            t,
            Some(Transition {
                to: State::Out,
                cause: Cause::Switch
            })
        );
    }

    #[test]
    fn button_wins_over_shake() {
        let mut rig = Rig::new();
        rig.blow(4).unwrap();
        rig.quiet();
        rig.quiet();

        assert_eq!(
            rig.step(Inputs {
                tilt_edges: 2,
                switch_pressed: true,
                ..Inputs::default()
            }),
            None
        );
        // Third tilt edge and the debounced press land on the same tick
        let t = rig.step(Inputs {
            tilt_edges: 1,
            switch_pressed: true,
            ..Inputs::default()
        });
        assert_eq!(
            t,
            Some(Transition {
                to: State::Lit,
                cause: Cause::Switch
            })
        );

        // A button relight does not start the blow holdoff
        rig.step(Inputs::default());
        rig.step(Inputs::default());
        assert_eq!(rig.blow(4).map(|t| t.cause), Some(Cause::Blown));
    }

    #[test]
    fn interrupt_results_reach_the_candle() {
        use crate::events::{EventLatch, Events};

        let latch = EventLatch::new();
        let mut candle = Candle::new(CandleConfig::default(), 1);
        let mut now: u16 = 0;
        let mut causes = Vec::new();

        for i in 0..200u16 {
            // Tick handler, then one pass of the main loop
            latch.raise(Events::TICK);
            if let Some(p) = latch.take_if(Events::TICK) {
                now = now.wrapping_add(1);
                let inputs = Inputs {
                    now,
                    sample: p.sample(),
                    tilt_edges: p.tilt_edges,
                    switch_pressed: false,
                };
                if let Some(t) = candle.tick(inputs) {
                    causes.push(t.cause);
                }
            }

            // The conversion finishes and the tilt switch chatters after the loop took the tick
            let blowing = i < 100;
            let sample = match (blowing, i % 2) {
                (true, 0) => 0,
                (true, _) => 1000,
                (false, _) => 512,
            };
            latch.record_sample(sample);
            if !blowing {
                latch.record_tilt_edge();
            }
            // Loop spins before the next tick
            assert_eq!(latch.take_if(Events::TICK), None);
        }

        assert_eq!(causes, [Cause::Blown, Cause::Shaken]);
        assert_eq!(candle.state(), State::Lit);
    }

    #[test]
    fn console_names() {
        assert_eq!(State::Out.as_str(), "out");
        assert_eq!(Cause::Shaken.as_str(), "shaken");
    }
}
