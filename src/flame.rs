//! Flame colour and flicker
//!
//! The flame is a red and a green LED channel mixed by PWM. Colours are given in percent of the
//! PWM period, so the same colour looks the same whatever period the timer runs at. Flicker
//! blanks the flame for single steps at random.

use crate::rand::Lcg;
use embedded_hal::pwm::SetDutyCycle;

/// Red/green mix of the flame, each channel in percent (0 to 100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlameColor {
    red: u8,
    green: u8,
}

impl FlameColor {
    /// Both channels dark
    pub const OFF: FlameColor = FlameColor { red: 0, green: 0 };
    /// Mostly red with a hint of green
    pub const CANDLE: FlameColor = FlameColor { red: 95, green: 5 };

    /// Create a colour. Percentages above 100 are clamped.
    pub const fn new(red: u8, green: u8) -> Self {
        FlameColor {
            red: if red > 100 { 100 } else { red },
            green: if green > 100 { 100 } else { green },
        }
    }

    /// Red duty in percent
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green duty in percent
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Whether both channels are dark
    pub const fn is_off(&self) -> bool {
        self.red == 0 && self.green == 0
    }
}

/// The two PWM channels driving the flame
pub struct Flame<R, G> {
    red: R,
    green: G,
}

impl<R, G> Flame<R, G>
where
    R: SetDutyCycle,
    G: SetDutyCycle<Error = R::Error>,
{
    /// Take ownership of the red and green channels
    pub fn new(red: R, green: G) -> Self {
        Flame { red, green }
    }

    /// Drive both channels to the given colour
    pub fn show(&mut self, color: FlameColor) -> Result<(), R::Error> {
        self.red.set_duty_cycle_percent(color.red)?;
        self.green.set_duty_cycle_percent(color.green)?;
        Ok(())
    }

    /// Turn the flame off
    pub fn off(&mut self) -> Result<(), R::Error> {
        self.show(FlameColor::OFF)
    }

    /// Give the channels back
    pub fn free(self) -> (R, G) {
        (self.red, self.green)
    }
}

/// Flicker tuning. Increase `max_rand` and `on_factor` together to make the flame flicker less
/// often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlickerConfig {
    /// Colour shown while the flame is steady
    pub base: FlameColor,
    /// Each step draws a random number below this value
    pub max_rand: u16,
    /// Draws above this value blank the flame for one step
    pub on_factor: u16,
}

impl FlickerConfig {
    /// Creates a flicker configuration. A default is also available through `::default()`
    pub fn new(base: FlameColor, max_rand: u16, on_factor: u16) -> Self {
        FlickerConfig {
            base,
            max_rand,
            on_factor,
        }
    }
}

impl Default for FlickerConfig {
    fn default() -> Self {
        FlickerConfig::new(FlameColor::CANDLE, 20, 18)
    }
}

/// Produces the flame colour step by step
#[derive(Debug, Clone)]
pub struct Flicker {
    config: FlickerConfig,
}

impl Flicker {
    /// Create a flicker source
    pub fn new(config: FlickerConfig) -> Self {
        Flicker { config }
    }

    /// The active configuration
    pub fn config(&self) -> &FlickerConfig {
        &self.config
    }

    /// Colour for the next step
    pub fn next(&mut self, rng: &mut Lcg) -> FlameColor {
        if rng.below(self.config.max_rand) > self.config.on_factor {
            FlameColor::OFF
        } else {
            self.config.base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    struct Channel {
        max: u16,
        duty: u16,
    }

    impl ErrorType for Channel {
        type Error = Infallible;
    }

    impl SetDutyCycle for Channel {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    fn flame() -> Flame<Channel, Channel> {
        Flame::new(
            Channel { max: 1000, duty: 1000 },
            Channel { max: 1000, duty: 1000 },
        )
    }

    #[test]
    fn percent_maps_onto_period() {
        let mut flame = flame();
        flame.show(FlameColor::CANDLE).unwrap();
        let (red, green) = flame.free();
        assert_eq!(red.duty, 950);
        assert_eq!(green.duty, 50);
    }

    #[test]
    fn off_darkens_both_channels() {
        let mut flame = flame();
        flame.off().unwrap();
        let (red, green) = flame.free();
        assert_eq!((red.duty, green.duty), (0, 0));
    }

    #[test]
    fn color_is_clamped() {
        let color = FlameColor::new(250, 101);
        assert_eq!((color.red(), color.green()), (100, 100));
        assert!(!color.is_off());
        assert!(FlameColor::OFF.is_off());
    }

    #[test]
    fn flicker_blanks_only_on_high_draws() {
        // Seed 1 draws 18, 18, 13, 15, 11, 7 modulo 20
        let mut rng = Lcg::new(1);
        let mut flicker = Flicker::new(FlickerConfig::default());
        for _ in 0..6 {
            assert_eq!(flicker.next(&mut rng), FlameColor::CANDLE);
        }

        // With on_factor 12 only the last two draws keep the flame lit
        let mut rng = Lcg::new(1);
        let mut flicker = Flicker::new(FlickerConfig::new(FlameColor::CANDLE, 20, 12));
        let steps: [bool; 6] = core::array::from_fn(|_| flicker.next(&mut rng).is_off());
        assert_eq!(steps, [true, true, true, true, false, false]);
    }
}
