//! Indicator strip abstraction and the alarm light animation.

use palette::Srgb;

/// Number of LEDs on the indicator strip.
pub const LED_COUNT: usize = 5;

/// One full frame for the strip, 8 bits per channel.
pub type StripFrame = [Srgb<u8>; LED_COUNT];

/// All LEDs off.
pub const COLOR_OFF: Srgb<u8> = Srgb::new(0, 0, 0);

/// Alarm colour when the retimer expired.
pub const RETIMER_COLOR: Srgb<u8> = Srgb::new(200, 0, 100);

/// Alarm colour when a secondary timer expired.
pub const TIMER_COLOR: Srgb<u8> = Srgb::new(150, 150, 0);

/// A frame with every LED off.
pub const BLANK_FRAME: StripFrame = [COLOR_OFF; LED_COUNT];

/// Trait for abstracting the addressable LED strip.
///
/// Implementations transmit the whole frame in one go. Handle any bus errors
/// internally - this method cannot fail.
pub trait IndicatorStrip {
    fn write(&mut self, frame: &StripFrame);
}

/// Colour scheme for the alarm animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmPattern {
    Retimer,
    Timer,
}

impl AlarmPattern {
    pub fn color(self) -> Srgb<u8> {
        match self {
            AlarmPattern::Retimer => RETIMER_COLOR,
            AlarmPattern::Timer => TIMER_COLOR,
        }
    }

    /// The lit frame for this pattern.
    pub fn frame(self) -> StripFrame {
        [self.color(); LED_COUNT]
    }
}

/// Phase of the alarm animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationPhase {
    /// Show the pattern colour.
    Lit,
    /// Turn the strip off.
    Blank,
    /// Leave the strip as it is.
    Hold,
}

/// Three-phase blink: lit, blank, hold, advanced once per alarm poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmAnimation {
    pattern: AlarmPattern,
    phase: u8,
}

impl AlarmAnimation {
    pub fn new(pattern: AlarmPattern) -> Self {
        Self { pattern, phase: 0 }
    }

    pub fn pattern(&self) -> AlarmPattern {
        self.pattern
    }

    /// Phase the next call to [`advance`](Self::advance) will produce.
    pub fn phase(&self) -> AnimationPhase {
        match self.phase {
            0 => AnimationPhase::Lit,
            1 => AnimationPhase::Blank,
            _ => AnimationPhase::Hold,
        }
    }

    /// Steps the animation and returns the frame to write, if any.
    pub fn advance(&mut self) -> Option<StripFrame> {
        let frame = match self.phase() {
            AnimationPhase::Lit => Some(self.pattern.frame()),
            AnimationPhase::Blank => Some(BLANK_FRAME),
            AnimationPhase::Hold => None,
        };
        self.phase = (self.phase + 1) % 3;
        frame
    }
}
