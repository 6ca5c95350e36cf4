//! Ambient light sensing and the cover-the-sensor dismissal gesture.

use heapless::Deque;

/// Number of readings in the moving average window.
pub const LIGHT_WINDOW: usize = 5;

/// A reading below this fraction of the recent average counts as covering the sensor.
pub const GESTURE_RATIO: f32 = 0.66;

/// Trait for abstracting the ambient light sensor.
///
/// Units and range are up to the hardware; only relative comparisons are made.
pub trait LightSensor {
    /// Returns the current light level.
    fn level(&mut self) -> u16;
}

/// A raw reading paired with the moving average it was folded into.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightSample {
    pub raw: u16,
    pub average: f32,
}

impl LightSample {
    /// True when the reading dropped sharply below its recent trend.
    #[inline]
    pub fn is_covered(&self) -> bool {
        (self.raw as f32) < self.average * GESTURE_RATIO
    }
}

/// Moving average over the last `N` readings, kept as a ring buffer plus running sum.
#[derive(Debug, Clone)]
pub struct LightAverage<const N: usize> {
    window: Deque<u16, N>,
    sum: u32,
}

impl<const N: usize> LightAverage<N> {
    /// Creates an empty average.
    pub fn new() -> Self {
        Self {
            window: Deque::new(),
            sum: 0,
        }
    }

    /// Adds a reading, evicting the oldest once the window is full.
    ///
    /// The returned average includes `raw`.
    pub fn push(&mut self, raw: u16) -> LightSample {
        if self.window.is_full() {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest as u32;
            }
        }
        if self.window.push_back(raw).is_ok() {
            self.sum += raw as u32;
        }

        LightSample {
            raw,
            average: self.average().unwrap_or(raw as f32),
        }
    }

    /// Mean of the readings currently in the window.
    pub fn average(&self) -> Option<f32> {
        match self.window.len() {
            0 => None,
            len => Some(self.sum as f32 / len as f32),
        }
    }

    /// Number of readings currently held.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

impl<const N: usize> Default for LightAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}
