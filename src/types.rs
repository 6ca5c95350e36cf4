//! Core value types shared by the configuration and countdown controllers.

use core::fmt;

/// Number of timer slots on the appliance.
pub const SLOT_COUNT: usize = 3;

/// Upper bound for any timer duration, in seconds (24 hours).
pub const MAX_DURATION_SECS: u32 = 24 * 60 * 60;

/// One of the three timer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    /// The primary timer. Reloads its configured value whenever an alarm triggers.
    Retimer,

    /// First secondary timer.
    Timer1,

    /// Second secondary timer.
    Timer2,
}

impl Slot {
    /// All slots in display order.
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::Retimer, Slot::Timer1, Slot::Timer2];

    /// Position of this slot in a [`TimerSet`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Slot::Retimer => 0,
            Slot::Timer1 => 1,
            Slot::Timer2 => 2,
        }
    }
}

/// The HH:MM:SS field addressed by the configuration cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// Seconds added or removed by one step event of the given magnitude.
    ///
    /// Hours always move by exactly one hour, whatever the repeat magnitude.
    #[inline]
    pub const fn step_seconds(self, magnitude: u32) -> u32 {
        match self {
            Field::Hours => 60 * 60,
            Field::Minutes => magnitude * 60,
            Field::Seconds => magnitude,
        }
    }
}

/// Selection cursor on the configuration screen, in `1..=9`.
///
/// Positions 1-3 address the retimer's hours, minutes and seconds, 4-6 the
/// first timer and 7-9 the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor(u8);

impl Cursor {
    /// Lowest cursor position.
    pub const MIN: u8 = 1;

    /// Highest cursor position.
    pub const MAX: u8 = 9;

    /// Creates a cursor at `position`.
    ///
    /// # Errors
    /// * `CursorOutOfRange` - position is outside `1..=9`
    pub fn new(position: u8) -> Result<Self, TimerError> {
        if (Self::MIN..=Self::MAX).contains(&position) {
            Ok(Cursor(position))
        } else {
            Err(TimerError::CursorOutOfRange(position))
        }
    }

    /// Raw position in `1..=9`.
    #[inline]
    pub fn position(self) -> u8 {
        self.0
    }

    /// Slot addressed by this cursor.
    pub fn slot(self) -> Slot {
        match (self.0 - 1) / 3 {
            0 => Slot::Retimer,
            1 => Slot::Timer1,
            _ => Slot::Timer2,
        }
    }

    /// Field addressed by this cursor.
    pub fn field(self) -> Field {
        match (self.0 - 1) % 3 {
            0 => Field::Hours,
            1 => Field::Minutes,
            _ => Field::Seconds,
        }
    }

    /// Moves one position left, stopping at the first field.
    pub fn left(self) -> Self {
        Cursor(self.0.saturating_sub(1).max(Self::MIN))
    }

    /// Moves one position right, stopping at the last field.
    pub fn right(self) -> Self {
        Cursor((self.0 + 1).min(Self::MAX))
    }
}

impl Default for Cursor {
    /// Seconds field of the retimer.
    fn default() -> Self {
        Cursor(3)
    }
}

/// A duration split into hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hms {
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
}

impl Hms {
    /// Splits a whole number of seconds.
    pub const fn from_seconds(total: u32) -> Self {
        let minutes = total / 60;
        Self {
            hours: minutes / 60,
            minutes: (minutes % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Durations of the three timers, in whole seconds.
///
/// Every value is kept within `0..=MAX_DURATION_SECS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSet([u32; SLOT_COUNT]);

impl TimerSet {
    /// All three timers at zero.
    pub const ZERO: TimerSet = TimerSet([0; SLOT_COUNT]);

    /// Creates a timer set from seconds, indexed retimer, timer 1, timer 2.
    ///
    /// # Errors
    /// * `DurationOutOfRange` - a value exceeds 24 hours
    pub fn new(seconds: [u32; SLOT_COUNT]) -> Result<Self, TimerError> {
        for slot in Slot::ALL {
            let value = seconds[slot.index()];
            if value > MAX_DURATION_SECS {
                return Err(TimerError::DurationOutOfRange { slot, seconds: value });
            }
        }
        Ok(TimerSet(seconds))
    }

    /// Creates a timer set, clamping each value to 24 hours.
    pub fn saturating(seconds: [u32; SLOT_COUNT]) -> Self {
        TimerSet(seconds.map(|s| s.min(MAX_DURATION_SECS)))
    }

    /// Duration of `slot` in seconds.
    #[inline]
    pub fn get(&self, slot: Slot) -> u32 {
        self.0[slot.index()]
    }

    /// Applies a signed delta to `slot`, clamping into `0..=MAX_DURATION_SECS`.
    ///
    /// Returns true if the stored value changed.
    pub fn adjust(&mut self, slot: Slot, delta: i64) -> bool {
        let current = self.0[slot.index()];
        let next = (current as i64 + delta).clamp(0, MAX_DURATION_SECS as i64) as u32;
        self.0[slot.index()] = next;
        next != current
    }

    /// Durations as a plain array.
    #[inline]
    pub fn as_array(&self) -> [u32; SLOT_COUNT] {
        self.0
    }

    /// True if both secondary timers are zero.
    pub fn secondaries_exhausted(&self) -> bool {
        self.0[Slot::Timer1.index()] == 0 && self.0[Slot::Timer2.index()] == 0
    }
}

/// Validation errors for timer values and cursor positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// A duration above 24 hours.
    DurationOutOfRange { slot: Slot, seconds: u32 },

    /// A cursor position outside `1..=9`.
    CursorOutOfRange(u8),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::DurationOutOfRange { slot, seconds } => {
                write!(
                    f,
                    "{:?} duration of {} s exceeds the maximum of {} s",
                    slot, seconds, MAX_DURATION_SECS
                )
            }
            TimerError::CursorOutOfRange(position) => {
                write!(f, "cursor position {} is outside 1..=9", position)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_maps_to_slot_and_field() {
        let cursor = Cursor::new(1).unwrap();
        assert_eq!((cursor.slot(), cursor.field()), (Slot::Retimer, Field::Hours));

        let cursor = Cursor::new(5).unwrap();
        assert_eq!((cursor.slot(), cursor.field()), (Slot::Timer1, Field::Minutes));

        let cursor = Cursor::new(9).unwrap();
        assert_eq!((cursor.slot(), cursor.field()), (Slot::Timer2, Field::Seconds));
    }

    #[test]
    fn cursor_saturates_at_both_ends() {
        let first = Cursor::new(1).unwrap();
        assert_eq!(first.left().position(), 1);

        let last = Cursor::new(9).unwrap();
        assert_eq!(last.right().position(), 9);
    }

    #[test]
    fn cursor_rejects_out_of_range_positions() {
        assert_eq!(Cursor::new(0), Err(TimerError::CursorOutOfRange(0)));
        assert_eq!(Cursor::new(10), Err(TimerError::CursorOutOfRange(10)));
    }

    #[test]
    fn hours_step_ignores_magnitude() {
        assert_eq!(Field::Hours.step_seconds(1), 3600);
        assert_eq!(Field::Hours.step_seconds(10), 3600);
        assert_eq!(Field::Minutes.step_seconds(4), 240);
        assert_eq!(Field::Seconds.step_seconds(5), 5);
    }

    #[test]
    fn adjust_clamps_to_bounds() {
        let mut timers = TimerSet::ZERO;
        assert!(!timers.adjust(Slot::Timer1, -5));
        assert_eq!(timers.get(Slot::Timer1), 0);

        assert!(timers.adjust(Slot::Timer1, 100_000));
        assert_eq!(timers.get(Slot::Timer1), MAX_DURATION_SECS);
        assert!(!timers.adjust(Slot::Timer1, 1));
    }

    #[test]
    fn new_rejects_durations_over_a_day() {
        let err = TimerSet::new([0, MAX_DURATION_SECS + 1, 0]).unwrap_err();
        assert!(matches!(err, TimerError::DurationOutOfRange { slot: Slot::Timer1, .. }));
    }

    #[test]
    fn hms_splits_seconds() {
        assert_eq!(
            Hms::from_seconds(3_725),
            Hms { hours: 1, minutes: 2, seconds: 5 }
        );
        assert_eq!(Hms::from_seconds(MAX_DURATION_SECS).hours, 24);
    }
}
