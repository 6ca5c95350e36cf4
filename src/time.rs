//! Time abstraction traits for platform-agnostic timing.
//!
//! The appliance needs two things from a clock: elapsed time between two
//! instants (countdown arithmetic, button repeat deadlines) and the whole
//! second an instant falls in (redraw boundary, blinking separator).

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations should saturate to zero if `earlier` is later than `self`.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Whole seconds elapsed on the clock's own timeline.
    ///
    /// Only differences and parity of this value are used, so the epoch may
    /// be boot time or a wall-clock epoch.
    fn epoch_seconds(&self) -> u64;
}

/// Milliseconds elapsed from `earlier` to `later`.
#[inline]
pub(crate) fn millis_between<I: TimeInstant>(earlier: I, later: I) -> u64 {
    later.duration_since(earlier).as_millis()
}
