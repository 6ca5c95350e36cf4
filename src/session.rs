//! Countdown arithmetic for one run of the three timers.
//!
//! Remaining time is never stored. It is derived on demand from the rebase
//! instant, the working durations and the current instant, so it cannot drift
//! from the clock. The working durations only change at a rebase, when the
//! origin moves to "now" and every slot takes its just-computed remaining
//! (or its configured value, for a slot being restarted).

use crate::time::{TimeInstant, millis_between};
use crate::types::{SLOT_COUNT, Slot, TimerSet};

const MILLIS_PER_SECOND: u64 = 1_000;

/// What a slot shows at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotReading {
    /// Not counting: configured to zero, exhausted, or switched off. Never alarms.
    Idle,

    /// Counting down, with this much time left.
    Counting { millis: u64 },
}

impl SlotReading {
    /// Whole seconds left, rounded up so `0` only shows once the slot has expired.
    pub fn seconds(self) -> u32 {
        match self {
            SlotReading::Idle => 0,
            SlotReading::Counting { millis } => millis.div_ceil(MILLIS_PER_SECOND) as u32,
        }
    }

    /// True for a counting slot that has reached zero.
    pub fn is_expired(self) -> bool {
        matches!(self, SlotReading::Counting { millis: 0 })
    }

    pub fn is_idle(self) -> bool {
        self == SlotReading::Idle
    }
}

/// Rebase-relative countdown state for the three slots.
#[derive(Debug, Clone, Copy)]
pub struct CountdownSession<I: TimeInstant> {
    original: TimerSet,
    working_ms: [u64; SLOT_COUNT],
    stopped: [bool; SLOT_COUNT],
    rebase_time: I,
}

impl<I: TimeInstant> CountdownSession<I> {
    /// Starts every slot from `timers` at `now`.
    pub fn start(timers: TimerSet, now: I) -> Self {
        Self {
            original: timers,
            working_ms: timers.as_array().map(|secs| secs as u64 * MILLIS_PER_SECOND),
            stopped: [false; SLOT_COUNT],
            rebase_time: now,
        }
    }

    /// The durations the user configured before starting.
    pub fn original(&self) -> TimerSet {
        self.original
    }

    /// Origin of the current elapsed-time computation.
    pub fn rebase_time(&self) -> I {
        self.rebase_time
    }

    /// Reading of `slot` at `now`.
    pub fn reading(&self, slot: Slot, now: I) -> SlotReading {
        match self.working_ms[slot.index()] {
            0 => SlotReading::Idle,
            working => {
                let elapsed = millis_between(self.rebase_time, now);
                SlotReading::Counting {
                    millis: working.saturating_sub(elapsed),
                }
            }
        }
    }

    /// Readings of all slots at `now`, in slot order.
    pub fn readings(&self, now: I) -> [SlotReading; SLOT_COUNT] {
        Slot::ALL.map(|slot| self.reading(slot, now))
    }

    /// True if any counting slot has reached zero at `now`.
    pub fn any_expired(&self, now: I) -> bool {
        Slot::ALL.iter().any(|&slot| self.reading(slot, now).is_expired())
    }

    /// Moves the origin to `now`.
    ///
    /// `restart` is reset to its configured duration unless it was switched
    /// off with [`deactivate`](Self::deactivate); every other slot keeps
    /// exactly the time it had left, so nothing is lost or gained.
    pub fn rebase(&mut self, now: I, restart: Option<Slot>) {
        for slot in Slot::ALL {
            let working = if restart == Some(slot) && !self.is_stopped(slot) {
                self.original.get(slot) as u64 * MILLIS_PER_SECOND
            } else {
                match self.reading(slot, now) {
                    SlotReading::Idle => 0,
                    SlotReading::Counting { millis } => millis,
                }
            };
            self.working_ms[slot.index()] = working;
        }
        self.rebase_time = now;
    }

    /// Rebases at `now` and switches `slot` off for the rest of the session.
    pub fn deactivate(&mut self, slot: Slot, now: I) {
        self.rebase(now, None);
        self.working_ms[slot.index()] = 0;
        self.stopped[slot.index()] = true;
    }

    /// True once `slot` has been switched off for this session.
    pub fn is_stopped(&self, slot: Slot) -> bool {
        self.stopped[slot.index()]
    }

    /// True once neither secondary timer has time left to count.
    pub fn secondaries_exhausted(&self) -> bool {
        self.working_ms[Slot::Timer1.index()] == 0 && self.working_ms[Slot::Timer2.index()] == 0
    }

    /// Remaining time of every slot as whole seconds, idle slots as zero.
    pub fn snapshot(&self, now: I) -> TimerSet {
        TimerSet::saturating(self.readings(now).map(SlotReading::seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeDuration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Ms(u64);

    impl TimeDuration for Ms {
        const ZERO: Self = Ms(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Ms(millis)
        }

        fn saturating_sub(self, other: Self) -> Self {
            Ms(self.0.saturating_sub(other.0))
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct At(u64);

    impl TimeInstant for At {
        type Duration = Ms;

        fn duration_since(&self, earlier: Self) -> Ms {
            Ms(self.0.saturating_sub(earlier.0))
        }

        fn epoch_seconds(&self) -> u64 {
            self.0 / 1000
        }
    }

    fn timers(secs: [u32; 3]) -> TimerSet {
        TimerSet::new(secs).unwrap()
    }

    #[test]
    fn zero_slots_are_idle() {
        let session = CountdownSession::start(timers([0, 5, 0]), At(0));
        assert_eq!(session.reading(Slot::Retimer, At(0)), SlotReading::Idle);
        assert_eq!(session.reading(Slot::Timer2, At(99_000)), SlotReading::Idle);
    }

    #[test]
    fn remaining_counts_down_one_second_per_second() {
        let session = CountdownSession::start(timers([0, 10, 0]), At(1_000));
        for elapsed in 0..=10u64 {
            let reading = session.reading(Slot::Timer1, At(1_000 + elapsed * 1_000));
            assert_eq!(reading.seconds() as u64, 10 - elapsed);
        }
        assert!(session.reading(Slot::Timer1, At(11_000)).is_expired());
        assert!(session.reading(Slot::Timer1, At(60_000)).is_expired());
    }

    #[test]
    fn partial_seconds_round_up() {
        let session = CountdownSession::start(timers([0, 5, 0]), At(0));
        assert_eq!(session.reading(Slot::Timer1, At(4_001)).seconds(), 1);
        assert!(!session.reading(Slot::Timer1, At(4_999)).is_expired());
    }

    #[test]
    fn rebase_keeps_remaining_of_other_slots() {
        let mut session = CountdownSession::start(timers([10, 20, 35]), At(0));
        let before = session.readings(At(10_250));

        session.rebase(At(10_250), Some(Slot::Retimer));
        let after = session.readings(At(10_250));

        assert_eq!(after[Slot::Retimer.index()], SlotReading::Counting { millis: 10_000 });
        assert_eq!(after[Slot::Timer1.index()], before[Slot::Timer1.index()]);
        assert_eq!(after[Slot::Timer2.index()], before[Slot::Timer2.index()]);
        assert_eq!(session.rebase_time(), At(10_250));
    }

    #[test]
    fn expired_secondary_becomes_idle_after_rebase() {
        let mut session = CountdownSession::start(timers([0, 5, 0]), At(0));
        assert!(session.any_expired(At(5_000)));

        session.rebase(At(5_000), Some(Slot::Retimer));
        assert!(session.reading(Slot::Timer1, At(5_000)).is_idle());
        assert!(session.secondaries_exhausted());
        assert_eq!(session.original(), timers([0, 5, 0]));
    }

    #[test]
    fn deactivate_switches_slot_off() {
        let mut session = CountdownSession::start(timers([10, 20, 0]), At(0));
        session.rebase(At(10_000), Some(Slot::Retimer));
        session.deactivate(Slot::Retimer, At(10_400));

        assert!(session.reading(Slot::Retimer, At(30_000)).is_idle());
        assert_eq!(
            session.reading(Slot::Timer1, At(10_400)),
            SlotReading::Counting { millis: 9_600 }
        );
        assert!(!session.secondaries_exhausted());
    }

    #[test]
    fn stopped_slot_ignores_restart() {
        let mut session = CountdownSession::start(timers([10, 20, 0]), At(0));
        session.deactivate(Slot::Retimer, At(10_000));
        assert!(session.is_stopped(Slot::Retimer));

        session.rebase(At(20_000), Some(Slot::Retimer));
        assert!(session.reading(Slot::Retimer, At(20_000)).is_idle());
        assert!(!session.is_stopped(Slot::Timer1));
    }

    #[test]
    fn restart_while_counting_reloads_configured_value() {
        let mut session = CountdownSession::start(timers([15, 20, 0]), At(0));
        session.rebase(At(15_000), Some(Slot::Retimer));
        session.rebase(At(20_000), Some(Slot::Retimer));

        assert_eq!(
            session.reading(Slot::Retimer, At(20_000)),
            SlotReading::Counting { millis: 15_000 }
        );
        assert!(session.reading(Slot::Timer1, At(20_000)).is_idle());
    }

    #[test]
    fn snapshot_reports_whole_seconds() {
        let session = CountdownSession::start(timers([90, 0, 7]), At(0));
        assert_eq!(session.snapshot(At(2_500)), timers([88, 0, 5]));
    }
}
