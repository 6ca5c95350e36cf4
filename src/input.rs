//! Button pad abstraction and the press-and-hold repeater.
//!
//! The pad is polled, never interrupt driven. [`Repeater`] turns the raw
//! polled mask into discrete [`StepEvent`]s: one step when a new combination
//! appears, then accelerating steps while it stays held.

use crate::time::{TimeInstant, millis_between};
use core::ops::BitOr;

/// Time a combination must stay held before the next repeat step.
pub const REPEAT_INTERVAL_MS: u64 = 500;

/// Repeat counter ceiling; the curve is flat from here on.
const MAX_REPEAT_COUNT: u8 = 4;

/// Bitmask of the eight pad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);
    pub const LEFT: ButtonMask = ButtonMask(128);
    pub const UP: ButtonMask = ButtonMask(64);
    pub const DOWN: ButtonMask = ButtonMask(32);
    pub const RIGHT: ButtonMask = ButtonMask(16);
    pub const SELECT: ButtonMask = ButtonMask(8);
    pub const START: ButtonMask = ButtonMask(4);
    pub const A: ButtonMask = ButtonMask(2);
    pub const B: ButtonMask = ButtonMask(1);

    /// Wraps a raw mask as read from the pad shift register.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        ButtonMask(bits)
    }

    /// True if any button in `buttons` is pressed.
    #[inline]
    pub const fn any(self, buttons: ButtonMask) -> bool {
        self.0 & buttons.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

/// Trait for abstracting the button pad hardware.
pub trait ButtonPad {
    /// Returns the buttons currently held down.
    fn pressed(&mut self) -> ButtonMask;
}

/// One discrete, magnitude-weighted input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepEvent {
    /// Buttons held when the step fired.
    pub buttons: ButtonMask,

    /// Step multiplier: 1 on press, then 4, 5, 5, 10, 10, ... while held.
    pub magnitude: u32,
}

/// Press-and-hold repeater with an accelerating step curve.
///
/// Call [`poll`](Repeater::poll) once per loop iteration; it never blocks.
#[derive(Debug, Clone, Copy)]
pub struct Repeater<I: TimeInstant> {
    prev: ButtonMask,
    repeat_count: u8,
    armed_at: Option<I>,
}

impl<I: TimeInstant> Repeater<I> {
    /// Creates a repeater that treats "nothing pressed" as the previous state.
    pub fn new() -> Self {
        Self {
            prev: ButtonMask::NONE,
            repeat_count: 0,
            armed_at: None,
        }
    }

    /// Feeds the current mask and returns a step event if one is due.
    pub fn poll(&mut self, buttons: ButtonMask, now: I) -> Option<StepEvent> {
        let changed = buttons != self.prev;
        self.prev = buttons;

        if self.repeat_count == 0 {
            if !changed {
                return None;
            }
            self.repeat_count = 1;
            self.armed_at = Some(now);
            return Some(StepEvent { buttons, magnitude: 1 });
        }

        if changed {
            self.repeat_count = 0;
            self.armed_at = None;
            return None;
        }

        let due = self
            .armed_at
            .is_some_and(|armed| millis_between(armed, now) >= REPEAT_INTERVAL_MS);
        if !due {
            return None;
        }

        let magnitude = match self.repeat_count {
            1 => 4,
            2 | 3 => 5,
            _ => 10,
        };
        self.repeat_count = (self.repeat_count + 1).min(MAX_REPEAT_COUNT);
        self.armed_at = Some(now);
        Some(StepEvent { buttons, magnitude })
    }

    /// Number of steps emitted for the current hold, saturating at 4.
    pub fn repeat_count(&self) -> u8 {
        self.repeat_count
    }
}

impl<I: TimeInstant> Default for Repeater<I> {
    fn default() -> Self {
        Self::new()
    }
}
