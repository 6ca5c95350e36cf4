//! Configuration screen: edit three HH:MM:SS timers with the pad.
//!
//! LEFT/RIGHT move the cursor across the nine fields, UP/DOWN change the
//! field under it, START hands the timers over to the countdown. Holding a
//! direction repeats it with the [`Repeater`] acceleration curve, except on
//! hour fields which always move by exactly one hour.

use crate::display::Screen;
use crate::input::{ButtonMask, Repeater, StepEvent};
use crate::time::TimeInstant;
use crate::types::{Cursor, TimerSet};

/// Result of one configuration poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigEvent {
    /// Nothing visible changed.
    Unchanged,

    /// A value or the cursor moved; the screen should be redrawn.
    Redraw,

    /// START was pressed; count down these timers.
    Start(TimerSet),
}

/// Editor state for the configuration screen.
#[derive(Debug, Clone, Copy)]
pub struct ConfigController<I: TimeInstant> {
    timers: TimerSet,
    cursor: Cursor,
    repeater: Repeater<I>,
}

impl<I: TimeInstant> ConfigController<I> {
    /// Opens the editor on `timers` with the cursor on the retimer's seconds.
    pub fn new(timers: TimerSet) -> Self {
        Self {
            timers,
            cursor: Cursor::default(),
            repeater: Repeater::new(),
        }
    }

    pub fn timers(&self) -> TimerSet {
        self.timers
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The screen for the current values and cursor.
    pub fn screen(&self) -> Screen {
        Screen::configuration(&self.timers, self.cursor)
    }

    /// Processes one poll of the pad.
    pub fn poll(&mut self, buttons: ButtonMask, now: I) -> ConfigEvent {
        let Some(step) = self.repeater.poll(buttons, now) else {
            return ConfigEvent::Unchanged;
        };

        let changed = self.apply(step);

        if step.buttons.any(ButtonMask::START) {
            #[cfg(feature = "defmt")]
            defmt::info!("starting countdown with {}", self.timers);
            return ConfigEvent::Start(self.timers);
        }

        if changed {
            ConfigEvent::Redraw
        } else {
            ConfigEvent::Unchanged
        }
    }

    /// Applies a step to the cursor or the selected field. Returns true if anything changed.
    fn apply(&mut self, step: StepEvent) -> bool {
        let buttons = step.buttons;

        if buttons.any(ButtonMask::RIGHT) {
            return self.move_cursor(self.cursor.right());
        }
        if buttons.any(ButtonMask::LEFT) {
            return self.move_cursor(self.cursor.left());
        }
        if buttons.any(ButtonMask::UP | ButtonMask::DOWN) {
            let amount = self.cursor.field().step_seconds(step.magnitude) as i64;
            let delta = if buttons.any(ButtonMask::DOWN) { -amount } else { amount };
            return self.timers.adjust(self.cursor.slot(), delta);
        }

        false
    }

    fn move_cursor(&mut self, next: Cursor) -> bool {
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }
}
