//! Countdown and alarm controller.
//!
//! Provides [`CountdownController`], which runs the three timers from a
//! [`CountdownSession`], raises the alarm when a counting slot reaches zero,
//! and decides what a dismissal means for the rest of the session.
//!
//! # States
//!
//! ```text
//!            slot reaches zero
//!  Running ─────────────────────► Alarming
//!     ▲  │                           │
//!     │  │ SEL                       │ A/B, gesture or SEL,
//!     │  ▼                           │ secondaries still counting
//!  exit to configuration ◄───────────┤
//!  (current remaining)               │ secondaries exhausted
//!     ▲                              ▼
//!     └────────────── exit to configuration (original timers)
//! ```
//!
//! In `Alarming`, A or B (or covering the light sensor) stops the alarm and
//! leaves the retimer looping; SEL stops the alarm and switches the retimer
//! off for the rest of the session.

use crate::appliance::Peripherals;
use crate::display::{Display, Screen};
use crate::indicator::{AlarmAnimation, AlarmPattern, BLANK_FRAME, IndicatorStrip};
use crate::input::{ButtonMask, ButtonPad};
use crate::light::{LIGHT_WINDOW, LightAverage, LightSensor};
use crate::session::{CountdownSession, SlotReading};
use crate::time::TimeInstant;
use crate::tone::{ALARM_TONE, TonePlayer};
use crate::types::{SLOT_COUNT, Slot, TimerSet};

/// Which kind of timer raised the current alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmOwner {
    /// The retimer expired (possibly together with others).
    Retimer,
    /// A secondary timer expired.
    Other,
}

impl AlarmOwner {
    pub fn pattern(self) -> AlarmPattern {
        match self {
            AlarmOwner::Retimer => AlarmPattern::Retimer,
            AlarmOwner::Other => AlarmPattern::Timer,
        }
    }
}

/// Whether an alarm is sounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    Off,
    Active(AlarmOwner),
}

/// The controller's state, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownPhase {
    Running,
    Alarming,
}

/// Ways to silence an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dismissal {
    /// Stop the alarm; the retimer keeps looping. A, B or the light gesture.
    StopTimer,
    /// Stop the alarm and switch the retimer off. SEL.
    StopRetimer,
}

/// Result of one countdown poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownEvent {
    /// Stay in the countdown.
    Continue,

    /// Leave for the configuration screen, editing these timers.
    Exit(TimerSet),
}

/// Errors from explicit controller operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Description of the state the operation needs.
        expected: &'static str,
        /// The actual current state
        actual: CountdownPhase,
    },
}

impl core::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ControllerError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but countdown is {:?}",
                    expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ControllerError {}

/// Runs the countdown screen until the user leaves it.
#[derive(Debug, Clone)]
pub struct CountdownController<I: TimeInstant> {
    session: CountdownSession<I>,
    light: LightAverage<LIGHT_WINDOW>,
    prev_buttons: ButtonMask,
    alarm: AlarmState,
    animation: AlarmAnimation,
    last_drawn_second: Option<u64>,
}

impl<I: TimeInstant> CountdownController<I> {
    /// Starts counting down `timers` from `now`.
    pub fn start(timers: TimerSet, now: I) -> Self {
        Self {
            session: CountdownSession::start(timers, now),
            light: LightAverage::new(),
            prev_buttons: ButtonMask::NONE,
            alarm: AlarmState::Off,
            animation: AlarmAnimation::new(AlarmPattern::Timer),
            last_drawn_second: None,
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        match self.alarm {
            AlarmState::Off => CountdownPhase::Running,
            AlarmState::Active(_) => CountdownPhase::Alarming,
        }
    }

    pub fn alarm(&self) -> AlarmState {
        self.alarm
    }

    pub fn session(&self) -> &CountdownSession<I> {
        &self.session
    }

    pub fn readings(&self, now: I) -> [SlotReading; SLOT_COUNT] {
        self.session.readings(now)
    }

    /// Processes one poll: sensor, pad, expiry, dismissal, animation, redraw.
    pub fn poll<P, L, D, S, A>(
        &mut self,
        now: I,
        hw: &mut Peripherals<P, L, D, S, A>,
    ) -> CountdownEvent
    where
        P: ButtonPad,
        L: LightSensor,
        D: Display,
        S: IndicatorStrip,
        A: TonePlayer,
    {
        let light = self.light.push(hw.light.level());

        let buttons = hw.pad.pressed();
        let mut requested = None;
        if buttons != self.prev_buttons {
            self.prev_buttons = buttons;
            if buttons.any(ButtonMask::SELECT) {
                if self.alarm == AlarmState::Off {
                    let timers = self.session.snapshot(now);
                    #[cfg(feature = "defmt")]
                    defmt::info!("countdown paused for editing at {}", timers);
                    return CountdownEvent::Exit(timers);
                }
                requested = Some(Dismissal::StopRetimer);
            } else if buttons.any(ButtonMask::A | ButtonMask::B) {
                requested = Some(Dismissal::StopTimer);
            }
        }

        if self.session.any_expired(now) {
            self.trigger(now, hw);
        }

        if self.alarm != AlarmState::Off {
            let dismissal = match requested {
                Some(kind) => Some(kind),
                None if light.is_covered() => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("light gesture: {} below average {}", light.raw, light.average);
                    Some(Dismissal::StopTimer)
                }
                None => None,
            };

            match dismissal {
                Some(kind) => {
                    if let Ok(CountdownEvent::Exit(timers)) = self.dismiss(kind, now, hw) {
                        return CountdownEvent::Exit(timers);
                    }
                }
                None => {
                    if let Some(frame) = self.animation.advance() {
                        hw.strip.write(&frame);
                    }
                }
            }
        }

        self.redraw_on_second_boundary(now, &mut hw.display);
        CountdownEvent::Continue
    }

    /// Silences the active alarm.
    ///
    /// Returns `Exit` with the originally configured timers when neither
    /// secondary timer has anything left to count, `Continue` otherwise.
    ///
    /// # Errors
    /// * `InvalidState` - no alarm is active
    pub fn dismiss<P, L, D, S, A>(
        &mut self,
        kind: Dismissal,
        now: I,
        hw: &mut Peripherals<P, L, D, S, A>,
    ) -> Result<CountdownEvent, ControllerError>
    where
        S: IndicatorStrip,
        A: TonePlayer,
    {
        if self.alarm == AlarmState::Off {
            return Err(ControllerError::InvalidState {
                expected: "Alarming",
                actual: self.phase(),
            });
        }

        #[cfg(feature = "defmt")]
        defmt::info!("alarm dismissed: {}", kind);

        if kind == Dismissal::StopRetimer {
            self.session.deactivate(Slot::Retimer, now);
        }

        self.alarm = AlarmState::Off;
        hw.tone.stop();
        hw.strip.write(&BLANK_FRAME);

        if self.session.secondaries_exhausted() {
            Ok(CountdownEvent::Exit(self.session.original()))
        } else {
            Ok(CountdownEvent::Continue)
        }
    }

    /// Raises (or keeps) the alarm for the slots that just expired and rebases.
    fn trigger<P, L, D, S, A>(&mut self, now: I, hw: &mut Peripherals<P, L, D, S, A>)
    where
        D: Display,
        A: TonePlayer,
    {
        let readings = self.session.readings(now);
        hw.display.show(&Screen::countdown(&readings, true));
        self.last_drawn_second = Some(now.epoch_seconds());

        let retimer_expired = readings[Slot::Retimer.index()].is_expired();

        if self.alarm == AlarmState::Off {
            let owner = if retimer_expired {
                AlarmOwner::Retimer
            } else {
                AlarmOwner::Other
            };
            #[cfg(feature = "defmt")]
            defmt::info!("alarm raised by {}", owner);

            self.alarm = AlarmState::Active(owner);
            self.animation = AlarmAnimation::new(owner.pattern());
            hw.tone.start_loop(&ALARM_TONE);
        }

        // the retimer reloads on every trigger unless SEL switched it off
        self.session.rebase(now, Some(Slot::Retimer));
    }

    fn redraw_on_second_boundary<D: Display>(&mut self, now: I, display: &mut D) {
        let second = now.epoch_seconds();
        if self.last_drawn_second == Some(second) {
            return;
        }
        self.last_drawn_second = Some(second);

        let readings = self.session.readings(now);
        display.show(&Screen::countdown(&readings, second % 2 == 1));
    }
}
