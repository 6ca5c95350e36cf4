#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Appliance`**: The outer loop, switching between the configuration screen and the countdown
//! - **`ConfigController`**: Edits three HH:MM:SS timers with press-and-hold acceleration
//! - **`CountdownController`**: Runs the timers, raises the alarm and handles dismissal
//! - **`CountdownSession`**: Rebase-relative remaining-time arithmetic
//! - **`Repeater`**: Turns the polled button mask into accelerating step events
//! - **`LightAverage`**: Moving average behind the cover-the-sensor dismissal gesture
//! - **`AlarmAnimation`**: Three-phase light pattern shown while the alarm sounds
//! - **`ButtonPad`**, **`LightSensor`**, **`Display`**, **`IndicatorStrip`**, **`TonePlayer`**:
//!   Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! The library never sleeps. Call [`Appliance::tick`] from your main loop (or a
//! timer interrupt, or a test harness) and wait for the duration it returns.

pub mod time;
pub mod types;
pub mod input;
pub mod light;
pub mod display;
pub mod indicator;
pub mod tone;
pub mod session;
pub mod configure;
pub mod countdown;
pub mod appliance;

pub use appliance::{Appliance, ApplianceMode, Peripherals, PollIntervals};
pub use configure::{ConfigController, ConfigEvent};
pub use countdown::{
    AlarmOwner, AlarmState, ControllerError, CountdownController, CountdownEvent, CountdownPhase,
    Dismissal,
};
pub use display::{Display, Screen, ScreenKind, TextRun, TextStyle, format_hms};
pub use indicator::{
    AlarmAnimation, AlarmPattern, BLANK_FRAME, IndicatorStrip, LED_COUNT, StripFrame,
};
pub use input::{ButtonMask, ButtonPad, Repeater, StepEvent};
pub use light::{GESTURE_RATIO, LIGHT_WINDOW, LightAverage, LightSample, LightSensor};
pub use session::{CountdownSession, SlotReading};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use tone::{ALARM_TONE, TonePlayer};
pub use types::{Cursor, Field, Hms, MAX_DURATION_SECS, SLOT_COUNT, Slot, TimerError, TimerSet};

// Re-export Srgb from palette for implementors of IndicatorStrip
pub use palette::Srgb;
