//! The outer state machine: configuration screen ⇄ countdown.
//!
//! [`Appliance`] owns the peripherals and borrows the clock. It never sleeps;
//! the driver loop calls [`Appliance::tick`] and waits for the returned
//! duration before calling it again.

use crate::configure::{ConfigController, ConfigEvent};
use crate::countdown::{CountdownController, CountdownEvent, CountdownPhase};
use crate::display::Display;
use crate::indicator::IndicatorStrip;
use crate::input::ButtonPad;
use crate::light::LightSensor;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::tone::TonePlayer;
use crate::types::TimerSet;

/// The appliance's hardware, acquired once at startup.
#[derive(Debug)]
pub struct Peripherals<P, L, D, S, A> {
    pub pad: P,
    pub light: L,
    pub display: D,
    pub strip: S,
    pub tone: A,
}

/// How long the driver should wait between ticks in each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollIntervals {
    /// Editing timers. Short enough for the 500 ms repeat to feel even.
    pub configuration_ms: u64,

    /// Counting down with no alarm.
    pub running_ms: u64,

    /// Alarm sounding; drives the light animation.
    pub alarming_ms: u64,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            configuration_ms: 50,
            running_ms: 1_000,
            alarming_ms: 300,
        }
    }
}

/// Which screen the appliance is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApplianceMode {
    Configuration,
    Running,
    Alarming,
}

#[derive(Debug, Clone)]
enum Mode<I: TimeInstant> {
    Configuration(ConfigController<I>),
    Countdown(CountdownController<I>),
}

/// A complete countdown appliance.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `P`, `L`, `D`, `S`, `A` - Pad, light sensor, display, strip and tone implementations
pub struct Appliance<'t, I, T, P, L, D, S, A>
where
    I: TimeInstant,
    T: TimeSource<I>,
{
    time_source: &'t T,
    hw: Peripherals<P, L, D, S, A>,
    mode: Mode<I>,
    intervals: PollIntervals,
}

impl<'t, I, T, P, L, D, S, A> Appliance<'t, I, T, P, L, D, S, A>
where
    I: TimeInstant,
    T: TimeSource<I>,
    P: ButtonPad,
    L: LightSensor,
    D: Display,
    S: IndicatorStrip,
    A: TonePlayer,
{
    /// Creates an appliance on the configuration screen with all timers at zero.
    pub fn new(hw: Peripherals<P, L, D, S, A>, time_source: &'t T) -> Self {
        Self::with_timers(hw, time_source, TimerSet::ZERO)
    }

    /// Creates an appliance on the configuration screen with `timers` preloaded.
    pub fn with_timers(
        hw: Peripherals<P, L, D, S, A>,
        time_source: &'t T,
        timers: TimerSet,
    ) -> Self {
        let mut appliance = Self {
            time_source,
            hw,
            mode: Mode::Configuration(ConfigController::new(timers)),
            intervals: PollIntervals::default(),
        };
        appliance.enter_configuration(timers);
        appliance
    }

    /// Replaces the default poll intervals.
    pub fn with_intervals(mut self, intervals: PollIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// Runs one iteration of the control loop.
    ///
    /// Returns how long to wait before the next call.
    pub fn tick(&mut self) -> I::Duration {
        let now = self.time_source.now();

        if let Mode::Configuration(editor) = &mut self.mode {
            match editor.poll(self.hw.pad.pressed(), now) {
                ConfigEvent::Unchanged => {}
                ConfigEvent::Redraw => self.hw.display.show(&editor.screen()),
                ConfigEvent::Start(timers) => {
                    self.mode = Mode::Countdown(CountdownController::start(timers, now));
                }
            }
        }

        if let Mode::Countdown(countdown) = &mut self.mode {
            if let CountdownEvent::Exit(timers) = countdown.poll(now, &mut self.hw) {
                self.enter_configuration(timers);
            }
        }

        I::Duration::from_millis(self.interval_ms())
    }

    /// The current screen and alarm status.
    pub fn mode(&self) -> ApplianceMode {
        match &self.mode {
            Mode::Configuration(_) => ApplianceMode::Configuration,
            Mode::Countdown(countdown) => match countdown.phase() {
                CountdownPhase::Running => ApplianceMode::Running,
                CountdownPhase::Alarming => ApplianceMode::Alarming,
            },
        }
    }

    /// The configuration editor, if on the configuration screen.
    pub fn configuration(&self) -> Option<&ConfigController<I>> {
        match &self.mode {
            Mode::Configuration(editor) => Some(editor),
            Mode::Countdown(_) => None,
        }
    }

    /// The countdown controller, if counting down.
    pub fn countdown(&self) -> Option<&CountdownController<I>> {
        match &self.mode {
            Mode::Countdown(countdown) => Some(countdown),
            Mode::Configuration(_) => None,
        }
    }

    pub fn peripherals(&self) -> &Peripherals<P, L, D, S, A> {
        &self.hw
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<P, L, D, S, A> {
        &mut self.hw
    }

    /// Tears the appliance down, handing the peripherals back.
    pub fn release(self) -> Peripherals<P, L, D, S, A> {
        self.hw
    }

    fn enter_configuration(&mut self, timers: TimerSet) {
        #[cfg(feature = "defmt")]
        defmt::info!("configuration: {}", timers);

        let editor = ConfigController::new(timers);
        self.hw.display.show(&editor.screen());
        self.mode = Mode::Configuration(editor);
    }

    fn interval_ms(&self) -> u64 {
        match self.mode() {
            ApplianceMode::Configuration => self.intervals.configuration_ms,
            ApplianceMode::Running => self.intervals.running_ms,
            ApplianceMode::Alarming => self.intervals.alarming_ms,
        }
    }
}
