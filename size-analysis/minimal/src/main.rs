#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;
use retimer::{
    Appliance, ButtonMask, ButtonPad, Display, IndicatorStrip, LightSensor, Peripherals, Screen,
    StripFrame, TimeDuration, TimeInstant, TimeSource, TimerSet, TonePlayer,
};

// ============================================================================
// Minimal Time Types
// ============================================================================

/// Minimal 32-bit millisecond duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration32(u32);

impl TimeDuration for Duration32 {
    const ZERO: Self = Duration32(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        Duration32(millis as u32)
    }

    fn saturating_sub(self, other: Self) -> Self {
        Duration32(self.0.saturating_sub(other.0))
    }
}

/// Minimal 32-bit millisecond instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant32(u32);

impl TimeInstant for Instant32 {
    type Duration = Duration32;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Duration32(self.0.saturating_sub(earlier.0))
    }

    fn epoch_seconds(&self) -> u64 {
        (self.0 / 1000) as u64
    }
}

// ============================================================================
// Minimal Peripherals
// ============================================================================

/// Zero-size peripherals for measuring library overhead
pub struct MinimalPad;

impl ButtonPad for MinimalPad {
    fn pressed(&mut self) -> ButtonMask {
        ButtonMask::from_bits(core::hint::black_box(0))
    }
}

pub struct MinimalLight;

impl LightSensor for MinimalLight {
    fn level(&mut self) -> u16 {
        core::hint::black_box(1000)
    }
}

pub struct MinimalDisplay;

impl Display for MinimalDisplay {
    fn show(&mut self, screen: &Screen) {
        core::hint::black_box(screen);
    }
}

pub struct MinimalStrip;

impl IndicatorStrip for MinimalStrip {
    fn write(&mut self, frame: &StripFrame) {
        core::hint::black_box(frame);
    }
}

pub struct MinimalTone;

impl TonePlayer for MinimalTone {
    fn start_loop(&mut self, samples: &'static [u16]) {
        core::hint::black_box(samples);
    }

    fn stop(&mut self) {
        core::hint::black_box(());
    }
}

// ============================================================================
// Minimal TimeSource Implementation
// ============================================================================

pub struct MinimalTimeSource;

impl TimeSource<Instant32> for MinimalTimeSource {
    fn now(&self) -> Instant32 {
        core::hint::black_box(Instant32(0))
    }
}

// ============================================================================
// Appliance Usage
// ============================================================================

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn run_appliance() {
    let time_source = MinimalTimeSource;
    let hw = Peripherals {
        pad: MinimalPad,
        light: MinimalLight,
        display: MinimalDisplay,
        strip: MinimalStrip,
        tone: MinimalTone,
    };

    let timers = TimerSet::saturating([600, 1_500, 3_600]);
    let mut appliance: Appliance<
        '_,
        Instant32,
        MinimalTimeSource,
        MinimalPad,
        MinimalLight,
        MinimalDisplay,
        MinimalStrip,
        MinimalTone,
    > = Appliance::with_timers(hw, &time_source, timers);

    for _ in 0..4 {
        let wait = appliance.tick();
        core::hint::black_box(wait);
    }
    core::hint::black_box(appliance);
}

#[entry]
fn main() -> ! {
    run_appliance();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
