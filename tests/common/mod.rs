//! Shared test infrastructure for retimer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use retimer::{
    ButtonMask, ButtonPad, Display, IndicatorStrip, LightSensor, Peripherals, Screen, StripFrame,
    TimeDuration, TimeInstant, TimeSource, TimerSet, TonePlayer,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing (milliseconds since boot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn epoch_seconds(&self) -> u64 {
        self.0 / 1000
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Peripherals
// ============================================================================

/// Pad whose held buttons are set directly by the test
#[derive(Debug, Default)]
pub struct MockPad {
    pub held: ButtonMask,
}

impl ButtonPad for MockPad {
    fn pressed(&mut self) -> ButtonMask {
        self.held
    }
}

/// Light sensor returning a fixed level until changed
#[derive(Debug)]
pub struct MockLight {
    pub level: u16,
}

impl LightSensor for MockLight {
    fn level(&mut self) -> u16 {
        self.level
    }
}

/// Display that records every screen shown
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub screens: Vec<Screen>,
}

impl MockDisplay {
    pub fn last(&self) -> &Screen {
        self.screens.last().expect("nothing drawn yet")
    }
}

impl Display for MockDisplay {
    fn show(&mut self, screen: &Screen) {
        self.screens.push(screen.clone());
    }
}

/// Strip that records every frame written
#[derive(Debug, Default)]
pub struct MockStrip {
    pub frames: Vec<StripFrame>,
}

impl IndicatorStrip for MockStrip {
    fn write(&mut self, frame: &StripFrame) {
        self.frames.push(*frame);
    }
}

/// Speaker that tracks whether a tone is looping
#[derive(Debug, Default)]
pub struct MockTone {
    pub playing: bool,
    pub starts: usize,
    pub stops: usize,
}

impl TonePlayer for MockTone {
    fn start_loop(&mut self, samples: &'static [u16]) {
        assert!(!samples.is_empty());
        self.playing = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.stops += 1;
    }
}

pub type TestPeripherals = Peripherals<MockPad, MockLight, MockDisplay, MockStrip, MockTone>;

/// Fresh mock peripherals with a steadily lit light sensor
pub fn peripherals() -> TestPeripherals {
    Peripherals {
        pad: MockPad::default(),
        light: MockLight { level: 1000 },
        display: MockDisplay::default(),
        strip: MockStrip::default(),
        tone: MockTone::default(),
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn timers(seconds: [u32; 3]) -> TimerSet {
    TimerSet::new(seconds).unwrap()
}

pub fn at(millis: u64) -> TestInstant {
    TestInstant(millis)
}
