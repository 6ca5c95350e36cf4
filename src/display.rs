//! Screen descriptions handed to the display renderer.
//!
//! The core never draws pixels. It builds a [`Screen`] of positioned
//! [`TextRun`]s and passes it to a [`Display`] implementation, which owns
//! fonts, colours and the panel.

use crate::session::SlotReading;
use crate::types::{Cursor, Field, Hms, SLOT_COUNT, Slot, TimerSet};
use core::fmt::Write;
use heapless::{String, Vec};

/// Longest run the core produces: `"24:00:00"`.
pub const RUN_CAPACITY: usize = 8;

/// Runs per configuration row: hours, `:`, minutes, `:`, seconds.
const CONFIG_RUNS_PER_ROW: usize = 5;

/// Maximum runs on any screen.
pub const SCREEN_CAPACITY: usize = SLOT_COUNT * CONFIG_RUNS_PER_ROW;

/// Text of a single run.
pub type RunText = String<RUN_CAPACITY>;

/// How a run should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextStyle {
    /// Plain configuration text.
    Normal,

    /// The configuration field under the cursor.
    Selected,

    /// A countdown that is running.
    Active,

    /// A timer that is not counting (configured to zero or exhausted). Rendered disabled.
    Idle,

    /// A countdown that has just reached zero.
    Expired,
}

/// A piece of text at a row and character column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: RunText,
    pub row: u8,
    pub column: u8,
    pub style: TextStyle,
}

/// Which screen a [`Screen`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenKind {
    Configuration,
    Countdown,
}

/// A complete screen, replaced atomically on every [`Display::show`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    kind: ScreenKind,
    runs: Vec<TextRun, SCREEN_CAPACITY>,
}

impl Screen {
    fn empty(kind: ScreenKind) -> Self {
        Self { kind, runs: Vec::new() }
    }

    fn push(&mut self, text: RunText, row: u8, column: u8, style: TextStyle) {
        let pushed = self.runs.push(TextRun { text, row, column, style });
        debug_assert!(pushed.is_ok(), "screen capacity exceeded");
    }

    /// Configuration screen: one `H:MM:SS` row per timer, the field under the cursor highlighted.
    pub fn configuration(timers: &TimerSet, cursor: Cursor) -> Self {
        let mut screen = Self::empty(ScreenKind::Configuration);

        for slot in Slot::ALL {
            let hms = Hms::from_seconds(timers.get(slot));
            let row = slot.index() as u8;
            let style_for = |field: Field| {
                if cursor.slot() == slot && cursor.field() == field {
                    TextStyle::Selected
                } else {
                    TextStyle::Normal
                }
            };

            let mut column = 0u8;
            let mut put = |screen: &mut Screen, text: RunText, style: TextStyle| {
                let width = text.len() as u8;
                screen.push(text, row, column, style);
                column += width;
            };

            put(&mut screen, number(hms.hours, false), style_for(Field::Hours));
            put(&mut screen, literal(":"), TextStyle::Normal);
            put(&mut screen, number(hms.minutes as u32, true), style_for(Field::Minutes));
            put(&mut screen, literal(":"), TextStyle::Normal);
            put(&mut screen, number(hms.seconds as u32, true), style_for(Field::Seconds));
        }

        screen
    }

    /// Countdown screen: one run per timer, the separator shown or blanked.
    pub fn countdown(readings: &[SlotReading; SLOT_COUNT], separator_visible: bool) -> Self {
        let mut screen = Self::empty(ScreenKind::Countdown);

        for slot in Slot::ALL {
            let reading = readings[slot.index()];
            let style = match reading {
                SlotReading::Idle => TextStyle::Idle,
                _ if reading.is_expired() => TextStyle::Expired,
                _ => TextStyle::Active,
            };
            let separator = if separator_visible { ':' } else { ' ' };
            let text = format_hms(reading.seconds(), separator);
            screen.push(text, slot.index() as u8, 0, style);
        }

        screen
    }

    pub fn kind(&self) -> ScreenKind {
        self.kind
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Concatenated text of one row, for renderers that draw whole lines.
    pub fn row_text(&self, row: u8) -> String<RUN_CAPACITY> {
        let mut line = String::new();
        for run in self.runs.iter().filter(|run| run.row == row) {
            // Rows are built from runs whose widths sum to at most RUN_CAPACITY.
            let _ = line.push_str(&run.text);
        }
        line
    }
}

/// Trait for abstracting the display renderer.
pub trait Display {
    /// Replaces whatever is on the panel with `screen`.
    fn show(&mut self, screen: &Screen);
}

/// Formats whole seconds as `H:MM:SS`, using `separator` between fields.
///
/// Hours are not padded; minutes and seconds always take two digits.
pub fn format_hms(seconds: u32, separator: char) -> RunText {
    let hms = Hms::from_seconds(seconds);
    let mut text = RunText::new();
    // Durations are capped at 24 h, so the text never exceeds RUN_CAPACITY.
    let _ = write!(
        text,
        "{}{}{:02}{}{:02}",
        hms.hours, separator, hms.minutes, separator, hms.seconds
    );
    text
}

fn number(value: u32, padded: bool) -> RunText {
    let mut text = RunText::new();
    let _ = if padded {
        write!(text, "{:02}", value)
    } else {
        write!(text, "{}", value)
    };
    text
}

fn literal(s: &str) -> RunText {
    let mut text = RunText::new();
    let _ = text.push_str(s);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_minutes_and_seconds_only() {
        assert_eq!(format_hms(0, ':').as_str(), "0:00:00");
        assert_eq!(format_hms(65, ':').as_str(), "0:01:05");
        assert_eq!(format_hms(3_661, ':').as_str(), "1:01:01");
        assert_eq!(format_hms(86_400, ':').as_str(), "24:00:00");
    }

    #[test]
    fn format_blanks_separator() {
        assert_eq!(format_hms(3_725, ' ').as_str(), "1 02 05");
    }

    #[test]
    fn configuration_highlights_only_cursor_field() {
        let timers = TimerSet::new([3_725, 0, 59]).unwrap();
        let cursor = Cursor::new(5).unwrap();
        let screen = Screen::configuration(&timers, cursor);

        assert_eq!(screen.kind(), ScreenKind::Configuration);
        assert_eq!(screen.runs().len(), SCREEN_CAPACITY);

        let selected: heapless::Vec<&TextRun, 4> = screen
            .runs()
            .iter()
            .filter(|run| run.style == TextStyle::Selected)
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].row, 1);
        assert_eq!(selected[0].text.as_str(), "00");
        assert_eq!(selected[0].column, 2);
    }

    #[test]
    fn configuration_rows_read_as_hms() {
        let timers = TimerSet::new([3_725, 0, 59]).unwrap();
        let screen = Screen::configuration(&timers, Cursor::default());

        assert_eq!(screen.row_text(0).as_str(), "1:02:05");
        assert_eq!(screen.row_text(1).as_str(), "0:00:00");
        assert_eq!(screen.row_text(2).as_str(), "0:00:59");
    }

    #[test]
    fn countdown_styles_follow_readings() {
        let readings = [
            SlotReading::Idle,
            SlotReading::Counting { millis: 4_200 },
            SlotReading::Counting { millis: 0 },
        ];
        let screen = Screen::countdown(&readings, false);
        let runs = screen.runs();

        assert_eq!(runs[0].style, TextStyle::Idle);
        assert_eq!(runs[0].text.as_str(), "0 00 00");
        assert_eq!(runs[1].style, TextStyle::Active);
        assert_eq!(runs[1].text.as_str(), "0 00 05");
        assert_eq!(runs[2].style, TextStyle::Expired);
    }
}
