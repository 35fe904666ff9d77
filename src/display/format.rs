//! Clock-face formatting for the timer display

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound applied to minutes and seconds before rendering.
///
/// This is inclusive, so a caller passing exactly 60 sees "60" rather than a
/// carry into the next unit. Likely an off-by-one, kept because rendered
/// output depends on it.
pub const MAX_CLOCK_VALUE: i64 = 60;

/// Lower bound applied to hours, minutes and seconds.
pub const MIN_CLOCK_VALUE: i64 = 0;

/// Hours, minutes and seconds as shown on the display, already clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayFields {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DisplayFields {
    /// Clamp raw fields into displayable range. Out-of-range values saturate,
    /// they never wrap into the neighbouring unit.
    pub fn clamped(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours: hours.max(MIN_CLOCK_VALUE),
            minutes: minutes.clamp(MIN_CLOCK_VALUE, MAX_CLOCK_VALUE),
            seconds: seconds.clamp(MIN_CLOCK_VALUE, MAX_CLOCK_VALUE),
        }
    }

    /// Break a second count into hours, minutes in the hour and seconds in
    /// the minute. Negative totals read as zero.
    pub fn from_total_seconds(total: i64) -> Self {
        let total = total.max(0);
        Self {
            hours: total / 3600,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    fn hours_fragment(&self) -> String {
        if self.hours <= 0 {
            String::new()
        } else {
            format!("{}:", self.hours)
        }
    }

    fn minutes_fragment(&self) -> String {
        if self.minutes <= 0 && self.hours <= 0 {
            "0:".to_string()
        } else if self.minutes <= 9 && self.hours > 0 {
            format!("0{}:", self.minutes)
        } else {
            format!("{}:", self.minutes)
        }
    }

    fn seconds_fragment(&self) -> String {
        if self.seconds <= 9 {
            format!("0{}", self.seconds)
        } else {
            self.seconds.to_string()
        }
    }
}

impl fmt::Display for DisplayFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.hours_fragment(),
            self.minutes_fragment(),
            self.seconds_fragment()
        )
    }
}

/// Render hours, minutes and seconds as `H:MM:SS`, or `M:SS` without hours.
pub fn format_clock(hours: i64, minutes: i64, seconds: i64) -> String {
    DisplayFields::clamped(hours, minutes, seconds).to_string()
}

/// Render a plain second count the same way the countdown does.
pub fn format_seconds(total: i64) -> String {
    let fields = DisplayFields::from_total_seconds(total);
    format_clock(fields.hours, fields.minutes, fields.seconds)
}
