use std::fmt;
use std::time::Duration;

/// What the display shows before the first start and after every reset.
pub const ZERO_DISPLAY: &str = "00:00:00";

/// Whole-second `HH:MM:SS` view of a duration.
///
/// Sub-second precision is floored away. Hours are not wrapped at 24; they
/// simply grow past two digits when needed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl Hms {
    pub const fn from_duration(d: Duration) -> Self {
        let total = d.as_secs();
        Self {
            hours: total / 3600,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

}

impl From<Duration> for Hms {
    fn from(d: Duration) -> Self {
        Self::from_duration(d)
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Formats `d` as zero-padded `HH:MM:SS`.
pub fn format_hms(d: Duration) -> String {
    Hms::from_duration(d).to_string()
}
