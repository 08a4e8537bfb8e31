//! Timestamp-derived snapshot names.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Name of the snapshot file, e.g. `W_08_12_2025_21_10.h`.
///
/// Derived only from the minute of the clock reading, so two runs within
/// the same minute produce the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedName(String);

impl GeneratedName {
    /// Builds `{prefix}_{DD}_{MM}_{YYYY}_{hh}_{mm}{suffix}` from a local time.
    #[must_use]
    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>, prefix: &str, suffix: &str) -> Self {
        Self(format!(
            "{prefix}_{:02}_{:02}_{:04}_{:02}_{:02}{suffix}",
            time.day(),
            time.month(),
            time.year(),
            time.hour(),
            time.minute(),
        ))
    }

    /// The file name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The single line written to the companion file, newline included.
    #[must_use]
    pub fn include_line(&self) -> String {
        format!("#include \"{}\"\n", self.0)
    }
}

impl fmt::Display for GeneratedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GeneratedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
