//! Text for time labels shown at the cursor line and the range ends.
//!
//! The engine hands the renderer a string; the renderer measures it and
//! feeds the width back into label placement (see [`crate::geometry`]).

/// The unit in which raw time values are expressed when formatting as
/// wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpochUnit {
    /// Values are seconds since the UNIX epoch.
    Seconds,
    /// Values are milliseconds since the UNIX epoch.
    Milliseconds,
    /// Values are microseconds since the UNIX epoch.
    Microseconds,
    /// Values are nanoseconds since the UNIX epoch.
    Nanoseconds,
}

impl EpochUnit {
    /// How many of this unit make up one second.
    pub fn units_per_second(&self) -> i64 {
        match self {
            EpochUnit::Seconds => 1,
            EpochUnit::Milliseconds => 1_000,
            EpochUnit::Microseconds => 1_000_000,
            EpochUnit::Nanoseconds => 1_000_000_000,
        }
    }

    /// Sub-second digits shown for this unit.
    fn frac_digits(&self) -> usize {
        match self {
            EpochUnit::Seconds => 0,
            EpochUnit::Milliseconds => 3,
            EpochUnit::Microseconds => 6,
            EpochUnit::Nanoseconds => 9,
        }
    }
}

/// How integer time values are rendered for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatter {
    /// Plain integer: `1500` → `"1500"`.
    Raw,
    /// Fixed-point scaling: `1500` with `divisor: 1000, decimals: 1` → `"1.5"`.
    Scaled { divisor: i64, decimals: usize },
    /// Wall-clock `HH:MM:SS` (UTC) with the sub-second digits the unit
    /// calls for: `Milliseconds` → `HH:MM:SS.mmm`.
    Clock { unit: EpochUnit },
}

impl Default for TimeFormatter {
    fn default() -> Self {
        TimeFormatter::Raw
    }
}

impl TimeFormatter {
    /// Render a raw time value as label text.
    pub fn format(&self, value: i64) -> String {
        match self {
            TimeFormatter::Raw => value.to_string(),
            TimeFormatter::Scaled { divisor, decimals } => {
                let scaled = value as f64 / *divisor as f64;
                format!("{:.*}", decimals, scaled)
            }
            TimeFormatter::Clock { unit } => {
                let ups = unit.units_per_second();
                let secs = value.div_euclid(ups);
                let frac = value.rem_euclid(ups);
                let dt = chrono::DateTime::from_timestamp(secs, 0)
                    .unwrap_or_else(|| chrono::DateTime::from_timestamp(0, 0).unwrap());
                let base = dt.format("%H:%M:%S").to_string();
                match unit.frac_digits() {
                    0 => base,
                    digits => format!("{}.{:0width$}", base, frac, width = digits),
                }
            }
        }
    }
}
