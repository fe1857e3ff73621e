//! Wall-clock minute arithmetic.
//!
//! Every value here is a minute count since local midnight. Nothing in this
//! module fails: malformed strings coerce to 0 and out-of-range numbers are
//! clamped.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minutes in one day. `24:00` itself is not a valid [`TimeOfDay`].
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Three-argument clamp that never panics.
///
/// When `lo > hi` the result is `lo`, matching `max(lo, min(hi, v))`.
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    let v = if v > hi { hi } else { v };
    if v < lo {
        lo
    } else {
        v
    }
}

/// Parse `"HH:MM"` or `"HH:MM:SS"` into minutes since midnight.
///
/// Seconds are ignored, a missing minute part counts as 0, any part that is
/// not a number counts as 0, and the result is clamped to `[0, 1440]`.
/// Fractional parts are allowed; the total is truncated to whole minutes.
pub fn parse_time_of_day(s: &str) -> i32 {
    let mut parts = s.split(':');
    let hours = parse_part(parts.next());
    let minutes = parse_part(parts.next());

    let total = hours * 60.0 + minutes;
    if total.is_nan() {
        return 0;
    }
    clamp(total, 0.0, f64::from(MINUTES_PER_DAY)).trunc() as i32
}

fn parse_part(part: Option<&str>) -> f64 {
    part.and_then(|p| p.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

/// Format minutes since midnight as `"HH:MM:00"`.
///
/// Input is clamped to `[0, 1440]`; 1440 has no canonical form and is
/// written as `23:59:00`.
pub fn format_time_of_day(minute: i32) -> String {
    let mut m = clamp(minute, 0, MINUTES_PER_DAY);
    if m == MINUTES_PER_DAY {
        m = MINUTES_PER_DAY - 1;
    }
    format!("{:02}:{:02}:00", m / 60, m % 60)
}

/// Round `minute` to the nearest multiple of `step`, halves away from zero.
///
/// The result is not clamped to any span. A zero step is treated as 1.
pub fn snap_to_step(minute: f64, step: u32) -> i32 {
    let step = f64::from(step.max(1));
    ((minute / step).round() * step) as i32
}

/// A canonical wall-clock minute in `[0, 1440)`.
///
/// Serialized as `"HH:MM:SS"`; deserialization is as lenient as
/// [`parse_time_of_day`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from any minute count, clamping into the day.
    pub fn from_minutes(minute: i32) -> Self {
        let m = clamp(minute, 0, MINUTES_PER_DAY - 1);
        Self(m as u16)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Self {
        let total = i64::from(hour) * 60 + i64::from(minute);
        Self::from_minutes(clamp(total, 0, i64::from(MINUTES_PER_DAY)) as i32)
    }

    /// Lenient parse, see [`parse_time_of_day`].
    pub fn parse(s: &str) -> Self {
        Self::from_minutes(parse_time_of_day(s))
    }

    pub fn minutes(self) -> i32 {
        i32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }

    /// Short `"HH:MM"` form used for labels.
    pub fn short(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time_of_day(self.minutes()))
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self::from_hm(t.hour(), t.minute())
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(t: TimeOfDay) -> Self {
        NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or_default()
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
