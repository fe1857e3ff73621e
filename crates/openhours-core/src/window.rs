//! Daily and weekly time windows.
//!
//! A window list is a plain `Vec<Window>` owned by the caller. Positions in
//! the list are the only handle the engine understands, and they are valid
//! for a single snapshot only.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::TimeOfDay;
use crate::week::DayOfWeek;

/// One contiguous interval within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWindow {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl DailyWindow {
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn from_minutes(start: i32, end: i32) -> Self {
        Self::new(TimeOfDay::from_minutes(start), TimeOfDay::from_minutes(end))
    }

    pub fn start_minutes(&self) -> i32 {
        self.start_time.minutes()
    }

    pub fn end_minutes(&self) -> i32 {
        self.end_time.minutes()
    }

    /// Get duration in minutes (negative for a malformed window)
    pub fn duration_minutes(&self) -> i32 {
        self.end_minutes() - self.start_minutes()
    }

    /// Check if this window overlaps with another.
    pub fn overlaps_with(&self, other: &DailyWindow) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }
}

/// The stored `dayOfWeek` of a weekly window.
///
/// Unrecognized tags of any JSON type (unknown names, numbers, `null`) are
/// kept verbatim so a list read from elsewhere is written back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayTag {
    Known(DayOfWeek),
    Unrecognized(serde_json::Value),
}

impl DayTag {
    pub fn known(&self) -> Option<DayOfWeek> {
        match self {
            DayTag::Known(day) => Some(*day),
            DayTag::Unrecognized(_) => None,
        }
    }
}

impl From<DayOfWeek> for DayTag {
    fn from(day: DayOfWeek) -> Self {
        DayTag::Known(day)
    }
}

/// A daily window pinned to a day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWindow {
    pub day_of_week: DayTag,
    #[serde(flatten)]
    pub window: DailyWindow,
}

impl WeeklyWindow {
    pub fn new(day: DayOfWeek, window: DailyWindow) -> Self {
        Self {
            day_of_week: DayTag::Known(day),
            window,
        }
    }
}

/// A window as stored in a caller's list.
///
/// The JSON shape is untagged: an object carrying `dayOfWeek` is weekly,
/// anything else with `startTime`/`endTime` is daily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Window {
    Weekly(WeeklyWindow),
    Daily(DailyWindow),
}

impl Window {
    pub fn daily(start: TimeOfDay, end: TimeOfDay) -> Self {
        Window::Daily(DailyWindow::new(start, end))
    }

    pub fn weekly(day: DayOfWeek, start: TimeOfDay, end: TimeOfDay) -> Self {
        Window::Weekly(WeeklyWindow::new(day, DailyWindow::new(start, end)))
    }

    /// The start/end pair regardless of variant.
    pub fn times(&self) -> DailyWindow {
        match self {
            Window::Daily(w) => *w,
            Window::Weekly(w) => w.window,
        }
    }

    /// The recognized day, if this is a weekly window with a known tag.
    pub fn day(&self) -> Option<DayOfWeek> {
        match self {
            Window::Daily(_) => None,
            Window::Weekly(w) => w.day_of_week.known(),
        }
    }

    /// Same variant and day, new times.
    pub fn with_times(&self, times: DailyWindow) -> Self {
        match self {
            Window::Daily(_) => Window::Daily(times),
            Window::Weekly(w) => Window::Weekly(WeeklyWindow {
                day_of_week: w.day_of_week.clone(),
                window: times,
            }),
        }
    }

    pub fn start_minutes(&self) -> i32 {
        self.times().start_minutes()
    }

    pub fn end_minutes(&self) -> i32 {
        self.times().end_minutes()
    }
}

impl From<DailyWindow> for Window {
    fn from(w: DailyWindow) -> Self {
        Window::Daily(w)
    }
}

impl From<WeeklyWindow> for Window {
    fn from(w: WeeklyWindow) -> Self {
        Window::Weekly(w)
    }
}

/// Decode a window list from JSON.
pub fn from_json(json: &str) -> Result<Vec<Window>> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a window list as pretty JSON.
pub fn to_json(windows: &[Window]) -> Result<String> {
    Ok(serde_json::to_string_pretty(windows)?)
}
