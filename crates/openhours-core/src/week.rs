//! Days of the week, labels and per-day grouping.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::window::{DailyWindow, Window};

/// Day of the week in canonical monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Canonical iteration and indexing order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Position in [`DayOfWeek::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Display order for a week that begins on `start`.
    ///
    /// This never changes stored order or indices.
    pub fn rotated(start: DayOfWeek) -> [DayOfWeek; 7] {
        let offset = start.index();
        std::array::from_fn(|i| Self::ALL[(offset + i) % 7])
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "mon" | "monday" => Ok(DayOfWeek::Monday),
            "tue" | "tuesday" => Ok(DayOfWeek::Tuesday),
            "wed" | "wednesday" => Ok(DayOfWeek::Wednesday),
            "thu" | "thursday" => Ok(DayOfWeek::Thursday),
            "fri" | "friday" => Ok(DayOfWeek::Friday),
            "sat" | "saturday" => Ok(DayOfWeek::Saturday),
            "sun" | "sunday" => Ok(DayOfWeek::Sunday),
            _ => Err(ValidationError::InvalidValue {
                field: "day".to_string(),
                message: format!("'{s}' is not a day of the week"),
            }),
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

/// Day header labels: English defaults with optional overrides keyed by
/// lowercase day name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayLabels {
    overrides: BTreeMap<String, String>,
}

impl DayLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, day: DayOfWeek, label: impl Into<String>) -> Self {
        self.overrides.insert(day.as_str().to_string(), label.into());
        self
    }

    pub fn label(&self, day: DayOfWeek) -> &str {
        self.overrides
            .get(day.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| day.default_label())
    }

    /// Override keys that do not name a day.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.overrides
            .keys()
            .filter(|k| DayOfWeek::from_str(k).is_err())
            .map(String::as_str)
            .collect()
    }
}

/// A window together with its position in the list it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedWindow {
    pub index: usize,
    pub window: DailyWindow,
}

/// Windows of a weekly list bucketed by day, canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayGroups {
    days: [Vec<IndexedWindow>; 7],
}

impl DayGroups {
    pub fn for_day(&self, day: DayOfWeek) -> &[IndexedWindow] {
        &self.days[day.index()]
    }

    /// Groups in the given display order.
    pub fn in_order(
        &self,
        order: [DayOfWeek; 7],
    ) -> impl Iterator<Item = (DayOfWeek, &[IndexedWindow])> + '_ {
        order.into_iter().map(move |day| (day, self.for_day(day)))
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket windows by day, keeping each one's index in the input list.
///
/// Daily windows and weekly windows with an unrecognized day are skipped;
/// they stay in the caller's list untouched.
pub fn group_by_day(windows: &[Window]) -> DayGroups {
    let mut groups = DayGroups::default();
    for (index, window) in windows.iter().enumerate() {
        if let Some(day) = window.day() {
            groups.days[day.index()].push(IndexedWindow {
                index,
                window: window.times(),
            });
        }
    }
    groups
}
