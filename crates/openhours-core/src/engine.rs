//! Interval engine: window creation, move/resize and removal.
//!
//! Every operation takes the caller's current list snapshot and returns a new
//! list. Gesture input arrives as raw, unsnapped minutes; the engine snaps to
//! the configured step and keeps the result inside the visible span with at
//! least the minimum duration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{clamp, snap_to_step, MINUTES_PER_DAY};
use crate::week::DayOfWeek;
use crate::window::{DailyWindow, Window};

/// Grid resolution, visible span and window-size policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u32,
    #[serde(default = "default_min_window_minutes")]
    pub min_window_minutes: u32,
    #[serde(default = "default_default_window_minutes")]
    pub default_window_minutes: u32,
}

fn default_step_minutes() -> u32 {
    30
}
fn default_day_start_hour() -> u32 {
    8
}
fn default_day_end_hour() -> u32 {
    20
}
fn default_min_window_minutes() -> u32 {
    30
}
fn default_default_window_minutes() -> u32 {
    60
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_minutes: default_step_minutes(),
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            min_window_minutes: default_min_window_minutes(),
            default_window_minutes: default_default_window_minutes(),
        }
    }
}

impl EngineConfig {
    pub fn span(&self) -> Span {
        Span::from_hours(self.day_start_hour, self.day_end_hour)
    }

    /// Reject settings the engine would otherwise coerce silently.
    ///
    /// The engine never calls this itself; configuration loaders do.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.step_minutes == 0 || self.step_minutes > MINUTES_PER_DAY as u32 {
            return Err(invalid("step_minutes", "must be between 1 and 1440"));
        }
        if self.day_start_hour > 24 {
            return Err(invalid("day_start_hour", "must be between 0 and 24"));
        }
        if self.day_end_hour > 24 || self.day_end_hour <= self.day_start_hour {
            return Err(invalid(
                "day_end_hour",
                "must be after day_start_hour and at most 24",
            ));
        }
        let span = self.span().minutes();
        if self.min_window_minutes == 0 {
            return Err(invalid("min_window_minutes", "must be at least 1"));
        }
        if i64::from(self.min_window_minutes) > i64::from(span) {
            return Err(invalid(
                "min_window_minutes",
                &format!("{} exceeds the visible span of {span} minutes", self.min_window_minutes),
            ));
        }
        if self.default_window_minutes == 0 {
            return Err(invalid("default_window_minutes", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// The visible minute range `[start, end)` of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: i32,
    pub end: i32,
}

impl Span {
    /// Derive the span from whole hours.
    ///
    /// Both ends are clamped into the day and the span is always at least an
    /// hour wide, so an inverted or empty range is widened rather than
    /// rejected.
    pub fn from_hours(day_start_hour: u32, day_end_hour: u32) -> Self {
        let start = clamp(i64::from(day_start_hour) * 60, 0, i64::from(MINUTES_PER_DAY)) as i32;
        let end = clamp(
            i64::from(day_end_hour) * 60,
            i64::from(start) + 60,
            i64::from(MINUTES_PER_DAY),
        ) as i32;
        Self { start, end }
    }

    pub fn minutes(&self) -> i32 {
        self.end - self.start
    }

    /// First hour label of the lane.
    pub fn start_hour(&self) -> i32 {
        self.start / 60
    }

    /// Last hour label of the lane; 24 for a span that runs to midnight.
    pub fn end_hour(&self) -> i32 {
        self.end / 60
    }
}

/// Window mutation policy bound to one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalEngine {
    config: EngineConfig,
    span: Span,
}

impl IntervalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            span: config.span(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Snap and constrain a raw start/end pair.
    ///
    /// The pair is first translated back inside the span keeping its length,
    /// and only then clamped. A window wider than the span therefore still
    /// comes out shortened.
    pub fn place(&self, raw_start: f64, raw_end: f64) -> DailyWindow {
        let step = self.config.step_minutes;
        let min = i64::from(self.config.min_window_minutes);
        let span_start = i64::from(self.span.start);
        let span_end = i64::from(self.span.end);

        let mut start = i64::from(snap_to_step(raw_start, step));
        let mut end = i64::from(snap_to_step(raw_end, step));

        if end <= start {
            end = start + min;
        }

        if start < span_start {
            let diff = span_start - start;
            start += diff;
            end += diff;
        }
        if end > span_end {
            let diff = end - span_end;
            start -= diff;
            end -= diff;
        }

        start = clamp(start, span_start, span_end - min);
        end = clamp(end, start + min, span_end);

        DailyWindow::from_minutes(to_minute(start), to_minute(end))
    }

    /// Move or resize the window at `index` of this snapshot.
    ///
    /// Only the times change; the variant and day are kept. Overlaps with
    /// other windows are allowed. An index outside the snapshot leaves the
    /// list unchanged.
    pub fn update_window(
        &self,
        windows: &[Window],
        index: usize,
        raw_start: f64,
        raw_end: f64,
    ) -> Vec<Window> {
        if index >= windows.len() {
            tracing::warn!(index, len = windows.len(), "update_window: index out of range, ignored");
            return windows.to_vec();
        }

        let placed = self.place(raw_start, raw_end);
        tracing::debug!(
            index,
            raw_start,
            raw_end,
            start = %placed.start_time,
            end = %placed.end_time,
            "window updated"
        );

        windows
            .iter()
            .enumerate()
            .map(|(i, w)| if i == index { w.with_times(placed) } else { w.clone() })
            .collect()
    }

    /// Append a window of the default length at `raw_offset` minutes from
    /// the span start.
    ///
    /// A window that would run past the end of the span is pulled back so it
    /// ends at the span end. `day` selects a weekly window; `None` creates a
    /// daily one.
    pub fn create_window(
        &self,
        windows: &[Window],
        day: Option<DayOfWeek>,
        raw_offset: f64,
    ) -> Vec<Window> {
        let times = self.default_window_at(raw_offset);
        tracing::debug!(
            ?day,
            raw_offset,
            start = %times.start_time,
            end = %times.end_time,
            "window created"
        );

        let created = match day {
            Some(day) => Window::weekly(day, times.start_time, times.end_time),
            None => Window::Daily(times),
        };

        let mut next = windows.to_vec();
        next.push(created);
        next
    }

    fn default_window_at(&self, raw_offset: f64) -> DailyWindow {
        let step = self.config.step_minutes;
        let length = i64::from(self.config.default_window_minutes);
        let span_start = i64::from(self.span.start);
        let span_end = i64::from(self.span.end);

        let mut start = i64::from(snap_to_step(f64::from(self.span.start) + raw_offset, step));
        let mut end = start + length;

        if end > span_end {
            end = span_end;
            start = (end - length).max(span_start);
            start = i64::from(snap_to_step(start as f64, step));
        }

        DailyWindow::from_minutes(to_minute(start), to_minute(end))
    }

    /// Drop the window at `index`; later windows shift down by one.
    pub fn remove_window(&self, windows: &[Window], index: usize) -> Vec<Window> {
        if index >= windows.len() {
            tracing::warn!(index, len = windows.len(), "remove_window: index out of range, ignored");
            return windows.to_vec();
        }

        tracing::debug!(index, "window removed");
        windows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, w)| w.clone())
            .collect()
    }
}

impl Default for IntervalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn to_minute(value: i64) -> i32 {
    clamp(value, i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> IntervalEngine {
        IntervalEngine::default()
    }

    fn times(w: &Window) -> (String, String) {
        let t = w.times();
        (t.start_time.to_string(), t.end_time.to_string())
    }

    #[test]
    fn test_span_defaults() {
        assert_eq!(engine().span(), Span { start: 480, end: 1200 });
    }

    #[test]
    fn test_span_is_widened() {
        assert_eq!(Span::from_hours(10, 10), Span { start: 600, end: 660 });
        assert_eq!(Span::from_hours(12, 3), Span { start: 720, end: 780 });
        assert_eq!(Span::from_hours(30, 40), Span { start: 1440, end: 1500 });
        assert_eq!(Span::from_hours(0, 24), Span { start: 0, end: 1440 });
    }

    #[test]
    fn test_create_on_empty_monday() {
        let out = engine().create_window(&[], Some(DayOfWeek::Monday), 0.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].day(), Some(DayOfWeek::Monday));
        assert_eq!(times(&out[0]), ("08:00:00".into(), "09:00:00".into()));
    }

    #[test]
    fn test_create_snaps_offset() {
        let out = engine().create_window(&[], None, 100.0);
        // 480 + 100 = 580 snaps to 570
        assert_eq!(times(&out[0]), ("09:30:00".into(), "10:30:00".into()));
        assert!(matches!(out[0], Window::Daily(_)));
    }

    #[test]
    fn test_create_near_end_is_pulled_back() {
        let out = engine().create_window(&[], None, 700.0);
        assert_eq!(times(&out[0]), ("19:00:00".into(), "20:00:00".into()));
    }

    #[test]
    fn test_create_appends_and_keeps_existing() {
        let first = engine().create_window(&[], Some(DayOfWeek::Friday), 60.0);
        let second = engine().create_window(&first, Some(DayOfWeek::Monday), 0.0);
        assert_eq!(second.len(), 2);
        assert_eq!(second[0], first[0]);
        assert_eq!(second[1].day(), Some(DayOfWeek::Monday));
    }

    #[test]
    fn test_update_drag_above_top_keeps_duration() {
        let list = engine().create_window(&[], Some(DayOfWeek::Monday), 0.0);
        // dragged one hour above the visible top
        let out = engine().update_window(&list, 0, 420.0, 480.0);
        assert_eq!(times(&out[0]), ("08:00:00".into(), "09:00:00".into()));

        let out = engine().update_window(&list, 0, -60.0, 30.0);
        assert_eq!(times(&out[0]), ("08:00:00".into(), "09:30:00".into()));
        assert_eq!(out[0].day(), Some(DayOfWeek::Monday));
    }

    #[test]
    fn test_update_drag_below_bottom_keeps_duration() {
        let list = engine().create_window(&[], None, 0.0);
        let out = engine().update_window(&list, 0, 1230.0, 1320.0);
        assert_eq!(times(&out[0]), ("18:30:00".into(), "20:00:00".into()));
    }

    #[test]
    fn test_update_repairs_degenerate_resize() {
        let list = engine().create_window(&[], None, 0.0);
        let out = engine().update_window(&list, 0, 600.0, 590.0);
        assert_eq!(times(&out[0]), ("10:00:00".into(), "10:30:00".into()));
    }

    #[test]
    fn test_update_wider_than_span_is_clamped() {
        let list = engine().create_window(&[], None, 0.0);
        let out = engine().update_window(&list, 0, 300.0, 1300.0);
        assert_eq!(times(&out[0]), ("08:00:00".into(), "20:00:00".into()));
    }

    #[test]
    fn test_update_targets_index_only() {
        let e = engine();
        let list = e.create_window(&[], None, 0.0);
        let list = e.create_window(&list, None, 0.0);
        let out = e.update_window(&list, 1, 720.0, 780.0);
        assert_eq!(out[0], list[0]);
        assert_eq!(times(&out[1]), ("12:00:00".into(), "13:00:00".into()));
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let list = engine().create_window(&[], None, 0.0);
        assert_eq!(engine().update_window(&list, 3, 600.0, 660.0), list);
    }

    #[test]
    fn test_remove_shifts_following() {
        let e = engine();
        let mut list = Vec::new();
        for offset in [0.0, 120.0, 240.0] {
            list = e.create_window(&list, None, offset);
        }
        let out = e.remove_window(&list, 1);
        assert_eq!(out, vec![list[0].clone(), list[2].clone()]);
        assert_eq!(e.remove_window(&list, 9), list);
    }

    #[test]
    fn test_update_to_midnight_span() {
        let e = IntervalEngine::new(EngineConfig {
            day_start_hour: 0,
            day_end_hour: 24,
            ..EngineConfig::default()
        });
        let list = e.create_window(&[], None, 0.0);
        let out = e.update_window(&list, 0, 1380.0, 1440.0);
        assert_eq!(times(&out[0]), ("23:00:00".into(), "23:59:00".into()));
    }

    #[test]
    fn test_validate() {
        assert!(EngineConfig::default().validate().is_ok());

        let zero_step = EngineConfig {
            step_minutes: 0,
            ..EngineConfig::default()
        };
        assert!(zero_step.validate().is_err());

        let huge_step = EngineConfig {
            step_minutes: u32::MAX,
            ..EngineConfig::default()
        };
        assert!(huge_step.validate().is_err());
        let whole_day = EngineConfig {
            step_minutes: 1440,
            ..EngineConfig::default()
        };
        assert!(whole_day.validate().is_ok());

        let inverted = EngineConfig {
            day_start_hour: 20,
            day_end_hour: 8,
            ..EngineConfig::default()
        };
        assert!(inverted.validate().is_err());

        let too_long = EngineConfig {
            day_start_hour: 8,
            day_end_hour: 9,
            min_window_minutes: 90,
            ..EngineConfig::default()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_zero_step_does_not_panic() {
        let e = IntervalEngine::new(EngineConfig {
            step_minutes: 0,
            ..EngineConfig::default()
        });
        let out = e.update_window(&e.create_window(&[], None, 7.0), 0, 601.2, 644.9);
        assert_eq!(out[0].start_minutes(), 601);
        assert_eq!(out[0].end_minutes(), 645);
    }

    #[test]
    fn test_create_near_end_resnaps_start() {
        let e = IntervalEngine::new(EngineConfig {
            default_window_minutes: 45,
            ..EngineConfig::default()
        });
        // 1155 is pulled back from the span end, then snapped to 1170
        let out = e.create_window(&[], None, 700.0);
        assert_eq!(out[0].start_minutes(), 1170);
        assert_eq!(out[0].end_minutes(), 1200);
        assert_eq!(times(&out[0]), ("19:30:00".into(), "20:00:00".into()));
    }
}
