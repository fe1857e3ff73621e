//! Slot codec: window lists to dense boolean grids and back.
//!
//! A grid is derived state. Converting windows to slots is a union, so
//! overlapping or adjacent windows end up as the same true cells; converting
//! back emits one window per maximal run of true cells. Windows → slots →
//! windows is therefore a canonicalization, while slots → windows → slots is
//! the identity.

use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, Span};
use crate::error::ValidationError;
use crate::time::{clamp, TimeOfDay};
use crate::week::DayOfWeek;
use crate::window::{DailyWindow, Window};

/// Grid resolution and visible span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub step_minutes: u32,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        EngineConfig::default().into()
    }
}

impl From<EngineConfig> for SlotConfig {
    fn from(config: EngineConfig) -> Self {
        Self {
            step_minutes: config.step_minutes,
            day_start_hour: config.day_start_hour,
            day_end_hour: config.day_end_hour,
        }
    }
}

impl SlotConfig {
    pub fn span(&self) -> Span {
        Span::from_hours(self.day_start_hour, self.day_end_hour)
    }

    /// Step in minutes; zero is treated as one.
    pub fn step(&self) -> i32 {
        self.step_minutes.max(1).min(i32::MAX as u32) as i32
    }

    pub fn slots_per_day(&self) -> usize {
        (self.span().minutes() / self.step()) as usize
    }

    /// Bounds of the cell at `index`, if it is on the grid.
    pub fn cell(&self, index: usize) -> Option<SlotCell> {
        if index >= self.slots_per_day() {
            return None;
        }
        let start = self.span().start + index as i32 * self.step();
        Some(SlotCell {
            index,
            start_time: TimeOfDay::from_minutes(start),
            end_time: TimeOfDay::from_minutes(start + self.step()),
        })
    }

    /// Every cell of one day, top to bottom.
    pub fn cells(&self) -> Vec<SlotCell> {
        (0..self.slots_per_day()).filter_map(|i| self.cell(i)).collect()
    }

    /// Reject a caller-supplied day grid of the wrong length.
    pub fn check_day(&self, slots: &[bool]) -> Result<(), ValidationError> {
        let expected = self.slots_per_day();
        if slots.len() != expected {
            return Err(ValidationError::InvalidGrid {
                expected,
                actual: slots.len(),
            });
        }
        Ok(())
    }
}

/// One cell of a day grid, as handed to a cell renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCell {
    pub index: usize,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Seven day grids in canonical day order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySlots {
    days: [Vec<bool>; 7],
}

impl WeeklySlots {
    /// All-false grid.
    pub fn empty(slots_per_day: usize) -> Self {
        Self {
            days: std::array::from_fn(|_| vec![false; slots_per_day]),
        }
    }

    pub fn from_days(days: [Vec<bool>; 7]) -> Self {
        Self { days }
    }

    pub fn day(&self, day: DayOfWeek) -> &[bool] {
        &self.days[day.index()]
    }

    /// Copy with one cell flipped; an index off the grid changes nothing.
    pub fn toggled(&self, day: DayOfWeek, index: usize) -> Self {
        let mut next = self.clone();
        next.days[day.index()] = toggle_slot(&self.days[day.index()], index);
        next
    }

    pub fn check(&self, config: &SlotConfig) -> Result<(), ValidationError> {
        self.days.iter().try_for_each(|d| config.check_day(d))
    }
}

/// Copy of `slots` with one cell flipped.
pub fn toggle_slot(slots: &[bool], index: usize) -> Vec<bool> {
    let mut next = slots.to_vec();
    if let Some(cell) = next.get_mut(index) {
        *cell = !*cell;
    }
    next
}

fn mark(slots: &mut [bool], window: &DailyWindow, span: Span, step: i32) {
    let start = clamp(window.start_minutes(), span.start, span.end);
    let end = clamp(window.end_minutes(), span.start, span.end);
    if end <= start {
        return;
    }

    let step = i64::from(step);
    let first = i64::from(start - span.start) / step;
    let last = (i64::from(end - span.start) + step - 1) / step;
    for i in first..last {
        match slots.get_mut(i as usize) {
            Some(slot) => *slot = true,
            None => break,
        }
    }
}

fn runs(slots: &[bool]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut run_start = None;

    for (i, &open) in slots.iter().enumerate() {
        match (open, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(s)) => {
                out.push((s, i));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = run_start {
        out.push((s, slots.len()));
    }
    out
}

fn decode_day(slots: &[bool], config: &SlotConfig) -> Vec<DailyWindow> {
    let span = config.span();
    let step = i64::from(config.step());
    let span_start = i64::from(span.start);

    runs(slots)
        .into_iter()
        .filter_map(|(first, last)| {
            let start = clamp(span_start + first as i64 * step, span_start, i64::from(span.end));
            let end = clamp(span_start + last as i64 * step, span_start, i64::from(span.end));
            (end > start).then(|| DailyWindow::from_minutes(start as i32, end as i32))
        })
        .collect()
}

/// Mark every slot touched by any window.
///
/// All windows count regardless of their day; use
/// [`weekly_windows_to_slots`] for a weekly list.
pub fn windows_to_slots(windows: &[Window], config: &SlotConfig) -> Vec<bool> {
    let span = config.span();
    let mut slots = vec![false; config.slots_per_day()];
    for window in windows {
        mark(&mut slots, &window.times(), span, config.step());
    }
    slots
}

/// Coalesce runs of true slots into daily windows.
pub fn slots_to_windows(slots: &[bool], config: &SlotConfig) -> Vec<Window> {
    decode_day(slots, config).into_iter().map(Window::Daily).collect()
}

/// Per-day slot grids for a weekly list.
///
/// Windows without a recognized day are dropped.
pub fn weekly_windows_to_slots(windows: &[Window], config: &SlotConfig) -> WeeklySlots {
    let span = config.span();
    let mut grid = WeeklySlots::empty(config.slots_per_day());
    for window in windows {
        match window.day() {
            Some(day) => mark(&mut grid.days[day.index()], &window.times(), span, config.step()),
            None => tracing::debug!(?window, "window without a known day skipped"),
        }
    }
    grid
}

/// Coalesce each day's runs into weekly windows, monday first.
pub fn weekly_slots_to_windows(grid: &WeeklySlots, config: &SlotConfig) -> Vec<Window> {
    DayOfWeek::ALL
        .into_iter()
        .flat_map(|day| {
            decode_day(grid.day(day), config)
                .into_iter()
                .map(move |w| Window::weekly(day, w.start_time, w.end_time))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SlotConfig {
        SlotConfig {
            step_minutes: 30,
            day_start_hour: 8,
            day_end_hour: 20,
        }
    }

    fn w(start: i32, end: i32) -> Window {
        Window::Daily(DailyWindow::from_minutes(start, end))
    }

    #[test]
    fn test_slots_per_day() {
        assert_eq!(cfg().slots_per_day(), 24);
        let odd = SlotConfig {
            step_minutes: 45,
            ..cfg()
        };
        assert_eq!(odd.slots_per_day(), 16);
    }

    #[test]
    fn test_grid_to_windows_scenario() {
        let grid = [false, true, true, false, true];
        let windows = slots_to_windows(&grid, &cfg());
        let rendered: Vec<(String, String)> = windows
            .iter()
            .map(|w| (w.times().start_time.to_string(), w.times().end_time.to_string()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("08:30:00".to_string(), "09:30:00".to_string()),
                ("10:30:00".to_string(), "11:00:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_partial_slots_are_covered() {
        // 08:10-08:40 touches the first two cells
        let slots = windows_to_slots(&[w(490, 520)], &cfg());
        assert!(slots[0] && slots[1]);
        assert!(!slots[2]);
    }

    #[test]
    fn test_windows_outside_span_are_clipped() {
        let slots = windows_to_slots(&[w(0, 500), w(1150, 1400), w(1300, 1400)], &cfg());
        assert!(slots[0]);
        assert!(!slots[1]);
        assert!(slots[22] && slots[23]);
        assert_eq!(slots.iter().filter(|s| **s).count(), 3);
    }

    #[test]
    fn test_union_merges_overlaps() {
        let windows = [w(480, 600), w(540, 660), w(660, 720)];
        let slots = windows_to_slots(&windows, &cfg());
        let merged = slots_to_windows(&slots, &cfg());
        assert_eq!(merged, vec![w(480, 720)]);
    }

    #[test]
    fn test_run_to_end_of_grid() {
        let mut slots = vec![false; 24];
        slots[23] = true;
        assert_eq!(slots_to_windows(&slots, &cfg()), vec![w(1170, 1200)]);
    }

    #[test]
    fn test_run_beyond_span_is_clamped() {
        // a grid longer than the configured day still stays inside the span
        let slots = vec![true; 30];
        assert_eq!(slots_to_windows(&slots, &cfg()), vec![w(480, 1200)]);
    }

    #[test]
    fn test_step_wider_than_span_gives_empty_grid() {
        let huge = SlotConfig {
            step_minutes: u32::MAX,
            ..cfg()
        };
        assert!(windows_to_slots(&[w(480, 600)], &huge).is_empty());

        let weekly = Window::weekly(
            DayOfWeek::Friday,
            TimeOfDay::from_minutes(480),
            TimeOfDay::from_minutes(1200),
        );
        let grid = weekly_windows_to_slots(&[weekly], &huge);
        assert!(grid.day(DayOfWeek::Friday).is_empty());
        assert!(slots_to_windows(&[], &huge).is_empty());
    }

    #[test]
    fn test_weekly_drops_unknown_days() {
        let windows = vec![
            Window::weekly(
                DayOfWeek::Wednesday,
                TimeOfDay::from_minutes(540),
                TimeOfDay::from_minutes(600),
            ),
            w(480, 510),
        ];
        let grid = weekly_windows_to_slots(&windows, &cfg());
        assert_eq!(grid.day(DayOfWeek::Wednesday).iter().filter(|s| **s).count(), 2);
        assert!(grid.day(DayOfWeek::Monday).iter().all(|s| !s));

        let back = weekly_slots_to_windows(&grid, &cfg());
        assert_eq!(back, vec![windows[0].clone()]);
    }

    #[test]
    fn test_weekly_output_in_canonical_order() {
        let grid = WeeklySlots::empty(24)
            .toggled(DayOfWeek::Sunday, 0)
            .toggled(DayOfWeek::Monday, 5);
        let days: Vec<_> = weekly_slots_to_windows(&grid, &cfg())
            .iter()
            .map(|w| w.day())
            .collect();
        assert_eq!(days, vec![Some(DayOfWeek::Monday), Some(DayOfWeek::Sunday)]);
    }

    #[test]
    fn test_toggle() {
        let slots = toggle_slot(&[false, false], 1);
        assert_eq!(slots, vec![false, true]);
        assert_eq!(toggle_slot(&slots, 1), vec![false, false]);
        assert_eq!(toggle_slot(&slots, 5), slots);
    }

    #[test]
    fn test_cells() {
        let cells = cfg().cells();
        assert_eq!(cells.len(), 24);
        assert_eq!(cells[1].start_time.to_string(), "08:30:00");
        assert_eq!(cells[1].end_time.to_string(), "09:00:00");
        assert!(cfg().cell(24).is_none());
    }

    #[test]
    fn test_check_day() {
        assert!(cfg().check_day(&[false; 24]).is_ok());
        assert_eq!(
            cfg().check_day(&[false; 3]),
            Err(ValidationError::InvalidGrid {
                expected: 24,
                actual: 3
            })
        );
    }
}
