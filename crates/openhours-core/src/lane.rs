//! Pixel/minute translation for a vertical time-axis lane.
//!
//! A presentation layer measures pointer positions in pixels relative to the
//! top of a lane. These helpers turn them into the raw minute values the
//! [`IntervalEngine`](crate::IntervalEngine) expects, and place existing
//! windows back onto the lane.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, Span};
use crate::time::clamp;
use crate::window::DailyWindow;

/// Lane sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    #[serde(default = "default_px_per_minute")]
    pub px_per_minute: f64,
    #[serde(default = "default_lane_width_px")]
    pub lane_width_px: u32,
    #[serde(default = "default_gutter_width_px")]
    pub gutter_width_px: u32,
    #[serde(default)]
    pub hour_format: HourFormat,
}

fn default_px_per_minute() -> f64 {
    1.0
}
fn default_lane_width_px() -> u32 {
    140
}
fn default_gutter_width_px() -> u32 {
    40
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            px_per_minute: default_px_per_minute(),
            lane_width_px: default_lane_width_px(),
            gutter_width_px: default_gutter_width_px(),
            hour_format: HourFormat::default(),
        }
    }
}

impl LaneLayout {
    /// Vertical scale; non-positive or non-finite values fall back to 1.
    pub fn scale(&self) -> f64 {
        if self.px_per_minute.is_finite() && self.px_per_minute > 0.0 {
            self.px_per_minute
        } else {
            1.0
        }
    }
}

/// Clock style of hour tick labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HourFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFour,
    #[serde(rename = "12h")]
    Twelve,
}

impl HourFormat {
    fn pattern(self) -> &'static str {
        match self {
            HourFormat::TwentyFour => "%H:%M",
            HourFormat::Twelve => "%-I %p",
        }
    }
}

/// Placement of a window block inside a lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    pub top_px: f64,
    pub height_px: f64,
}

/// A labeled whole-hour mark on the time gutter.
#[derive(Debug, Clone, PartialEq)]
pub struct HourTick {
    pub hour: u32,
    pub offset_px: f64,
    pub label: String,
}

/// A lane bound to a span and a minimum window length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneGeometry {
    pub layout: LaneLayout,
    pub span: Span,
    pub min_window_minutes: u32,
}

impl LaneGeometry {
    pub fn new(layout: LaneLayout, config: &EngineConfig) -> Self {
        Self {
            layout,
            span: config.span(),
            min_window_minutes: config.min_window_minutes,
        }
    }

    pub fn height_px(&self) -> f64 {
        f64::from(self.span.minutes()) * self.layout.scale()
    }

    /// Raw minutes-from-span-start for a double-click at `y_px`.
    pub fn double_click_offset(&self, y_px: f64) -> f64 {
        clamp(y_px / self.layout.scale(), 0.0, f64::from(self.span.minutes()))
    }

    /// Raw start/end minutes for a block dropped at `y_px` with `height_px`.
    pub fn drag_to_raw(&self, y_px: f64, height_px: f64) -> (f64, f64) {
        let scale = self.layout.scale();
        let origin = f64::from(self.span.start);
        (origin + y_px / scale, origin + (y_px + height_px) / scale)
    }

    /// Where `window` is drawn.
    ///
    /// The start is kept inside the span, the end is at least one minute
    /// after it, and the block is never drawn shorter than the minimum window.
    pub fn block(&self, window: &DailyWindow) -> BlockGeometry {
        let scale = self.layout.scale();
        let start = clamp(window.start_minutes(), self.span.start, self.span.end);
        let end = clamp(window.end_minutes(), start + 1, self.span.end);

        let duration_px = f64::from(end - start) * scale;
        let min_px = f64::from(self.min_window_minutes) * scale;
        BlockGeometry {
            top_px: f64::from(start - self.span.start) * scale,
            height_px: duration_px.max(min_px),
        }
    }

    /// One tick per whole hour from the first to the last hour of the span.
    pub fn hour_ticks(&self) -> Vec<HourTick> {
        let scale = self.layout.scale();
        let first = self.span.start_hour();
        (first..=self.span.end_hour())
            .map(|hour| {
                let hour = hour as u32;
                let label = NaiveTime::from_hms_opt(hour % 24, 0, 0)
                    .map(|t| t.format(self.layout.hour_format.pattern()).to_string())
                    .unwrap_or_default();
                HourTick {
                    hour,
                    offset_px: f64::from(hour as i32 - first) * 60.0 * scale,
                    label,
                }
            })
            .collect()
    }
}
