//! # openhours Core Library
//!
//! This library provides the core logic behind the openhours availability
//! editors. A caller holds an ordered list of time windows (daily or weekly)
//! and threads it through pure operations that return a new list; nothing in
//! here keeps state between calls.
//!
//! ## Architecture
//!
//! - **Time Arithmetic**: minute-of-day parsing, formatting, clamping and
//!   step snapping
//! - **Interval Engine**: create, move/resize and remove windows under a
//!   snap/clamp/minimum-duration policy
//! - **Slot Codec**: conversion between window lists and dense per-slot
//!   boolean grids, coalescing adjacent slots into windows
//! - **Lane**: pixel/minute translation for a vertical time-axis lane
//!
//! ## Key Components
//!
//! - [`IntervalEngine`]: window mutation policy
//! - [`Window`]: daily or weekly time window
//! - [`WeeklySlots`]: seven-day slot grid
//! - [`EditorConfig`]: TOML-backed editor configuration

pub mod config;
pub mod engine;
pub mod error;
pub mod lane;
pub mod slots;
pub mod time;
pub mod week;
pub mod window;

pub use config::{EditorConfig, WeekConfig};
pub use engine::{EngineConfig, IntervalEngine, Span};
pub use error::{ConfigError, CoreError, ValidationError};
pub use lane::{BlockGeometry, HourFormat, HourTick, LaneGeometry, LaneLayout};
pub use slots::{
    slots_to_windows, toggle_slot, weekly_slots_to_windows, weekly_windows_to_slots,
    windows_to_slots, SlotCell, SlotConfig, WeeklySlots,
};
pub use time::{
    clamp, format_time_of_day, parse_time_of_day, snap_to_step, TimeOfDay, MINUTES_PER_DAY,
};
pub use week::{group_by_day, DayGroups, DayLabels, DayOfWeek, IndexedWindow};
pub use window::{DailyWindow, DayTag, WeeklyWindow, Window};
