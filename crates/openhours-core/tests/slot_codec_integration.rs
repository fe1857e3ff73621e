//! Integration tests for converting between window lists and slot grids.

use openhours_core::{
    slots_to_windows, weekly_slots_to_windows, weekly_windows_to_slots, windows_to_slots,
    DailyWindow, DayOfWeek, SlotConfig, TimeOfDay, WeeklySlots, Window,
};

fn cfg(step: u32, start: u32, end: u32) -> SlotConfig {
    SlotConfig {
        step_minutes: step,
        day_start_hour: start,
        day_end_hour: end,
    }
}

fn weekly(day: DayOfWeek, start: &str, end: &str) -> Window {
    Window::weekly(day, TimeOfDay::parse(start), TimeOfDay::parse(end))
}

#[test]
fn test_weekly_roundtrip_of_aligned_windows() {
    let config = cfg(30, 8, 20);
    let windows = vec![
        weekly(DayOfWeek::Friday, "13:00", "14:30"),
        weekly(DayOfWeek::Monday, "08:00", "09:00"),
        weekly(DayOfWeek::Monday, "10:00", "12:00"),
        weekly(DayOfWeek::Sunday, "19:30", "20:00"),
    ];

    let grid = weekly_windows_to_slots(&windows, &config);
    let mut back = weekly_slots_to_windows(&grid, &config);

    let mut expected = windows.clone();
    let key = |w: &Window| (w.day().map(DayOfWeek::index), w.start_minutes());
    expected.sort_by_key(key);
    back.sort_by_key(key);
    assert_eq!(back, expected);
}

#[test]
fn test_adjacent_windows_coalesce() {
    let config = cfg(15, 9, 17);
    let windows = vec![
        Window::Daily(DailyWindow::from_minutes(600, 630)),
        Window::Daily(DailyWindow::from_minutes(630, 660)),
        Window::Daily(DailyWindow::from_minutes(700, 705)),
    ];

    let slots = windows_to_slots(&windows, &config);
    let back = slots_to_windows(&slots, &config);
    assert_eq!(
        back,
        vec![
            Window::Daily(DailyWindow::from_minutes(600, 660)),
            Window::Daily(DailyWindow::from_minutes(690, 705)),
        ]
    );
}

#[test]
fn test_grid_roundtrip_is_identity() {
    let config = cfg(30, 0, 24);
    let mut grid = WeeklySlots::empty(config.slots_per_day());
    for (day, index) in [
        (DayOfWeek::Monday, 0),
        (DayOfWeek::Monday, 1),
        (DayOfWeek::Tuesday, 47),
        (DayOfWeek::Saturday, 20),
        (DayOfWeek::Saturday, 22),
    ] {
        grid = grid.toggled(day, index);
    }

    let windows = weekly_slots_to_windows(&grid, &config);
    assert_eq!(windows.len(), 4);
    // the run ending at midnight is written as 23:59
    assert_eq!(windows[1].times().end_time.to_string(), "23:59:00");

    assert_eq!(weekly_windows_to_slots(&windows, &config), grid);
}

#[test]
fn test_input_order_is_irrelevant() {
    let config = cfg(60, 8, 18);
    let a = weekly(DayOfWeek::Thursday, "09:00", "11:00");
    let b = weekly(DayOfWeek::Thursday, "10:00", "12:00");
    assert_eq!(
        weekly_windows_to_slots(&[a.clone(), b.clone()], &config),
        weekly_windows_to_slots(&[b, a], &config)
    );
}

#[test]
fn test_grid_json_shape() {
    let config = cfg(240, 8, 20);
    let grid = weekly_windows_to_slots(&[weekly(DayOfWeek::Monday, "08:00", "12:00")], &config);
    let json = serde_json::to_value(&grid).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(7));
    assert_eq!(json[0], serde_json::json!([true, false, false]));

    let parsed: WeeklySlots = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, grid);
    assert!(parsed.check(&config).is_ok());
    assert!(parsed.check(&cfg(60, 8, 20)).is_err());
}
