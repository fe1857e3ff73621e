//! ASCII rendering of a window list.
//!
//! Rows are grid cells, columns are days in the configured display order.
//! Below the chart every window is listed with the index to pass to
//! `update` or `remove`.

use std::path::PathBuf;

use clap::Args;
use openhours_core::{
    group_by_day, weekly_windows_to_slots, windows_to_slots, EditorConfig, SlotConfig, Window,
};

use crate::common::{read_windows, CmdResult, Context, GridArgs};

const COLUMN_WIDTH: usize = 10;

#[derive(Args)]
pub struct ShowArgs {
    /// Window list JSON file, or - for stdin
    pub input: PathBuf,
    #[command(flatten)]
    pub grid: GridArgs,
}

pub fn run(args: ShowArgs, ctx: &Context) -> CmdResult {
    let config = args.grid.resolve(ctx)?;
    let windows = read_windows(Some(args.input.as_path()))?;

    let weekly = windows.iter().any(|w| matches!(w, Window::Weekly(_)));
    let chart = if weekly {
        render_week(&windows, &config)
    } else {
        render_day(&windows, &config.slot_config())
    };
    print!("{chart}");
    Ok(())
}

fn cell_char(open: bool) -> char {
    if open {
        '█'
    } else {
        '·'
    }
}

fn render_week(windows: &[Window], config: &EditorConfig) -> String {
    let slot_config = config.slot_config();
    let grid = weekly_windows_to_slots(windows, &slot_config);
    let order = config.week.display_order();
    let labels = &config.week.day_labels;

    let mut output = String::new();
    output.push_str("      ");
    for day in order {
        let label: String = labels.label(day).chars().take(COLUMN_WIDTH - 1).collect();
        output.push_str(&format!("{label:<COLUMN_WIDTH$}"));
    }
    output.push('\n');

    for cell in slot_config.cells() {
        output.push_str(&format!("{} ", cell.start_time.short()));
        for day in order {
            let open = grid.day(day).get(cell.index).copied().unwrap_or(false);
            let mark = cell_char(open).to_string().repeat(COLUMN_WIDTH - 2);
            output.push_str(&format!("{mark}  "));
        }
        output.push('\n');
    }

    output.push('\n');
    let groups = group_by_day(windows);
    for (day, entries) in groups.in_order(order) {
        for entry in entries {
            output.push_str(&format!(
                "[{}] {} {}-{}\n",
                entry.index,
                labels.label(day),
                entry.window.start_time.short(),
                entry.window.end_time.short()
            ));
        }
    }
    let skipped = windows.len() - groups.len();
    if skipped > 0 {
        output.push_str(&format!("({skipped} window(s) without a known day not shown)\n"));
    }
    output
}

fn render_day(windows: &[Window], config: &SlotConfig) -> String {
    let slots = windows_to_slots(windows, config);

    let mut output = String::new();
    for cell in config.cells() {
        let open = slots.get(cell.index).copied().unwrap_or(false);
        output.push_str(&format!(
            "{} {}\n",
            cell.start_time.short(),
            cell_char(open).to_string().repeat(COLUMN_WIDTH - 2)
        ));
    }

    output.push('\n');
    for (index, window) in windows.iter().enumerate() {
        let t = window.times();
        output.push_str(&format!(
            "[{index}] {}-{}\n",
            t.start_time.short(),
            t.end_time.short()
        ));
    }
    output
}
