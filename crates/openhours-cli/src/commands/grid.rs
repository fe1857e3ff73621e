//! Slot grid conversion commands.

use std::path::PathBuf;

use clap::Args;
use openhours_core::{
    slots_to_windows, weekly_slots_to_windows, weekly_windows_to_slots, windows_to_slots,
    WeeklySlots,
};

use crate::common::{print_json, read_input, read_windows, CmdResult, Context, GridArgs};

#[derive(Args)]
pub struct SlotsArgs {
    /// Window list JSON file, or - for stdin
    pub input: PathBuf,
    /// Produce seven day grids instead of one
    #[arg(long)]
    pub weekly: bool,
    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Args)]
pub struct WindowsArgs {
    /// Slot grid JSON file, or - for stdin
    pub input: PathBuf,
    /// Input holds seven day grids
    #[arg(long)]
    pub weekly: bool,
    #[command(flatten)]
    pub grid: GridArgs,
}

pub fn slots(args: SlotsArgs, ctx: &Context) -> CmdResult {
    let config = args.grid.resolve(ctx)?.slot_config();
    let windows = read_windows(Some(args.input.as_path()))?;

    if args.weekly {
        print_json(&weekly_windows_to_slots(&windows, &config))
    } else {
        print_json(&windows_to_slots(&windows, &config))
    }
}

pub fn windows(args: WindowsArgs, ctx: &Context) -> CmdResult {
    let config = args.grid.resolve(ctx)?.slot_config();
    let raw = read_input(&args.input)?;

    let windows = if args.weekly {
        let grid: WeeklySlots = serde_json::from_str(&raw)?;
        grid.check(&config)?;
        weekly_slots_to_windows(&grid, &config)
    } else {
        let grid: Vec<bool> = serde_json::from_str(&raw)?;
        config.check_day(&grid)?;
        slots_to_windows(&grid, &config)
    };

    tracing::debug!(count = windows.len(), "grid decoded");
    print_json(&windows)
}
