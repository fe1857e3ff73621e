//! Window list editing: create, update, remove.
//!
//! Each command reads one snapshot, applies one engine operation and prints
//! the new list. Nothing is written back.

use std::path::PathBuf;

use clap::Args;
use openhours_core::{DayOfWeek, ValidationError, Window};

use crate::common::{print_json, read_windows, CmdResult, Context, GridArgs};

#[derive(Args)]
pub struct CreateArgs {
    /// Window list JSON file, or - for stdin (omit to start from an empty list)
    pub input: Option<PathBuf>,
    /// Minutes from the start of the visible span
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub offset: f64,
    /// Lane pixel offset of a double-click; overrides --offset
    #[arg(long, allow_negative_numbers = true, conflicts_with = "offset")]
    pub at_px: Option<f64>,
    /// Day of week; creates a weekly window
    #[arg(long)]
    pub day: Option<DayOfWeek>,
    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Window list JSON file, or - for stdin
    pub input: PathBuf,
    /// Position of the window in the list
    #[arg(long)]
    pub index: usize,
    /// New start, minutes since midnight (unsnapped)
    #[arg(long, allow_negative_numbers = true)]
    pub start: f64,
    /// New end, minutes since midnight (unsnapped)
    #[arg(long, allow_negative_numbers = true)]
    pub end: f64,
    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Window list JSON file, or - for stdin
    pub input: PathBuf,
    /// Position of the window in the list
    #[arg(long)]
    pub index: usize,
}

fn check_index(windows: &[Window], index: usize) -> Result<(), ValidationError> {
    if index >= windows.len() {
        return Err(ValidationError::OutOfBounds {
            collection: "window list".to_string(),
            index,
            len: windows.len(),
        });
    }
    Ok(())
}

pub fn create(args: CreateArgs, ctx: &Context) -> CmdResult {
    let config = args.grid.resolve(ctx)?;
    let windows = read_windows(args.input.as_deref())?;

    let offset = match args.at_px {
        Some(y) => config.lane().double_click_offset(y),
        None => args.offset,
    };

    let next = config.engine().create_window(&windows, args.day, offset);
    print_json(&next)
}

pub fn update(args: UpdateArgs, ctx: &Context) -> CmdResult {
    let config = args.grid.resolve(ctx)?;
    let windows = read_windows(Some(args.input.as_path()))?;
    check_index(&windows, args.index)?;

    let next = config
        .engine()
        .update_window(&windows, args.index, args.start, args.end);
    print_json(&next)
}

pub fn remove(args: RemoveArgs, ctx: &Context) -> CmdResult {
    let config = ctx.config()?;
    let windows = read_windows(Some(args.input.as_path()))?;
    check_index(&windows, args.index)?;

    print_json(&config.engine().remove_window(&windows, args.index))
}
