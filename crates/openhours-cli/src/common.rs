//! Shared plumbing for CLI commands: config resolution and JSON I/O.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use openhours_core::{window, ConfigError, EditorConfig, Window};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Global options every command sees.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub overrides: Vec<String>,
}

impl Context {
    /// Load the configured file (or defaults) and apply `--set` overrides.
    pub fn config(&self) -> Result<EditorConfig, ConfigError> {
        let mut config = match &self.config_path {
            Some(path) => EditorConfig::load_from(path)?,
            None => EditorConfig::load()?,
        };
        for raw in &self.overrides {
            let (key, value) = raw.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
                key: raw.clone(),
                message: "expected KEY=VALUE".to_string(),
            })?;
            config.set(key.trim(), value.trim())?;
        }
        Ok(config)
    }

    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => EditorConfig::path(),
        }
    }
}

/// Grid flags that take precedence over the `[grid]` section.
#[derive(Args, Debug, Default)]
pub struct GridArgs {
    /// Snap step in minutes
    #[arg(long)]
    pub step: Option<u32>,
    /// First visible hour
    #[arg(long)]
    pub day_start: Option<u32>,
    /// Last visible hour
    #[arg(long)]
    pub day_end: Option<u32>,
    /// Shortest window in minutes
    #[arg(long)]
    pub min_window: Option<u32>,
    /// Length of a newly created window in minutes
    #[arg(long)]
    pub default_window: Option<u32>,
}

impl GridArgs {
    pub fn resolve(&self, ctx: &Context) -> Result<EditorConfig, ConfigError> {
        let mut config = ctx.config()?;
        let grid = &mut config.grid;
        if let Some(v) = self.step {
            grid.step_minutes = v;
        }
        if let Some(v) = self.day_start {
            grid.day_start_hour = v;
        }
        if let Some(v) = self.day_end {
            grid.day_end_hour = v;
        }
        if let Some(v) = self.min_window {
            grid.min_window_minutes = v;
        }
        if let Some(v) = self.default_window {
            grid.default_window_minutes = v;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Read a whole file, or stdin for `-`.
pub fn read_input(source: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if source == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| format!("cannot read {}: {e}", source.display()).into())
    }
}

pub fn read_windows(source: Option<&Path>) -> Result<Vec<Window>, Box<dyn std::error::Error>> {
    match source {
        Some(path) => Ok(window::from_json(&read_input(path)?)?),
        None => Ok(Vec::new()),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
