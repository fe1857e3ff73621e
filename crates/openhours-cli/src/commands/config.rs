use clap::Subcommand;

use crate::common::{CmdResult, Context};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "grid.step_minutes", "week.day_labels.monday")
        key: String,
    },
    /// List all config values
    List,
    /// Validate the config file and overrides
    Check,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, ctx: &Context) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let config = ctx.config()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::List => {
            let config = ctx.config()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Check => {
            ctx.config()?.validate()?;
            println!("ok");
        }
        ConfigAction::Path => {
            println!("{}", ctx.config_path()?.display());
        }
    }
    Ok(())
}
