//! CLI commands for settings

use clap::Subcommand;

use crate::config::{LedgerPaths, Settings};
use crate::error::EngineResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and current settings
    Show,

    /// Print one setting
    Get {
        /// Setting name
        key: String,
    },

    /// Change one setting and save it
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &LedgerPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> EngineResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("LedgerPulse Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Default data:   {}", paths.default_snapshot().display());
            println!();
            println!("Settings:");
            for key in Settings::KEYS {
                println!("  {}: {}", key, settings.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", settings.get(&key)?);
        }
        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("{} = {}", key, settings.get(&key)?);
        }
    }

    Ok(())
}
