//! Configuration command definitions.
//!
//! The configuration file is read-only for binocle; these commands only show it.

use crate::commands::params::{
    config_format_parameter, format_pretty_parameter, COMMAND_CONFIG, COMMAND_PATH, COMMAND_SHOW,
};
use clap::Command;

/// Create the config command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Inspect the configuration")
        .subcommand_required(true)
        .subcommand(Command::new(COMMAND_PATH).about("Show the configuration file path"))
        .subcommand(
            Command::new(COMMAND_SHOW)
                .about("Show the configuration file contents, secrets masked")
                .arg(config_format_parameter())
                .arg(format_pretty_parameter()),
        )
}
