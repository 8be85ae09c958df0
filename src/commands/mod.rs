//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap crate.
//! Each command lives in its own file; the shared parameters are in [`params`].

use clap::{ArgMatches, Command};

pub mod config;
pub mod copy;
pub mod edit;
pub mod ls;
pub mod params;
pub mod restore;
pub mod schedule;
pub mod share;

use params::{
    base_url_parameter, client_id_parameter, client_secret_parameter, insecure_parameter,
    verbose_parameter,
};

/// The full command tree, before parsing.
pub fn cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(base_url_parameter())
        .arg(client_id_parameter())
        .arg(client_secret_parameter())
        .arg(insecure_parameter())
        .arg(verbose_parameter())
        .subcommand(ls::ls_command())
        .subcommand(copy::copy_command())
        .subcommand(edit::edit_command())
        .subcommand(schedule::schedule_pause_command())
        .subcommand(restore::restore_command())
        .subcommand(share::share_command())
        .subcommand(config::config_command())
}

/// Parses the process arguments, exiting on usage errors.
pub fn create_cli_commands() -> ArgMatches {
    cli_command().get_matches()
}
