//! Restore command definition.

use crate::commands::params::{content_id_parameter, content_type_parameter, COMMAND_RESTORE};
use clap::Command;

pub fn restore_command() -> Command {
    Command::new(COMMAND_RESTORE)
        .about("Restore a deleted look or dashboard")
        .arg(content_id_parameter())
        .arg(content_type_parameter(false))
}
