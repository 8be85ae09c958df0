//! Copy command definition.

use crate::commands::params::{
    content_id_parameter, content_type_parameter, folder_id_parameter, rename_parameter,
    COMMAND_COPY,
};
use clap::Command;

pub fn copy_command() -> Command {
    Command::new(COMMAND_COPY)
        .about("Copy a look or dashboard into a folder")
        .arg(content_id_parameter())
        .arg(content_type_parameter(true))
        .arg(folder_id_parameter().help("Id of the destination folder"))
        .arg(rename_parameter().help("Prompt for a new title for the copy"))
}
