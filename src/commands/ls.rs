//! Folder listing command definition.

use crate::commands::params::{
    depth_parameter, format_pretty_parameter, format_with_headers_parameter,
    list_format_parameter, page_size_parameter, COMMAND_LS, PARAMETER_CONTENT, PARAMETER_FOLDER_ID,
    PARAMETER_IMAGE,
};
use clap::{Arg, ArgAction, Command};

pub fn ls_command() -> Command {
    Command::new(COMMAND_LS)
        .about("List the folder tree below a folder")
        .arg(
            Arg::new(PARAMETER_FOLDER_ID)
                .default_value("1")
                .help("Id of the folder to start from"),
        )
        .arg(depth_parameter())
        .arg(
            Arg::new(PARAMETER_IMAGE)
                .short('i')
                .long(PARAMETER_IMAGE)
                .action(ArgAction::SetTrue)
                .help("Also export the tree diagram to a file in the working directory"),
        )
        .arg(
            Arg::new(PARAMETER_CONTENT)
                .long(PARAMETER_CONTENT)
                .action(ArgAction::SetTrue)
                .help("Show the looks and dashboards of every folder"),
        )
        .arg(page_size_parameter())
        .arg(list_format_parameter())
        .arg(format_pretty_parameter())
        .arg(format_with_headers_parameter())
}
