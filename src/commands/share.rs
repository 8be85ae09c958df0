//! Share command definition.

use crate::commands::params::{
    folder_id_parameter, COMMAND_SHARE, PARAMETER_EDIT, PARAMETER_PRINCIPAL_ID,
    PARAMETER_PRINCIPAL_TYPE,
};
use clap::{Arg, ArgAction, Command};

pub fn share_command() -> Command {
    Command::new(COMMAND_SHARE)
        .about("Share a folder, and view access to its parents, with a group or user")
        .arg(folder_id_parameter())
        .arg(
            Arg::new(PARAMETER_PRINCIPAL_ID)
                .required(true)
                .help("Id of the group or user"),
        )
        .arg(
            Arg::new(PARAMETER_PRINCIPAL_TYPE)
                .value_parser(["g", "u"])
                .default_value("g")
                .help("'g' for a group, 'u' for a user"),
        )
        .arg(
            Arg::new(PARAMETER_EDIT)
                .short('e')
                .long(PARAMETER_EDIT)
                .action(ArgAction::SetTrue)
                .help("Grant edit access on the folder itself"),
        )
}
