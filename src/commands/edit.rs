//! Edit command definition.

use crate::commands::params::{
    content_id_parameter, content_type_parameter, rename_parameter, COMMAND_EDIT, PARAMETER_BULK,
    PARAMETER_GET_PROPERTIES,
};
use clap::{Arg, ArgAction, Command};

pub fn edit_command() -> Command {
    Command::new(COMMAND_EDIT)
        .about("Edit the queries behind a look or the tiles of a dashboard")
        .arg(content_id_parameter())
        .arg(content_type_parameter(false))
        .arg(rename_parameter())
        .arg(
            Arg::new(PARAMETER_BULK)
                .short('b')
                .long(PARAMETER_BULK)
                .action(ArgAction::SetTrue)
                .help("Apply one patch to every selected tile"),
        )
        .arg(
            Arg::new(PARAMETER_GET_PROPERTIES)
                .short('p')
                .long(PARAMETER_GET_PROPERTIES)
                .action(ArgAction::SetTrue)
                .help("Print the current query before asking for a patch"),
        )
}
