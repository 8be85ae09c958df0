//! Scheduled plan command definitions.

use crate::commands::params::{
    content_type_parameter, COMMAND_PAUSE_ALIAS, COMMAND_SCHEDULE_PAUSE, PARAMETER_ID,
    PARAMETER_REVERT, PARAMETER_USER_ID,
};
use clap::{Arg, ArgAction, Command};

pub fn schedule_pause_command() -> Command {
    Command::new(COMMAND_SCHEDULE_PAUSE)
        .about("Pause the scheduled deliveries of a look or dashboard")
        .visible_alias(COMMAND_PAUSE_ALIAS)
        .arg(
            Arg::new(PARAMETER_ID)
                .required(true)
                .help("Id of the look or dashboard"),
        )
        .arg(content_type_parameter(false))
        .arg(Arg::new(PARAMETER_USER_ID).help("Only list the schedules owned by this user"))
        .arg(
            Arg::new(PARAMETER_REVERT)
                .short('r')
                .long(PARAMETER_REVERT)
                .action(ArgAction::SetTrue)
                .help("Resume paused schedules instead"),
        )
}
