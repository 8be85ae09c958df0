use crate::{
    actions::{self, utils::connect},
    commands::params::{
        COMMAND_CONFIG, COMMAND_COPY, COMMAND_EDIT, COMMAND_LS, COMMAND_RESTORE,
        COMMAND_SCHEDULE_PAUSE, COMMAND_SHARE,
    },
    configuration::Configuration,
    error::CliError,
    error_utils::report_error,
    prompt::InquirePrompter,
};
use clap::ArgMatches;
use tracing::trace;

/// Runs the selected subcommand.
///
/// Failures are reported with the option to display the full error before
/// they are returned to `main`.
pub async fn execute_command(matches: ArgMatches) -> Result<(), CliError> {
    let mut prompter = InquirePrompter;
    let result = dispatch(&matches, &mut prompter).await;
    if let Err(e) = &result {
        report_error(&mut prompter, e);
    }
    result
}

async fn dispatch(matches: &ArgMatches, prompter: &mut InquirePrompter) -> Result<(), CliError> {
    let (name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| CliError::UnsupportedSubcommand(String::from("none")))?;
    trace!("Executing command {}", name);

    if name == COMMAND_CONFIG {
        return actions::config::config(sub_matches);
    }

    let configuration = Configuration::load_default()?;
    let session = connect(sub_matches, &configuration).await?;

    match name {
        COMMAND_LS => actions::ls::list_folders(&session, sub_matches).await,
        COMMAND_COPY => actions::copy::copy(&session, prompter, sub_matches).await,
        COMMAND_EDIT => actions::edit::edit(&session, prompter, sub_matches).await,
        COMMAND_SCHEDULE_PAUSE => actions::schedule::pause(&session, prompter, sub_matches).await,
        COMMAND_RESTORE => actions::restore::restore_deleted(&session, prompter, sub_matches).await,
        COMMAND_SHARE => actions::share::share(&session, sub_matches).await,
        other => Err(CliError::UnsupportedSubcommand(other.to_string())),
    }
}
