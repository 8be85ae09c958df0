use crate::{
    actions::utils::{required_value, Session},
    api::ContentApi,
    commands::params::{PARAMETER_CONTENT_TYPE, PARAMETER_ID},
    error::CliError,
    model::ContentType,
    progress::Spinner,
    prompt::Prompter,
    restore::{fetch_state, restore_content},
};
use clap::ArgMatches;
use color_print::cprintln;
use std::str::FromStr;
use tracing::debug;

pub const NOT_DELETED_MESSAGE: &str = "Your content doesn't appear to have been deleted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    NotDeleted,
    Declined,
    Restored { folder_id: Option<String> },
}

/// Checks whether the content was soft deleted and restores it into a folder chosen by the user.
pub async fn restore<A: ContentApi, P: Prompter>(
    api: &A,
    prompter: &mut P,
    content_type: ContentType,
    id: &str,
) -> Result<RestoreOutcome, CliError> {
    let spinner = Spinner::start("Fetching content information");
    let state = match fetch_state(api, content_type, id).await {
        Ok(state) => {
            spinner.clear();
            state
        }
        Err(e) => {
            spinner.fail("Could not find the requested content. It may have been hard deleted or does not exist.");
            return Err(e.into());
        }
    };

    if !state.deleted {
        return Ok(RestoreOutcome::NotDeleted);
    }

    if !prompter.confirm("Your content was soft deleted, do you want to restore it?", true)? {
        return Ok(RestoreOutcome::Declined);
    }

    let target = loop {
        let answer = prompter.text(
            "Id of the folder where you want to restore your content:",
            Some("A numeric folder id, e.g. 42"),
        )?;
        match answer.trim().parse::<u64>() {
            Ok(folder_id) => break folder_id.to_string(),
            Err(e) => debug!("Ignoring folder id {:?}: {}", answer, e),
        }
    };

    let spinner = Spinner::start("Restoring content");
    match restore_content(api, &state, &target).await {
        Ok(folder_id) => {
            spinner.succeed("Your content has been restored");
            Ok(RestoreOutcome::Restored { folder_id })
        }
        Err(e) => {
            spinner.fail("Could not restore the content");
            Err(e.into())
        }
    }
}

pub async fn restore_deleted(session: &Session, prompter: &mut impl Prompter, sub_matches: &ArgMatches) -> Result<(), CliError> {
    let content_type = ContentType::from_str(required_value(sub_matches, PARAMETER_CONTENT_TYPE)?)?;
    let id = required_value(sub_matches, PARAMETER_ID)?;

    match restore(&session.client, prompter, content_type, id).await? {
        RestoreOutcome::NotDeleted => println!("{}", NOT_DELETED_MESSAGE),
        RestoreOutcome::Declined => println!("Nothing restored"),
        RestoreOutcome::Restored { folder_id } => {
            let location = match folder_id {
                Some(folder_id) => format!(" in folder {}", session.reference(ContentType::Folder, &folder_id)),
                None => String::new(),
            };
            cprintln!(
                "<green>Restored {} {}{}</green>",
                content_type,
                session.reference(content_type, id),
                location
            );
        }
    }
    Ok(())
}
