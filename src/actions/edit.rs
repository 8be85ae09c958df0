use crate::{
    actions::utils::{required_value, Session},
    api::ContentApi,
    commands::params::{
        PARAMETER_BULK, PARAMETER_CONTENT_TYPE, PARAMETER_GET_PROPERTIES, PARAMETER_ID,
        PARAMETER_RENAME,
    },
    error::CliError,
    model::{ContentType, DashboardUpdate, LookUpdate, Query},
    progress::Spinner,
    prompt::Prompter,
    query_edit::{
        apply_bulk_edit, apply_edit, editable_elements, finish_batch, parse_patch, EditCandidate,
        EditOutcome, EditTarget,
    },
};
use clap::ArgMatches;
use color_print::cprintln;
use std::str::FromStr;
use tracing::debug;

const PATCH_HELP: &str = r#"A JSON object, e.g. {"limit": "100"}; null removes a field"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub content_type: ContentType,
    pub id: String,
    pub rename: bool,
    pub bulk: bool,
    pub get_properties: bool,
}

fn print_query(query: &Query) {
    match serde_json::to_string_pretty(query) {
        Ok(json) => println!("{}", json),
        Err(e) => debug!("Could not print the query: {}", e),
    }
}

fn ask_patch<P: Prompter>(
    prompter: &mut P,
    message: &str,
) -> Result<serde_json::Map<String, serde_json::Value>, CliError> {
    let input = prompter.text(message, Some(PATCH_HELP))?;
    Ok(parse_patch(&input)?)
}

fn tile_choice(candidate: &EditCandidate) -> String {
    match &candidate.target {
        EditTarget::Tile { element_id, title } => format!("[Name: {}] [Id: {}]", title, element_id),
        EditTarget::Look { look_id } => format!("[Look] [Id: {}]", look_id),
    }
}

async fn rename<A: ContentApi, P: Prompter>(
    api: &A,
    prompter: &mut P,
    request: &EditRequest,
    current_title: Option<&str>,
) -> Result<(), CliError> {
    let message = format!("Enter the new name of the {}:", request.content_type.label());
    let title = prompter.text(&message, current_title)?;

    let spinner = Spinner::start(format!("Renaming {} #{}", request.content_type, request.id));
    let renamed = match request.content_type {
        ContentType::Dashboard => api
            .update_dashboard(
                &request.id,
                &DashboardUpdate {
                    title: Some(title),
                    ..Default::default()
                },
            )
            .await
            .map(|_| ()),
        _ => api
            .update_look(
                &request.id,
                &LookUpdate {
                    title: Some(title),
                    ..Default::default()
                },
            )
            .await
            .map(|_| ()),
    };
    match renamed {
        Ok(()) => {
            spinner.succeed("Renamed");
            Ok(())
        }
        Err(e) => {
            spinner.fail("Could not rename the requested content");
            Err(e.into())
        }
    }
}

/// Loads the content, lets the user pick what to edit and applies the patches.
///
/// Each tile ends either repointed at a new query or at the stage that failed.
/// A failure does not stop the remaining tiles and nothing is rolled back.
pub async fn edit_content<A: ContentApi, P: Prompter>(
    api: &A,
    prompter: &mut P,
    request: &EditRequest,
) -> Result<Vec<EditOutcome>, CliError> {
    let spinner = Spinner::start("Looking for content");
    let candidates = match request.content_type {
        ContentType::Dashboard => match api.get_dashboard(&request.id).await {
            Ok(dashboard) => {
                spinner.succeed(format!(
                    "Dashboard {} #{} found",
                    dashboard.title.as_deref().unwrap_or_default(),
                    dashboard.id
                ));
                if request.rename {
                    rename(api, prompter, request, dashboard.title.as_deref()).await?;
                }
                editable_elements(&dashboard.dashboard_elements)
            }
            Err(e) => {
                spinner.fail("Could not find the requested content. It may not exist.");
                return Err(e.into());
            }
        },
        _ => match api.get_look(&request.id).await {
            Ok(look) => {
                spinner.succeed(format!(
                    "Look {} #{} found",
                    look.title.as_deref().unwrap_or_default(),
                    look.id
                ));
                if request.rename {
                    rename(api, prompter, request, look.title.as_deref()).await?;
                }
                vec![EditCandidate::from_look(&look)?]
            }
            Err(e) => {
                spinner.fail("Could not find the requested content. It may not exist.");
                return Err(e.into());
            }
        },
    };

    let selected: Vec<EditCandidate> = if request.content_type == ContentType::Dashboard {
        if candidates.is_empty() {
            println!("This dashboard has no tiles with a query to edit");
            return Ok(Vec::new());
        }
        let choices: Vec<String> = candidates.iter().map(tile_choice).collect();
        let indexes = prompter.multi_select("Which tiles do you want to update?", &choices)?;
        indexes
            .into_iter()
            .filter_map(|index| candidates.get(index).cloned())
            .collect()
    } else {
        candidates
    };

    if selected.is_empty() {
        println!("Nothing selected, no changes made");
        return Ok(Vec::new());
    }

    if request.bulk || selected.len() == 1 {
        if request.get_properties {
            print_query(&selected[0].query);
        }
        let patch = ask_patch(
            prompter,
            "Enter the object containing the changes to apply to every selected item:",
        )?;
        let spinner = Spinner::start(format!("Editing {} item(s)", selected.len()));
        return match apply_bulk_edit(api, &selected, &patch).await {
            Ok(outcomes) => {
                spinner.succeed("Your changes have been applied");
                Ok(outcomes)
            }
            Err(e) => {
                spinner.fail("Could not edit the selected items");
                Err(e.into())
            }
        };
    }

    let mut outcomes = Vec::with_capacity(selected.len());
    let mut failed = Vec::new();
    for candidate in &selected {
        if request.get_properties {
            print_query(&candidate.query);
        }
        let message = format!("Enter the object containing the changes for {}:", candidate.target);
        let patch = ask_patch(prompter, &message)?;

        let spinner = Spinner::start(format!("Editing {}", candidate.target));
        match apply_edit(api, candidate, &patch).await {
            Ok(outcome) => {
                spinner.succeed(format!("{} now uses query #{}", outcome.target, outcome.query_id));
                outcomes.push(outcome);
            }
            Err(e) => {
                spinner.fail(format!("Could not edit {}", candidate.target));
                failed.push(e);
            }
        }
    }
    finish_batch(outcomes, failed).map_err(CliError::from)
}

pub async fn edit(session: &Session, prompter: &mut impl Prompter, sub_matches: &ArgMatches) -> Result<(), CliError> {
    let request = EditRequest {
        content_type: ContentType::from_str(required_value(sub_matches, PARAMETER_CONTENT_TYPE)?)?,
        id: required_value(sub_matches, PARAMETER_ID)?.clone(),
        rename: sub_matches.get_flag(PARAMETER_RENAME),
        bulk: sub_matches.get_flag(PARAMETER_BULK),
        get_properties: sub_matches.get_flag(PARAMETER_GET_PROPERTIES),
    };

    let outcomes = edit_content(&session.client, prompter, &request).await?;
    if !outcomes.is_empty() {
        cprintln!(
            "<green>Updated {} item(s) of {} {}</green>",
            outcomes.len(),
            request.content_type,
            session.reference(request.content_type, &request.id)
        );
    }
    Ok(())
}
