use crate::{
    actions::utils::{required_value, Session},
    api::ContentApi,
    commands::params::{PARAMETER_CONTENT_TYPE, PARAMETER_FOLDER_ID, PARAMETER_ID, PARAMETER_RENAME},
    error::CliError,
    model::{ContentType, DashboardUpdate, LookUpdate},
    progress::Spinner,
    prompt::Prompter,
};
use clap::ArgMatches;
use color_print::cprintln;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub content_type: ContentType,
    pub id: String,
    pub folder_id: String,
    pub rename: bool,
}

/// The copy as it exists after the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedContent {
    pub content_type: ContentType,
    pub id: String,
    pub title: Option<String>,
    pub folder_id: Option<String>,
}

async fn rename_copy<A: ContentApi>(
    api: &A,
    copy: CopiedContent,
    title: String,
) -> Result<CopiedContent, CliError> {
    let spinner = Spinner::start("Renaming the copy");
    let renamed = match copy.content_type {
        ContentType::Dashboard => api
            .update_dashboard(
                &copy.id,
                &DashboardUpdate {
                    title: Some(title),
                    ..Default::default()
                },
            )
            .await
            .map(|d| d.title),
        _ => api
            .update_look(
                &copy.id,
                &LookUpdate {
                    title: Some(title),
                    ..Default::default()
                },
            )
            .await
            .map(|l| l.title),
    };

    match renamed {
        Ok(title) => {
            spinner.succeed("Copy renamed");
            Ok(CopiedContent { title, ..copy })
        }
        Err(e) => {
            spinner.fail("Could not rename the copy");
            Err(e.into())
        }
    }
}

/// Copies a look or dashboard into a folder, optionally renaming the copy.
pub async fn copy_content<A: ContentApi, P: Prompter>(
    api: &A,
    prompter: &mut P,
    request: &CopyRequest,
) -> Result<CopiedContent, CliError> {
    let spinner = Spinner::start("Copying content");
    let copied = match request.content_type {
        ContentType::Dashboard => api
            .copy_dashboard(&request.id, &request.folder_id)
            .await
            .map(|d| CopiedContent {
                content_type: ContentType::Dashboard,
                id: d.id,
                title: d.title,
                folder_id: d.folder_id,
            }),
        _ => api
            .copy_look(&request.id, &request.folder_id)
            .await
            .map(|l| CopiedContent {
                content_type: ContentType::Look,
                id: l.id,
                title: l.title,
                folder_id: l.folder_id,
            }),
    };
    let copied = match copied {
        Ok(copied) => {
            spinner.succeed(format!("Your {} has been copied", request.content_type));
            copied
        }
        Err(e) => {
            spinner.fail("Could not find the requested content. It may not exist.");
            return Err(e.into());
        }
    };

    if !request.rename {
        return Ok(copied);
    }

    let message = format!("Enter the new name of the copied {}:", request.content_type.label());
    let title = prompter.text(&message, copied.title.as_deref())?;
    rename_copy(api, copied, title).await
}

pub async fn copy(session: &Session, prompter: &mut impl Prompter, sub_matches: &ArgMatches) -> Result<(), CliError> {
    let request = CopyRequest {
        content_type: ContentType::from_str(required_value(sub_matches, PARAMETER_CONTENT_TYPE)?)?,
        id: required_value(sub_matches, PARAMETER_ID)?.clone(),
        folder_id: required_value(sub_matches, PARAMETER_FOLDER_ID)?.clone(),
        rename: sub_matches.get_flag(PARAMETER_RENAME),
    };

    let copied = copy_content(&session.client, prompter, &request).await?;
    cprintln!(
        "<green>Copied {} {} into folder {} as {}</green>",
        request.content_type,
        session.reference(request.content_type, &request.id),
        session.reference(ContentType::Folder, &request.folder_id),
        session.reference(copied.content_type, &copied.id),
    );
    Ok(())
}
