use crate::{
    actions::utils::{get_format_parameter_value, required_value, Session},
    api::ContentApi,
    commands::params::{PARAMETER_CONTENT, PARAMETER_DEPTH, PARAMETER_FOLDER_ID, PARAMETER_IMAGE},
    error::CliError,
    folder_hierarchy::{export_tree, list_children, FolderNode, MaxDepth, WalkOptions},
    format::Formattable,
    progress::Spinner,
};
use clap::ArgMatches;
use color_print::cprintln;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

/// Walks the folder tree below `folder_id` behind a spinner.
pub async fn fetch_folder_tree<A: ContentApi>(
    api: &A,
    folder_id: &str,
    options: &WalkOptions,
) -> Result<FolderNode, CliError> {
    let spinner = Spinner::start(format!("Listing folder #{}", folder_id));
    match list_children(api, folder_id, options).await {
        Ok(tree) => {
            spinner.succeed(format!("Found {} folder(s)", tree.folder_count()));
            Ok(tree)
        }
        Err(e) => {
            spinner.fail(format!("Could not list folder #{}", folder_id));
            Err(e.into())
        }
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

pub async fn list_folders(session: &Session, sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Listing folders...");

    let folder_id = required_value(sub_matches, PARAMETER_FOLDER_ID)?;
    let depth = sub_matches
        .get_one::<i64>(PARAMETER_DEPTH)
        .copied()
        .unwrap_or(2);
    let format = get_format_parameter_value(sub_matches)?;

    let options = WalkOptions::new(MaxDepth::from_sentinel(depth)?)
        .with_page_size(session.settings.page_size)
        .with_content(sub_matches.get_flag(PARAMETER_CONTENT));

    let tree = fetch_folder_tree(&session.client, folder_id, &options).await?;
    println!("{}", tree.format(&format)?);

    if sub_matches.get_flag(PARAMETER_IMAGE) {
        let directory = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let path = export_tree(&tree, &directory, unix_millis())?;
        cprintln!("<green>Tree exported to {}</green>", path.display());
    }

    Ok(())
}
