use crate::{
    actions::utils::{required_value, Session},
    api::ContentApi,
    commands::params::{PARAMETER_EDIT, PARAMETER_FOLDER_ID, PARAMETER_PRINCIPAL_ID, PARAMETER_PRINCIPAL_TYPE},
    error::CliError,
    model::{ContentType, PermissionType, Principal},
    permissions::{ancestor_chain, grant_access, AppliedGrant, GrantOutcome},
    progress::Spinner,
};
use clap::ArgMatches;
use color_print::cprintln;

/// Shares `folder_id` with `principal`, granting view access on every ancestor
/// up to the nearest root and `level` on the folder itself.
pub async fn share_folder<A: ContentApi>(
    api: &A,
    folder_id: &str,
    principal: &Principal,
    level: PermissionType,
) -> Result<Vec<AppliedGrant>, CliError> {
    let spinner = Spinner::start("Fetching parent folders");
    let chain = match ancestor_chain(api, folder_id).await {
        Ok(chain) => {
            spinner.succeed(format!("Found {} folder(s) to share", chain.len()));
            chain
        }
        Err(e) => {
            spinner.fail("Could not find parent folders");
            return Err(e.into());
        }
    };

    let spinner = Spinner::start("Sharing folders");
    match grant_access(api, &chain, principal, level).await {
        Ok(applied) => {
            spinner.succeed("Folders shared");
            Ok(applied)
        }
        Err(e) => {
            spinner.fail("Could not share every folder");
            Err(e.into())
        }
    }
}

pub async fn share(session: &Session, sub_matches: &ArgMatches) -> Result<(), CliError> {
    let folder_id = required_value(sub_matches, PARAMETER_FOLDER_ID)?;
    let principal = Principal::from_kind(
        required_value(sub_matches, PARAMETER_PRINCIPAL_TYPE)?,
        required_value(sub_matches, PARAMETER_PRINCIPAL_ID)?,
    )?;
    let level = if sub_matches.get_flag(PARAMETER_EDIT) {
        PermissionType::Edit
    } else {
        PermissionType::View
    };

    for grant in share_folder(&session.client, folder_id, &principal, level).await? {
        let outcome = match grant.outcome {
            GrantOutcome::Created => "granted",
            GrantOutcome::Updated => "updated to",
            GrantOutcome::Unchanged => "already had",
        };
        println!(
            "folder {}: {} {} {} access",
            session.reference(ContentType::Folder, &grant.folder_id),
            principal,
            outcome,
            grant.permission
        );
    }
    cprintln!(
        "<green>Folder {} shared with {}</green>",
        session.reference(ContentType::Folder, folder_id),
        principal
    );
    Ok(())
}
