//! Folder permission propagation.
//!
//! Sharing a folder with a group or user only works if the principal can also
//! see every folder above it. [`ancestor_chain`] collects the folders from the
//! nearest root down to the target, and [`grant_access`] applies a grant on the
//! content metadata of each one.

use crate::api::{ApiError, ContentApi};
use crate::model::{ContentMetadataAccess, ContentMetadataAccessRequest, PermissionType, Principal};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, trace};

#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("folder #{0} appears twice in its own ancestor chain")]
    CycleDetected(String),
    #[error("folder #{0} has no content metadata id")]
    MissingContentMetadata(String),
    #[error("failed to grant access on folder #{folder_id} after {} successful grant(s): {source}", .applied.len())]
    PartialPropagation {
        folder_id: String,
        applied: Vec<AppliedGrant>,
        #[source]
        source: ApiError,
    },
}

/// One folder of an ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    pub folder_id: String,
    pub content_metadata_id: String,
}

/// The access level each link of a chain receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedGrant {
    pub link: ChainLink,
    pub permission: PermissionType,
}

/// What has to happen to reach the requested grant on one piece of content metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantAction {
    Create,
    Update { access_id: String },
    Unchanged { access_id: String },
}

/// Outcome of a grant that went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedGrant {
    pub folder_id: String,
    pub content_metadata_id: String,
    pub permission: PermissionType,
    pub outcome: GrantOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Collects the folders from the topmost applicable ancestor down to `folder_id`.
///
/// The walk stops at the first shared or users root (embedded ones included),
/// or at a folder without a parent. The last link is always the target.
pub async fn ancestor_chain<A: ContentApi>(
    api: &A,
    folder_id: &str,
) -> Result<Vec<ChainLink>, PermissionError> {
    let mut visited = HashSet::new();
    let mut folders = Vec::new();

    let mut current = api.get_folder(folder_id).await?;
    loop {
        if !visited.insert(current.id.clone()) {
            return Err(PermissionError::CycleDetected(current.id));
        }
        trace!("Visiting folder {} ({})", current.id, current.name);

        let parent_id = match (&current.parent_id, current.is_root()) {
            (Some(parent_id), false) => Some(parent_id.clone()),
            _ => None,
        };
        folders.push(current);

        match parent_id {
            Some(parent_id) => current = api.get_folder(&parent_id).await?,
            None => break,
        }
    }

    folders
        .into_iter()
        .rev()
        .map(|folder| match folder.content_metadata_id {
            Some(content_metadata_id) => Ok(ChainLink {
                folder_id: folder.id,
                content_metadata_id,
            }),
            None => Err(PermissionError::MissingContentMetadata(folder.id)),
        })
        .collect()
}

/// Assigns the requested level to the target and view access to every ancestor.
pub fn plan_grants(chain: &[ChainLink], level: PermissionType) -> Vec<PlannedGrant> {
    let last = chain.len().saturating_sub(1);
    chain
        .iter()
        .enumerate()
        .map(|(index, link)| PlannedGrant {
            link: link.clone(),
            permission: if index == last { level } else { PermissionType::View },
        })
        .collect()
}

/// Decides whether a grant must be created, updated, or left alone.
pub fn resolve_grant_action(
    existing: &[ContentMetadataAccess],
    principal: &Principal,
    level: PermissionType,
) -> GrantAction {
    match existing.iter().find(|access| access.is_for(principal)) {
        Some(access) if access.permission_type == Some(level) => GrantAction::Unchanged {
            access_id: access.id.clone(),
        },
        Some(access) => GrantAction::Update {
            access_id: access.id.clone(),
        },
        None => GrantAction::Create,
    }
}

async fn apply_grant<A: ContentApi>(
    api: &A,
    grant: &PlannedGrant,
    principal: &Principal,
) -> Result<GrantOutcome, ApiError> {
    let content_metadata_id = &grant.link.content_metadata_id;
    let existing = api.content_metadata_accesses(content_metadata_id).await?;
    let request = ContentMetadataAccessRequest::new(content_metadata_id, principal, grant.permission);

    match resolve_grant_action(&existing, principal, grant.permission) {
        GrantAction::Create => {
            api.create_content_metadata_access(&request).await?;
            Ok(GrantOutcome::Created)
        }
        GrantAction::Update { access_id } => {
            api.update_content_metadata_access(&access_id, &request).await?;
            Ok(GrantOutcome::Updated)
        }
        GrantAction::Unchanged { .. } => Ok(GrantOutcome::Unchanged),
    }
}

/// Applies the grants of a chain in order, stopping at the first failure.
///
/// Grants applied before a failure stay in place and are listed in
/// [`PermissionError::PartialPropagation`].
pub async fn grant_access<A: ContentApi>(
    api: &A,
    chain: &[ChainLink],
    principal: &Principal,
    level: PermissionType,
) -> Result<Vec<AppliedGrant>, PermissionError> {
    let mut applied = Vec::new();

    for grant in plan_grants(chain, level) {
        debug!(
            "Granting {} access on folder {} to {}",
            grant.permission, grant.link.folder_id, principal
        );
        match apply_grant(api, &grant, principal).await {
            Ok(outcome) => applied.push(AppliedGrant {
                folder_id: grant.link.folder_id,
                content_metadata_id: grant.link.content_metadata_id,
                permission: grant.permission,
                outcome,
            }),
            Err(source) => {
                return Err(PermissionError::PartialPropagation {
                    folder_id: grant.link.folder_id,
                    applied,
                    source,
                })
            }
        }
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str) -> ChainLink {
        ChainLink {
            folder_id: id.to_string(),
            content_metadata_id: format!("cm{}", id),
        }
    }

    fn access(id: &str, group: Option<&str>, level: PermissionType) -> ContentMetadataAccess {
        ContentMetadataAccess {
            id: id.to_string(),
            content_metadata_id: Some("cm1".to_string()),
            permission_type: Some(level),
            group_id: group.map(str::to_string),
            user_id: None,
        }
    }

    #[test]
    fn test_only_the_target_receives_edit() {
        let plan = plan_grants(&[link("1"), link("2"), link("3")], PermissionType::Edit);
        let levels: Vec<PermissionType> = plan.iter().map(|g| g.permission).collect();
        assert_eq!(
            levels,
            vec![PermissionType::View, PermissionType::View, PermissionType::Edit]
        );
    }

    #[test]
    fn test_single_link_chain_gets_requested_level() {
        let plan = plan_grants(&[link("7")], PermissionType::Edit);
        assert_eq!(plan[0].permission, PermissionType::Edit);
        assert!(plan_grants(&[], PermissionType::Edit).is_empty());
    }

    #[test]
    fn test_resolve_grant_action() {
        let group = Principal::Group("5".to_string());
        let existing = vec![
            access("10", Some("4"), PermissionType::Edit),
            access("11", Some("5"), PermissionType::View),
        ];

        assert_eq!(
            resolve_grant_action(&existing, &group, PermissionType::View),
            GrantAction::Unchanged { access_id: "11".to_string() }
        );
        assert_eq!(
            resolve_grant_action(&existing, &group, PermissionType::Edit),
            GrantAction::Update { access_id: "11".to_string() }
        );
        assert_eq!(
            resolve_grant_action(&existing, &Principal::User("5".to_string()), PermissionType::View),
            GrantAction::Create
        );
    }
}
