//! Restoring soft-deleted looks and dashboards.

use crate::api::{ApiError, ContentApi};
use crate::model::{ContentType, DashboardUpdate, LookUpdate};

/// The parts of a look or dashboard that decide how it is restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentState {
    pub content_type: ContentType,
    pub id: String,
    pub title: Option<String>,
    pub folder_id: Option<String>,
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestorePlan {
    NotDeleted,
    Restore { move_to: Option<String> },
}

/// Decides what restoring `state` into `target_folder_id` requires.
pub fn plan_restore(state: &ContentState, target_folder_id: &str) -> RestorePlan {
    if !state.deleted {
        return RestorePlan::NotDeleted;
    }
    let move_to = match state.folder_id.as_deref() {
        Some(folder_id) if folder_id == target_folder_id => None,
        _ => Some(target_folder_id.to_string()),
    };
    RestorePlan::Restore { move_to }
}

/// Fetches the current state of a look or dashboard.
pub async fn fetch_state<A: ContentApi>(
    api: &A,
    content_type: ContentType,
    id: &str,
) -> Result<ContentState, ApiError> {
    match content_type {
        ContentType::Dashboard => {
            let dashboard = api.get_dashboard(id).await?;
            Ok(ContentState {
                content_type,
                id: dashboard.id,
                title: dashboard.title,
                folder_id: dashboard.folder_id,
                deleted: dashboard.deleted,
            })
        }
        _ => {
            let look = api.get_look(id).await?;
            Ok(ContentState {
                content_type: ContentType::Look,
                id: look.id,
                title: look.title,
                folder_id: look.folder_id,
                deleted: look.deleted,
            })
        }
    }
}

/// Clears the deleted flag and returns the folder the content now sits in.
pub async fn undelete<A: ContentApi>(
    api: &A,
    content_type: ContentType,
    id: &str,
) -> Result<Option<String>, ApiError> {
    match content_type {
        ContentType::Dashboard => {
            let update = DashboardUpdate {
                deleted: Some(false),
                ..Default::default()
            };
            Ok(api.update_dashboard(id, &update).await?.folder_id)
        }
        _ => {
            let update = LookUpdate {
                deleted: Some(false),
                ..Default::default()
            };
            Ok(api.update_look(id, &update).await?.folder_id)
        }
    }
}

/// Moves a look or dashboard into another folder.
pub async fn move_content<A: ContentApi>(
    api: &A,
    content_type: ContentType,
    id: &str,
    folder_id: &str,
) -> Result<(), ApiError> {
    match content_type {
        ContentType::Dashboard => api.move_dashboard(id, folder_id).await.map(|_| ()),
        _ => api.move_look(id, folder_id).await.map(|_| ()),
    }
}

/// Undeletes the content and moves it when its folder differs from the target.
///
/// Returns the folder the content ends up in.
pub async fn restore_content<A: ContentApi>(
    api: &A,
    state: &ContentState,
    target_folder_id: &str,
) -> Result<Option<String>, ApiError> {
    if let RestorePlan::NotDeleted = plan_restore(state, target_folder_id) {
        return Ok(state.folder_id.clone());
    }

    let folder_id = undelete(api, state.content_type, &state.id).await?;
    if folder_id.as_deref() == Some(target_folder_id) {
        return Ok(folder_id);
    }
    move_content(api, state.content_type, &state.id, target_folder_id).await?;
    Ok(Some(target_folder_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(folder_id: Option<&str>, deleted: bool) -> ContentState {
        ContentState {
            content_type: ContentType::Look,
            id: "42".to_string(),
            title: Some("Revenue".to_string()),
            folder_id: folder_id.map(str::to_string),
            deleted,
        }
    }

    #[test]
    fn test_restore_plans() {
        assert_eq!(plan_restore(&state(Some("5"), false), "6"), RestorePlan::NotDeleted);
        assert_eq!(
            plan_restore(&state(Some("5"), true), "5"),
            RestorePlan::Restore { move_to: None }
        );
        assert_eq!(
            plan_restore(&state(Some("5"), true), "6"),
            RestorePlan::Restore { move_to: Some("6".to_string()) }
        );
        assert_eq!(
            plan_restore(&state(None, true), "6"),
            RestorePlan::Restore { move_to: Some("6".to_string()) }
        );
    }
}
