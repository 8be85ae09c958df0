//! The content API seam.
//!
//! Every remote operation the commands need is declared on [`ContentApi`].
//! [`crate::client::LookerClient`] implements it over HTTP; the integration
//! tests implement it with an in-memory service.

use crate::model::{
    ContentMetadataAccess, ContentMetadataAccessRequest, Dashboard, DashboardElement,
    DashboardElementUpdate, DashboardUpdate, Folder, Look, LookUpdate, Query, ScheduledPlan,
    ScheduledPlanUpdate,
};
use reqwest::StatusCode;

/// Error emitted by the Looker API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("authentication failed ({status})")]
    Unauthorized { status: StatusCode, body: String },
    #[error("resource not found")]
    NotFound { body: String },
    #[error("the request was rejected as invalid ({status})")]
    Validation { status: StatusCode, body: String },
    #[error("unexpected response from server ({status})")]
    Status { status: StatusCode, body: String },
}

impl ApiError {
    /// Classifies a non-successful response by its status code.
    pub fn from_status(status: StatusCode, body: String) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::Unauthorized { status, body }
            }
            StatusCode::NOT_FOUND => ApiError::NotFound { body },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation { status, body }
            }
            _ => ApiError::Status { status, body },
        }
    }

    /// The raw response body, when the service sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body, .. }
            | ApiError::NotFound { body }
            | ApiError::Validation { body, .. }
            | ApiError::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Remote operations on folders, content, queries, schedules and grants.
///
/// Calls are issued one at a time by the commands, so implementations are not
/// required to be `Send` or `Sync`.
#[allow(async_fn_in_trait)]
pub trait ContentApi {
    async fn get_folder(&self, folder_id: &str) -> Result<Folder, ApiError>;

    /// One page of the direct children of a folder. Pages start at 1.
    async fn get_folder_children(
        &self,
        folder_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Folder>, ApiError>;

    async fn get_look(&self, look_id: &str) -> Result<Look, ApiError>;
    async fn update_look(&self, look_id: &str, update: &LookUpdate) -> Result<Look, ApiError>;
    async fn move_look(&self, look_id: &str, folder_id: &str) -> Result<Look, ApiError>;
    async fn copy_look(&self, look_id: &str, folder_id: &str) -> Result<Look, ApiError>;

    async fn get_dashboard(&self, dashboard_id: &str) -> Result<Dashboard, ApiError>;
    async fn update_dashboard(
        &self,
        dashboard_id: &str,
        update: &DashboardUpdate,
    ) -> Result<Dashboard, ApiError>;
    async fn move_dashboard(&self, dashboard_id: &str, folder_id: &str)
        -> Result<Dashboard, ApiError>;
    async fn copy_dashboard(&self, dashboard_id: &str, folder_id: &str)
        -> Result<Dashboard, ApiError>;

    async fn update_dashboard_element(
        &self,
        element_id: &str,
        update: &DashboardElementUpdate,
    ) -> Result<DashboardElement, ApiError>;

    async fn create_query(&self, query: &Query) -> Result<Query, ApiError>;

    async fn scheduled_plans_for_look(
        &self,
        look_id: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<ScheduledPlan>, ApiError>;
    async fn scheduled_plans_for_dashboard(
        &self,
        dashboard_id: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<ScheduledPlan>, ApiError>;
    async fn update_scheduled_plan(
        &self,
        plan_id: &str,
        update: &ScheduledPlanUpdate,
    ) -> Result<ScheduledPlan, ApiError>;

    async fn content_metadata_accesses(
        &self,
        content_metadata_id: &str,
    ) -> Result<Vec<ContentMetadataAccess>, ApiError>;
    async fn create_content_metadata_access(
        &self,
        request: &ContentMetadataAccessRequest,
    ) -> Result<ContentMetadataAccess, ApiError>;
    async fn update_content_metadata_access(
        &self,
        access_id: &str,
        request: &ContentMetadataAccessRequest,
    ) -> Result<ContentMetadataAccess, ApiError>;
}
