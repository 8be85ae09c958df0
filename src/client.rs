//! HTTP client for the Looker API.
//!
//! This module provides [`LookerClient`], the authenticated client every
//! command uses. It owns the session token obtained by
//! [`LookerClient::authenticate`] and attaches it to each request as
//! `Authorization: token <value>`.

use crate::api::{ApiError, ContentApi};
use crate::auth::{AuthClient, AuthError, Credentials};
use crate::model::{
    ContentMetadataAccess, ContentMetadataAccessRequest, Dashboard, DashboardElement,
    DashboardElementUpdate, DashboardUpdate, Folder, Look, LookUpdate, Query, ScheduledPlan,
    ScheduledPlanUpdate,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, trace};

pub const DEFAULT_API_VERSION: &str = "4.0";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Instance URL, e.g. `https://my.looker.com:19999`
    pub base_url: String,
    /// API version appended to the instance URL
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Whether TLS certificates are verified
    pub verify_ssl: bool,
    /// Headers included with every request
    pub default_headers: HashMap<String, String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert(
            "User-Agent".to_string(),
            format!("binocle/{}", env!("CARGO_PKG_VERSION")),
        );

        Self {
            base_url: base_url.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT_SECONDS,
            verify_ssl: true,
            default_headers,
        }
    }

    /// The versioned API root, e.g. `https://my.looker.com:19999/api/4.0`
    pub fn api_url(&self) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

pub struct LookerClient {
    client: Client,
    config: ClientConfig,
    access_token: Option<String>,
}

impl LookerClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        Ok(Self {
            client,
            config,
            access_token: None,
        })
    }

    /// Uses an already issued token instead of logging in.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Logs in with API3 credentials and keeps the session token for later calls.
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        let login_url = format!("{}/login", self.config.api_url());
        let token = AuthClient::new(&self.client, login_url)
            .get_access_token(credentials)
            .await?;
        self.access_token = Some(token.access_token);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url(), path)
    }

    async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.execute_request(self.client.get(self.url(path)).query(query))
            .await
    }

    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.client.request(method, self.url(path)).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute_request(request).await
    }

    /// Execute an HTTP request with the session token and common error handling
    async fn execute_request<T>(&self, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut request = request;

        // Without a token the request goes out anonymously and the service answers 401
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("token {}", token));
        }

        for (key, value) in &self.config.default_headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if status.is_success() {
            trace!("Raw response text for deserialization: {}", response_text);
            match serde_json::from_str::<T>(&response_text) {
                Ok(result) => Ok(result),
                Err(e) => {
                    error!(
                        "Failed to deserialize response: {}. Raw response: {}",
                        e, response_text
                    );
                    Err(ApiError::JsonError(e))
                }
            }
        } else {
            debug!("Request failed with status {}: {}", status, response_text);
            Err(ApiError::from_status(status, response_text))
        }
    }
}

const NO_BODY: Option<&()> = None;

impl ContentApi for LookerClient {
    async fn get_folder(&self, folder_id: &str) -> Result<Folder, ApiError> {
        self.get(&format!("/folders/{}", folder_id), &[]).await
    }

    async fn get_folder_children(
        &self,
        folder_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Folder>, ApiError> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        self.get(
            &format!("/folders/{}/children", folder_id),
            &[("page", page.as_str()), ("per_page", per_page.as_str())],
        )
        .await
    }

    async fn get_look(&self, look_id: &str) -> Result<Look, ApiError> {
        self.get(&format!("/looks/{}", look_id), &[]).await
    }

    async fn update_look(&self, look_id: &str, update: &LookUpdate) -> Result<Look, ApiError> {
        self.send(Method::PATCH, &format!("/looks/{}", look_id), &[], Some(update))
            .await
    }

    async fn move_look(&self, look_id: &str, folder_id: &str) -> Result<Look, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/looks/{}/move", look_id),
            &[("folder_id", folder_id)],
            NO_BODY,
        )
        .await
    }

    async fn copy_look(&self, look_id: &str, folder_id: &str) -> Result<Look, ApiError> {
        self.send(
            Method::POST,
            &format!("/looks/{}/copy", look_id),
            &[("folder_id", folder_id)],
            NO_BODY,
        )
        .await
    }

    async fn get_dashboard(&self, dashboard_id: &str) -> Result<Dashboard, ApiError> {
        self.get(&format!("/dashboards/{}", dashboard_id), &[]).await
    }

    async fn update_dashboard(
        &self,
        dashboard_id: &str,
        update: &DashboardUpdate,
    ) -> Result<Dashboard, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/dashboards/{}", dashboard_id),
            &[],
            Some(update),
        )
        .await
    }

    async fn move_dashboard(
        &self,
        dashboard_id: &str,
        folder_id: &str,
    ) -> Result<Dashboard, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/dashboards/{}/move", dashboard_id),
            &[("folder_id", folder_id)],
            NO_BODY,
        )
        .await
    }

    async fn copy_dashboard(
        &self,
        dashboard_id: &str,
        folder_id: &str,
    ) -> Result<Dashboard, ApiError> {
        self.send(
            Method::POST,
            &format!("/dashboards/{}/copy", dashboard_id),
            &[("folder_id", folder_id)],
            NO_BODY,
        )
        .await
    }

    async fn update_dashboard_element(
        &self,
        element_id: &str,
        update: &DashboardElementUpdate,
    ) -> Result<DashboardElement, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/dashboard_elements/{}", element_id),
            &[],
            Some(update),
        )
        .await
    }

    async fn create_query(&self, query: &Query) -> Result<Query, ApiError> {
        self.send(Method::POST, "/queries", &[], Some(query)).await
    }

    async fn scheduled_plans_for_look(
        &self,
        look_id: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<ScheduledPlan>, ApiError> {
        let query: Vec<(&str, &str)> = user_id.map(|id| ("user_id", id)).into_iter().collect();
        self.get(&format!("/scheduled_plans/look/{}", look_id), &query)
            .await
    }

    async fn scheduled_plans_for_dashboard(
        &self,
        dashboard_id: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<ScheduledPlan>, ApiError> {
        let query: Vec<(&str, &str)> = user_id.map(|id| ("user_id", id)).into_iter().collect();
        self.get(&format!("/scheduled_plans/dashboard/{}", dashboard_id), &query)
            .await
    }

    async fn update_scheduled_plan(
        &self,
        plan_id: &str,
        update: &ScheduledPlanUpdate,
    ) -> Result<ScheduledPlan, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/scheduled_plans/{}", plan_id),
            &[],
            Some(update),
        )
        .await
    }

    async fn content_metadata_accesses(
        &self,
        content_metadata_id: &str,
    ) -> Result<Vec<ContentMetadataAccess>, ApiError> {
        self.get(
            "/content_metadata_access",
            &[("content_metadata_id", content_metadata_id)],
        )
        .await
    }

    async fn create_content_metadata_access(
        &self,
        request: &ContentMetadataAccessRequest,
    ) -> Result<ContentMetadataAccess, ApiError> {
        self.send(Method::POST, "/content_metadata_access", &[], Some(request))
            .await
    }

    async fn update_content_metadata_access(
        &self,
        access_id: &str,
        request: &ContentMetadataAccessRequest,
    ) -> Result<ContentMetadataAccess, ApiError> {
        self.send(
            Method::PUT,
            &format!("/content_metadata_access/{}", access_id),
            &[],
            Some(request),
        )
        .await
    }
}
