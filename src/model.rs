//! Data models for Looker content.
//!
//! The structures in this module mirror the subset of the Looker API 4.0
//! resources that binocle reads and writes: folders, looks, dashboards and
//! their tiles, queries, scheduled plans and content-metadata access grants.
//! Only the fields the commands use are modelled; everything else in the
//! service response is ignored on deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("unsupported content type {0:?}, expected 'l' (look) or 'd' (dashboard)")]
    UnsupportedContentType(String),
    #[error("unsupported principal type {0:?}, expected 'g' (group) or 'u' (user)")]
    UnsupportedPrincipalType(String),
}

/// The service returns some identifiers as JSON numbers and others as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawId::deserialize(deserializer)?.into())
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Treats an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The kind of content a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Folder,
    Look,
    Dashboard,
}

impl ContentType {
    /// Path segment used by both the API and the web UI (e.g. `/looks/42`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentType::Folder => "folders",
            ContentType::Look => "looks",
            ContentType::Dashboard => "dashboards",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Folder => "Folder",
            ContentType::Look => "Look",
            ContentType::Dashboard => "Dashboard",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().to_lowercase())
    }
}

impl FromStr for ContentType {
    type Err = ModelError;

    /// Parses the short command-line form. Folders are never selected this way.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "l" | "look" => Ok(ContentType::Look),
            "d" | "dashboard" => Ok(ContentType::Dashboard),
            _ => Err(ModelError::UnsupportedContentType(value.to_string())),
        }
    }
}

/// Access level carried by a content-metadata grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    View,
    Edit,
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionType::View => write!(f, "view"),
            PermissionType::Edit => write!(f, "edit"),
        }
    }
}

/// The grantee of a content-metadata access: a group or a single user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Principal {
    Group(String),
    User(String),
}

impl Principal {
    /// Builds a principal from the `g`/`u` command-line marker and an id.
    pub fn from_kind(kind: &str, id: &str) -> Result<Principal, ModelError> {
        match kind.to_lowercase().as_str() {
            "g" | "group" => Ok(Principal::Group(id.to_string())),
            "u" | "user" => Ok(Principal::User(id.to_string())),
            _ => Err(ModelError::UnsupportedPrincipalType(kind.to_string())),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Principal::Group(id) | Principal::User(id) => id,
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Group(id) => write!(f, "group #{}", id),
            Principal::User(id) => write!(f, "user #{}", id),
        }
    }
}

/// Id and title of a look or dashboard listed inside a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A folder as returned by `GET /folders/{id}` and the children listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub content_metadata_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_shared_root: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_users_root: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_personal: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_personal_descendant: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_embed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_embed_shared_root: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_embed_users_root: bool,
    #[serde(default)]
    pub child_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dashboards: Vec<ContentSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub looks: Vec<ContentSummary>,
}

impl Folder {
    /// Creates a plain folder with no flags and no content.
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: Option<&str>) -> Folder {
        Folder {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.map(str::to_string),
            content_metadata_id: None,
            is_shared_root: false,
            is_users_root: false,
            is_personal: false,
            is_personal_descendant: false,
            is_embed: false,
            is_embed_shared_root: false,
            is_embed_users_root: false,
            child_count: None,
            dashboards: Vec::new(),
            looks: Vec::new(),
        }
    }

    /// True for the folders above which sharing never propagates.
    pub fn is_root(&self) -> bool {
        self.is_shared_root
            || self.is_users_root
            || self.is_embed_shared_root
            || self.is_embed_users_root
    }
}

/// An immutable query object. Queries are kept as an open JSON object so that
/// fields the service adds in the future survive a merge-and-resubmit cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(pub Map<String, Value>);

impl Query {
    pub fn id(&self) -> Option<String> {
        match self.0.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Query {
    fn from(fields: Map<String, Value>) -> Self {
        Query(fields)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Look {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub folder_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub query_id: Option<String>,
    #[serde(default)]
    pub query: Option<Query>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardElement {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub dashboard_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_text: Option<String>,
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub look_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub query_id: Option<String>,
    #[serde(default)]
    pub query: Option<Query>,
}

impl DashboardElement {
    /// Display name used in selection lists.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.title_text.as_deref())
            .unwrap_or("Untitled")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub folder_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dashboard_elements: Vec<DashboardElement>,
}

/// Partial update body for `PATCH /looks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
}

/// Partial update body for `PATCH /dashboards/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

/// Partial update body for `PATCH /dashboard_elements/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardElementUpdate {
    pub query_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPlanDestination {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub destination_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPlan {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub crontab: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scheduled_plan_destination: Vec<ScheduledPlanDestination>,
}

/// Partial update body for `PATCH /scheduled_plans/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledPlanUpdate {
    pub enabled: bool,
}

/// An existing access grant on a piece of content metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadataAccess {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub content_metadata_id: Option<String>,
    #[serde(default)]
    pub permission_type: Option<PermissionType>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub group_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<String>,
}

impl ContentMetadataAccess {
    pub fn is_for(&self, principal: &Principal) -> bool {
        match principal {
            Principal::Group(id) => self.group_id.as_deref() == Some(id.as_str()),
            Principal::User(id) => self.user_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Body for creating or updating a content-metadata access grant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentMetadataAccessRequest {
    pub content_metadata_id: String,
    pub permission_type: PermissionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ContentMetadataAccessRequest {
    pub fn new(
        content_metadata_id: &str,
        principal: &Principal,
        permission_type: PermissionType,
    ) -> Self {
        let (group_id, user_id) = match principal {
            Principal::Group(id) => (Some(id.clone()), None),
            Principal::User(id) => (None, Some(id.clone())),
        };
        Self {
            content_metadata_id: content_metadata_id.to_string(),
            permission_type,
            group_id,
            user_id,
        }
    }
}
