//! Query patching for dashboard tiles and looks.
//!
//! Queries are immutable on the server. Editing one means merging a patch into
//! a copy of the current query, submitting the result as a new query and
//! pointing the tile or look at the new id.

use crate::api::{ApiError, ContentApi};
use crate::model::{DashboardElement, DashboardElementUpdate, Look, LookUpdate, Query};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, trace};

/// Fields the server computes for each query and rejects on creation.
pub const SERVER_MANAGED_FIELDS: [&str; 7] = [
    "can",
    "slug",
    "share_url",
    "expanded_share_url",
    "url",
    "has_table_calculations",
    "client_id",
];

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("the query patch must be a JSON object, e.g. {{\"limit\": \"100\"}}")]
    PatchNotAnObject,
    #[error("invalid query patch: {0}")]
    InvalidPatch(#[from] serde_json::Error),
    #[error("{0} has no query to edit")]
    MissingQuery(String),
    #[error("the server did not return an id for the new query of {0}")]
    MissingQueryId(String),
    #[error("{target}: failed while {stage}: {source}")]
    Failed {
        target: EditTarget,
        stage: EditStage,
        #[source]
        source: ApiError,
    },
    #[error(
        "edited {} item(s), {} failed: {}",
        .succeeded.len(),
        .failed.len(),
        describe_failures(.failed)
    )]
    PartialBatch {
        succeeded: Vec<EditOutcome>,
        failed: Vec<EditError>,
    },
}

fn describe_failures(failed: &[EditError]) -> String {
    failed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The thing whose query is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Tile { element_id: String, title: String },
    Look { look_id: String },
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditTarget::Tile { element_id, title } => write!(f, "tile '{}' #{}", title, element_id),
            EditTarget::Look { look_id } => write!(f, "look #{}", look_id),
        }
    }
}

/// Progress of a single item through the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStage {
    Selected,
    QueryMerged,
    QueryCreated,
    ElementRepointed,
}

impl fmt::Display for EditStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditStage::Selected => write!(f, "selecting the item"),
            EditStage::QueryMerged => write!(f, "creating the new query"),
            EditStage::QueryCreated => write!(f, "repointing the item at the new query"),
            EditStage::ElementRepointed => write!(f, "finishing the edit"),
        }
    }
}

/// An item ready to be edited together with its current query.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCandidate {
    pub target: EditTarget,
    pub query: Query,
}

impl EditCandidate {
    pub fn from_element(element: &DashboardElement) -> Option<EditCandidate> {
        element.query.as_ref().map(|query| EditCandidate {
            target: EditTarget::Tile {
                element_id: element.id.clone(),
                title: element.display_title().to_string(),
            },
            query: query.clone(),
        })
    }

    pub fn from_look(look: &Look) -> Result<EditCandidate, EditError> {
        match &look.query {
            Some(query) => Ok(EditCandidate {
                target: EditTarget::Look {
                    look_id: look.id.clone(),
                },
                query: query.clone(),
            }),
            None => Err(EditError::MissingQuery(format!("look #{}", look.id))),
        }
    }
}

/// Result of a completed edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub target: EditTarget,
    pub query_id: String,
    pub stage: EditStage,
}

/// The dashboard tiles that carry an embedded query.
pub fn editable_elements(elements: &[DashboardElement]) -> Vec<EditCandidate> {
    elements.iter().filter_map(EditCandidate::from_element).collect()
}

/// Parses user input into a patch object.
pub fn parse_patch(input: &str) -> Result<Map<String, Value>, EditError> {
    match serde_json::from_str::<Value>(input)? {
        Value::Object(patch) => Ok(patch),
        _ => Err(EditError::PatchNotAnObject),
    }
}

/// Shallow-merges `patch` into `query`.
///
/// Top-level keys of the patch replace those of the query, `null` removes the
/// key, and the server-managed fields are always dropped.
pub fn merge_query(query: &Query, patch: &Map<String, Value>) -> Query {
    let mut merged = query.fields().clone();

    for (key, value) in patch {
        if value.is_null() {
            merged.remove(key);
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }

    for field in SERVER_MANAGED_FIELDS {
        merged.remove(field);
    }

    Query::from(merged)
}

/// Runs one candidate through merge, creation and repointing.
pub async fn apply_edit<A: ContentApi>(
    api: &A,
    candidate: &EditCandidate,
    patch: &Map<String, Value>,
) -> Result<EditOutcome, EditError> {
    let target = candidate.target.clone();
    let merged = merge_query(&candidate.query, patch);
    trace!("Merged query for {}: {:?}", target, merged);

    let created = api
        .create_query(&merged)
        .await
        .map_err(|source| EditError::Failed {
            target: target.clone(),
            stage: EditStage::QueryMerged,
            source,
        })?;
    let query_id = created
        .id()
        .ok_or_else(|| EditError::MissingQueryId(target.to_string()))?;
    debug!("Created query {} for {}", query_id, target);

    let repointed = match &target {
        EditTarget::Tile { element_id, .. } => api
            .update_dashboard_element(
                element_id,
                &DashboardElementUpdate {
                    query_id: query_id.clone(),
                },
            )
            .await
            .map(|_| ()),
        EditTarget::Look { look_id } => api
            .update_look(
                look_id,
                &LookUpdate {
                    query_id: Some(query_id.clone()),
                    ..Default::default()
                },
            )
            .await
            .map(|_| ()),
    };

    match repointed {
        Ok(()) => Ok(EditOutcome {
            target,
            query_id,
            stage: EditStage::ElementRepointed,
        }),
        Err(source) => Err(EditError::Failed {
            target,
            stage: EditStage::QueryCreated,
            source,
        }),
    }
}

/// Applies the same patch to every candidate in order.
///
/// A failing item stops at the stage it reached and the run moves on to the
/// next candidate. Nothing is rolled back.
pub async fn apply_bulk_edit<A: ContentApi>(
    api: &A,
    candidates: &[EditCandidate],
    patch: &Map<String, Value>,
) -> Result<Vec<EditOutcome>, EditError> {
    let mut succeeded = Vec::with_capacity(candidates.len());
    let mut failed = Vec::new();
    for candidate in candidates {
        match apply_edit(api, candidate, patch).await {
            Ok(outcome) => succeeded.push(outcome),
            Err(e) => {
                debug!("Edit of {} failed: {}", candidate.target, e);
                failed.push(e);
            }
        }
    }
    finish_batch(succeeded, failed)
}

/// Turns the results of a run into a single outcome: the edited items, or a
/// [`EditError::PartialBatch`] naming every item that failed.
pub fn finish_batch(
    succeeded: Vec<EditOutcome>,
    failed: Vec<EditError>,
) -> Result<Vec<EditOutcome>, EditError> {
    if failed.is_empty() {
        Ok(succeeded)
    } else {
        Err(EditError::PartialBatch { succeeded, failed })
    }
}
