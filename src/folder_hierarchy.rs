//! Folder hierarchy traversal for the binocle client.
//!
//! This module walks a folder tree through the paginated children endpoint,
//! down to a configurable depth, and renders the result as a tree, JSON, YAML
//! or CSV. Each call returns a freshly built subtree; nothing is accumulated
//! into caller-owned collections.

use crate::api::{ApiError, ContentApi};
use crate::format::{to_json, Formattable, FormattingError, OutputFormat};
use crate::model::{ContentType, Folder};
use ptree::TreeBuilder;
use serde::Serialize;
use std::fs::File;
use std::future::Future;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tracing::trace;

/// Page size used by the children listing unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Value of `--depth` that disables the depth limit.
pub const UNBOUNDED_DEPTH: i64 = -1;

#[derive(Debug, thiserror::Error)]
pub enum FolderHierarchyError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid depth {0}, use a positive number or -1 for unlimited depth")]
    InvalidDepth(i64),
    #[error("failed to export the folder tree: {0}")]
    Export(#[from] std::io::Error),
}

/// How far below the root folder the walker descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxDepth {
    Unbounded,
    Limited(u32),
}

impl MaxDepth {
    /// Interprets the command-line value, where `-1` means unbounded.
    pub fn from_sentinel(value: i64) -> Result<MaxDepth, FolderHierarchyError> {
        match value {
            UNBOUNDED_DEPTH => Ok(MaxDepth::Unbounded),
            value if value >= 0 => u32::try_from(value)
                .map(MaxDepth::Limited)
                .map_err(|_| FolderHierarchyError::InvalidDepth(value)),
            value => Err(FolderHierarchyError::InvalidDepth(value)),
        }
    }

    /// Whether folders sitting at `depth` belong to the listing.
    pub fn allows(&self, depth: u32) -> bool {
        match self {
            MaxDepth::Unbounded => true,
            MaxDepth::Limited(max) => depth <= *max,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub max_depth: MaxDepth,
    pub page_size: u32,
    /// Record titles and ids of the looks and dashboards of every folder
    pub show_content: bool,
}

impl WalkOptions {
    pub fn new(max_depth: MaxDepth) -> Self {
        Self {
            max_depth,
            page_size: DEFAULT_PAGE_SIZE,
            show_content: false,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_content(mut self, show_content: bool) -> Self {
        self.show_content = show_content;
        self
    }
}

/// A look or dashboard directly owned by a folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub id: String,
    pub title: String,
}

/// Represents a single folder node in the listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub depth: u32,
    pub dashboards: usize,
    pub looks: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentEntry>,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    fn from_folder(folder: Folder, depth: u32, show_content: bool, children: Vec<FolderNode>) -> Self {
        let content = if show_content {
            let dashboards = folder.dashboards.iter().map(|d| ContentEntry {
                content_type: ContentType::Dashboard,
                id: d.id.clone(),
                title: d.title.clone().unwrap_or_default(),
            });
            let looks = folder.looks.iter().map(|l| ContentEntry {
                content_type: ContentType::Look,
                id: l.id.clone(),
                title: l.title.clone().unwrap_or_default(),
            });
            dashboards.chain(looks).collect()
        } else {
            Vec::new()
        };

        Self {
            dashboards: folder.dashboards.len(),
            looks: folder.looks.len(),
            id: folder.id,
            name: folder.name,
            parent_id: folder.parent_id,
            depth,
            content,
            children,
        }
    }

    /// All nodes of the subtree in pre-order, this node first.
    pub fn descendants(&self) -> Vec<&FolderNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.descendants());
        }
        nodes
    }

    /// Total number of folders in the subtree, this node included.
    pub fn folder_count(&self) -> usize {
        1 + self.children.iter().map(FolderNode::folder_count).sum::<usize>()
    }

    fn label(&self) -> String {
        format!(
            "📁 {} #{} (D:{} - L:{})",
            self.name, self.id, self.dashboards, self.looks
        )
    }

    fn build_tree_node(&self, tree: &mut TreeBuilder) {
        tree.begin_child(self.label());
        self.add_branches(tree);
        tree.end_child();
    }

    fn add_branches(&self, tree: &mut TreeBuilder) {
        for entry in &self.content {
            let icon = match entry.content_type {
                ContentType::Dashboard => "📊",
                _ => "📄",
            };
            tree.add_empty_child(format!("{} {} #{}", icon, entry.title, entry.id));
        }
        for child in &self.children {
            child.build_tree_node(tree);
        }
    }

    /// Renders the subtree as a text diagram.
    pub fn render_tree(&self) -> Result<String, FormattingError> {
        let mut tree = TreeBuilder::new(self.label());
        self.add_branches(&mut tree);
        let tree = tree.build();

        let mut buffer = Vec::new();
        ptree::write_tree(&tree, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn to_csv(&self, with_headers: bool) -> Result<String, FormattingError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        if with_headers {
            wtr.write_record(["ID", "NAME", "PARENT_ID", "DEPTH", "DASHBOARDS", "LOOKS"])?;
        }
        for node in self.descendants() {
            wtr.write_record([
                node.id.clone(),
                node.name.clone(),
                node.parent_id.clone().unwrap_or_default(),
                node.depth.to_string(),
                node.dashboards.to_string(),
                node.looks.to_string(),
            ])?;
        }
        Ok(String::from_utf8(wtr.into_inner()?)?)
    }
}

impl Formattable for FolderNode {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Tree(_) => self.render_tree(),
            OutputFormat::Json(options) => to_json(self, options),
            OutputFormat::Yaml(_) => Ok(serde_yaml::to_string(self)?),
            OutputFormat::Csv(options) => self.to_csv(options.with_headers),
        }
    }
}

/// Fetches every direct child of a folder, one page at a time.
///
/// A full page always triggers a request for the next one, so a folder whose
/// child count is an exact multiple of the page size ends on an empty page.
pub async fn fetch_all_children<A: ContentApi>(
    api: &A,
    folder_id: &str,
    page_size: u32,
) -> Result<Vec<Folder>, ApiError> {
    let page_size = page_size.max(1);
    let mut children = Vec::new();
    let mut page = 1;

    loop {
        trace!("Fetching children page {} of folder {}", page, folder_id);
        let batch = api.get_folder_children(folder_id, page, page_size).await?;
        let fetched = batch.len();
        children.extend(batch);

        if fetched < page_size as usize {
            break;
        }
        page += 1;
    }

    trace!("Folder {} has {} children", folder_id, children.len());
    Ok(children)
}

/// Lists a folder and its subfolders down to `options.max_depth`.
pub async fn list_children<A: ContentApi>(
    api: &A,
    folder_id: &str,
    options: &WalkOptions,
) -> Result<FolderNode, ApiError> {
    let root = api.get_folder(folder_id).await?;
    build_node(api, root, 0, options).await
}

fn build_node<'a, A: ContentApi>(
    api: &'a A,
    folder: Folder,
    depth: u32,
    options: &'a WalkOptions,
) -> Pin<Box<dyn Future<Output = Result<FolderNode, ApiError>> + 'a>> {
    Box::pin(async move {
        let mut children = Vec::new();
        if options.max_depth.allows(depth + 1) {
            for child in fetch_all_children(api, &folder.id, options.page_size).await? {
                children.push(build_node(api, child, depth + 1, options).await?);
            }
        }
        Ok(FolderNode::from_folder(
            folder,
            depth,
            options.show_content,
            children,
        ))
    })
}

/// Name of the exported diagram for a folder listing.
pub fn export_file_name(folder_id: &str, timestamp_millis: u128) -> String {
    format!("binocle_ls_{}_{}.txt", folder_id, timestamp_millis)
}

/// Writes the tree diagram of `node` into `directory` and returns the file path.
pub fn export_tree(
    node: &FolderNode,
    directory: &Path,
    timestamp_millis: u128,
) -> Result<PathBuf, FolderHierarchyError> {
    let path = directory.join(export_file_name(&node.id, timestamp_millis));
    let writer = BufWriter::new(File::create(&path)?);

    let mut tree = TreeBuilder::new(node.label());
    node.add_branches(&mut tree);
    ptree::write_tree(&tree.build(), writer)?;

    Ok(path)
}
