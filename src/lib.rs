//! The binocle client library.
//!
//! binocle is a command-line tool for Looker content: it lists folder trees,
//! copies, restores and bulk-edits looks and dashboards, pauses their
//! schedules, and shares folders together with their parents.
//!
//! # Modules
//!
//! - `api`: the [`api::ContentApi`] trait every remote operation goes through
//! - `auth`: login with API3 credentials
//! - `client`: the HTTP implementation of the content API
//! - `commands` / `cli` / `actions`: argument parsing, dispatch and command handlers
//! - `configuration`: the optional configuration file and settings resolution
//! - `folder_hierarchy`: folder tree traversal and rendering
//! - `permissions`: folder sharing along the ancestor chain
//! - `query_edit`: query patching for tiles and looks
//! - `restore` / `schedules`: restore and schedule decisions
//! - `model`: data models for Looker resources

pub mod actions;
pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod error_utils;
pub mod exit_codes;
pub mod folder_hierarchy;
pub mod format;
pub mod links;
pub mod model;
pub mod permissions;
pub mod progress;
pub mod prompt;
pub mod query_edit;
pub mod restore;
pub mod schedules;
