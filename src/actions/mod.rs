//! Command handlers.
//!
//! Each module reads its arguments from the parsed command line and delegates
//! to a function generic over [`crate::api::ContentApi`] and
//! [`crate::prompt::Prompter`], which the integration tests drive directly.

pub mod config;
pub mod copy;
pub mod edit;
pub mod ls;
pub mod restore;
pub mod schedule;
pub mod share;
pub mod utils;
