//! Shared command parameters for all CLI commands.
//!
//! This module defines the command and parameter names and the argument
//! builders reused across the command modules.

use crate::format::{OutputFormat, JSON, TREE, YAML};
use clap::{value_parser, Arg, ArgAction};

// Content commands
pub const COMMAND_LS: &str = "ls";
pub const COMMAND_COPY: &str = "copy";
pub const COMMAND_EDIT: &str = "edit";
pub const COMMAND_SCHEDULE_PAUSE: &str = "schedule:pause";
pub const COMMAND_PAUSE_ALIAS: &str = "pause";
pub const COMMAND_RESTORE: &str = "restore";
pub const COMMAND_SHARE: &str = "share";

// Config commands
pub const COMMAND_CONFIG: &str = "config";
pub const COMMAND_PATH: &str = "path";
pub const COMMAND_SHOW: &str = "show";

// Connection parameters
pub const PARAMETER_BASE_URL: &str = "base-url";
pub const PARAMETER_CLIENT_ID: &str = "client-id";
pub const PARAMETER_CLIENT_SECRET: &str = "client-secret";
pub const PARAMETER_INSECURE: &str = "insecure";
pub const PARAMETER_VERBOSE: &str = "verbose";

// Content parameters
pub const PARAMETER_ID: &str = "id";
pub const PARAMETER_CONTENT_TYPE: &str = "type";
pub const PARAMETER_FOLDER_ID: &str = "folder-id";
pub const PARAMETER_USER_ID: &str = "user-id";
pub const PARAMETER_PRINCIPAL_TYPE: &str = "principal-type";
pub const PARAMETER_PRINCIPAL_ID: &str = "principal-id";
pub const PARAMETER_RENAME: &str = "rename";
pub const PARAMETER_BULK: &str = "bulk";
pub const PARAMETER_GET_PROPERTIES: &str = "get-properties";
pub const PARAMETER_REVERT: &str = "revert";
pub const PARAMETER_EDIT: &str = "edit";

// Listing parameters
pub const PARAMETER_DEPTH: &str = "depth";
pub const PARAMETER_IMAGE: &str = "image";
pub const PARAMETER_CONTENT: &str = "content";
pub const PARAMETER_PAGE_SIZE: &str = "page-size";

// Output parameters
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_HEADERS: &str = "headers";

// Environment variables
pub const ENV_BASE_URL: &str = "LOOKERSDK_BASE_URL";
pub const ENV_CLIENT_ID: &str = "LOOKERSDK_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "LOOKERSDK_CLIENT_SECRET";
pub const ENV_VERIFY_SSL: &str = "LOOKERSDK_VERIFY_SSL";

pub fn base_url_parameter() -> Arg {
    Arg::new(PARAMETER_BASE_URL)
        .short('u')
        .long(PARAMETER_BASE_URL)
        .num_args(1)
        .env(ENV_BASE_URL)
        .global(true)
        .help("Looker instance URL, e.g. https://mycompany.looker.com:19999")
}

pub fn client_id_parameter() -> Arg {
    Arg::new(PARAMETER_CLIENT_ID)
        .short('c')
        .long(PARAMETER_CLIENT_ID)
        .num_args(1)
        .env(ENV_CLIENT_ID)
        .global(true)
        .help("API3 client id")
}

pub fn client_secret_parameter() -> Arg {
    Arg::new(PARAMETER_CLIENT_SECRET)
        .short('s')
        .long(PARAMETER_CLIENT_SECRET)
        .num_args(1)
        .env(ENV_CLIENT_SECRET)
        .hide_env_values(true)
        .global(true)
        .help("API3 client secret")
}

pub fn insecure_parameter() -> Arg {
    Arg::new(PARAMETER_INSECURE)
        .long(PARAMETER_INSECURE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Do not verify the TLS certificate of the instance")
}

pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output for debugging")
}

pub fn content_id_parameter() -> Arg {
    Arg::new(PARAMETER_ID)
        .required(true)
        .help("Id of the look or dashboard")
}

/// Positional `l|d` selector. Required for `copy`, defaults to a look elsewhere.
pub fn content_type_parameter(required: bool) -> Arg {
    let arg = Arg::new(PARAMETER_CONTENT_TYPE)
        .value_parser(["l", "d"])
        .help("Content type: 'l' for a look, 'd' for a dashboard");
    if required {
        arg.required(true)
    } else {
        arg.default_value("l")
    }
}

pub fn folder_id_parameter() -> Arg {
    Arg::new(PARAMETER_FOLDER_ID)
        .required(true)
        .help("Id of the folder")
}

pub fn rename_parameter() -> Arg {
    Arg::new(PARAMETER_RENAME)
        .short('r')
        .long(PARAMETER_RENAME)
        .action(ArgAction::SetTrue)
        .help("Prompt for a new title")
}

/// This parameter is used by the commands that print structured output.
pub fn format_parameter(default: &'static str, names: Vec<&'static str>) -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .default_value(default)
        .help("Output data format")
        .value_parser(names)
}

pub fn list_format_parameter() -> Arg {
    format_parameter(TREE, OutputFormat::names())
}

pub fn config_format_parameter() -> Arg {
    format_parameter(YAML, vec![JSON, YAML])
}

/// This parameter flag is used across multiple commands for output formatting.
pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

/// This parameter flag is used across multiple commands for output formatting.
pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Output CSV with headers")
}

pub fn depth_parameter() -> Arg {
    Arg::new(PARAMETER_DEPTH)
        .short('d')
        .long(PARAMETER_DEPTH)
        .num_args(1)
        .default_value("2")
        .allow_negative_numbers(true)
        .value_parser(value_parser!(i64))
        .help("How many levels of subfolders to list, -1 for all of them")
}

pub fn page_size_parameter() -> Arg {
    Arg::new(PARAMETER_PAGE_SIZE)
        .long(PARAMETER_PAGE_SIZE)
        .num_args(1)
        .value_parser(value_parser!(u32).range(1..))
        .help("Number of children requested per page")
}
