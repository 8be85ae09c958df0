use thiserror::Error;

use crate::{
    api::ApiError, auth::AuthError, configuration::ConfigurationError,
    exit_codes::BinocleExitCode, folder_hierarchy::FolderHierarchyError, format::FormattingError,
    model::ModelError, permissions::PermissionError, prompt::PromptError, query_edit::EditError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand {0}")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading or resolution
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    #[error("{0}")]
    InvalidArgument(#[from] ModelError),
    #[error("Login failed: {0}")]
    AuthError(#[from] AuthError),
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
    #[error("{0}")]
    FolderListError(#[from] FolderHierarchyError),
    #[error("Sharing failed: {0}")]
    PermissionError(#[from] PermissionError),
    #[error("Edit failed: {0}")]
    EditError(#[from] EditError),
    #[error("{0}")]
    PromptError(#[from] PromptError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error
    ///
    /// Usage problems map to `UsageError`, missing content to `NotFound`,
    /// a cancelled prompt to `TempFail`, and remote failures to the
    /// authentication, network or API codes depending on the response.
    pub fn exit_code(&self) -> BinocleExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => BinocleExitCode::UsageError,
            CliError::ConfigurationError(ConfigurationError::MissingRequiredPropertyValue {
                ..
            }) => BinocleExitCode::UsageError,
            CliError::ConfigurationError(_) => BinocleExitCode::ConfigError,
            CliError::FormattingError(_) => BinocleExitCode::DataError,
            CliError::MissingRequiredArgument(_) => BinocleExitCode::UsageError,
            CliError::InvalidArgument(_) => BinocleExitCode::UsageError,
            CliError::AuthError(AuthError::MissingCredential(_)) => BinocleExitCode::UsageError,
            CliError::AuthError(AuthError::HttpError(_)) => BinocleExitCode::NetworkError,
            CliError::AuthError(_) => BinocleExitCode::AuthError,
            CliError::ApiError(e) => api_exit_code(e),
            CliError::FolderListError(FolderHierarchyError::Api(e)) => api_exit_code(e),
            CliError::FolderListError(FolderHierarchyError::InvalidDepth(_)) => {
                BinocleExitCode::UsageError
            }
            CliError::FolderListError(FolderHierarchyError::Export(_)) => BinocleExitCode::OSError,
            CliError::PermissionError(e) => permission_exit_code(e),
            CliError::EditError(e) => edit_exit_code(e),
            CliError::PromptError(PromptError::Cancelled) => BinocleExitCode::TempFail,
            CliError::PromptError(PromptError::Failed(_)) => BinocleExitCode::OSError,
            CliError::IoError(_) => BinocleExitCode::OSError,
        }
    }

    /// The underlying API error, if the failure came from the remote service.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CliError::ApiError(e) | CliError::FolderListError(FolderHierarchyError::Api(e)) => {
                Some(e)
            }
            CliError::PermissionError(PermissionError::Api(e))
            | CliError::PermissionError(PermissionError::PartialPropagation { source: e, .. }) => {
                Some(e)
            }
            CliError::AuthError(AuthError::AuthFailed { source, .. }) => Some(source),
            CliError::EditError(e) => edit_api_error(e),
            _ => None,
        }
    }
}

fn api_exit_code(error: &ApiError) -> BinocleExitCode {
    match error {
        ApiError::HttpError(_) => BinocleExitCode::NetworkError,
        ApiError::JsonError(_) => BinocleExitCode::DataError,
        ApiError::Unauthorized { .. } => BinocleExitCode::AuthError,
        ApiError::NotFound { .. } => BinocleExitCode::NotFound,
        ApiError::Validation { .. } => BinocleExitCode::DataError,
        ApiError::Status { .. } => BinocleExitCode::ApiError,
    }
}

fn permission_exit_code(error: &PermissionError) -> BinocleExitCode {
    match error {
        PermissionError::Api(e) | PermissionError::PartialPropagation { source: e, .. } => {
            api_exit_code(e)
        }
        PermissionError::CycleDetected(_) | PermissionError::MissingContentMetadata(_) => {
            BinocleExitCode::DataError
        }
    }
}

fn edit_exit_code(error: &EditError) -> BinocleExitCode {
    match edit_api_error(error) {
        Some(e) => api_exit_code(e),
        None => BinocleExitCode::DataError,
    }
}

fn edit_api_error(error: &EditError) -> Option<&ApiError> {
    match error {
        EditError::Failed { source, .. } => Some(source),
        EditError::PartialBatch { failed, .. } => failed.iter().find_map(edit_api_error),
        _ => None,
    }
}
