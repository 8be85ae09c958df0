use crate::{
    auth::Credentials,
    client::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECONDS},
    folder_hierarchy::DEFAULT_PAGE_SIZE,
    format::{to_json, Formattable, FormattingError, OutputFormat},
};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "binocle";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const CONFIGURATION_DIRECTORY_ENV: &str = "BINOCLE_CONFIG_DIR";

const REDACTED: &str = "********";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause}")]
    FailedToLoadData { cause: Box<dyn std::error::Error> },
    #[error("missing value for property {name:?}, pass it as a flag, an environment variable or in the configuration file")]
    MissingRequiredPropertyValue { name: String },
    #[error("{cause}")]
    FormattingError {
        #[from]
        cause: FormattingError,
    },
}

/// The optional configuration file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verify_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
}

/// Values given on the command line or through environment variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub verify_ssl: Option<bool>,
    pub page_size: Option<u32>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub credentials: Credentials,
    pub api_version: String,
    pub timeout: u64,
    pub verify_ssl: bool,
    pub page_size: u32,
}

impl Settings {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.base_url.clone());
        config.api_version = self.api_version.clone();
        config.timeout = self.timeout;
        config.verify_ssl = self.verify_ssl;
        config
    }
}

impl Configuration {
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIGURATION_DIRECTORY_ENV) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(configuration_directory) => {
                let mut default_config_file_path = configuration_directory;
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Loads the default configuration file. A missing file yields the defaults.
    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!("Loading configuration from {}...", default_file_path.display());
        Configuration::load_from_file(default_file_path)
    }

    pub fn load_from_file(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        match fs::read_to_string(&path) {
            Ok(configuration) if configuration.trim().is_empty() => Ok(Configuration::default()),
            Ok(configuration) => match serde_yaml::from_str(&configuration) {
                Ok(configuration) => Ok(configuration),
                Err(cause) => Err(ConfigurationError::FailedToLoadData {
                    cause: Box::new(cause),
                }),
            },
            Err(cause) if cause.kind() == ErrorKind::NotFound => {
                debug!("No configuration file at {}, using defaults", path.display());
                Ok(Configuration::default())
            }
            Err(cause) => Err(ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }),
        }
    }

    /// Combines the file with command-line and environment values, the latter winning.
    pub fn resolve(&self, overrides: &Overrides) -> Result<Settings, ConfigurationError> {
        let base_url = match (&overrides.base_url, &self.base_url) {
            (Some(base_url), _) => base_url.clone(),
            (None, Some(base_url)) => base_url.to_string(),
            (None, None) => return Err(missing("base_url")),
        };
        let client_id = overrides
            .client_id
            .clone()
            .or_else(|| self.client_id.clone())
            .ok_or_else(|| missing("client_id"))?;
        let client_secret = overrides
            .client_secret
            .clone()
            .or_else(|| self.client_secret.clone())
            .ok_or_else(|| missing("client_secret"))?;

        Ok(Settings {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::new(client_id, client_secret),
            api_version: self
                .api_version
                .clone()
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            verify_ssl: overrides.verify_ssl.or(self.verify_ssl).unwrap_or(true),
            page_size: overrides.page_size.unwrap_or_else(|| self.page_size()).max(1),
        })
    }

    /// A copy that is safe to print.
    fn redacted(&self) -> Configuration {
        let mut copy = self.clone();
        if copy.client_secret.is_some() {
            copy.client_secret = Some(REDACTED.to_string());
        }
        copy
    }
}

fn missing(name: &str) -> ConfigurationError {
    ConfigurationError::MissingRequiredPropertyValue {
        name: name.to_string(),
    }
}

impl Formattable for Configuration {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        let printable = self.redacted();
        match f {
            OutputFormat::Json(options) => to_json(&printable, options),
            OutputFormat::Yaml(_) => Ok(serde_yaml::to_string(&printable)?),
            _ => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}
