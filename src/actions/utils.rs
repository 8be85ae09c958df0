use crate::{
    client::LookerClient,
    commands::params::{
        ENV_VERIFY_SSL, PARAMETER_BASE_URL, PARAMETER_CLIENT_ID, PARAMETER_CLIENT_SECRET,
        PARAMETER_FORMAT, PARAMETER_HEADERS, PARAMETER_INSECURE, PARAMETER_PAGE_SIZE,
        PARAMETER_PRETTY,
    },
    configuration::{Configuration, Overrides, Settings},
    error::CliError,
    format::{OutputFormat, OutputFormatOptions},
    links::{content_reference, stdout_supports_hyperlinks},
    model::ContentType,
    progress::Spinner,
};
use clap::ArgMatches;
use tracing::{debug, trace};

/// An authenticated client together with the settings it was built from.
pub struct Session {
    pub client: LookerClient,
    pub settings: Settings,
    pub hyperlinks: bool,
}

impl Session {
    /// `#id`, hyperlinked to the web UI when stdout is a terminal.
    pub fn reference(&self, content_type: ContentType, id: &str) -> String {
        content_reference(&self.settings.base_url, content_type, id, self.hyperlinks)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Connection values given as flags or environment variables.
///
/// Clap already prefers a flag over its environment variable, so the result
/// only has to be layered over the configuration file.
pub fn connection_overrides(matches: &ArgMatches) -> Overrides {
    let verify_ssl = if matches.get_flag(PARAMETER_INSECURE) {
        Some(false)
    } else {
        std::env::var(ENV_VERIFY_SSL)
            .ok()
            .and_then(|value| parse_bool(&value))
    };

    Overrides {
        base_url: matches.get_one::<String>(PARAMETER_BASE_URL).cloned(),
        client_id: matches.get_one::<String>(PARAMETER_CLIENT_ID).cloned(),
        client_secret: matches.get_one::<String>(PARAMETER_CLIENT_SECRET).cloned(),
        verify_ssl,
        page_size: matches
            .try_get_one::<u32>(PARAMETER_PAGE_SIZE)
            .ok()
            .flatten()
            .copied(),
    }
}

/// Resolves the settings and logs in.
pub async fn connect(
    matches: &ArgMatches,
    configuration: &Configuration,
) -> Result<Session, CliError> {
    let settings = configuration.resolve(&connection_overrides(matches))?;
    debug!("Connecting to {}", settings.base_url);

    let mut client = LookerClient::new(settings.client_config())?;
    let spinner = Spinner::start("Logging in");
    match client.authenticate(&settings.credentials).await {
        Ok(()) => spinner.clear(),
        Err(e) => {
            spinner.fail("Login failed");
            return Err(e.into());
        }
    }

    Ok(Session {
        client,
        settings,
        hyperlinks: stdout_supports_hyperlinks(),
    })
}

pub fn get_format_parameter_value(sub_matches: &ArgMatches) -> Result<OutputFormat, CliError> {
    trace!("Resolving output format options...");

    let format = sub_matches
        .get_one::<String>(PARAMETER_FORMAT)
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_FORMAT.to_string()))?;
    let with_headers = sub_matches
        .try_get_one::<bool>(PARAMETER_HEADERS)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false);
    let pretty = sub_matches.get_flag(PARAMETER_PRETTY);

    trace!("Format: {}, headers: {}, pretty: {}", format, with_headers, pretty);

    let options = OutputFormatOptions {
        with_headers,
        pretty,
    };
    Ok(OutputFormat::from_string_with_options(format, options)?)
}

/// A required argument; clap rejects the command line before this can fail.
pub fn required_value<'a>(sub_matches: &'a ArgMatches, name: &str) -> Result<&'a String, CliError> {
    sub_matches
        .get_one::<String>(name)
        .ok_or_else(|| CliError::MissingRequiredArgument(name.to_string()))
}
