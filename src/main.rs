use binocle::{
    cli::execute_command,
    commands::{create_cli_commands, params::PARAMETER_VERBOSE},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands();

    // Initialize the logging subsystem; --verbose overrides RUST_LOG
    let filter = if matches.get_flag(PARAMETER_VERBOSE) {
        EnvFilter::new("binocle=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(matches).await {
        let code = e.exit_code();
        debug!("Exiting with code {} ({})", code.code(), code.message());
        ::std::process::exit(code.code());
    }
}
