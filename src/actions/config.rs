use crate::{
    actions::utils::get_format_parameter_value, commands::params::COMMAND_PATH,
    commands::params::COMMAND_SHOW, configuration::Configuration, error::CliError,
    format::Formattable,
};
use clap::ArgMatches;

pub fn print_configuration_path() -> Result<(), CliError> {
    let path = Configuration::get_default_configuration_file_path()?;
    println!("{}", path.display());
    Ok(())
}

pub fn print_configuration(sub_matches: &ArgMatches) -> Result<(), CliError> {
    let format = get_format_parameter_value(sub_matches)?;
    let configuration = Configuration::load_default()?;
    println!("{}", configuration.format(&format)?);
    Ok(())
}

pub fn config(sub_matches: &ArgMatches) -> Result<(), CliError> {
    match sub_matches.subcommand() {
        Some((COMMAND_PATH, _)) => print_configuration_path(),
        Some((COMMAND_SHOW, sub_matches)) => print_configuration(sub_matches),
        Some((name, _)) => Err(CliError::UnsupportedSubcommand(name.to_string())),
        None => Err(CliError::UnsupportedSubcommand(String::from("config"))),
    }
}
