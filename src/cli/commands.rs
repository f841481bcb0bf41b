//! CLI definition using clap.
//!
//! The fixed flags come from the derive below; one more flag per schema
//! option is appended at runtime so the option table stays the single
//! source of truth for names, aliases, help and validation.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use onomo::config::{CliOverrides, OptionDescriptor, OptionValue, schema};

/// Onomo-Pomo: a simple timer for the Pomodoro working technique
#[derive(Parser, Debug)]
#[command(name = "onomo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path [default: ~/.config/onomo/onomo.cfg]
    #[arg(long, value_name = "PATH")]
    pub configfile: Option<PathBuf>,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Values given through the per-option flags
    #[arg(skip)]
    pub overrides: CliOverrides,
}

impl Cli {
    /// Full command: derived flags plus one flag per schema option.
    pub fn build_command() -> Command {
        <Self as CommandFactory>::command().args(schema().iter().map(option_arg))
    }

    /// Parse `std::env::args`, exiting on error, `--help` or `--version`.
    pub fn from_env() -> Self {
        let matches = Self::build_command().get_matches();
        Self::from_matches(matches).unwrap_or_else(|e| e.exit())
    }

    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::build_command().try_get_matches_from(args)?;
        Self::from_matches(matches)
    }

    fn from_matches(mut matches: ArgMatches) -> Result<Self, clap::Error> {
        let mut cli = <Self as FromArgMatches>::from_arg_matches_mut(&mut matches)?;
        for descriptor in schema() {
            if let Some(value) = matches.remove_one::<OptionValue>(descriptor.name) {
                cli.overrides.set(descriptor.key, value);
            }
        }
        Ok(cli)
    }
}

/// Flag for one option; the schema validator is the value parser.
fn option_arg(descriptor: &'static OptionDescriptor) -> Arg {
    let default = descriptor.default_value();
    let help = format!("{}. Defaults to \"{}\"", descriptor.description, default);

    let mut arg = Arg::new(descriptor.name)
        .long(descriptor.name)
        .value_name("VALUE")
        .help(help)
        .action(ArgAction::Set)
        .allow_negative_numbers(true)
        .value_parser(descriptor.validator);

    if let Some(short) = descriptor.short {
        arg = arg.short(short);
    }
    // A bare path flag (`-a`) switches that sound off.
    if matches!(default, OptionValue::Path(_)) {
        arg = arg.num_args(0..=1).default_missing_value("");
    }
    arg
}
