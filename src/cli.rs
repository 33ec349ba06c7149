use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, command, value_parser};

use crate::constants::{
    CHANGED_HELP, CHECK_HELP, CONFIG_HELP, DEFAULT_CONFIG_PATH, DRY_RUN_HELP, LOG_FILE_HELP,
    NO_PUSH_HELP, REPO_HELP, SINCE_HELP, VERBOSE_HELP,
};
use crate::logging::LogLevel;
use crate::workflow::JobOptions;

/// Builds the command-line interface
///
/// Defines the following arguments:
/// - `config`: Path to the configuration file
/// - `repo`: Repository root the job runs in
/// - `changed` / `since`: Inputs for the trigger
/// - `check`: Only evaluate the trigger
/// - `dry`, `no_push`: Limit what the job touches
/// - `verbose`, `log_file`: Logging
pub fn build_cli() -> Command {
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .help(CONFIG_HELP)
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_CONFIG_PATH);

    let arg_repo = Arg::new("repo")
        .short('C')
        .long("repo")
        .help(REPO_HELP)
        .value_parser(value_parser!(PathBuf))
        .default_value(".");

    let arg_changed = Arg::new("changed")
        .long("changed")
        .value_name("PATH")
        .help(CHANGED_HELP)
        .value_parser(value_parser!(PathBuf))
        .action(ArgAction::Append);

    let arg_since = Arg::new("since")
        .long("since")
        .value_name("REV")
        .help(SINCE_HELP);

    let arg_check = Arg::new("check")
        .long("check")
        .help(CHECK_HELP)
        .action(ArgAction::SetTrue);

    let arg_dry = Arg::new("dry")
        .short('n')
        .long("dry")
        .help(DRY_RUN_HELP)
        .action(ArgAction::SetTrue);

    let arg_no_push = Arg::new("no_push")
        .long("no-push")
        .help(NO_PUSH_HELP)
        .action(ArgAction::SetTrue);

    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count);

    let arg_log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP)
        .value_parser(value_parser!(PathBuf));

    command!()
        .arg(arg_config)
        .arg(arg_repo)
        .arg(arg_changed)
        .arg(arg_since)
        .arg(arg_check)
        .arg(arg_dry)
        .arg(arg_no_push)
        .arg(arg_verbose)
        .arg(arg_log_file)
}

/// Parses the process arguments, exiting with usage on error
pub fn get_matches() -> ArgMatches {
    build_cli().get_matches()
}

/// Gets the verbosity level from the number of -v/--verbose flags
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    LogLevel::from_occurrences(matches.get_count("verbose"))
}

/// Gets the optional application log file
pub fn get_log_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("log_file").cloned()
}

/// Converts parsed arguments into options for the job engine
pub fn job_options(matches: &ArgMatches) -> JobOptions {
    let repo_root = matches
        .get_one::<PathBuf>("repo")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut options = JobOptions::new(repo_root, config_path);
    options.changed = matches
        .get_many::<PathBuf>("changed")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    options.since = matches.get_one::<String>("since").cloned();
    options.check_only = matches.get_flag("check");
    options.dry_run = matches.get_flag("dry");
    options.push = !matches.get_flag("no_push");
    options
}
