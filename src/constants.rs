/// Constants used throughout the application
///
/// This module centralises defaults and help texts so they are easier to
/// manage and update.

/// Qualifier string used for application identification
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
pub const ORGANIZATION: &str = "Ondřej Vágner";

/// Application name used for the user configuration directory
pub const APPLICATION: &str = "txt2csv_bot";

/// Default path for the configuration file, relative to the repository root
pub const DEFAULT_CONFIG_PATH: &str = "txt2csv.yaml";

/// Directory holding the statements fed to the converter
pub const DEFAULT_INPUT_DIR: &str = "faturas";

/// Pattern selecting input files inside the input directory
pub const DEFAULT_INPUT_PATTERN: &str = "*.txt";

/// Directory receiving relocated CSV files and the run log
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Suffix the converter appends to completed outputs
pub const DEFAULT_DONE_SUFFIX: &str = "_done.csv";

/// Name of the combined converter log inside the output directory
pub const DEFAULT_LOG_NAME: &str = "run.log";

/// Interpreter used to run the converter script
pub const DEFAULT_CONVERTER_PROGRAM: &str = "python";

/// Path of the converter script, relative to the repository root
pub const DEFAULT_CONVERTER_SCRIPT: &str = "src/itau_batch_txt2csv.py";

/// Changed-path pattern that activates the job
pub const DEFAULT_TRIGGER_PATTERN: &str = "**/*.txt";

/// Author and committer name of bot commits
pub const DEFAULT_COMMIT_NAME: &str = "github-actions";
/// Author and committer email of bot commits
pub const DEFAULT_COMMIT_EMAIL: &str = "github-actions@github.com";

/// Placeholder replaced by the rendered timestamp in commit messages
pub const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

/// Commit message template
pub const DEFAULT_COMMIT_TEMPLATE: &str = "bot: atualiza CSV {timestamp}";

/// chrono format of the commit timestamp
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Remote the commits are pushed to
pub const DEFAULT_REMOTE: &str = "origin";

/// Line written to the run log when there is nothing to convert
pub const NO_INPUTS_LOG_LINE: &str = "No input files matched; converter not invoked.";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read from a specific config file";

/// Help text for the repository option
pub const REPO_HELP: &str = "Repository root the job runs in";

/// Help text for the changed path option
pub const CHANGED_HELP: &str = "Path changed by the triggering push (can be used multiple times)";

/// Help text for the since option
pub const SINCE_HELP: &str = "Derive changed paths from `git diff --name-only <REV> HEAD`";

/// Help text for the check option
pub const CHECK_HELP: &str = "Only evaluate the trigger; exit 0 if the job would run, 1 otherwise";

/// Help text for the dry-run command-line option
pub const DRY_RUN_HELP: &str = "Run without invoking the converter or touching git";

/// Help text for the no-push option
pub const NO_PUSH_HELP: &str = "Commit the artifacts but do not push them";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log file option
pub const LOG_FILE_HELP: &str = "Also write the application log to this file";
