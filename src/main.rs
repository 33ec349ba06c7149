use std::process::ExitCode;

use human_panic::setup_panic;
use log::{error, info};

use txt2csv_bot::cli::{get_log_file, get_matches, get_verbosity, job_options};
use txt2csv_bot::logging::init_logger;
use txt2csv_bot::report::print_summary;
use txt2csv_bot::workflow::run_job;

fn main() -> ExitCode {
    setup_panic!();

    let matches = get_matches();
    let log_file = get_log_file(&matches);
    if let Err(e) = init_logger(get_verbosity(&matches), log_file.as_deref()) {
        eprintln!("Failed to initialise logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let options = job_options(&matches);
    match run_job(&options) {
        Ok(context) => {
            if options.check_only {
                let should_run = context.trigger.should_run();
                println!("{}", if should_run { "run" } else { "skip" });
                return if should_run {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                };
            }
            print_summary(&context);
            info!("Job finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Job failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
