//! Runs an external TXT to CSV converter over a batch of statements and
//! publishes the generated CSV files back to the repository.
//!
//! One job is: decide from the changed paths whether to run, invoke the
//! converter once over every input file, move its `*_done.csv` outputs into
//! the output directory, then commit and push them with a bot identity.

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod publisher;
pub mod report;
pub mod runner;
pub mod trigger;
mod utils;
pub mod workflow;
