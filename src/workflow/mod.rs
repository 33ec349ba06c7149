//! Workflow module
//!
//! This module contains components for orchestrating the job steps.

mod context;
mod engine;

pub use context::{JobContext, TriggerDecision};
pub use engine::{JobOptions, run_job};
