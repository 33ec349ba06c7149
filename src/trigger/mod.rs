//! Trigger module
//!
//! Decides whether a push touched anything the job cares about.

mod matcher;

pub use matcher::{TriggerEvaluator, normalize_changed_path};
