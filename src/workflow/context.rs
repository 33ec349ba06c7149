//! Job context
//!
//! This module defines the record of what one job run did.

use std::path::PathBuf;

use crate::publisher::PublishOutcome;
use crate::runner::ConverterOutcome;

/// Why the trigger decided the way it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// No changed paths were supplied; the job runs unconditionally
    Manual,
    /// At least one changed path matched
    Matched(Vec<PathBuf>),
    /// Changed paths were supplied and none matched
    NotMatched { changed: usize },
}

impl TriggerDecision {
    pub fn should_run(&self) -> bool {
        !matches!(self, TriggerDecision::NotMatched { .. })
    }
}

/// Context for one job run
///
/// Filled in step by step by the engine; steps that did not run leave
/// their fields empty.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Whether the job only simulated its steps
    pub dry_run: bool,
    pub trigger: TriggerDecision,
    /// Input files handed to the converter
    pub inputs: Vec<PathBuf>,
    pub converter: Option<ConverterOutcome>,
    /// Completed outputs moved into the output directory
    pub relocated: Vec<PathBuf>,
    /// Files that were, or would be, staged
    pub artifacts: Vec<PathBuf>,
    pub publish: Option<PublishOutcome>,
}

impl JobContext {
    pub fn new(trigger: TriggerDecision, dry_run: bool) -> Self {
        JobContext {
            dry_run,
            trigger,
            inputs: Vec::new(),
            converter: None,
            relocated: Vec::new(),
            artifacts: Vec::new(),
            publish: None,
        }
    }

    /// True when a commit was recorded during this run
    pub fn committed(&self) -> bool {
        matches!(self.publish, Some(PublishOutcome::Committed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_decision_should_run() {
        assert!(TriggerDecision::Manual.should_run());
        assert!(TriggerDecision::Matched(vec![PathBuf::from("a.txt")]).should_run());
        assert!(!TriggerDecision::NotMatched { changed: 3 }.should_run());
    }

    #[test]
    fn test_new_context_is_empty() {
        let context = JobContext::new(TriggerDecision::Manual, true);
        assert!(context.dry_run);
        assert!(context.inputs.is_empty());
        assert!(context.converter.is_none());
        assert!(!context.committed());
    }

    #[test]
    fn test_committed() {
        let mut context = JobContext::new(TriggerDecision::Manual, false);
        context.publish = Some(PublishOutcome::NothingToCommit);
        assert!(!context.committed());

        context.publish = Some(PublishOutcome::Committed {
            message: "bot: atualiza CSV 2025-01-01 00:00:00".to_string(),
            pushed_to: None,
        });
        assert!(context.committed());
    }
}
