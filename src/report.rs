//! End-of-job summary printed to the console

use colored::Colorize;

use crate::logging::format_message;
use crate::publisher::PublishOutcome;
use crate::workflow::{JobContext, TriggerDecision};

/// Plain-text summary lines for a finished job
pub fn summary_lines(context: &JobContext) -> Vec<String> {
    let mut lines = Vec::new();

    match &context.trigger {
        TriggerDecision::Manual => lines.push("Trigger:   manual run".to_string()),
        TriggerDecision::Matched(paths) => {
            lines.push(format!("Trigger:   {} matching changed paths", paths.len()))
        }
        TriggerDecision::NotMatched { changed } => {
            lines.push(format!(
                "Trigger:   none of {changed} changed paths match, job skipped"
            ));
            return lines;
        }
    }

    if context.dry_run {
        lines.push("Mode:      dry run, nothing was changed".to_string());
    }

    lines.push(format!("Inputs:    {}", context.inputs.len()));
    if let Some(converter) = &context.converter {
        let state = if converter.invoked {
            "ran"
        } else {
            "skipped (no inputs)"
        };
        lines.push(format!(
            "Converter: {state}, log at {}",
            converter.log_path.display()
        ));
    }
    lines.push(format!("Relocated: {}", context.relocated.len()));

    match &context.publish {
        Some(PublishOutcome::NothingToCommit) => {
            lines.push("Publish:   nothing to commit".to_string())
        }
        Some(PublishOutcome::Committed { message, pushed_to }) => {
            lines.push(format!("Publish:   committed \"{message}\""));
            match pushed_to {
                Some(branch) => lines.push(format!("Push:      {branch}")),
                None => lines.push("Push:      skipped".to_string()),
            }
        }
        None => {}
    }

    lines
}

/// Prints the summary, highlighting the outcome on a terminal
pub fn print_summary(context: &JobContext) {
    println!("\nSummary:");
    println!("--------");
    for line in summary_lines(context) {
        let colored_line = if line.starts_with("Publish:   committed") {
            line.green().to_string()
        } else if line.contains("skipped") || line.contains("nothing") {
            line.yellow().to_string()
        } else {
            line.clone()
        };
        println!("  {}", format_message(&line, &colored_line));
    }
}
