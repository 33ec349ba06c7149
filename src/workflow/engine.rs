//! Job engine
//!
//! This module contains the engine that runs the job steps in order:
//! trigger, converter, relocation, publish. The first fatal error stops the
//! job, so a failing converter never reaches the publisher.

use std::path::{self, Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::{Config, load_or_default};
use crate::errors::directory_not_found_error;
use crate::publisher::{GitRepository, Publisher, collect_artifacts};
use crate::runner::{
    Converter, collect_inputs, ensure_output_dir, find_done_files, relocate_done_files,
};
use crate::trigger::TriggerEvaluator;

use super::context::{JobContext, TriggerDecision};

/// Options for one job run
#[derive(Debug, Clone)]
pub struct JobOptions {
    /// Repository root; relative configuration paths resolve against it
    pub repo_root: PathBuf,
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Paths changed by the triggering push
    pub changed: Vec<PathBuf>,
    /// Revision to diff against `HEAD` for more changed paths
    pub since: Option<String>,
    /// Stop after the trigger decision
    pub check_only: bool,
    /// Log the steps without running the converter or touching git
    pub dry_run: bool,
    /// Push after committing
    pub push: bool,
}

impl JobOptions {
    pub fn new(repo_root: PathBuf, config_path: PathBuf) -> Self {
        JobOptions {
            repo_root,
            config_path,
            changed: Vec::new(),
            since: None,
            check_only: false,
            dry_run: false,
            push: true,
        }
    }
}

/// Evaluates the trigger for the supplied changed paths
fn evaluate_trigger(options: &JobOptions, config: &Config) -> Result<TriggerDecision> {
    let mut changed = options.changed.clone();
    if let Some(rev) = &options.since {
        let repository = GitRepository::open(&options.repo_root)?;
        let since = repository
            .changed_files_since(rev)
            .with_context(|| format!("Failed to list paths changed since {rev}"))?;
        debug!("{} paths changed since {rev}", since.len());
        changed.extend(since);
    }

    if changed.is_empty() && options.since.is_none() {
        info!("No changed paths given, running unconditionally");
        return Ok(TriggerDecision::Manual);
    }

    let evaluator = TriggerEvaluator::from_config(config, &options.repo_root)?;
    if evaluator.should_run(&changed) {
        Ok(TriggerDecision::Matched(evaluator.matching(&changed)))
    } else {
        Ok(TriggerDecision::NotMatched {
            changed: changed.len(),
        })
    }
}

/// Runs one job
///
/// # Returns
/// * `Result<JobContext>` - What the job did, or the first fatal error
///
/// # Errors
/// * Configuration, converter, filesystem and git failures
pub fn run_job(options: &JobOptions) -> Result<JobContext> {
    if !options.repo_root.is_dir() {
        return Err(directory_not_found_error(options.repo_root.clone()).into());
    }

    // Child processes run inside the repository; every path they get is absolute
    let repo_root = path::absolute(&options.repo_root)
        .with_context(|| format!("Failed to resolve {}", options.repo_root.display()))?;
    let options = &JobOptions {
        repo_root,
        ..options.clone()
    };

    let (config, _) = load_or_default(&options.repo_root, &options.config_path)?;
    let config = config.rooted_at(&options.repo_root);

    let trigger = evaluate_trigger(options, &config)?;
    let mut context = JobContext::new(trigger, options.dry_run);

    if options.check_only || !context.trigger.should_run() {
        return Ok(context);
    }

    run_converter(&config, &options.repo_root, &mut context)?;
    relocate_outputs(&config, &mut context)?;

    if !config.publish.enabled {
        info!("Publishing disabled in configuration");
        return Ok(context);
    }
    publish_artifacts(&config, options, &mut context)?;

    Ok(context)
}

fn run_converter(config: &Config, repo_root: &Path, context: &mut JobContext) -> Result<()> {
    context.inputs = collect_inputs(&config.input_dir, &config.input_pattern)?;
    info!(
        "Found {} input files in {}",
        context.inputs.len(),
        config.input_dir.display()
    );

    let converter = Converter::new(&config.converter, repo_root);
    let log_path = config.log_path();

    if context.dry_run {
        if context.inputs.is_empty() {
            info!("[dry run] Would skip the converter, there are no inputs");
        } else {
            let (program, args) = converter.command_line(&context.inputs);
            info!(
                "[dry run] Would run {:?} {:?} > {}",
                program,
                args,
                log_path.display()
            );
        }
        return Ok(());
    }

    ensure_output_dir(&config.output_dir)?;
    let outcome = converter
        .run(&context.inputs, &log_path)
        .context("Converter step failed")?;
    context.converter = Some(outcome);
    Ok(())
}

fn relocate_outputs(config: &Config, context: &mut JobContext) -> Result<()> {
    if context.dry_run {
        // Outputs of a previous run may still be waiting
        for file in find_done_files(&config.input_dir, &config.done_suffix)? {
            info!(
                "[dry run] Would move {} into {}",
                file.display(),
                config.output_dir.display()
            );
        }
        return Ok(());
    }

    context.relocated =
        relocate_done_files(&config.input_dir, &config.output_dir, &config.done_suffix)?;
    Ok(())
}

fn publish_artifacts(
    config: &Config,
    options: &JobOptions,
    context: &mut JobContext,
) -> Result<()> {
    context.artifacts = collect_artifacts(&config.output_dir, &config.log_path())?;

    if context.dry_run {
        for artifact in &context.artifacts {
            info!("[dry run] Would stage {}", artifact.display());
        }
        return Ok(());
    }

    let repository = GitRepository::open(&options.repo_root)?;
    let mut publisher = Publisher::new(repository, config.publish.clone());
    if !options.push {
        publisher = publisher.without_push();
    }

    let outcome = publisher
        .publish(&context.artifacts)
        .context("Publish step failed")?;
    context.publish = Some(outcome);
    Ok(())
}
