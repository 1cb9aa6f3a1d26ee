//! Sequential execution of configured pairs
//!
//! Pairs run strictly one after another in configured order. A failed pair
//! never stops the run; every enabled pair is attempted exactly once.

use crate::error::SyncError;
use crate::executor::{Invoker, PairExecutor, SyncOutcome};
use crate::logging::*;
use crate::types::SyncConfig;

/// Aggregate result of [`Orchestrator::run_all`]
#[derive(Debug)]
pub struct RunSummary {
	/// Enabled pairs that succeeded
	pub succeeded: usize,

	/// Enabled pairs attempted; disabled pairs are not counted
	pub total: usize,

	/// Names of pairs skipped because they are disabled
	pub skipped: Vec<String>,

	/// Outcome of every attempted pair, in run order
	pub outcomes: Vec<(String, SyncOutcome)>,
}

impl RunSummary {
	pub fn all_succeeded(&self) -> bool {
		self.succeeded == self.total
	}

	/// Names of the pairs that failed
	pub fn failed(&self) -> Vec<&str> {
		self.outcomes
			.iter()
			.filter(|(_, o)| !o.is_success())
			.map(|(name, _)| name.as_str())
			.collect()
	}
}

/// Drives a [`PairExecutor`] over a configuration
pub struct Orchestrator<I> {
	executor: PairExecutor<I>,
}

impl<I: Invoker> Orchestrator<I> {
	pub fn new(executor: PairExecutor<I>) -> Self {
		Self { executor }
	}

	pub fn executor(&self) -> &PairExecutor<I> {
		&self.executor
	}

	/// Run every enabled pair
	pub async fn run_all(&self, config: &SyncConfig, dry_run: bool) -> RunSummary {
		info!("Starting synchronization process");
		if dry_run {
			info!("DRY RUN MODE - No actual changes will be made");
		}

		let mut summary =
			RunSummary { succeeded: 0, total: 0, skipped: Vec::new(), outcomes: Vec::new() };

		for pair in &config.sync_pairs {
			if !pair.enabled {
				info!("Skipping disabled sync pair: {}", pair.name);
				summary.skipped.push(pair.name.clone());
				continue;
			}

			summary.total += 1;
			let outcome = self.executor.execute(pair, &config.exclude_patterns, dry_run).await;
			if outcome.is_success() {
				summary.succeeded += 1;
			}
			summary.outcomes.push((pair.name.clone(), outcome));
		}

		info!(
			"Synchronization complete: {}/{} pairs successful",
			summary.succeeded, summary.total
		);
		summary
	}

	/// Run the pair named `name`, regardless of its enabled flag
	pub async fn run_one(
		&self,
		config: &SyncConfig,
		name: &str,
		dry_run: bool,
	) -> Result<SyncOutcome, SyncError> {
		let pair =
			config.pair(name).ok_or_else(|| SyncError::PairNotFound { name: name.to_string() })?;
		if !pair.enabled {
			warn!("Sync pair '{}' is disabled in the configuration, running it on request", name);
		}
		if dry_run {
			info!("DRY RUN MODE - No actual changes will be made");
		}
		Ok(self.executor.execute(pair, &config.exclude_patterns, dry_run).await)
	}
}

// vim: ts=4
