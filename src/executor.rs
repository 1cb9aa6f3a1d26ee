//! Running a single sync pair through rsync
//!
//! rsync is reached through the [`Invoker`] trait so orchestration can be
//! exercised against a fake. [`ProcessInvoker`] is the real subprocess.

use async_trait::async_trait;
use std::io;
use std::process::Stdio;

use crate::error::PairError;
use crate::logging::*;
use crate::report::{self, ChangeReport};
use crate::types::SyncPair;
use crate::validation::{normalize_dir, source_arg, validate_pair_paths};

/// Default external program
pub const RSYNC_PROGRAM: &str = "rsync";

/// Captured result of one subprocess run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
	/// Exit code, `None` if terminated by a signal
	pub code: Option<i32>,
	pub stdout: String,
	pub stderr: String,
}

impl Invocation {
	pub fn success(&self) -> bool {
		self.code == Some(0)
	}
}

/// Capability to run the mirroring tool.
///
/// `argv[0]` is the program. An `Err` means the program could not be started.
#[async_trait]
pub trait Invoker: Send + Sync {
	async fn invoke(&self, argv: &[String]) -> io::Result<Invocation>;
}

/// Runs argv as a real child process, stdout and stderr captured separately
#[derive(Debug, Default, Clone)]
pub struct ProcessInvoker;

#[async_trait]
impl Invoker for ProcessInvoker {
	async fn invoke(&self, argv: &[String]) -> io::Result<Invocation> {
		let (program, args) = argv
			.split_first()
			.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;
		let output = tokio::process::Command::new(program)
			.args(args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.output()
			.await?;
		Ok(Invocation {
			code: output.status.code(),
			stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
			stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
		})
	}
}

/// Result of running one pair
#[derive(Debug)]
pub enum SyncOutcome {
	Synced(ChangeReport),
	Failed(PairError),
}

impl SyncOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, SyncOutcome::Synced(_))
	}
}

fn has_short_flag(options: &[String], flag: char) -> bool {
	options
		.iter()
		.any(|o| o.starts_with('-') && !o.starts_with("--") && o[1..].contains(flag))
}

/// Append the reporting flags rsync needs for classification, unless the
/// pair's own options already enable them.
fn ensure_reporting_flags(argv: &mut Vec<String>) {
	let verbose = has_short_flag(argv, 'v') || argv.iter().any(|o| o == "--verbose");
	let stats = argv.iter().any(|o| o == "--stats");
	let itemize = has_short_flag(argv, 'i') || argv.iter().any(|o| o == "--itemize-changes");
	if !verbose {
		argv.push("--verbose".to_string());
	}
	if !stats {
		argv.push("--stats".to_string());
	}
	if !itemize {
		argv.push("--itemize-changes".to_string());
	}
}

/// Build the full command line for `pair`
pub fn build_command(
	program: &str,
	pair: &SyncPair,
	exclude_patterns: &[String],
	dry_run: bool,
) -> Vec<String> {
	let mut argv = vec![program.to_string()];
	argv.extend(pair.options.iter().cloned());
	ensure_reporting_flags(&mut argv);
	for pattern in exclude_patterns {
		argv.push("--exclude".to_string());
		argv.push(pattern.clone());
	}
	if dry_run {
		argv.push("--dry-run".to_string());
	}
	argv.push(source_arg(&pair.source));
	argv.push(normalize_dir(&pair.destination));
	argv
}

/// Validates, invokes and classifies one pair at a time
pub struct PairExecutor<I> {
	invoker: I,
	program: String,
}

impl<I: Invoker> PairExecutor<I> {
	pub fn new(invoker: I) -> Self {
		Self { invoker, program: RSYNC_PROGRAM.to_string() }
	}

	/// Use a different rsync binary
	pub fn with_program(mut self, program: impl Into<String>) -> Self {
		self.program = program.into();
		self
	}

	pub fn invoker(&self) -> &I {
		&self.invoker
	}

	/// Run `pair` to completion. Failures are terminal for the pair, never retried.
	pub async fn execute(
		&self,
		pair: &SyncPair,
		exclude_patterns: &[String],
		dry_run: bool,
	) -> SyncOutcome {
		info!("Starting sync for '{}': {} -> {}", pair.name, pair.source, pair.destination);

		if let Err(e) = validate_pair_paths(&pair.source, &pair.destination) {
			error!("Validation failed for '{}': {}", pair.name, e);
			return SyncOutcome::Failed(e.into());
		}

		let argv = build_command(&self.program, pair, exclude_patterns, dry_run);
		info!("Running command: {}", argv.join(" "));

		let invocation = match self.invoker.invoke(&argv).await {
			Ok(invocation) => invocation,
			Err(e) => {
				let err = PairError::Launch { program: self.program.clone(), source: e };
				error!("Sync failed for '{}': {}", pair.name, err);
				return SyncOutcome::Failed(err);
			}
		};

		if !invocation.success() {
			let err = PairError::ExitStatus { code: invocation.code, stderr: invocation.stderr };
			error!("Sync failed for '{}': {}", pair.name, err);
			return SyncOutcome::Failed(err);
		}

		if !invocation.stderr.trim().is_empty() {
			warn!("rsync stderr for '{}': {}", pair.name, invocation.stderr.trim());
		}

		let report = report::classify(&invocation.stdout);
		info!("Sync completed successfully for '{}'", pair.name);
		info!("{}", report);
		SyncOutcome::Synced(report)
	}
}


// vim: ts=4
