//! Drift detection between configured directories and remote bases
//!
//! Purely advisory: audit results are logged and never change which pairs
//! run.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::logging::*;
use crate::types::PathSet;
use crate::validation::join_dir;

/// Result of auditing one remote base
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
	/// Base does not exist, nothing to audit
	Skipped,

	/// Base could not be listed
	Unreadable { reason: String },

	/// Subdirectories present at the base but not configured
	Checked { unsynced: BTreeSet<String> },
}

impl AuditOutcome {
	/// Unsynced names; empty unless the base was actually listed
	pub fn unsynced(&self) -> BTreeSet<String> {
		match self {
			AuditOutcome::Checked { unsynced } => unsynced.clone(),
			AuditOutcome::Skipped | AuditOutcome::Unreadable { .. } => BTreeSet::new(),
		}
	}
}

fn list_subdirectories(base: &Path) -> io::Result<BTreeSet<String>> {
	let mut names = BTreeSet::new();
	for entry in fs::read_dir(base)? {
		let entry = entry?;
		// Follows symlinks, so a linked directory counts as a directory
		if entry.path().is_dir() {
			names.insert(entry.file_name().to_string_lossy().into_owned());
		}
	}
	Ok(names)
}

/// Report subdirectories of `remote_base` that no configured name covers
pub fn audit<S: AsRef<str>>(remote_base: &Path, configured_names: &[S]) -> AuditOutcome {
	if !remote_base.exists() {
		debug!("Remote base {} does not exist, skipping audit", remote_base.display());
		return AuditOutcome::Skipped;
	}

	let present = match list_subdirectories(remote_base) {
		Ok(present) => present,
		Err(e) => {
			warn!(
				"Cannot access {} to check for unsynced directories: {}",
				remote_base.display(),
				e
			);
			return AuditOutcome::Unreadable { reason: e.to_string() };
		}
	};

	let configured: BTreeSet<&str> = configured_names.iter().map(|s| s.as_ref()).collect();
	let unsynced = present.into_iter().filter(|name| !configured.contains(name.as_str())).collect();
	AuditOutcome::Checked { unsynced }
}

/// Audit every distinct remote base of `paths` and log the findings
pub fn audit_path_set(paths: &PathSet) -> Vec<(String, AuditOutcome)> {
	let mut results = Vec::new();
	for base in paths.remote_bases() {
		let names = paths.names_under_remote(&base);
		let outcome = audit(Path::new(&base), names.as_slice());
		match &outcome {
			AuditOutcome::Checked { unsynced } if !unsynced.is_empty() => {
				warn!("Found directories in {} that are NOT included in sync:", base);
				for name in unsynced {
					warn!("  - {} ({})", name, join_dir(&base, name));
				}
				warn!("These directories will NOT be synchronized. Add them to the layout file if they should be.");
			}
			AuditOutcome::Checked { .. } => {
				info!("All directories in {} are included in sync configuration", base);
			}
			AuditOutcome::Skipped | AuditOutcome::Unreadable { .. } => {}
		}
		results.push((base, outcome));
	}
	results
}

/// Create every configured directory missing below its remote base.
///
/// Returns the directories created. Failures are logged and skipped; the
/// affected pairs will then fail validation on their own.
pub fn ensure_remote_dirs(paths: &PathSet) -> Vec<PathBuf> {
	let mut created = Vec::new();
	let wanted = paths
		.data_dirs
		.iter()
		.map(|d| join_dir(&paths.remote_data_base, d))
		.chain(paths.video_dirs.iter().map(|d| join_dir(&paths.remote_video_base, d)))
		.chain(paths.one_way_video_dirs.iter().map(|d| join_dir(&paths.remote_video_base, d)));

	for dir in wanted {
		let dir = PathBuf::from(dir);
		if dir.exists() {
			continue;
		}
		match fs::create_dir_all(&dir) {
			Ok(()) => {
				info!("Created directory: {}", dir.display());
				created.push(dir);
			}
			Err(e) => warn!("Could not create {}: {}", dir.display(), e),
		}
	}
	created
}


// vim: ts=4
