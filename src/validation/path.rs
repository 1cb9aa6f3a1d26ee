//! Path normalization and pair path validation

use std::fs;
use std::path::Path;

use super::ValidationError;
use crate::logging::*;

/// Collapse repeated separators and strip any trailing one.
///
/// The filesystem root stays `/`.
pub fn normalize_dir(path: &str) -> String {
	let mut out = String::with_capacity(path.len());
	let mut prev_sep = false;
	for c in path.chars() {
		if c == '/' {
			if !prev_sep {
				out.push(c);
			}
			prev_sep = true;
		} else {
			out.push(c);
			prev_sep = false;
		}
	}
	while out.len() > 1 && out.ends_with('/') {
		out.pop();
	}
	out
}

/// Join a base directory and a directory name into a normalized path
pub fn join_dir(base: &str, name: &str) -> String {
	normalize_dir(&format!("{}/{}", base, name))
}

/// Source argument for rsync: contents of the directory, not the directory itself
pub fn source_arg(source: &str) -> String {
	let dir = normalize_dir(source);
	if dir.ends_with('/') {
		dir
	} else {
		dir + "/"
	}
}

/// Check that a pair can be started.
///
/// The source must be an existing directory. A missing destination parent is
/// created; failure to create it is reported like any other validation error.
pub fn validate_pair_paths(source: &str, destination: &str) -> Result<(), ValidationError> {
	let source_path = Path::new(source);
	if !source_path.exists() {
		return Err(ValidationError::SourceMissing(source.to_string()));
	}
	if !source_path.is_dir() {
		return Err(ValidationError::SourceNotDirectory(source.to_string()));
	}

	if let Some(parent) = Path::new(destination).parent() {
		if !parent.as_os_str().is_empty() && !parent.exists() {
			fs::create_dir_all(parent).map_err(|e| ValidationError::DestinationParent {
				path: parent.display().to_string(),
				reason: e.to_string(),
			})?;
			info!("Created destination directory: {}", parent.display());
		}
	}
	Ok(())
}


// vim: ts=4
