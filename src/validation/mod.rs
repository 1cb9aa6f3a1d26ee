//! Path handling and pre-flight validation for sync pairs
//!
//! - Normalization (separator collapsing, joining bases with names)
//! - Pair validation (source must be a directory, destination parent is created)

use std::error::Error;
use std::fmt;

pub mod path;

pub use path::*;

/// Why a pair could not be started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
	/// Source directory does not exist
	SourceMissing(String),
	/// Source exists but is not a directory
	SourceNotDirectory(String),
	/// Parent of the destination could not be created
	DestinationParent { path: String, reason: String },
}

impl fmt::Display for ValidationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValidationError::SourceMissing(path) => {
				write!(f, "Source path does not exist: {}", path)
			}
			ValidationError::SourceNotDirectory(path) => {
				write!(f, "Source path is not a directory: {}", path)
			}
			ValidationError::DestinationParent { path, reason } => {
				write!(f, "Cannot create destination directory {}: {}", path, reason)
			}
		}
	}
}

impl Error for ValidationError {}


// vim: ts=4
