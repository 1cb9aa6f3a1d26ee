//! Error types for dirsync operations

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::validation::ValidationError;

/// Top-level error for a run
#[derive(Debug)]
pub enum SyncError {
	/// Local or remote roots could not be resolved (fatal)
	Environment(EnvironmentError),

	/// A pair requested by name is not configured
	PairNotFound { name: String },
}

impl fmt::Display for SyncError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::Environment(e) => write!(f, "Environment error: {}", e),
			SyncError::PairNotFound { name } => write!(f, "Sync pair '{}' not found", name),
		}
	}
}

impl Error for SyncError {}

impl From<EnvironmentError> for SyncError {
	fn from(e: EnvironmentError) -> Self {
		SyncError::Environment(e)
	}
}

/// Failures resolving the local/remote roots
#[derive(Debug)]
pub enum EnvironmentError {
	/// Layout file could not be read
	LayoutUnreadable { path: PathBuf, source: io::Error },

	/// Layout file is not valid
	LayoutInvalid { path: PathBuf, message: String },

	/// None of the local root candidates exist
	NoLocalRoot { tried: Vec<String> },

	/// None of the remote base candidates exist
	NoRemoteRoot { tried: Vec<String> },

	/// HOME is not set and no layout path was given
	NoHome,
}

impl fmt::Display for EnvironmentError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EnvironmentError::LayoutUnreadable { path, source } => {
				write!(f, "Cannot read layout file {}: {}", path.display(), source)
			}
			EnvironmentError::LayoutInvalid { path, message } => {
				write!(f, "Invalid layout file {}: {}", path.display(), message)
			}
			EnvironmentError::NoLocalRoot { tried } => {
				write!(f, "Could not find a local directory to sync with (tried: {})", tried.join(", "))
			}
			EnvironmentError::NoRemoteRoot { tried } => {
				write!(f, "Could not find a remote volume to sync with (tried: {})", tried.join(", "))
			}
			EnvironmentError::NoHome => write!(f, "Could not determine HOME directory"),
		}
	}
}

impl Error for EnvironmentError {}

/// Persisted configuration document errors; never fatal
#[derive(Debug)]
pub enum ConfigError {
	/// Failed to read the document
	ReadFailed { path: PathBuf, source: io::Error },

	/// Document is not valid JSON of the expected shape
	ParseFailed { path: PathBuf, source: serde_json::Error },

	/// Failed to serialize or write the document
	WriteFailed { path: PathBuf, source: Box<dyn Error + Send + Sync> },
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfigError::ReadFailed { path, source } => {
				write!(f, "Could not read config file {}: {}", path.display(), source)
			}
			ConfigError::ParseFailed { path, source } => {
				write!(f, "Could not parse config file {}: {}", path.display(), source)
			}
			ConfigError::WriteFailed { path, source } => {
				write!(f, "Could not save configuration to {}: {}", path.display(), source)
			}
		}
	}
}

impl Error for ConfigError {}

/// Why a single pair failed; other pairs are unaffected
#[derive(Debug)]
pub enum PairError {
	/// Pre-flight path validation failed, rsync was not started
	Validation(ValidationError),

	/// rsync could not be launched at all
	Launch { program: String, source: io::Error },

	/// rsync exited unsuccessfully
	ExitStatus { code: Option<i32>, stderr: String },
}

impl fmt::Display for PairError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PairError::Validation(e) => write!(f, "Validation failed: {}", e),
			PairError::Launch { program, source } => {
				write!(f, "Unexpected error running {}: {}", program, source)
			}
			PairError::ExitStatus { code: Some(code), stderr } => {
				write!(f, "rsync failed with return code {}: {}", code, stderr.trim())
			}
			PairError::ExitStatus { code: None, stderr } => {
				write!(f, "rsync terminated by signal: {}", stderr.trim())
			}
		}
	}
}

impl Error for PairError {}

impl From<ValidationError> for PairError {
	fn from(e: ValidationError) -> Self {
		PairError::Validation(e)
	}
}


// vim: ts=4
