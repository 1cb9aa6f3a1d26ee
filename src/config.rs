//! Persisted pair configuration
//!
//! The pair list is never loaded verbatim. Each run regenerates it from the
//! current [`PathSet`], then patches in what a user may legitimately change
//! in the persisted document:
//! 1. `global_rsync_options` (replaced wholesale)
//! 2. `exclude_patterns` (replaced wholesale)
//! 3. the `enabled` flag of pairs whose name still exists
//!
//! Paths and per-pair options always come from the fresh generation. The
//! result is written back unconditionally.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::logging::*;
use crate::pairs;
use crate::types::{PathSet, SyncConfig};
use crate::validation::join_dir;

/// Subdirectory of the remote data base holding the config document
pub const CONFIG_SUBDIR: &str = "syncing_scripts";

/// Default file name of the config document
pub const CONFIG_FILE_NAME: &str = "sync_config.json";

pub const DEFAULT_GLOBAL_OPTIONS: &[&str] = &["-av", "--progress"];

pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] =
	&["*.tmp", "*.log", ".DS_Store", "Thumbs.db", "__pycache__", "*.pyc"];

/// What a previously persisted document looked like, read permissively.
///
/// Absent keys leave the regenerated defaults alone. Pair entries are kept
/// as raw JSON so one malformed entry cannot discard the global sets.
#[derive(Debug, Default, Deserialize)]
pub struct PersistedConfig {
	#[serde(default)]
	pub sync_pairs: Option<Vec<serde_json::Value>>,

	#[serde(default)]
	pub global_rsync_options: Option<Vec<String>>,

	#[serde(default)]
	pub exclude_patterns: Option<Vec<String>>,
}

/// The `enabled` toggle of a prior pair entry.
///
/// `None` when the entry has no string `name` or a non-boolean `enabled`;
/// an entry without `enabled` counts as enabled.
fn pair_toggle(entry: &serde_json::Value) -> Option<(&str, bool)> {
	let name = entry.get("name")?.as_str()?;
	let enabled = match entry.get("enabled") {
		None => true,
		Some(value) => value.as_bool()?,
	};
	Some((name, enabled))
}

/// How the prior document was used
#[derive(Debug)]
pub enum PriorConfig {
	/// No document existed, defaults were used
	Missing,
	/// Overrides were applied
	Merged,
	/// Document existed but could not be used, defaults were used
	Unreadable(ConfigError),
}

/// Result of [`ConfigStore::load`]
#[derive(Debug)]
pub struct LoadedConfig {
	pub config: SyncConfig,
	pub prior: PriorConfig,
}

/// Default location of the config document for `paths`
pub fn default_config_path(paths: &PathSet) -> PathBuf {
	PathBuf::from(join_dir(&paths.remote_data_base, CONFIG_SUBDIR)).join(CONFIG_FILE_NAME)
}

/// Freshly generated configuration with default global options
pub fn default_config(paths: &PathSet, checksum_mode: bool) -> SyncConfig {
	SyncConfig {
		sync_pairs: pairs::generate(paths, checksum_mode),
		global_rsync_options: DEFAULT_GLOBAL_OPTIONS.iter().map(|s| s.to_string()).collect(),
		exclude_patterns: DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
	}
}

/// Apply user overrides from `prior` onto a regenerated `config`
pub fn merge_overrides(config: &mut SyncConfig, prior: PersistedConfig) {
	if let Some(options) = prior.global_rsync_options {
		config.global_rsync_options = options;
	}
	if let Some(patterns) = prior.exclude_patterns {
		config.exclude_patterns = patterns;
	}
	if let Some(entries) = prior.sync_pairs {
		let mut toggles = Vec::with_capacity(entries.len());
		for (idx, entry) in entries.iter().enumerate() {
			match pair_toggle(entry) {
				Some(toggle) => toggles.push(toggle),
				None => warn!(
					"Ignoring malformed sync pair entry #{} in prior configuration: {}",
					idx + 1,
					entry
				),
			}
		}
		for pair in &mut config.sync_pairs {
			// Last entry wins when a hand-edited file repeats a name
			if let Some((_, enabled)) = toggles.iter().rev().find(|(name, _)| *name == pair.name) {
				pair.enabled = *enabled;
			}
		}
	}
}

/// Reads and writes the config document at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
	path: PathBuf,
}

impl ConfigStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Store at the default location for `paths`
	pub fn for_paths(paths: &PathSet) -> Self {
		Self::new(default_config_path(paths))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Read the prior document, if any
	pub fn read_prior(&self) -> Result<Option<PersistedConfig>, ConfigError> {
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(ConfigError::ReadFailed { path: self.path.clone(), source: e }),
		};
		serde_json::from_str(&content)
			.map(Some)
			.map_err(|e| ConfigError::ParseFailed { path: self.path.clone(), source: e })
	}

	/// Regenerate pairs for `paths` and patch in prior user overrides.
	///
	/// A missing or broken prior document is not an error; defaults are used
	/// and the reason is reported in [`LoadedConfig::prior`].
	pub fn load(&self, paths: &PathSet, checksum_mode: bool) -> LoadedConfig {
		let mut config = default_config(paths, checksum_mode);
		let prior = match self.read_prior() {
			Ok(Some(persisted)) => {
				merge_overrides(&mut config, persisted);
				info!("Loaded user configuration from {}", self.path.display());
				PriorConfig::Merged
			}
			Ok(None) => {
				debug!("No configuration at {}, using defaults", self.path.display());
				PriorConfig::Missing
			}
			Err(e) => {
				warn!("{}. Using defaults.", e);
				PriorConfig::Unreadable(e)
			}
		};
		LoadedConfig { config, prior }
	}

	/// Write the full configuration, creating the parent directory if needed
	pub fn save(&self, config: &SyncConfig) -> Result<(), ConfigError> {
		let write_failed =
			|source: Box<dyn std::error::Error + Send + Sync>| ConfigError::WriteFailed {
				path: self.path.clone(),
				source,
			};

		if let Some(parent) = self.path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent).map_err(|e| write_failed(Box::new(e)))?;
			}
		}
		let mut json = serde_json::to_string_pretty(config).map_err(|e| write_failed(Box::new(e)))?;
		json.push('\n');
		fs::write(&self.path, json).map_err(|e| write_failed(Box::new(e)))?;
		info!("Configuration saved to {}", self.path.display());
		Ok(())
	}

	/// Load, then save straight back. Save failures are logged, not returned.
	pub fn load_and_persist(&self, paths: &PathSet, checksum_mode: bool) -> LoadedConfig {
		let loaded = self.load(paths, checksum_mode);
		if let Err(e) = self.save(&loaded.config) {
			error!("{}", e);
		}
		loaded
	}
}


// vim: ts=4
