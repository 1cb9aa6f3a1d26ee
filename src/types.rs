//! Core data model: resolved roots, sync pairs and the persisted configuration

use serde::Serialize;
use std::fmt;

/// Resolved local roots, remote bases and the named directory lists.
///
/// Built once at startup (see [`crate::layout`]) and passed by reference
/// to everything that needs paths; nothing else reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
	/// Local root holding the data directories
	pub local_data_root: String,

	/// Local root holding the video directories
	pub local_video_root: String,

	/// Remote base holding the data directories
	pub remote_data_base: String,

	/// Remote base holding the video directories
	pub remote_video_base: String,

	/// Directories synced both ways under the data roots
	pub data_dirs: Vec<String>,

	/// Directories synced both ways under the video roots
	pub video_dirs: Vec<String>,

	/// Directories copied local -> remote only, under the video roots
	pub one_way_video_dirs: Vec<String>,
}

impl PathSet {
	/// Every directory name that is synced below `remote_base`, across all
	/// categories sharing that base.
	pub fn names_under_remote(&self, remote_base: &str) -> Vec<&str> {
		let base = crate::validation::normalize_dir(remote_base);
		let mut names = Vec::new();
		if crate::validation::normalize_dir(&self.remote_data_base) == base {
			names.extend(self.data_dirs.iter().map(String::as_str));
		}
		if crate::validation::normalize_dir(&self.remote_video_base) == base {
			names.extend(self.video_dirs.iter().map(String::as_str));
			names.extend(self.one_way_video_dirs.iter().map(String::as_str));
		}
		names
	}

	/// Distinct remote bases, data base first
	pub fn remote_bases(&self) -> Vec<String> {
		let data = crate::validation::normalize_dir(&self.remote_data_base);
		let video = crate::validation::normalize_dir(&self.remote_video_base);
		if data == video {
			vec![data]
		} else {
			vec![data, video]
		}
	}
}

/// Logical directory category, the first component of a pair name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	Data,
	Video,
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Category::Data => write!(f, "data"),
			Category::Video => write!(f, "video"),
		}
	}
}

/// Direction of a sync pair, which also fixes its deletion policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// remote -> local, never deletes at the destination
	ToLocal,

	/// local -> remote, deletes extraneous destination entries
	ToRemote,

	/// local -> remote only, never deletes
	OneWay,
}

impl Direction {
	/// Suffix used in pair names
	pub fn suffix(self) -> &'static str {
		match self {
			Direction::ToLocal => "to_local",
			Direction::ToRemote => "to_remote",
			Direction::OneWay => "oneway",
		}
	}

	/// Whether pairs in this direction carry `--delete`
	pub fn deletes(self) -> bool {
		match self {
			Direction::ToLocal | Direction::OneWay => false,
			Direction::ToRemote => true,
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.suffix())
	}
}

/// One directed synchronization task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncPair {
	/// Unique key, `{category}_{dir}_{direction}`
	pub name: String,

	/// Source directory, stored without a trailing separator
	pub source: String,

	/// Destination directory, stored without a trailing separator
	pub destination: String,

	pub enabled: bool,

	/// Flags passed to rsync for this pair
	#[serde(rename = "rsync_options")]
	pub options: Vec<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,

	#[serde(skip)]
	pub direction: Direction,
}

/// The persisted aggregate: pairs plus global options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncConfig {
	pub sync_pairs: Vec<SyncPair>,

	/// Informational only, never merged into per-pair options
	pub global_rsync_options: Vec<String>,

	/// Patterns passed as `--exclude` to every invocation
	pub exclude_patterns: Vec<String>,
}

impl SyncConfig {
	/// Look up a pair by exact name
	pub fn pair(&self, name: &str) -> Option<&SyncPair> {
		self.sync_pairs.iter().find(|p| p.name == name)
	}

	/// Pairs that will run, in configured order
	pub fn enabled_pairs(&self) -> impl Iterator<Item = &SyncPair> {
		self.sync_pairs.iter().filter(|p| p.enabled)
	}
}


// vim: ts=4
