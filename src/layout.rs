//! Layout file and environment resolution
//!
//! The layout file (TOML) names the directories to sync and lists candidate
//! roots for each side. Candidates are probed in order and the first one
//! that exists wins, so a network mount can be preferred over a local copy:
//!
//! ```toml
//! checksum = true
//! data_dirs = ["mean_images", "matlab_data"]
//! video_dirs = ["processed_video"]
//! one_way_video_dirs = ["raw"]
//!
//! [[local]]
//! label = "network"
//! probe = "/mnt/schooling_data"
//! data_root = "/mnt/schooling_data/project"
//! video_root = "/mnt/schooling_video/project"
//!
//! [[local]]
//! label = "home"
//! data_root = "/home/me/Documents/project"
//!
//! [[remote]]
//! label = "thumb drive"
//! data_base = "/media/me/ThumbDrive/"
//! ```

use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EnvironmentError;
use crate::logging::*;
use crate::types::PathSet;

/// Directory under `$HOME` holding the default layout file
pub const DIRSYNC_DIR: &str = ".dirsync";

pub const LAYOUT_FILE_NAME: &str = "layout.toml";

/// Parsed layout file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
	/// Default comparison mode when the command line does not choose one
	#[serde(default)]
	pub checksum: bool,

	#[serde(default)]
	pub data_dirs: Vec<String>,

	#[serde(default)]
	pub video_dirs: Vec<String>,

	#[serde(default)]
	pub one_way_video_dirs: Vec<String>,

	#[serde(default)]
	pub local: Vec<LocalCandidate>,

	#[serde(default)]
	pub remote: Vec<RemoteCandidate>,
}

/// One possible location of the local roots
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalCandidate {
	#[serde(default)]
	pub label: Option<String>,

	/// Path whose existence selects this candidate (defaults to `data_root`)
	#[serde(default)]
	pub probe: Option<String>,

	pub data_root: String,

	/// Defaults to `data_root`
	#[serde(default)]
	pub video_root: Option<String>,
}

/// One possible location of the remote bases
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteCandidate {
	#[serde(default)]
	pub label: Option<String>,

	/// Path whose existence selects this candidate (defaults to `data_base`)
	#[serde(default)]
	pub probe: Option<String>,

	pub data_base: String,

	/// Defaults to `data_base`
	#[serde(default)]
	pub video_base: Option<String>,
}

impl LocalCandidate {
	fn probe(&self) -> &str {
		self.probe.as_deref().unwrap_or(&self.data_root)
	}
}

impl RemoteCandidate {
	fn probe(&self) -> &str {
		self.probe.as_deref().unwrap_or(&self.data_base)
	}
}

/// Command-line replacements for the remote bases; set values are not probed
#[derive(Debug, Clone, Default)]
pub struct RemoteOverrides {
	pub data_base: Option<String>,
	pub video_base: Option<String>,
}

/// Default layout location, `$HOME/.dirsync/layout.toml`
pub fn default_layout_path() -> Result<PathBuf, EnvironmentError> {
	let home = env::var("HOME").map_err(|_| EnvironmentError::NoHome)?;
	Ok(PathBuf::from(home).join(DIRSYNC_DIR).join(LAYOUT_FILE_NAME))
}

fn check_names(path: &Path, list: &str, names: &[String]) -> Result<(), EnvironmentError> {
	let mut seen = BTreeSet::new();
	for name in names {
		if name.is_empty() || name.contains('/') || name == "." || name == ".." {
			return Err(EnvironmentError::LayoutInvalid {
				path: path.to_path_buf(),
				message: format!("{}: '{}' is not a plain directory name", list, name),
			});
		}
		if !seen.insert(name.as_str()) {
			return Err(EnvironmentError::LayoutInvalid {
				path: path.to_path_buf(),
				message: format!("{}: '{}' is listed twice", list, name),
			});
		}
	}
	Ok(())
}

impl Layout {
	/// Parse a layout from TOML text. `path` is only used in error messages.
	pub fn parse(path: &Path, content: &str) -> Result<Self, EnvironmentError> {
		let layout: Layout = toml::from_str(content).map_err(|e| EnvironmentError::LayoutInvalid {
			path: path.to_path_buf(),
			message: e.to_string(),
		})?;
		check_names(path, "data_dirs", &layout.data_dirs)?;
		check_names(path, "video_dirs", &layout.video_dirs)?;
		check_names(path, "one_way_video_dirs", &layout.one_way_video_dirs)?;
		Ok(layout)
	}

	pub fn load(path: &Path) -> Result<Self, EnvironmentError> {
		let content = fs::read_to_string(path).map_err(|e| EnvironmentError::LayoutUnreadable {
			path: path.to_path_buf(),
			source: e,
		})?;
		Self::parse(path, &content)
	}

	fn pick_local(&self) -> Result<&LocalCandidate, EnvironmentError> {
		self.local.iter().find(|c| Path::new(c.probe()).exists()).ok_or_else(|| {
			EnvironmentError::NoLocalRoot {
				tried: self.local.iter().map(|c| c.probe().to_string()).collect(),
			}
		})
	}

	fn pick_remote(&self) -> Result<&RemoteCandidate, EnvironmentError> {
		self.remote.iter().find(|c| Path::new(c.probe()).exists()).ok_or_else(|| {
			EnvironmentError::NoRemoteRoot {
				tried: self.remote.iter().map(|c| c.probe().to_string()).collect(),
			}
		})
	}

	/// Resolve the roots for this machine into a [`PathSet`]
	pub fn resolve(&self, overrides: &RemoteOverrides) -> Result<PathSet, EnvironmentError> {
		let local = self.pick_local()?;
		info!("Using {} local paths", local.label.as_deref().unwrap_or(&local.data_root));

		let (remote_data_base, remote_video_base) =
			match (&overrides.data_base, &overrides.video_base) {
				(Some(data), Some(video)) => (data.clone(), video.clone()),
				(Some(data), None) => (data.clone(), data.clone()),
				(None, video) => {
					let remote = self.pick_remote()?;
					info!("Using {} remote paths", remote.label.as_deref().unwrap_or(&remote.data_base));
					let video = video
						.clone()
						.or_else(|| remote.video_base.clone())
						.unwrap_or_else(|| remote.data_base.clone());
					(remote.data_base.clone(), video)
				}
			};

		Ok(PathSet {
			local_data_root: local.data_root.clone(),
			local_video_root: local.video_root.clone().unwrap_or_else(|| local.data_root.clone()),
			remote_data_base,
			remote_video_base,
			data_dirs: self.data_dirs.clone(),
			video_dirs: self.video_dirs.clone(),
			one_way_video_dirs: self.one_way_video_dirs.clone(),
		})
	}
}


// vim: ts=4
