//! Expansion of named directories into directed sync pairs
//!
//! Every bidirectional directory yields two pairs over the same two paths:
//! remote -> local without `--delete` first, then local -> remote with
//! `--delete`. Deletions therefore only ever flow outward from the local
//! side. One-way directories yield a single local -> remote pair that never
//! deletes.

use crate::types::{Category, Direction, PathSet, SyncPair};
use crate::validation::join_dir;

/// Flags every pair starts with
pub const BASELINE_OPTIONS: &[&str] = &["-av", "--progress", "--no-perms", "--no-group"];

pub const CHECKSUM_FLAG: &str = "--checksum";
pub const DELETE_FLAG: &str = "--delete";

const ONE_WAY_DESCRIPTION: &str = "One-way sync: local -> remote only";

/// Build the rsync options for a pair in `direction`
pub fn pair_options(direction: Direction, checksum_mode: bool) -> Vec<String> {
	let mut options: Vec<String> = BASELINE_OPTIONS.iter().map(|s| s.to_string()).collect();
	if checksum_mode {
		options.push(CHECKSUM_FLAG.to_string());
	}
	if direction.deletes() {
		options.push(DELETE_FLAG.to_string());
	}
	options
}

fn make_pair(
	category: Category,
	dir: &str,
	direction: Direction,
	local: String,
	remote: String,
	checksum_mode: bool,
) -> SyncPair {
	let (source, destination, description) = match direction {
		Direction::ToLocal => (remote, local, None),
		Direction::ToRemote => (local, remote, None),
		Direction::OneWay => (local, remote, Some(ONE_WAY_DESCRIPTION.to_string())),
	};
	SyncPair {
		name: format!("{}_{}_{}", category, dir, direction),
		source,
		destination,
		enabled: true,
		options: pair_options(direction, checksum_mode),
		description,
		direction,
	}
}

fn push_bidirectional(
	pairs: &mut Vec<SyncPair>,
	category: Category,
	dirs: &[String],
	local_root: &str,
	remote_base: &str,
	checksum_mode: bool,
) {
	for dir in dirs {
		let local = join_dir(local_root, dir);
		let remote = join_dir(remote_base, dir);
		pairs.push(make_pair(
			category,
			dir,
			Direction::ToLocal,
			local.clone(),
			remote.clone(),
			checksum_mode,
		));
		pairs.push(make_pair(category, dir, Direction::ToRemote, local, remote, checksum_mode));
	}
}

/// Generate the ordered pair list for `paths`.
///
/// Data directories come first, then video, then one-way video. Pure and
/// deterministic: the same input always produces the same list.
pub fn generate(paths: &PathSet, checksum_mode: bool) -> Vec<SyncPair> {
	let mut pairs = Vec::with_capacity(
		2 * (paths.data_dirs.len() + paths.video_dirs.len()) + paths.one_way_video_dirs.len(),
	);

	push_bidirectional(
		&mut pairs,
		Category::Data,
		&paths.data_dirs,
		&paths.local_data_root,
		&paths.remote_data_base,
		checksum_mode,
	);
	push_bidirectional(
		&mut pairs,
		Category::Video,
		&paths.video_dirs,
		&paths.local_video_root,
		&paths.remote_video_base,
		checksum_mode,
	);

	for dir in &paths.one_way_video_dirs {
		pairs.push(make_pair(
			Category::Video,
			dir,
			Direction::OneWay,
			join_dir(&paths.local_video_root, dir),
			join_dir(&paths.remote_video_base, dir),
			checksum_mode,
		));
	}

	pairs
}


// vim: ts=4
