//! Pair generation properties
//!
//! - pair count is 2d + 2v + w with unique names
//! - bidirectional members swap the same two paths
//! - only the local -> remote member deletes

use std::collections::BTreeSet;

use dirsync::pairs::{generate, DELETE_FLAG};
use dirsync::types::{Direction, PathSet};

fn path_set(d: usize, v: usize, w: usize) -> PathSet {
	PathSet {
		local_data_root: "/home/me/Documents/project".into(),
		local_video_root: "/home/me/Video/project".into(),
		remote_data_base: "/media/me/ThumbDrive/".into(),
		remote_video_base: "/media/me/ThumbDrive/".into(),
		data_dirs: (0..d).map(|i| format!("data{}", i)).collect(),
		video_dirs: (0..v).map(|i| format!("video{}", i)).collect(),
		one_way_video_dirs: (0..w).map(|i| format!("raw{}", i)).collect(),
	}
}

#[test]
fn test_pair_count_and_unique_names() {
	for &(d, v, w) in &[(0, 0, 0), (1, 0, 0), (7, 1, 1), (3, 4, 2), (0, 0, 5)] {
		let pairs = generate(&path_set(d, v, w), false);
		assert_eq!(pairs.len(), 2 * d + 2 * v + w, "counts for d={} v={} w={}", d, v, w);

		let names: BTreeSet<&str> = pairs.iter().map(|p| p.name.as_str()).collect();
		assert_eq!(names.len(), pairs.len(), "names must be unique");
	}
}

#[test]
fn test_same_name_in_video_and_one_way_stays_unique() {
	let mut ps = path_set(0, 0, 0);
	ps.video_dirs = vec!["clips".into()];
	ps.one_way_video_dirs = vec!["clips".into()];
	let names: Vec<String> = generate(&ps, false).into_iter().map(|p| p.name).collect();
	assert_eq!(names, vec!["video_clips_to_local", "video_clips_to_remote", "video_clips_oneway"]);
}

#[test]
fn test_bidirectional_members_swap_paths() {
	let pairs = generate(&path_set(3, 2, 1), true);
	let bidirectional: Vec<_> = pairs.iter().filter(|p| p.direction != Direction::OneWay).collect();
	assert_eq!(bidirectional.len(), 10);

	for group in bidirectional.chunks(2) {
		let (inbound, outbound) = (group[0], group[1]);
		assert_eq!(inbound.direction, Direction::ToLocal);
		assert_eq!(outbound.direction, Direction::ToRemote);
		assert_eq!(inbound.source, outbound.destination);
		assert_eq!(inbound.destination, outbound.source);
		assert!(inbound.name.ends_with("_to_local"));
		assert!(outbound.name.ends_with("_to_remote"));
	}
}

#[test]
fn test_delete_direction_asymmetry() {
	for checksum in [false, true] {
		for pair in generate(&path_set(2, 2, 2), checksum) {
			let deletes = pair.options.iter().any(|o| o == DELETE_FLAG);
			match pair.direction {
				Direction::ToLocal => assert!(!deletes, "{} must not delete", pair.name),
				Direction::ToRemote => assert!(deletes, "{} must delete", pair.name),
				Direction::OneWay => assert!(!deletes, "{} must not delete", pair.name),
			}
			assert_eq!(pair.options.iter().any(|o| o == "--checksum"), checksum);
			assert!(pair.enabled);
		}
	}
}

#[test]
fn test_one_way_pairs_point_outward() {
	let ps = path_set(0, 0, 2);
	for pair in generate(&ps, false) {
		assert_eq!(pair.direction, Direction::OneWay);
		assert!(pair.source.starts_with("/home/me/Video/project/"));
		assert!(pair.destination.starts_with("/media/me/ThumbDrive/raw"));
		assert!(!pair.destination.contains("//"));
		assert!(pair.description.is_some());
	}
}

#[test]
fn test_generation_is_deterministic() {
	let ps = path_set(4, 2, 1);
	assert_eq!(generate(&ps, true), generate(&ps, true));
}

// vim: ts=4
