//! Persisted configuration: regeneration, override merge and unconditional save

use std::fs;
use tempfile::TempDir;

use dirsync::config::{ConfigStore, PriorConfig};
use dirsync::types::PathSet;

fn path_set(local: &str) -> PathSet {
	PathSet {
		local_data_root: format!("{}/data", local),
		local_video_root: format!("{}/video", local),
		remote_data_base: "/media/me/ThumbDrive/".into(),
		remote_video_base: "/media/me/ThumbDrive/".into(),
		data_dirs: vec!["mean_images".into(), "matlab_data".into()],
		video_dirs: vec!["processed_video".into()],
		one_way_video_dirs: vec!["raw".into()],
	}
}

#[test]
fn test_repeated_load_is_byte_identical() {
	let tmp = TempDir::new().unwrap();
	let store = ConfigStore::new(tmp.path().join("sync_config.json"));
	let paths = path_set("/home/me");

	store.load_and_persist(&paths, true);
	let first = fs::read_to_string(store.path()).unwrap();
	let loaded = store.load_and_persist(&paths, true);
	let second = fs::read_to_string(store.path()).unwrap();

	assert!(matches!(loaded.prior, PriorConfig::Merged));
	assert_eq!(first, second);
}

#[test]
fn test_disabled_pair_survives_regeneration_with_fresh_structure() {
	let tmp = TempDir::new().unwrap();
	let path = tmp.path().join("sync_config.json");

	// A hand-edited file: one pair disabled, its paths and options tampered with
	fs::write(
		&path,
		r#"{
			"sync_pairs": [
				{
					"name": "data_matlab_data_to_remote",
					"source": "/stale/source",
					"destination": "/stale/destination",
					"enabled": false,
					"rsync_options": ["-n"]
				}
			],
			"global_rsync_options": ["-a"],
			"exclude_patterns": ["*.bak", ".git"]
		}"#,
	)
	.unwrap();

	let store = ConfigStore::new(&path);
	let loaded = store.load_and_persist(&path_set("/Users/me"), false);
	let config = loaded.config;

	let pair = config.pair("data_matlab_data_to_remote").unwrap();
	assert!(!pair.enabled);
	assert_eq!(pair.source, "/Users/me/data/matlab_data");
	assert_eq!(pair.destination, "/media/me/ThumbDrive/matlab_data");
	assert_eq!(pair.options, vec!["-av", "--progress", "--no-perms", "--no-group", "--delete"]);

	assert_eq!(config.global_rsync_options, vec!["-a"]);
	assert_eq!(config.exclude_patterns, vec!["*.bak", ".git"]);
	assert_eq!(config.enabled_pairs().count(), config.sync_pairs.len() - 1);

	// Written back with the regenerated structure and the surviving toggle
	let saved: serde_json::Value =
		serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
	let saved_pairs = saved["sync_pairs"].as_array().unwrap();
	assert_eq!(saved_pairs.len(), 7);
	let saved_pair = saved_pairs.iter().find(|p| p["name"] == "data_matlab_data_to_remote").unwrap();
	assert_eq!(saved_pair["enabled"], false);
	assert_eq!(saved_pair["source"], "/Users/me/data/matlab_data");
}

#[test]
fn test_malformed_pair_entry_keeps_global_sets() {
	let tmp = TempDir::new().unwrap();
	let path = tmp.path().join("sync_config.json");
	fs::write(
		&path,
		r#"{
			"exclude_patterns": ["*.bak"],
			"global_rsync_options": ["-a"],
			"sync_pairs": [
				{"name": "data_mean_images_to_local", "enabled": false},
				{"enabled": false},
				{"name": "data_matlab_data_to_local", "enabled": "off"}
			]
		}"#,
	)
	.unwrap();

	let loaded = ConfigStore::new(&path).load_and_persist(&path_set("/home/me"), false);
	assert!(matches!(loaded.prior, PriorConfig::Merged));

	let config = loaded.config;
	assert_eq!(config.exclude_patterns, vec!["*.bak"]);
	assert_eq!(config.global_rsync_options, vec!["-a"]);
	assert!(!config.pair("data_mean_images_to_local").unwrap().enabled);
	assert!(config.pair("data_matlab_data_to_local").unwrap().enabled);
	assert_eq!(config.enabled_pairs().count(), 6);
}

#[test]
fn test_corrupt_prior_falls_back_and_is_overwritten() {
	let tmp = TempDir::new().unwrap();
	let path = tmp.path().join("sync_config.json");
	fs::write(&path, "{ invalid json").unwrap();

	let loaded = ConfigStore::new(&path).load_and_persist(&path_set("/home/me"), false);
	assert!(matches!(loaded.prior, PriorConfig::Unreadable(_)));
	assert!(loaded.config.sync_pairs.iter().all(|p| p.enabled));

	let rewritten: serde_json::Value =
		serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
	assert_eq!(rewritten["sync_pairs"].as_array().unwrap().len(), 7);
}

#[test]
fn test_unwritable_location_is_not_fatal() {
	let tmp = TempDir::new().unwrap();
	let blocker = tmp.path().join("blocker");
	fs::write(&blocker, b"a file, not a directory").unwrap();

	let store = ConfigStore::new(blocker.join("sync_config.json"));
	let loaded = store.load_and_persist(&path_set("/home/me"), false);
	assert_eq!(loaded.config.sync_pairs.len(), 7);
	assert!(store.save(&loaded.config).is_err());
}

// vim: ts=4
