use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process::ExitCode;

use dirsync::audit;
use dirsync::config::{ConfigStore, PriorConfig};
use dirsync::error::SyncError;
use dirsync::executor::{PairExecutor, ProcessInvoker, RSYNC_PROGRAM};
use dirsync::layout::{self, Layout, RemoteOverrides};
use dirsync::logging::*;
use dirsync::sync::Orchestrator;
use dirsync::types::SyncConfig;

fn cli() -> Command {
	Command::new("dirsync")
		.version(env!("CARGO_PKG_VERSION"))
		.about("Synchronize data and video directories between local and remote roots using rsync")
		.arg(
			Arg::new("dry-run")
				.long("dry-run")
				.action(ArgAction::SetTrue)
				.help("Preview changes without making them"),
		)
		.arg(
			Arg::new("list")
				.long("list")
				.action(ArgAction::SetTrue)
				.help("List all configured sync pairs"),
		)
		.arg(
			Arg::new("config")
				.long("config")
				.value_name("FILE")
				.help("Path to the pair configuration file"),
		)
		.arg(
			Arg::new("layout")
				.long("layout")
				.value_name("FILE")
				.help("Path to the layout file (default: ~/.dirsync/layout.toml)"),
		)
		.arg(Arg::new("pair").long("pair").value_name("NAME").help("Sync only a specific pair by name"))
		.arg(
			Arg::new("checksum")
				.long("checksum")
				.action(ArgAction::SetTrue)
				.conflicts_with("no-checksum")
				.help("Use checksum comparison instead of timestamps"),
		)
		.arg(
			Arg::new("no-checksum")
				.long("no-checksum")
				.action(ArgAction::SetTrue)
				.help("Use timestamp comparison even if the layout enables checksums"),
		)
		.arg(
			Arg::new("remote-data-base")
				.long("remote-data-base")
				.value_name("DIR")
				.help("Remote base for data directories (skips remote detection)"),
		)
		.arg(
			Arg::new("remote-video-base")
				.long("remote-video-base")
				.value_name("DIR")
				.help("Remote base for video directories"),
		)
		.arg(
			Arg::new("rsync")
				.long("rsync")
				.value_name("PROGRAM")
				.default_value(RSYNC_PROGRAM)
				.help("rsync executable to invoke"),
		)
		.arg(
			Arg::new("log-file")
				.long("log-file")
				.value_name("FILE")
				.help("Also append log output to this file"),
		)
}

fn list_sync_pairs(config: &SyncConfig) {
	println!("\nConfigured Sync Pairs:");
	println!("{}", "=".repeat(50));
	for (i, pair) in config.sync_pairs.iter().enumerate() {
		let status = if pair.enabled { "ENABLED" } else { "DISABLED" };
		println!("{}. {} [{}]", i + 1, pair.name, status);
		println!("   Source: {}", pair.source);
		println!("   Destination: {}", pair.destination);
		println!("   Options: {}", pair.options.join(" "));
		if let Some(description) = &pair.description {
			println!("   Description: {}", description);
		}
		println!();
	}
}

async fn run(matches: clap::ArgMatches) -> Result<bool, SyncError> {
	let dry_run = matches.get_flag("dry-run");

	let layout_path = match matches.get_one::<String>("layout") {
		Some(path) => PathBuf::from(path),
		None => layout::default_layout_path()?,
	};
	let layout = Layout::load(&layout_path)?;

	let checksum_mode = if matches.get_flag("checksum") {
		true
	} else if matches.get_flag("no-checksum") {
		false
	} else {
		layout.checksum
	};

	let overrides = RemoteOverrides {
		data_base: matches.get_one::<String>("remote-data-base").cloned(),
		video_base: matches.get_one::<String>("remote-video-base").cloned(),
	};
	let paths = layout.resolve(&overrides)?;

	info!("Local data root: {}", paths.local_data_root);
	info!("Local video root: {}", paths.local_video_root);
	info!("Remote data base: {}", paths.remote_data_base);
	info!("Remote video base: {}", paths.remote_video_base);
	info!("Sync mode: {} comparison", if checksum_mode { "checksum" } else { "timestamp" });

	if !dry_run && !matches.get_flag("list") {
		audit::ensure_remote_dirs(&paths);
	}
	audit::audit_path_set(&paths);

	let store = match matches.get_one::<String>("config") {
		Some(path) => ConfigStore::new(path),
		None => ConfigStore::for_paths(&paths),
	};
	let loaded = store.load_and_persist(&paths, checksum_mode);
	if let PriorConfig::Unreadable(_) = loaded.prior {
		warn!("Previous enable/disable choices were not applied");
	}
	let config = loaded.config;

	if matches.get_flag("list") {
		list_sync_pairs(&config);
		return Ok(true);
	}

	let program = matches.get_one::<String>("rsync").map(String::as_str).unwrap_or(RSYNC_PROGRAM);
	let orchestrator = Orchestrator::new(PairExecutor::new(ProcessInvoker).with_program(program));

	match matches.get_one::<String>("pair") {
		Some(name) => {
			let outcome = orchestrator.run_one(&config, name, dry_run).await?;
			Ok(outcome.is_success())
		}
		None => {
			let summary = orchestrator.run_all(&config, dry_run).await;
			for name in summary.failed() {
				error!("Failed: {}", name);
			}
			Ok(summary.all_succeeded())
		}
	}
}

#[tokio::main]
async fn main() -> ExitCode {
	let matches = cli().get_matches();

	let log_file = matches.get_one::<String>("log-file").map(PathBuf::from);
	if let Err(e) = init_tracing(log_file.as_deref()) {
		eprintln!("Cannot open log file: {}", e);
		return ExitCode::FAILURE;
	}

	match run(matches).await {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(e) => {
			error!("{}", e);
			ExitCode::FAILURE
		}
	}
}


// vim: ts=4
