//! Logging prelude module for convenient access to tracing macros.
//!
//! # Usage
//!
//! ```ignore
//! use crate::logging::*;
//!
//! info!("Starting sync for '{}'", name);
//! warn!("Could not load config file");
//! ```

pub use tracing::{debug, error, info, warn};

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber with environment filter support.
///
/// By default, logs at INFO level and above go to stderr. Control the level
/// with `RUST_LOG`:
///
/// ```bash
/// RUST_LOG=debug dirsync --dry-run
/// RUST_LOG=dirsync::executor=debug dirsync
/// ```
///
/// With `log_file` set, the same events are also appended to that file
/// without ANSI colors.
pub fn init_tracing(log_file: Option<&Path>) -> io::Result<()> {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let file_layer = match log_file {
		Some(path) => {
			if let Some(parent) = path.parent() {
				if !parent.as_os_str().is_empty() {
					fs::create_dir_all(parent)?;
				}
			}
			let file = OpenOptions::new().create(true).append(true).open(path)?;
			Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
		}
		None => None,
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(io::stderr))
		.with(file_layer)
		.init();
	Ok(())
}

// vim: ts=4
