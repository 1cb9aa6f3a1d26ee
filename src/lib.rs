//! # dirsync - rsync-driven directory pair synchronizer
//!
//! dirsync expands a few named logical directories (data, video, one-way
//! video) into directed sync pairs between a local root and a remote base,
//! and reconciles each pair with rsync.
//!
//! Bidirectional directories get two pairs: remote -> local never deletes,
//! local -> remote deletes extraneous destination entries. One-way
//! directories get a single non-deleting local -> remote pair.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dirsync::config::ConfigStore;
//! use dirsync::executor::{PairExecutor, ProcessInvoker};
//! use dirsync::sync::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let paths = dirsync::layout::Layout::load("layout.toml".as_ref())?
//!         .resolve(&Default::default())?;
//!     let loaded = ConfigStore::for_paths(&paths).load_and_persist(&paths, false);
//!     let orchestrator = Orchestrator::new(PairExecutor::new(ProcessInvoker));
//!     let summary = orchestrator.run_all(&loaded.config, true).await;
//!     println!("{}/{} pairs synced", summary.succeeded, summary.total);
//! }
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod executor;
pub mod layout;
pub mod logging;
pub mod pairs;
pub mod report;
pub mod sync;
pub mod types;
pub mod validation;

// Re-export commonly used types and functions
pub use config::ConfigStore;
pub use error::{ConfigError, EnvironmentError, PairError, SyncError};
pub use executor::{Invocation, Invoker, PairExecutor, ProcessInvoker, SyncOutcome};
pub use report::ChangeReport;
pub use sync::{Orchestrator, RunSummary};
pub use types::{Category, Direction, PathSet, SyncConfig, SyncPair};

// vim: ts=4
