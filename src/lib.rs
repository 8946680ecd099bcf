//! # gw2-snapshot
//!
//! Snapshots the Guild Wars 2 API: every endpoint of a catalog is fetched
//! over a fixed-size worker pool, responding JSON bodies are written to a
//! directory tree mirroring the API routes, and a reachability report is
//! printed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gw2_snapshot::{snapshot, Catalog, Options};
//!
//! let catalog = Catalog::builtin()?;
//! let report = snapshot(&catalog, &Options::default(), &mut std::io::stdout())?;
//! println!("{} artifacts written", report.written.len());
//! # Ok::<(), gw2_snapshot::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Catalog**: ordered endpoint list, built-in or loaded from a file
//! - **Dispatch**: one blocking GET per endpoint, results kept in catalog order
//! - **Classify & persist**: 200/400/401 count as responding; JSON bodies become artifacts
//!
//! The [`scaffold`] module is a separate helper that turns model structs and
//! their JSON fixtures into accessor tests.

mod error;
mod options;
mod snapshot;

/// Endpoint and catalog types, including the built-in route list.
pub mod catalog;

/// Status-code classification.
pub mod classify;

/// Concurrent probing of endpoints.
pub mod fetch;

/// Artifact paths and JSON rendering.
pub mod persist;

/// Status lines and run summary.
pub mod report;

/// Accessor-test scaffolding from model sources.
pub mod scaffold;

// Public API - re-exports
pub use catalog::{Catalog, Endpoint, DEFAULT_BASE_URL};
pub use classify::{classify, Classification, ACCEPTABLE_STATUS_CODES};
pub use error::{Error, Result};
pub use fetch::{Dispatcher, Outcome, ResponseRecord, DEFAULT_CONCURRENCY};
pub use options::Options;
pub use report::{RunReport, Summary};
pub use snapshot::{classify_and_persist, snapshot};
