//! Configuration options for a snapshot run.
//!
//! The catalog itself is passed separately so callers (and tests) can
//! substitute their own endpoint list.

use std::path::PathBuf;

use crate::fetch::DEFAULT_CONCURRENCY;

/// Configuration options for a snapshot run.
///
/// # Example
///
/// ```rust
/// use gw2_snapshot::Options;
///
/// let options = Options {
///     concurrency: 4,
///     color: false,
///     ..Options::default()
/// };
/// assert_eq!(options.output_dir, std::path::PathBuf::from("."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Number of concurrent workers issuing requests.
    ///
    /// Default: `8`
    pub concurrency: usize,

    /// Directory below which artifacts are written.
    ///
    /// Default: `.`
    pub output_dir: PathBuf,

    /// Emit ANSI colors in status lines. Display only.
    ///
    /// Default: `true`
    pub color: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            output_dir: PathBuf::from("."),
            color: true,
        }
    }
}
