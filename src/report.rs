//! Console reporting: one status line per endpoint plus a final summary.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::classify::Classification;
use crate::fetch::ResponseRecord;

const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const RESET: &str = "\x1b[0m";

/// Formats the status line for one classified record.
///
/// `[200] https://api.guildwars2.com/v2/build is... ok.`
///
/// Transport failures show `ERR` where the status code would be.
#[must_use]
pub fn status_line(record: &ResponseRecord, classification: Classification, color: bool) -> String {
    let code = record
        .status()
        .map_or_else(|| "ERR".to_string(), |status| status.to_string());
    let (paint, verdict) = match classification {
        Classification::Responding => (GREEN, "ok"),
        Classification::NotResponding => (RED, "not responding"),
    };

    if color {
        format!("[{paint}{code}{RESET}] {} is... {paint}{verdict}{RESET}.", record.endpoint)
    } else {
        format!("[{code}] {} is... {verdict}.", record.endpoint)
    }
}

/// Responding endpoints over catalog size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub responding: usize,
    pub total: usize,
}

impl Summary {
    /// Truncated percentage of responding endpoints; 0 for an empty catalog.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.responding * 100 / self.total
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Endpoints responding: {}/{} = {}%",
            self.responding,
            self.total,
            self.percent()
        )
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub summary: Summary,

    /// Artifacts written, in catalog order.
    pub written: Vec<PathBuf>,

    /// Acceptable responses whose body was not JSON.
    pub undecodable: Vec<String>,

    /// Endpoints that could not be reached at all.
    pub transport_failures: Vec<String>,
}
