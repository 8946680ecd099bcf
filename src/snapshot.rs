//! The snapshot pipeline: dispatch, then classify and persist in order.

use std::io::Write;

use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::classify::Classification;
use crate::error::{Error, Result};
use crate::fetch::{Dispatcher, Outcome, ResponseRecord};
use crate::options::Options;
use crate::persist::persist;
use crate::report::{status_line, RunReport, Summary};

/// Probes every endpoint in `catalog`, writes artifacts below
/// `options.output_dir` and prints the report to `out`.
///
/// # Errors
///
/// Configuration errors from [`Dispatcher::new`] and the fatal errors of
/// [`classify_and_persist`]. Unreachable endpoints are not errors.
pub fn snapshot<W: Write>(catalog: &Catalog, options: &Options, out: &mut W) -> Result<RunReport> {
    let dispatcher = Dispatcher::new(options.concurrency)?;
    info!(
        endpoints = catalog.len(),
        concurrency = dispatcher.concurrency(),
        "starting snapshot"
    );

    let records = dispatcher.dispatch(catalog.endpoints());
    let report = classify_and_persist(records, options, out)?;

    info!(
        responding = report.summary.responding,
        written = report.written.len(),
        "snapshot complete"
    );
    Ok(report)
}

/// Consumes response records in order: prints one status line each,
/// persists acceptable JSON bodies, then prints the summary.
///
/// Acceptable bodies that are not JSON are skipped with a warning.
///
/// # Errors
///
/// Aborts on the first [`Error::Serialize`] or [`Error::Io`] while writing
/// an artifact, and on [`Error::Output`] if `out` cannot be written.
pub fn classify_and_persist<W: Write>(
    records: Vec<ResponseRecord>,
    options: &Options,
    out: &mut W,
) -> Result<RunReport> {
    let mut report = RunReport {
        summary: Summary {
            responding: 0,
            total: records.len(),
        },
        ..RunReport::default()
    };

    for record in records {
        let classification = Classification::of(&record);
        writeln!(out, "{}", status_line(&record, classification, options.color)).map_err(Error::Output)?;

        match (&record.outcome, classification) {
            (Outcome::Received { body, .. }, Classification::Responding) => {
                report.summary.responding += 1;
                match serde_json::from_slice::<Value>(body) {
                    Ok(value) => {
                        let path = persist(&options.output_dir, &record.endpoint, &value)?;
                        report.written.push(path);
                    }
                    Err(err) => {
                        warn!(url = %record.endpoint, error = %err, "body is not JSON, no artifact written");
                        report.undecodable.push(record.endpoint.url().to_string());
                    }
                }
            }
            (Outcome::TransportFailure { .. }, _) => {
                report.transport_failures.push(record.endpoint.url().to_string());
            }
            (Outcome::Received { .. }, Classification::NotResponding) => {}
        }
    }

    writeln!(out, "{}", report.summary).map_err(Error::Output)?;
    Ok(report)
}
