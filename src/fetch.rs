//! Concurrent endpoint probing.
//!
//! The [`Dispatcher`] owns a blocking HTTP client and a fixed-size worker
//! pool. [`Dispatcher::dispatch`] issues exactly one GET per endpoint and
//! returns only after every request has finished, with the records in
//! catalog order no matter which worker finished first.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::catalog::Endpoint;
use crate::error::{Error, Result};

/// Default number of concurrent workers.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// What probing one endpoint produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered. The body is kept raw; decoding is the
    /// classifier's job.
    Received { status: u16, body: Vec<u8> },

    /// Connection, TLS, timeout or body-read failure.
    TransportFailure { reason: String },
}

/// One endpoint paired with the outcome of probing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    pub endpoint: Endpoint,
    pub outcome: Outcome,
}

impl ResponseRecord {
    /// The HTTP status, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match &self.outcome {
            Outcome::Received { status, .. } => Some(*status),
            Outcome::TransportFailure { .. } => None,
        }
    }
}

/// Issues GET requests over a bounded worker pool.
pub struct Dispatcher {
    client: Client,
    pool: ThreadPool,
}

impl Dispatcher {
    /// Builds the HTTP client and a pool of `concurrency` workers.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConcurrency`] when `concurrency` is zero, otherwise
    /// whatever the client or pool builder reports.
    pub fn new(concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::InvalidConcurrency);
        }
        let client = Client::builder().build()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(concurrency)
            .thread_name(|i| format!("gw2-snapshot-fetch-{i}"))
            .build()?;
        Ok(Self { client, pool })
    }

    /// Number of workers in the pool.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Performs a single blocking GET. Never fails: transport errors are
    /// folded into [`Outcome::TransportFailure`].
    #[must_use]
    pub fn probe(&self, endpoint: &Endpoint) -> ResponseRecord {
        let outcome = match self.client.get(endpoint.url()).send() {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.bytes() {
                    Ok(body) => {
                        debug!(url = %endpoint, status, bytes = body.len(), "probed endpoint");
                        Outcome::Received {
                            status,
                            body: body.to_vec(),
                        }
                    }
                    Err(err) => {
                        warn!(url = %endpoint, status, error = %err, "failed to read response body");
                        Outcome::TransportFailure {
                            reason: err.to_string(),
                        }
                    }
                }
            }
            Err(err) => {
                warn!(url = %endpoint, error = %err, "request failed");
                Outcome::TransportFailure {
                    reason: err.to_string(),
                }
            }
        };

        ResponseRecord {
            endpoint: endpoint.clone(),
            outcome,
        }
    }

    /// Probes every endpoint once and waits for all of them.
    ///
    /// The returned vector has the same length and order as `endpoints`.
    #[must_use]
    pub fn dispatch(&self, endpoints: &[Endpoint]) -> Vec<ResponseRecord> {
        self.pool
            .install(|| endpoints.par_iter().map(|endpoint| self.probe(endpoint)).collect())
    }
}
