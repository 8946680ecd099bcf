//! Status-code classification.

use crate::fetch::{Outcome, ResponseRecord};

/// Status codes that count as "the endpoint responded".
///
/// 400 and 401 are included: an endpoint that wants parameters or an API key
/// is still up.
pub const ACCEPTABLE_STATUS_CODES: [u16; 3] = [200, 400, 401];

/// Reachability verdict for one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Responding,
    NotResponding,
}

impl Classification {
    /// Classifies a record. Transport failures never respond.
    #[must_use]
    pub fn of(record: &ResponseRecord) -> Self {
        match &record.outcome {
            Outcome::Received { status, .. } => classify(*status),
            Outcome::TransportFailure { .. } => Self::NotResponding,
        }
    }

    #[must_use]
    pub fn is_responding(self) -> bool {
        self == Self::Responding
    }
}

/// Classifies a raw status code.
#[must_use]
pub fn classify(status: u16) -> Classification {
    if ACCEPTABLE_STATUS_CODES.contains(&status) {
        Classification::Responding
    } else {
        Classification::NotResponding
    }
}
