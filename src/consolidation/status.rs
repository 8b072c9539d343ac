//! Canonical station status.
//!
//! Every source encodes "is this station operational" differently; the
//! normalizer folds each encoding into the shared two-valued status.

use std::fmt;

/// Canonical two-valued station status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationStatus {
    Open,
    Closed,
}

impl StationStatus {
    /// Return the canonical string representation for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            StationStatus::Open => "OPEN",
            StationStatus::Closed => "CLOSED",
        }
    }

    /// Normalize a raw source value: open iff it equals the source's open
    /// token, closed otherwise. Total by construction.
    pub fn normalize(raw: &str, open_token: &str) -> Self {
        if raw == open_token {
            StationStatus::Open
        } else {
            StationStatus::Closed
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
