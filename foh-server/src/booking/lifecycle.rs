//! Reservation status lifecycle
//!
//! `booked → seated → finished`, plus `booked → cancelled`. `finished` and
//! `cancelled` are terminal. Creation always starts a reservation at
//! `booked`; the intake pipeline rejects any other client-supplied status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reservation status, stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Finished,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Seated => "seated",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string; names the offending value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Status '{0}' is not a known reservation status.")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(Self::Booked),
            "seated" => Ok(Self::Seated),
            "finished" => Ok(Self::Finished),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Rejected transition, carrying the offending (current, requested) pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("A finished reservation cannot be updated.")]
    Finished,

    #[error("Cannot change a reservation from '{current}' to '{requested}'.")]
    Illegal {
        current: ReservationStatus,
        requested: ReservationStatus,
    },
}

/// Check whether `current → requested` is a legal lifecycle edge.
///
/// Legal edges: `booked→seated`, `booked→cancelled`, `seated→finished`.
/// Everything else is rejected, including same-status updates.
pub fn check_transition(
    current: ReservationStatus,
    requested: ReservationStatus,
) -> Result<(), TransitionError> {
    use ReservationStatus::{Booked, Cancelled, Finished, Seated};

    if current == Finished {
        return Err(TransitionError::Finished);
    }
    match (current, requested) {
        (Booked, Seated) | (Booked, Cancelled) | (Seated, Finished) => Ok(()),
        _ => Err(TransitionError::Illegal { current, requested }),
    }
}
