use thiserror::Error;

use crate::prelude::{Constellation, SV};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// One or more mandatory fields are missing (or null) in the ephemeris record.
    /// The record cannot be propagated: we never default partial data.
    #[error("{sv}: invalid ephemeris, missing {missing:?}")]
    InvalidEphemeris { sv: SV, missing: Vec<String> },

    /// Requested [SV] does not exist in the ephemeris source.
    #[error("satellite {0} not found in ephemeris data")]
    UnknownSatellite(SV),

    /// Only GPS, Galileo, QZSS, BeiDou and GLONASS can be propagated.
    #[error("unsupported constellation: {0}")]
    UnsupportedConstellation(Constellation),

    /// Numerical or domain failure during orbit propagation.
    /// Only this very satellite is impacted.
    #[error("{constellation} position computation failed for {sv}: {cause}")]
    PositionComputation {
        constellation: Constellation,
        sv: SV,
        cause: String,
    },

    /// The adaptive integrator did not reach the requested instant.
    #[error("{sv}: orbit integration failure: {cause}")]
    IntegrationFailure { sv: SV, cause: String },

    /// Invalid setup.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Wraps a numerical failure for this [SV].
    pub(crate) fn computation(sv: SV, cause: impl ToString) -> Self {
        Self::PositionComputation {
            constellation: sv.constellation,
            sv,
            cause: cause.to_string(),
        }
    }
}
