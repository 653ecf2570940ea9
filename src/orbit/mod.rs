use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::prelude::{Epoch, SV};

mod glonass;
mod integrator;
mod keplerian;

pub use glonass::GlonassTrace;
pub use integrator::Solution;
pub use keplerian::{beidou_geo_correction, KeplerianTrace};

pub(crate) use integrator::integrate;

/// [OrbitState] is the outcome of one propagation:
/// ECEF coordinates of the satellite plus the intermediate
/// quantities that lead to them.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    /// [SV]
    pub sv: SV,
    /// [Epoch] of this state
    pub epoch: Epoch,
    /// ECEF position (m)
    pub position_ecef_m: Vector3<f64>,
    /// Propagation intermediate quantities
    pub trace: PropagationTrace,
}

/// Quantities that lead to the [OrbitState]. Useful for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum PropagationTrace {
    /// Keplerian propagation
    Keplerian(KeplerianTrace),
    /// GLONASS numerical integration
    Glonass(Box<GlonassTrace>),
}

impl OrbitState {
    /// ECEF position as (x, y, z) meters triplet
    pub fn position_ecef_m(&self) -> (f64, f64, f64) {
        (
            self.position_ecef_m[0],
            self.position_ecef_m[1],
            self.position_ecef_m[2],
        )
    }

    /// Distance to Earth center (m)
    pub fn radius_m(&self) -> f64 {
        self.position_ecef_m.norm()
    }

    /// Returns [KeplerianTrace], if this state was obtained from Keplerian elements
    pub fn keplerian_trace(&self) -> Option<&KeplerianTrace> {
        match &self.trace {
            PropagationTrace::Keplerian(trace) => Some(trace),
            _ => None,
        }
    }

    /// Returns [GlonassTrace], if this state was obtained by numerical integration
    pub fn glonass_trace(&self) -> Option<&GlonassTrace> {
        match &self.trace {
            PropagationTrace::Glonass(trace) => Some(trace),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for OrbitState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("OrbitState", 3)?;
        state.serialize_field("sv", &self.sv)?;
        state.serialize_field("epoch", &self.epoch)?;
        state.serialize_field("position_ecef_m", &self.position_ecef_m())?;
        state.end()
    }
}

/// Any [OrbitSource] may provide ECEF coordinates of satellites,
/// for example to compute the pierce points of a whole sky.
pub trait OrbitSource {
    /// Provide ECEF position (m) of this [SV] at requested [Epoch].
    /// Return None when no position may be obtained.
    fn position_ecef_m(&self, epoch: Epoch, sv: SV) -> Option<Vector3<f64>>;
}
