#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod cfg;
mod constants;
mod ephemeris;
mod error;
mod kepler;
mod orbit;
mod position;
mod propagator;
mod system;

pub mod ipp;
pub mod time;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, IntegratorOpts, ShellOpts};
    pub use crate::constants::PhysicalConstants;
    pub use crate::ephemeris::{
        EphemerisRecord, EphemerisSet, EphemerisSource, GlonassEphemeris, KeplerianEphemeris,
    };
    pub use crate::error::Error;
    pub use crate::ipp::{
        pierce_point, pierce_point_from, pierce_points, sky_pierce_points, PierceColumns,
        PierceGeometry,
    };
    pub use crate::kepler::{kepler, normalize_angle};
    pub use crate::orbit::{
        beidou_geo_correction, GlonassTrace, KeplerianTrace, OrbitSource, OrbitState,
        PropagationTrace, Solution,
    };
    pub use crate::position::Position;
    pub use crate::propagator::{Orbits, Propagator};
    pub use crate::system::GnssSystem;
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::{Vector3, Vector6};
}

// pub export
pub use error::Error;
