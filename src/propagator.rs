use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    cfg::Config,
    ephemeris::{EphemerisRecord, EphemerisSource, GlonassEphemeris, KeplerianEphemeris},
    error::Error,
    orbit::{OrbitSource, OrbitState},
    prelude::{Epoch, Vector3, SV},
    system::GnssSystem,
};

/// [Propagator] computes satellite positions from broadcast ephemeris,
/// dispatching each record to the propagation model of its [GnssSystem].
/// It holds no state other than its [Config]: every call is independent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Propagator {
    cfg: Config,
}

impl Propagator {
    /// Builds a new [Propagator] from a validated [Config].
    pub fn new(cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// [Config] in use
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Propagates this [EphemerisRecord] to desired [Epoch].
    /// When `t` is omitted, the record timestamp is used.
    pub fn propagate(&self, record: &EphemerisRecord, t: Option<Epoch>) -> Result<OrbitState, Error> {
        let system = record.validate()?;

        let t = match t.or(record.datetime) {
            Some(t) => t,
            None => {
                return Err(Error::InvalidEphemeris {
                    sv: record.sv,
                    missing: vec!["datetime".to_string()],
                })
            },
        };

        debug!("{}({}) - {} propagation", t, record.sv, system);

        match system {
            GnssSystem::Glonass => {
                let ephemeris = GlonassEphemeris::try_from(record)?;
                ephemeris.resolve_state(t, &self.cfg.integrator)
            },
            _ => {
                let ephemeris = KeplerianEphemeris::try_from(record)?;
                ephemeris.resolve_state(t, self.cfg.kepler_tolerance_arcsec)
            },
        }
    }

    /// Propagates this GLONASS [EphemerisRecord] by `delta_s` seconds
    /// (possibly negative) from its reference epoch.
    pub fn propagate_glonass_by(
        &self,
        record: &EphemerisRecord,
        delta_s: f64,
    ) -> Result<OrbitState, Error> {
        let ephemeris = GlonassEphemeris::try_from(record)?;
        ephemeris.resolve_state_by(delta_s, &self.cfg.integrator)
    }

    /// Looks up the [EphemerisRecord] of this [SV] in the [EphemerisSource]
    /// and propagates it to desired [Epoch].
    pub fn satellite_position<S: EphemerisSource>(
        &self,
        source: &S,
        sv: SV,
        t: Option<Epoch>,
    ) -> Result<OrbitState, Error> {
        let record = source.ephemeris(sv).ok_or(Error::UnknownSatellite(sv))?;
        self.propagate(record, t)
    }

    /// Propagates each requested [SV] independently.
    /// One failure never prevents the other satellites from being resolved.
    pub fn propagate_all<S: EphemerisSource>(
        &self,
        source: &S,
        svs: &[SV],
        t: Option<Epoch>,
    ) -> BTreeMap<SV, Result<OrbitState, Error>> {
        svs.iter()
            .map(|sv| {
                let result = self.satellite_position(source, *sv, t);
                if let Err(e) = &result {
                    warn!("{} - {}", sv, e);
                }
                (*sv, result)
            })
            .collect()
    }

    /// Returns an [OrbitSource] that propagates on demand
    /// the satellites of this [EphemerisSource].
    pub fn orbits<'a, S: EphemerisSource>(&'a self, source: &'a S) -> Orbits<'a, S> {
        Orbits {
            propagator: self,
            source,
        }
    }
}

/// [OrbitSource] backed by a [Propagator] and an [EphemerisSource].
pub struct Orbits<'a, S: EphemerisSource> {
    propagator: &'a Propagator,
    source: &'a S,
}

impl<S: EphemerisSource> OrbitSource for Orbits<'_, S> {
    fn position_ecef_m(&self, epoch: Epoch, sv: SV) -> Option<Vector3<f64>> {
        match self.propagator.satellite_position(self.source, sv, Some(epoch)) {
            Ok(state) => Some(state.position_ecef_m),
            Err(e) => {
                warn!("{}({}) - {}", epoch, sv, e);
                None
            },
        }
    }
}
