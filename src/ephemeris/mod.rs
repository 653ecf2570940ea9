use std::collections::BTreeMap;

use crate::{
    error::Error,
    prelude::{Epoch, SV},
    system::GnssSystem,
};

mod glonass;
mod keplerian;

pub use glonass::GlonassEphemeris;
pub use keplerian::KeplerianEphemeris;

/// [EphemerisRecord] is one broadcast ephemeris frame, for one [SV],
/// described as a flat mapping of named parameters.
/// Selecting which frame to use (for example, the middle one of a daily
/// time series) is up to the ephemeris preparer.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRecord {
    /// [SV]
    pub sv: SV,
    /// Record timestamp, also default propagation instant
    pub datetime: Option<Epoch>,
    /// Named parameters. `None` stands for a null value.
    fields: BTreeMap<String, Option<f64>>,
}

impl EphemerisRecord {
    /// Builds an empty [EphemerisRecord] for this [SV].
    pub fn new(sv: SV) -> Self {
        Self {
            sv,
            datetime: None,
            fields: Default::default(),
        }
    }

    /// Copies and returns [EphemerisRecord] with record timestamp.
    pub fn with_datetime(mut self, datetime: Epoch) -> Self {
        self.datetime = Some(datetime);
        self
    }

    /// Copies and returns [EphemerisRecord] with this parameter value.
    pub fn with_field(mut self, name: &str, value: f64) -> Self {
        self.set_field(name, Some(value));
        self
    }

    /// Copies and returns [EphemerisRecord] with this parameter set to null.
    pub fn with_null_field(mut self, name: &str) -> Self {
        self.set_field(name, None);
        self
    }

    /// Defines (or nullifies) a parameter.
    pub fn set_field(&mut self, name: &str, value: Option<f64>) {
        self.fields.insert(name.to_string(), value);
    }

    /// Removes a parameter entirely.
    pub fn remove_field(&mut self, name: &str) -> Option<Option<f64>> {
        self.fields.remove(name)
    }

    /// Returns parameter value, if it exists and is not null.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied().flatten()
    }

    /// Returns the parameters of this schema that are absent or null.
    pub fn missing_fields(&self, schema: &[&str]) -> Vec<String> {
        schema
            .iter()
            .filter(|name| self.get(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// Returns the [GnssSystem] this record belongs to.
    pub fn system(&self) -> Result<GnssSystem, Error> {
        GnssSystem::try_from(self.sv)
    }

    /// Verifies this record carries all parameters its [GnssSystem] requires.
    /// Keplerian records also require the record timestamp.
    pub fn validate(&self) -> Result<GnssSystem, Error> {
        let system = self.system()?;
        let mut missing = self.missing_fields(system.required_fields());

        if system.is_keplerian() && self.datetime.is_none() {
            missing.push("datetime".to_string());
        }

        if missing.is_empty() {
            Ok(system)
        } else {
            Err(Error::InvalidEphemeris {
                sv: self.sv,
                missing,
            })
        }
    }

    /// Returns named parameter or [Error::InvalidEphemeris].
    pub(crate) fn require(&self, name: &str) -> Result<f64, Error> {
        self.get(name).ok_or_else(|| Error::InvalidEphemeris {
            sv: self.sv,
            missing: vec![name.to_string()],
        })
    }
}

/// [EphemerisSource] provides one [EphemerisRecord] per [SV].
pub trait EphemerisSource {
    /// Provide [EphemerisRecord] for requested [SV], if any.
    fn ephemeris(&self, sv: SV) -> Option<&EphemerisRecord>;

    /// Lists all [SV]s we have ephemeris for.
    fn satellites(&self) -> Vec<SV>;
}

/// [EphemerisSet] is the simplest [EphemerisSource]: one record per [SV].
pub type EphemerisSet = BTreeMap<SV, EphemerisRecord>;

impl EphemerisSource for EphemerisSet {
    fn ephemeris(&self, sv: SV) -> Option<&EphemerisRecord> {
        self.get(&sv)
    }

    fn satellites(&self) -> Vec<SV> {
        self.keys().copied().collect()
    }
}

impl FromIterator<EphemerisRecord> for EphemerisSet {
    fn from_iter<I: IntoIterator<Item = EphemerisRecord>>(iter: I) -> Self {
        iter.into_iter().map(|record| (record.sv, record)).collect()
    }
}
