use crate::{
    ephemeris::EphemerisRecord,
    error::Error,
    prelude::{Epoch, SV},
    system::GnssSystem,
};

/// [KeplerianEphemeris] is the validated view of a GPS, Galileo, QZSS
/// or BeiDou [EphemerisRecord].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeplerianEphemeris {
    /// [SV]
    pub sv: SV,

    /// [GnssSystem]
    pub system: GnssSystem,

    /// Time of Ephemeris
    pub toe: Epoch,

    /// Time of Ephemeris, as broadcast (UNIX timestamp, in seconds)
    pub toe_unix_s: f64,

    /// Record timestamp
    pub datetime: Epoch,

    /// Square root of the semi-major axis (in m^1/2)
    pub sqrt_a: f64,

    /// Eccentricity
    pub eccentricity: f64,

    /// m0 (in radians)
    pub m0_rad: f64,

    /// Mean motion correction (in radians/s)
    pub dn_rad_s: f64,

    /// (in radians)
    pub i0_rad: f64,

    /// (in radians/s)
    pub idot_rad_s: f64,

    /// (in radians)
    pub omega0_rad: f64,

    /// (in radians)
    pub omega_rad: f64,

    /// (in radians/s)
    pub omega_dot_rad_s: f64,

    /// Sine / Cosine (in radians)
    pub cus_cuc_rad: (f64, f64),

    /// Sine / Cosine (in radians)
    pub cis_cic_rad: (f64, f64),

    /// Sine / Cosine (in meters)
    pub crs_crc_m: (f64, f64),
}

impl TryFrom<&EphemerisRecord> for KeplerianEphemeris {
    type Error = Error;

    fn try_from(record: &EphemerisRecord) -> Result<Self, Self::Error> {
        let system = record.validate()?;

        if !system.is_keplerian() {
            return Err(Error::UnsupportedConstellation(record.sv.constellation));
        }

        let datetime = record.datetime.ok_or_else(|| Error::InvalidEphemeris {
            sv: record.sv,
            missing: vec!["datetime".to_string()],
        })?;

        let toe_unix_s = record.require("toe")?;
        if !toe_unix_s.is_finite() {
            return Err(Error::computation(record.sv, "non finite toe"));
        }

        Ok(Self {
            sv: record.sv,
            system,
            datetime,
            toe: Epoch::from_unix_seconds(toe_unix_s),
            toe_unix_s,
            sqrt_a: record.require("sqrta")?,
            eccentricity: record.require("e")?,
            m0_rad: record.require("m0")?,
            dn_rad_s: record.require("deltaN")?,
            i0_rad: record.require("i0")?,
            idot_rad_s: record.require("idot")?,
            omega0_rad: record.require("omega0")?,
            omega_rad: record.require("omega")?,
            omega_dot_rad_s: record.require("omegaDot")?,
            cus_cuc_rad: (record.require("cus")?, record.require("cuc")?),
            cis_cic_rad: (record.require("cis")?, record.require("cic")?),
            crs_crc_m: (record.require("crs")?, record.require("crc")?),
        })
    }
}

impl KeplerianEphemeris {
    /// Semi-major axis (in meters)
    pub fn semi_major_axis_m(&self) -> f64 {
        self.sqrt_a.powi(2)
    }

    /// Returns true if this is a BeiDou GEO vehicle.
    pub fn is_beidou_geo(&self) -> bool {
        self.system == GnssSystem::BeiDou
            && self.i0_rad <= crate::constants::BEIDOU_GEO_MAX_INCLINATION_RAD
    }
}
