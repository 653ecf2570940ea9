use nalgebra::Vector3;

use crate::{
    ephemeris::EphemerisRecord,
    error::Error,
    prelude::{Epoch, SV},
    system::GnssSystem,
};

/// [GlonassEphemeris] is the validated view of a GLONASS [EphemerisRecord]:
/// an osculating state vector at a reference epoch.
/// Values are stored as broadcast (kilometers based);
/// use the `_m` accessors to obtain meters based quantities.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlonassEphemeris {
    /// [SV]
    pub sv: SV,
    /// Reference [Epoch] of the state vector
    pub reference: Epoch,
    /// Record timestamp, default propagation instant
    pub datetime: Option<Epoch>,
    /// ECEF position (km)
    pub position_km: Vector3<f64>,
    /// ECEF velocity (km/s)
    pub velocity_km_s: Vector3<f64>,
    /// Lunisolar acceleration (km/s²). Null components are set to zero.
    pub acceleration_km_s2: Vector3<f64>,
}

impl TryFrom<&EphemerisRecord> for GlonassEphemeris {
    type Error = Error;

    fn try_from(record: &EphemerisRecord) -> Result<Self, Self::Error> {
        let system = record.validate()?;

        if system != GnssSystem::Glonass {
            return Err(Error::UnsupportedConstellation(record.sv.constellation));
        }

        let gps_seconds = record.require("gps_seconds")?;
        if !gps_seconds.is_finite() {
            return Err(Error::computation(record.sv, "non finite reference time"));
        }

        let acceleration_km_s2 = Vector3::new(
            record.get("accelX").unwrap_or(0.0),
            record.get("accelY").unwrap_or(0.0),
            record.get("accelZ").unwrap_or(0.0),
        );

        Ok(Self {
            sv: record.sv,
            reference: Epoch::from_gpst_seconds(gps_seconds),
            datetime: record.datetime,
            position_km: Vector3::new(
                record.require("satPosX")?,
                record.require("satPosY")?,
                record.require("satPosZ")?,
            ),
            velocity_km_s: Vector3::new(
                record.require("velX")?,
                record.require("velY")?,
                record.require("velZ")?,
            ),
            acceleration_km_s2,
        })
    }
}

impl GlonassEphemeris {
    /// ECEF position (m)
    pub fn position_m(&self) -> Vector3<f64> {
        self.position_km * 1.0E3
    }

    /// ECEF velocity (m/s)
    pub fn velocity_m_s(&self) -> Vector3<f64> {
        self.velocity_km_s * 1.0E3
    }

    /// Lunisolar acceleration (m/s²)
    pub fn acceleration_m_s2(&self) -> Vector3<f64> {
        self.acceleration_km_s2 * 1.0E3
    }
}
