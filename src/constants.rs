use crate::system::GnssSystem;

/// Duration of one GNSS week, in seconds
pub const WEEK_SECONDS: f64 = 604_800.0;

/// Duration of one day, in seconds
pub const DAY_SECONDS: f64 = 86_400.0;

/// Mean (spherical) Earth radius, in meters.
/// Used to define the thin ionospheric shell.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 Earth Frame Ellipsoid semi-major axis
pub const EARTH_SEMI_MAJOR_AXIS_WGS84: f64 = 6378137.0_f64;

/// Earth angular velocity, in WGS84 frame rad/s
pub const EARTH_ANGULAR_VEL_RAD: f64 = 7.2921151467E-5;

/// Arcseconds to radians conversion factor (π / 648000)
pub const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / 648_000.0;

/// Inclination threshold under which a BeiDou vehicle is handled
/// as a GEO satellite (20°, in radians)
pub const BEIDOU_GEO_MAX_INCLINATION_RAD: f64 = 20.0 * std::f64::consts::PI / 180.0;

/// Fixed tilt of the BeiDou GEO reference frame (-5°, in radians)
pub const BEIDOU_GEO_TILT_RAD: f64 = -5.0 * std::f64::consts::PI / 180.0;

/// [PhysicalConstants] defined by each constellation ICD.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhysicalConstants {
    /// Geocentric gravitational constant (m^3 s-2)
    pub gm: f64,
    /// Earth angular velocity (rad s-1)
    pub we: f64,
    /// Semi-major axis of the reference ellipsoid (m)
    pub a: f64,
    /// Numeric eccentricity of the reference ellipsoid, when published
    pub e: Option<f64>,
    /// Flattening of the reference ellipsoid, when published
    pub f: Option<f64>,
    /// Second degree zonal harmonic coefficient (GLONASS only)
    pub c20: Option<f64>,
}

pub(crate) static GPS: PhysicalConstants = PhysicalConstants {
    gm: 3.986005E14,
    we: EARTH_ANGULAR_VEL_RAD,
    a: EARTH_SEMI_MAJOR_AXIS_WGS84,
    e: Some(0.0818191908426215),
    f: Some(1.0 / 298.257223563),
    c20: None,
};

pub(crate) static GALILEO: PhysicalConstants = PhysicalConstants {
    gm: 3.986004418E14,
    we: EARTH_ANGULAR_VEL_RAD,
    a: EARTH_SEMI_MAJOR_AXIS_WGS84,
    e: None,
    f: None,
    c20: None,
};

pub(crate) static BEIDOU: PhysicalConstants = PhysicalConstants {
    gm: 3.986004418E14,
    we: 7.292115E-5,
    a: 6378137.0,
    e: None,
    f: Some(1.0 / 298.257222101),
    c20: None,
};

pub(crate) static GLONASS: PhysicalConstants = PhysicalConstants {
    gm: 3.9860044E14,
    we: 7.292115E-5,
    a: 6378136.0,
    e: None,
    f: None,
    c20: Some(-1082.63E-6),
};

impl PhysicalConstants {
    /// Returns the [PhysicalConstants] to use for this [GnssSystem].
    /// QZSS follows the GPS definitions.
    pub fn of(system: GnssSystem) -> &'static Self {
        match system {
            GnssSystem::GPS | GnssSystem::QZSS => &GPS,
            GnssSystem::Galileo => &GALILEO,
            GnssSystem::BeiDou => &BEIDOU,
            GnssSystem::Glonass => &GLONASS,
        }
    }
}
