/// 3D Position coordinates
use crate::prelude::Vector3;
use map_3d::{ecef2geodetic, geodetic2ecef, Ellipsoid};

/// [Position] of a ground receiver. Both ECEF and geodetic coordinates
/// are stored, so the geodetic conversion happens once per receiver,
/// whatever the number of satellites in sight.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Position {
    /// ECEF coordinates in meters
    pub(crate) ecef: Vector3<f64>,
    /// Geodetic coordinates in radians
    pub(crate) geodetic: Vector3<f64>,
}

impl Position {
    /// Builds new [Position] from ECEF coordinates expressed in meter.
    pub fn from_ecef(ecef: Vector3<f64>) -> Self {
        let (x, y, z) = (ecef[0], ecef[1], ecef[2]);
        let (lat, lon, h) = ecef2geodetic(x, y, z, Ellipsoid::WGS84);
        Self {
            ecef,
            geodetic: Vector3::new(lat, lon, h),
        }
    }
    /// Builds new [Position] from Geodetic coordinates
    /// - latitude [rad]
    /// - longitude [rad]
    /// - altitude above sea level [m]
    pub fn from_geo(geodetic: Vector3<f64>) -> Self {
        let (lat, lon, alt) = (geodetic[0], geodetic[1], geodetic[2]);
        let (x, y, z) = geodetic2ecef(lat, lon, alt, Ellipsoid::WGS84);
        Self {
            geodetic,
            ecef: Vector3::new(x, y, z),
        }
    }
    /// Returns ECEF coordinates.
    pub fn ecef(&self) -> Vector3<f64> {
        self.ecef
    }
    /// Returns Geodetic coordinates
    /// - latitude [rad]
    /// - longitude [rad]
    /// - altitude above sea level [m]
    pub fn geodetic(&self) -> Vector3<f64> {
        self.geodetic
    }
    /// Returns (latitude [°], longitude [°], altitude [m])
    pub fn geodetic_deg(&self) -> (f64, f64, f64) {
        (
            self.geodetic[0].to_degrees(),
            self.geodetic[1].to_degrees(),
            self.geodetic[2],
        )
    }
}

#[cfg(test)]
mod test {
    use super::Position;
    use nalgebra::Vector3;

    #[test]
    fn geodetic_roundtrip() {
        let ecef = Vector3::new(4_696_989.6880, 723_994.1970, 4_239_678.3040);
        let pos = Position::from_ecef(ecef);
        let (lat, lon, alt) = pos.geodetic_deg();
        assert!((lat - 41.92).abs() < 0.2, "lat={}", lat);
        assert!((lon - 8.76).abs() < 0.1, "lon={}", lon);
        assert!(alt.abs() < 1000.0);

        let back = Position::from_geo(pos.geodetic());
        assert!((back.ecef() - ecef).norm() < 1.0E-3);
    }
}
