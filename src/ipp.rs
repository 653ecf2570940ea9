//! Ionospheric Pierce Point (IPP) geometry
use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;
use map_3d::{ecef2aer, ecef2geodetic, Ellipsoid};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cfg::ShellOpts,
    orbit::OrbitSource,
    position::Position,
    prelude::{Epoch, Vector3, SV},
};

/// Where the line of sight pierces the thin ionospheric shell,
/// and where the satellite stands in the receiver sky.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PierceGeometry {
    /// IPP latitude (°)
    pub latitude_deg: f64,
    /// IPP longitude (°)
    pub longitude_deg: f64,
    /// Satellite azimuth (°), in [0, 360)
    pub azimuth_deg: f64,
    /// Satellite elevation (°)
    pub elevation_deg: f64,
}

/// Solves `|rx + t·(sv - rx)| = radius` and returns the smallest
/// solution `t` lying in [0, 1], if any.
pub fn shell_intersection(rx_ecef: &Vector3<f64>, sv_ecef: &Vector3<f64>, radius_m: f64) -> Option<f64> {
    let d = sv_ecef - rx_ecef;

    let a = d.norm_squared();
    let b = 2.0 * d.dot(rx_ecef);
    let c = rx_ecef.norm_squared() - radius_m.powi(2);

    if a == 0.0 {
        return None;
    }

    let discriminant = b.powi(2) - 4.0 * a * c;
    if discriminant.is_nan() || discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    [t1, t2]
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .min_by(|t1, t2| t1.total_cmp(t2))
}

/// Computes the [PierceGeometry] of one satellite, seen from this receiver [Position].
/// Returns None when the line of sight does not cross the shell between
/// the receiver and the satellite, or when the satellite position is undefined.
pub fn pierce_point_from(
    rx: &Position,
    sv_ecef: &Vector3<f64>,
    shell: &ShellOpts,
) -> Option<PierceGeometry> {
    if sv_ecef.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let rx_ecef = rx.ecef();
    let t = shell_intersection(&rx_ecef, sv_ecef, shell.radius_m())?;

    let ipp = rx_ecef + t * (sv_ecef - rx_ecef);
    let (lat_rad, lon_rad, _) = ecef2geodetic(ipp[0], ipp[1], ipp[2], Ellipsoid::WGS84);

    let rx_geo = rx.geodetic();
    let (az_rad, el_rad, _) = ecef2aer(
        sv_ecef[0],
        sv_ecef[1],
        sv_ecef[2],
        rx_geo[0],
        rx_geo[1],
        rx_geo[2],
        Ellipsoid::WGS84,
    );

    Some(PierceGeometry {
        latitude_deg: lat_rad.to_degrees(),
        longitude_deg: lon_rad.to_degrees(),
        azimuth_deg: az_rad.to_degrees().rem_euclid(360.0),
        elevation_deg: el_rad.to_degrees(),
    })
}

/// Computes the [PierceGeometry] from receiver and satellite ECEF coordinates (m).
pub fn pierce_point(
    rx_ecef: &Vector3<f64>,
    sv_ecef: &Vector3<f64>,
    shell: &ShellOpts,
) -> Option<PierceGeometry> {
    if sv_ecef.iter().any(|v| !v.is_finite()) {
        return None;
    }
    // receiver geodetic coordinates are only needed on intersection
    shell_intersection(rx_ecef, sv_ecef, shell.radius_m())?;
    pierce_point_from(&Position::from_ecef(*rx_ecef), sv_ecef, shell)
}

/// Vectorized [pierce_point_from]: one entry per satellite, in the same order.
pub fn pierce_points(
    rx: &Position,
    sv_ecef: &[Vector3<f64>],
    shell: &ShellOpts,
) -> Vec<Option<PierceGeometry>> {
    sv_ecef
        .iter()
        .map(|sv| pierce_point_from(rx, sv, shell))
        .collect()
}

/// Pierce points of a whole sky: each [SV] is positioned at [Epoch]
/// by the [OrbitSource]. Satellites that cannot be positioned
/// are reported with undefined geometry.
pub fn sky_pierce_points<O: OrbitSource>(
    orbits: &O,
    rx: &Position,
    svs: &[SV],
    t: Epoch,
    shell: &ShellOpts,
) -> BTreeMap<SV, Option<PierceGeometry>> {
    svs.iter()
        .map(|sv| {
            let geometry = orbits
                .position_ecef_m(t, *sv)
                .and_then(|sv_ecef| pierce_point_from(rx, &sv_ecef, shell));

            if geometry.is_none() {
                debug!("{}({}) - undefined pierce point", t, sv);
            }

            (*sv, geometry)
        })
        .collect()
}

/// Column oriented view of vectorized [PierceGeometry] results.
/// Undefined entries are NaN in every column.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PierceColumns {
    pub latitude_deg: Vec<f64>,
    pub longitude_deg: Vec<f64>,
    pub azimuth_deg: Vec<f64>,
    pub elevation_deg: Vec<f64>,
}

impl PierceColumns {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.latitude_deg.len()
    }

    /// True if no rows
    pub fn is_empty(&self) -> bool {
        self.latitude_deg.is_empty()
    }
}

impl FromIterator<Option<PierceGeometry>> for PierceColumns {
    fn from_iter<I: IntoIterator<Item = Option<PierceGeometry>>>(iter: I) -> Self {
        let (latitude_deg, longitude_deg, azimuth_deg, elevation_deg): (
            Vec<f64>,
            Vec<f64>,
            Vec<f64>,
            Vec<f64>,
        ) = iter
            .into_iter()
            .map(|geometry| match geometry {
                Some(g) => (g.latitude_deg, g.longitude_deg, g.azimuth_deg, g.elevation_deg),
                None => (f64::NAN, f64::NAN, f64::NAN, f64::NAN),
            })
            .multiunzip();

        Self {
            latitude_deg,
            longitude_deg,
            azimuth_deg,
            elevation_deg,
        }
    }
}
