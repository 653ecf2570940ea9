use log::{debug, error};
use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::{BEIDOU_GEO_TILT_RAD, WEEK_SECONDS},
    ephemeris::KeplerianEphemeris,
    error::Error,
    kepler::{kepler, normalize_angle},
    orbit::{OrbitState, PropagationTrace},
    prelude::Epoch,
};

/// Intermediate quantities of the Keplerian propagation.
/// All angles are expressed in radians, wrapped to [0, 2π) where applicable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeplerianTrace {
    /// Elapsed time since ToE (s), week wrapped
    pub t_k: f64,
    /// Mean anomaly
    pub m_k: f64,
    /// Eccentric anomaly
    pub e_k: f64,
    /// True anomaly
    pub v_k: f64,
    /// Corrected argument of latitude
    pub u_k: f64,
    /// Corrected radius (m)
    pub r_k: f64,
    /// Corrected inclination
    pub i_k: f64,
    /// Corrected longitude of ascending node
    pub omega_k: f64,
    /// True when the BeiDou GEO rotation was applied
    pub beidou_geo: bool,
}

impl KeplerianTrace {
    /// Returns `[tk, Mk, Ek, vk, uk, rk, ik, Ωk]`
    pub fn to_array(&self) -> [f64; 8] {
        [
            self.t_k,
            self.m_k,
            self.e_k,
            self.v_k,
            self.u_k,
            self.r_k,
            self.i_k,
            self.omega_k,
        ]
    }
}

/// Rotates the position obtained from BeiDou GEO elements
/// (expressed in the user defined inertial frame) into BDCS:
/// rotation about Z by `we·tk`, combined with the fixed -5° tilt about X.
pub fn beidou_geo_correction(position: Vector3<f64>, we: f64, t_k: f64) -> Vector3<f64> {
    let rot_x = Rotation3::from_axis_angle(&Vector3::x_axis(), -BEIDOU_GEO_TILT_RAD);
    let rot_z = Rotation3::from_axis_angle(&Vector3::z_axis(), -we * t_k);
    rot_z * rot_x * position
}

impl KeplerianEphemeris {
    /// Elapsed time between ToE and this [Epoch], in seconds.
    /// One week is added when the [Epoch] precedes ToE.
    pub fn elapsed_seconds(&self, t: Epoch) -> f64 {
        let t_k = (t - self.toe).to_seconds();
        if t_k < 0.0 {
            t_k + WEEK_SECONDS
        } else {
            t_k
        }
    }

    /// Resolves Kepler equations at this [Epoch] and returns the ECEF [OrbitState].
    /// `tol_arcsec` is the Kepler solver convergence criteria.
    pub fn resolve_state(&self, t: Epoch, tol_arcsec: f64) -> Result<OrbitState, Error> {
        let constants = self.system.constants();
        let (gm, we) = (constants.gm, constants.we);

        let e = self.eccentricity;
        if !(0.0..1.0).contains(&e) {
            error!("{}({}) - invalid eccentricity {}", t, self.sv, e);
            return Err(Error::computation(
                self.sv,
                format!("eccentricity {} out of [0, 1)", e),
            ));
        }

        let a = self.semi_major_axis_m();
        if a == 0.0 || !a.is_finite() {
            return Err(Error::computation(self.sv, "invalid semi-major axis"));
        }

        let (cus, cuc) = self.cus_cuc_rad;
        let (cis, cic) = self.cis_cic_rad;
        let (crs, crc) = self.crs_crc_m;
        let (i0, idot) = (self.i0_rad, self.idot_rad_s);
        let (omega0, omega, omega_dot) = (self.omega0_rad, self.omega_rad, self.omega_dot_rad_s);

        let t_k = self.elapsed_seconds(t);

        let n0 = (gm / a.powi(3)).sqrt();
        let n = n0 + self.dn_rad_s;
        let m_k = normalize_angle(self.m0_rad + n * t_k);

        let e_k = normalize_angle(kepler(e, m_k, tol_arcsec));
        let (sin_e_k, cos_e_k) = e_k.sin_cos();

        let v_k = normalize_angle(((1.0 - e.powi(2)).sqrt() * sin_e_k).atan2(cos_e_k - e));

        let phi_k = normalize_angle(v_k + omega);
        let (sin_2phi, cos_2phi) = (2.0 * phi_k).sin_cos();

        let u_k = normalize_angle(phi_k + cuc * cos_2phi + cus * sin_2phi);
        let r_k = a * (1.0 - e * cos_e_k) + crc * cos_2phi + crs * sin_2phi;
        let i_k = i0 + idot * t_k + cic * cos_2phi + cis * sin_2phi;

        let omega_k = normalize_angle(omega0 + (omega_dot - we) * t_k - we * self.toe_unix_s);

        let orbital = Vector3::new(r_k * u_k.cos(), r_k * u_k.sin(), 0.0);

        // orbital plane to ECEF
        let rot_x = Rotation3::from_axis_angle(&Vector3::x_axis(), i_k);
        let rot_z = Rotation3::from_axis_angle(&Vector3::z_axis(), omega_k);
        let mut position_ecef_m = rot_z * rot_x * orbital;

        let beidou_geo = self.is_beidou_geo();
        if beidou_geo {
            position_ecef_m = beidou_geo_correction(position_ecef_m, we, t_k);
        }

        if position_ecef_m.iter().any(|v| !v.is_finite()) {
            error!("{}({}) - non finite kepler solution", t, self.sv);
            return Err(Error::computation(self.sv, "non finite position"));
        }

        debug!(
            "{}({}) - kepler solving x={:.3}m y={:.3}m z={:.3}m t_k={} geo={}",
            t, self.sv, position_ecef_m[0], position_ecef_m[1], position_ecef_m[2], t_k, beidou_geo
        );

        Ok(OrbitState {
            sv: self.sv,
            epoch: t,
            position_ecef_m,
            trace: PropagationTrace::Keplerian(KeplerianTrace {
                t_k,
                m_k,
                e_k,
                v_k,
                u_k,
                r_k,
                i_k,
                omega_k,
                beidou_geo,
            }),
        })
    }
}

#[cfg(test)]
mod test {
    use super::beidou_geo_correction;
    use crate::constants::EARTH_ANGULAR_VEL_RAD;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    #[test]
    fn geo_correction_quarter_turn() {
        let we = EARTH_ANGULAR_VEL_RAD;
        let t_k = PI / 2.0 / we;
        let rotated = beidou_geo_correction(Vector3::new(1.0, 0.0, 0.0), we, t_k);
        let expected = Vector3::new(0.0, -1.0, 0.0);
        assert!((rotated - expected).norm() < 1.0E-6, "{}", rotated);
    }

    #[test]
    fn geo_correction_preserves_norm() {
        let position = Vector3::new(-3.0E7, 2.5E7, 1.2E6);
        let rotated = beidou_geo_correction(position, EARTH_ANGULAR_VEL_RAD, 12_345.0);
        assert!((rotated.norm() - position.norm()).abs() < 1.0E-6);
    }
}
