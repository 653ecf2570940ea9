//! Kepler's equation
use std::f64::consts::TAU;

use crate::constants::ARCSEC_TO_RAD;

/// Wraps an angle (radians) into [0, 2π).
pub fn normalize_angle(angle_rad: f64) -> f64 {
    let wrapped = angle_rad.rem_euclid(TAU);
    // rem_euclid may round up to exactly 2π for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Solves Kepler's equation `E - e sin(E) = M` for the eccentric anomaly,
/// using fixed point iterations seeded with `E0 = M`.
///
/// ## Inputs
/// - e: numerical eccentricity, must lie in [0, 1).
///   This is not verified: iterations will not converge otherwise.
/// - m_k: mean anomaly (radians)
/// - tol_arcsec: convergence criteria on two consecutive iterations,
///   expressed in arcseconds
///
/// ## Returns
/// - eccentric anomaly (radians)
pub fn kepler(e: f64, m_k: f64, tol_arcsec: f64) -> f64 {
    let tol_rad = tol_arcsec * ARCSEC_TO_RAD;

    let mut e_k_prev = m_k;
    let mut e_k = m_k + e * e_k_prev.sin();

    while (e_k - e_k_prev).abs() > tol_rad {
        e_k_prev = e_k;
        e_k = m_k + e * e_k_prev.sin();
    }

    e_k
}
