use log::{debug, error};
use nalgebra::{Rotation3, Vector3, Vector6};

use crate::{
    cfg::IntegratorOpts,
    constants::PhysicalConstants,
    ephemeris::GlonassEphemeris,
    error::Error,
    orbit::{integrate, OrbitState, PropagationTrace, Solution},
    prelude::{Duration, Epoch},
    system::GnssSystem,
    time::{gmst_at_midnight_rad, utc_time_of_day_seconds},
};

/// GLONASS propagation trace
#[derive(Debug, Clone, PartialEq)]
pub struct GlonassTrace {
    /// Reference [Epoch] of the broadcast state vector
    pub reference: Epoch,
    /// Target [Epoch]
    pub target: Epoch,
    /// Signed integration span (s)
    pub integration_time_s: f64,
    /// Earth-fixed to inertial rotation angle at reference epoch (rad)
    pub theta_ge_rad: f64,
    /// Initial inertial state (m, m/s)
    pub initial_state: Vector6<f64>,
    /// Inertial to Earth-fixed rotation used to express the final state
    pub rotation: Rotation3<f64>,
    /// Integrator output
    pub solution: Solution,
}

/// Equations of motion in the inertial frame: central body,
/// second zonal harmonic and the broadcast lunisolar acceleration.
/// `lunisolar` must already be rotated into the inertial frame (at the reference epoch).
fn derivatives(
    state: &Vector6<f64>,
    constants: &PhysicalConstants,
    lunisolar: &Vector3<f64>,
) -> Vector6<f64> {
    let (x, y, z) = (state[0], state[1], state[2]);
    let r2 = x.powi(2) + y.powi(2) + z.powi(2);
    let r = r2.sqrt();

    let gm = constants.gm;
    let mu_r3 = gm / (r2 * r);

    let c20 = constants.c20.unwrap_or(0.0);
    let j2 = 1.5 * c20 * gm * constants.a.powi(2) / r2.powi(2) / r;
    let z2_r2 = 5.0 * z.powi(2) / r2;

    let ax = -mu_r3 * x + j2 * x * (1.0 - z2_r2) + lunisolar[0];
    let ay = -mu_r3 * y + j2 * y * (1.0 - z2_r2) + lunisolar[1];
    let az = -mu_r3 * z + j2 * z * (3.0 - z2_r2) + lunisolar[2];

    Vector6::new(state[3], state[4], state[5], ax, ay, az)
}

impl GlonassEphemeris {
    /// Integrates the equations of motion from the reference epoch
    /// to the target [Epoch] and returns the ECEF [OrbitState].
    pub fn resolve_state(&self, target: Epoch, opts: &IntegratorOpts) -> Result<OrbitState, Error> {
        let delta_s = (target - self.reference).to_seconds();
        self.integrate(target, delta_s, opts)
    }

    /// Integrates the equations of motion for `delta_s` seconds (possibly negative)
    /// from the reference epoch and returns the ECEF [OrbitState].
    pub fn resolve_state_by(&self, delta_s: f64, opts: &IntegratorOpts) -> Result<OrbitState, Error> {
        if !delta_s.is_finite() {
            return Err(Error::computation(self.sv, "non finite time offset"));
        }
        let target = self.reference + Duration::from_seconds(delta_s);
        self.integrate(target, delta_s, opts)
    }

    fn integrate(
        &self,
        target: Epoch,
        delta_s: f64,
        opts: &IntegratorOpts,
    ) -> Result<OrbitState, Error> {
        let constants = GnssSystem::Glonass.constants();
        let we = constants.we;

        let position = self.position_m();
        let velocity = self.velocity_m_s();

        if position.norm() == 0.0 {
            return Err(Error::computation(self.sv, "null position vector"));
        }

        let theta_ge =
            gmst_at_midnight_rad(self.reference) + we * utc_time_of_day_seconds(self.reference);

        // Earth-fixed to inertial
        let to_inertial = Rotation3::from_axis_angle(&Vector3::z_axis(), theta_ge);

        let r_a = to_inertial * position;
        let v_a = to_inertial * velocity + we * Vector3::new(-r_a[1], r_a[0], 0.0);
        let lunisolar = to_inertial * self.acceleration_m_s2();

        let initial_state = Vector6::new(r_a[0], r_a[1], r_a[2], v_a[0], v_a[1], v_a[2]);

        let solution = integrate(
            |_, state| derivatives(state, constants, &lunisolar),
            initial_state,
            delta_s,
            opts,
        )
        .map_err(|cause| {
            error!("{}({}) - integration failure: {}", target, self.sv, cause);
            Error::IntegrationFailure { sv: self.sv, cause }
        })?;

        let final_state = solution
            .final_state()
            .ok_or_else(|| Error::IntegrationFailure {
                sv: self.sv,
                cause: "empty solution".to_string(),
            })?;

        // inertial to Earth-fixed, at the final instant
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), -(theta_ge + we * delta_s));
        let position_ecef_m = rotation * Vector3::new(final_state[0], final_state[1], final_state[2]);

        if position_ecef_m.iter().any(|v| !v.is_finite()) {
            return Err(Error::computation(self.sv, "non finite position"));
        }

        debug!(
            "{}({}) - integrated {}s ({} steps, {} rejected): x={:.3}m y={:.3}m z={:.3}m",
            target,
            self.sv,
            delta_s,
            solution.accepted_steps,
            solution.rejected_steps,
            position_ecef_m[0],
            position_ecef_m[1],
            position_ecef_m[2],
        );

        Ok(OrbitState {
            sv: self.sv,
            epoch: target,
            position_ecef_m,
            trace: PropagationTrace::Glonass(Box::new(GlonassTrace {
                reference: self.reference,
                target,
                integration_time_s: delta_s,
                theta_ge_rad: theta_ge,
                initial_state,
                rotation,
                solution,
            })),
        })
    }
}

#[cfg(test)]
mod test {
    use super::derivatives;
    use crate::constants::GLONASS;
    use nalgebra::{Vector3, Vector6};

    #[test]
    fn central_acceleration() {
        let r = 25_500.0E3;
        let state = Vector6::new(r, 0.0, 0.0, 0.0, 3950.0, 0.0);
        let dy = derivatives(&state, &GLONASS, &Vector3::zeros());

        assert_eq!(dy[1], 3950.0);
        // point mass dominates, oblateness adds a small inward term in the equatorial plane
        let point_mass = GLONASS.gm / r.powi(2);
        assert!(dy[3] < -point_mass);
        assert!((dy[3] + point_mass).abs() < 1.0E-3 * point_mass);
        assert_eq!(dy[4], 0.0);
        assert_eq!(dy[5], 0.0);
    }
}
