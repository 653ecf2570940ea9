#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{constants::EARTH_MEAN_RADIUS_M, error::Error};

fn default_kepler_tolerance() -> f64 {
    0.001
}

fn default_rtol() -> f64 {
    1.0E-8
}

fn default_atol() -> f64 {
    1.0E-11
}

fn default_t_res() -> f64 {
    60.0
}

fn default_initial_step() -> f64 {
    10.0
}

fn default_max_step() -> f64 {
    300.0
}

fn default_max_steps() -> usize {
    100_000
}

fn default_shell_height() -> f64 {
    350.0E3
}

fn default_earth_radius() -> f64 {
    EARTH_MEAN_RADIUS_M
}

/// Adaptive Runge-Kutta integrator options, used by GLONASS propagation.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegratorOpts {
    /// Relative tolerance
    #[cfg_attr(feature = "serde", serde(default = "default_rtol"))]
    pub rtol: f64,
    /// Absolute tolerance
    #[cfg_attr(feature = "serde", serde(default = "default_atol"))]
    pub atol: f64,
    /// Output time resolution (s): states are sampled at this rate
    /// in the integration trace. Does not impact the final state accuracy.
    #[cfg_attr(feature = "serde", serde(default = "default_t_res"))]
    pub t_res_s: f64,
    /// First trial step (s)
    #[cfg_attr(feature = "serde", serde(default = "default_initial_step"))]
    pub initial_step_s: f64,
    /// Largest step the controller may take (s)
    #[cfg_attr(feature = "serde", serde(default = "default_max_step"))]
    pub max_step_s: f64,
    /// Step budget (accepted + rejected) for one integration
    #[cfg_attr(feature = "serde", serde(default = "default_max_steps"))]
    pub max_steps: usize,
}

impl Default for IntegratorOpts {
    fn default() -> Self {
        Self {
            rtol: default_rtol(),
            atol: default_atol(),
            t_res_s: default_t_res(),
            initial_step_s: default_initial_step(),
            max_step_s: default_max_step(),
            max_steps: default_max_steps(),
        }
    }
}

/// Thin ionospheric shell definition.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShellOpts {
    /// Mean height of the shell above the spherical Earth (m)
    #[cfg_attr(feature = "serde", serde(default = "default_shell_height"))]
    pub height_m: f64,
    /// Spherical Earth radius (m)
    #[cfg_attr(feature = "serde", serde(default = "default_earth_radius"))]
    pub earth_radius_m: f64,
}

impl Default for ShellOpts {
    fn default() -> Self {
        Self {
            height_m: default_shell_height(),
            earth_radius_m: default_earth_radius(),
        }
    }
}

impl ShellOpts {
    /// Shell radius, from Earth center (m)
    pub fn radius_m(&self) -> f64 {
        self.earth_radius_m + self.height_m
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Kepler solver convergence criteria, in arcseconds.
    #[cfg_attr(feature = "serde", serde(default = "default_kepler_tolerance"))]
    pub kepler_tolerance_arcsec: f64,
    /// GLONASS orbit integration
    #[cfg_attr(feature = "serde", serde(default))]
    pub integrator: IntegratorOpts,
    /// Ionospheric shell
    #[cfg_attr(feature = "serde", serde(default))]
    pub shell: ShellOpts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kepler_tolerance_arcsec: default_kepler_tolerance(),
            integrator: IntegratorOpts::default(),
            shell: ShellOpts::default(),
        }
    }
}

impl Config {
    /// Returns default [Config] with desired ionospheric shell height (m).
    pub fn with_shell_height(&self, height_m: f64) -> Self {
        let mut s = self.clone();
        s.shell.height_m = height_m;
        s
    }

    /// Returns [Config] with desired [IntegratorOpts].
    pub fn with_integrator(&self, integrator: IntegratorOpts) -> Self {
        let mut s = self.clone();
        s.integrator = integrator;
        s
    }

    /// Verifies this [Config] is physically meaningful.
    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("kepler_tolerance_arcsec", self.kepler_tolerance_arcsec),
            ("rtol", self.integrator.rtol),
            ("atol", self.integrator.atol),
            ("t_res_s", self.integrator.t_res_s),
            ("initial_step_s", self.integrator.initial_step_s),
            ("max_step_s", self.integrator.max_step_s),
            ("shell.height_m", self.shell.height_m),
            ("shell.earth_radius_m", self.shell.earth_radius_m),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be strictly positive (got {})",
                    name, value
                )));
            }
        }

        if self.integrator.max_steps == 0 {
            return Err(Error::InvalidConfig(
                "max_steps must be strictly positive".to_string(),
            ));
        }

        Ok(())
    }
}
