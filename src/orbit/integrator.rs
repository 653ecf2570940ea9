//! Dormand-Prince 5(4) embedded Runge-Kutta integrator
use nalgebra::Vector6;

use crate::cfg::IntegratorOpts;

const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;

const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;

const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;

const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;

const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th order weights (also last stage coefficients: FSAL)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// 5th minus 4th order weights
const E1: f64 = -71.0 / 57600.0;
const E3: f64 = 71.0 / 16695.0;
const E4: f64 = -71.0 / 1920.0;
const E5: f64 = 17253.0 / 339200.0;
const E6: f64 = -22.0 / 525.0;
const E7: f64 = 1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Integration output, sampled on the output grid
/// (regularly spaced, from 0 to the final instant, both included).
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Output instants (s), relative to the initial state
    pub t: Vec<f64>,
    /// States at each output instant
    pub y: Vec<Vector6<f64>>,
    /// Number of accepted steps
    pub accepted_steps: usize,
    /// Number of rejected steps
    pub rejected_steps: usize,
    /// Number of derivative evaluations
    pub evaluations: usize,
}

impl Solution {
    /// Final (last) integrated state
    pub fn final_state(&self) -> Option<&Vector6<f64>> {
        self.y.last()
    }

    /// Final (last) integration instant (s)
    pub fn final_time(&self) -> Option<f64> {
        self.t.last().copied()
    }
}

struct Step {
    y: Vector6<f64>,
    k7: Vector6<f64>,
    error: Vector6<f64>,
}

fn dormand_prince_step<F>(f: &F, t: f64, y: &Vector6<f64>, k1: &Vector6<f64>, h: f64) -> Step
where
    F: Fn(f64, &Vector6<f64>) -> Vector6<f64>,
{
    let k2 = f(t + C2 * h, &(y + h * A21 * k1));
    let k3 = f(t + C3 * h, &(y + h * (A31 * k1 + A32 * k2)));
    let k4 = f(t + C4 * h, &(y + h * (A41 * k1 + A42 * k2 + A43 * k3)));
    let k5 = f(
        t + C5 * h,
        &(y + h * (A51 * k1 + A52 * k2 + A53 * k3 + A54 * k4)),
    );
    let k6 = f(
        t + h,
        &(y + h * (A61 * k1 + A62 * k2 + A63 * k3 + A64 * k4 + A65 * k5)),
    );

    let y_new = y + h * (B1 * k1 + B3 * k3 + B4 * k4 + B5 * k5 + B6 * k6);
    let k7 = f(t + h, &y_new);

    let error = h * (E1 * k1 + E3 * k3 + E4 * k4 + E5 * k5 + E6 * k6 + E7 * k7);

    Step {
        y: y_new,
        k7,
        error,
    }
}

/// RMS of the error, scaled by the mixed absolute/relative tolerance.
fn error_norm(
    error: &Vector6<f64>,
    y: &Vector6<f64>,
    y_new: &Vector6<f64>,
    opts: &IntegratorOpts,
) -> f64 {
    let sum = (0..6)
        .map(|i| {
            let scale = opts.atol + opts.rtol * y[i].abs().max(y_new[i].abs());
            (error[i] / scale).powi(2)
        })
        .sum::<f64>();
    (sum / 6.0).sqrt()
}

fn step_factor(err: f64) -> f64 {
    if err == 0.0 {
        MAX_FACTOR
    } else {
        (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
    }
}

/// Output instants: regularly spaced from 0 to `t_end`,
/// at most `t_res` apart (at least the two end points).
/// Instants are produced on demand, the step budget bounds how many are consumed.
fn output_grid(t_end: f64, t_res: f64) -> impl Iterator<Item = f64> {
    let n = ((t_end.abs() / t_res).floor() as u64).saturating_add(1).max(2);
    let dt = t_end / (n - 1) as f64;
    (0..n).map(move |i| if i == n - 1 { t_end } else { i as f64 * dt })
}

/// Integrates `dy/dt = f(t, y)` from `t=0` to `t_end` (which may be negative),
/// starting from `y0`. Steps are adapted so the local error remains within
/// tolerances, and truncated to land exactly on the output grid.
pub(crate) fn integrate<F>(
    f: F,
    y0: Vector6<f64>,
    t_end: f64,
    opts: &IntegratorOpts,
) -> Result<Solution, String>
where
    F: Fn(f64, &Vector6<f64>) -> Vector6<f64>,
{
    let mut solution = Solution {
        t: vec![0.0],
        y: vec![y0],
        accepted_steps: 0,
        rejected_steps: 0,
        evaluations: 0,
    };

    if !t_end.is_finite() {
        return Err(format!("invalid integration span {}", t_end));
    }

    if t_end == 0.0 {
        return Ok(solution);
    }

    // each step covers at most `max_step_s`
    if (t_end.abs() / opts.max_step_s).ceil() > opts.max_steps as f64 {
        return Err(format!(
            "step budget ({}) too small for a {}s span",
            opts.max_steps, t_end
        ));
    }

    let direction = t_end.signum();
    let grid = output_grid(t_end, opts.t_res_s);

    let mut t = 0.0_f64;
    let mut y = y0;
    let mut k1 = f(t, &y);
    solution.evaluations += 1;

    let mut h = opts.initial_step_s.min(opts.max_step_s);
    let mut steps = 0;

    for t_out in grid.skip(1) {
        while (t_out - t) * direction > 0.0 {
            if steps == opts.max_steps {
                return Err(format!(
                    "step budget ({}) exhausted at t={}s",
                    opts.max_steps, t
                ));
            }
            steps += 1;

            let remaining = (t_out - t).abs();
            let landing = h >= remaining;
            let h_try = if landing { remaining } else { h };

            if h_try < 16.0 * f64::EPSILON * t.abs().max(1.0) {
                return Err(format!("step size underflow at t={}s", t));
            }

            let step = dormand_prince_step(&f, t, &y, &k1, direction * h_try);
            solution.evaluations += 6;

            let err = error_norm(&step.error, &y, &step.y, opts);
            if !err.is_finite() {
                return Err(format!("non finite state at t={}s", t));
            }

            if err <= 1.0 {
                t = if landing {
                    t_out
                } else {
                    t + direction * h_try
                };
                y = step.y;
                k1 = step.k7;
                solution.accepted_steps += 1;
                h = (h_try * step_factor(err)).min(opts.max_step_s);
            } else {
                solution.rejected_steps += 1;
                h = h_try * step_factor(err);
            }
        }

        solution.t.push(t_out);
        solution.y.push(y);
    }

    Ok(solution)
}
