//! Root-finding strategies for the regime equations.
//!
//! Newton-Raphson on `f` (coupling constant fixed), bisection on `Re`
//! (friction factor fixed), and the legacy damped multiplicative search on
//! `Re` retained for behavior parity with the older head-velocity and
//! head-flow-rate entry points.

use crate::colebrook;
use crate::coupling::Coupling;
use crate::error::{SolveError, SolveResult};
use crate::regime::RE_TURBULENT_MIN;
use crate::roughness;

/// Newton-Raphson configuration.
#[derive(Debug, Clone, Copy)]
pub struct NewtonConfig {
    /// Starting friction factor
    pub f0: f64,
    /// Absolute tolerance on the step `|f_next - f|`
    pub tol: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            f0: 1e-2,
            tol: 1e-4,
            max_iterations: 50,
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone, Copy)]
pub struct NewtonOutcome {
    pub f: f64,
    pub iterations: usize,
}

/// Newton-Raphson on `f` for a single-variable residual.
///
/// The derivative is a forward finite difference. Converges quickly
/// because the Colebrook residual is smooth and monotonic in `f` over the
/// physically relevant range; fails if the iteration budget is exceeded or
/// `f` leaves the positive domain.
pub fn newton_on_f<R>(residual_of: R, config: &NewtonConfig) -> SolveResult<NewtonOutcome>
where
    R: Fn(f64) -> SolveResult<f64>,
{
    let mut f = config.f0;
    for iter in 0..config.max_iterations {
        let r = residual_of(f)?;
        let df = 1e-6 * f.abs().max(1e-4);
        let slope = (residual_of(f + df)? - r) / df;
        if slope == 0.0 || !slope.is_finite() {
            return Err(SolveError::ConvergenceFailed {
                what: format!("degenerate residual slope at iteration {iter}"),
            });
        }
        let f_next = f - r / slope;
        if f_next <= 0.0 {
            return Err(SolveError::ConvergenceFailed {
                what: format!("friction factor left the positive domain at iteration {iter}"),
            });
        }
        if (f_next - f).abs() < config.tol {
            return Ok(NewtonOutcome {
                f: f_next,
                iterations: iter + 1,
            });
        }
        f = f_next;
    }
    Err(SolveError::ConvergenceFailed {
        what: format!("maximum iterations {} reached", config.max_iterations),
    })
}

/// Bisection configuration.
#[derive(Debug, Clone, Copy)]
pub struct BisectConfig {
    /// Lower end of the `Re` bracket
    pub re_lo: f64,
    /// Upper end of the `Re` bracket
    pub re_hi: f64,
    /// Relative tolerance on the bracket width
    pub rel_tol: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for BisectConfig {
    fn default() -> Self {
        Self {
            re_lo: 1e3,
            re_hi: 1e8,
            rel_tol: 1e-4,
            max_iterations: 100,
        }
    }
}

/// Bisection on `Re` with a fixed friction factor.
///
/// Returns `NoBracket` when the endpoints do not straddle a root, which
/// happens when `f` is below the fully rough floor (no turbulent root
/// exists at that roughness) or above the curve near the transition.
pub fn bisect_re<R>(residual_of: R, config: &BisectConfig) -> SolveResult<f64>
where
    R: Fn(f64) -> SolveResult<f64>,
{
    let (mut lo, mut hi) = (config.re_lo, config.re_hi);
    let mut r_lo = residual_of(lo)?;
    let r_hi = residual_of(hi)?;

    if r_lo == 0.0 {
        return Ok(lo);
    }
    if r_hi == 0.0 {
        return Ok(hi);
    }
    if r_lo.signum() == r_hi.signum() {
        return Err(SolveError::NoBracket { lo, hi });
    }

    for _ in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        if (hi - lo) <= config.rel_tol * mid {
            return Ok(mid);
        }
        let r_mid = residual_of(mid)?;
        if r_mid.signum() == r_lo.signum() {
            lo = mid;
            r_lo = r_mid;
        } else {
            hi = mid;
        }
    }
    Err(SolveError::ConvergenceFailed {
        what: format!(
            "bisection exhausted {} iterations without closing the bracket",
            config.max_iterations
        ),
    })
}

/// Legacy damped-search configuration.
#[derive(Debug, Clone, Copy)]
pub struct DampedConfig {
    /// Starting Reynolds number
    pub re0: f64,
    /// Multiplicative step fraction
    pub step: f64,
    /// Relative mismatch tolerance `|f - f_target| / f`
    pub rel_tol: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for DampedConfig {
    fn default() -> Self {
        Self {
            re0: 1e4,
            step: 0.02,
            rel_tol: 5e-3,
            max_iterations: 2000,
        }
    }
}

/// Outcome of the legacy damped multiplicative search.
#[derive(Debug, Clone, Copy)]
pub enum DampedOutcome {
    /// Turbulent root found.
    Converged { re: f64, f: f64, iterations: usize },
    /// `Re` crossed below the turbulent bound; the caller must fall back
    /// to the closed-form laminar solution.
    LaminarFallback { iterations: usize },
}

/// Legacy damped multiplicative search on `Re`.
///
/// At each candidate `Re` the turbulent friction factor is re-solved from
/// the Colebrook correlation (a nested Newton solve at fixed `Re`) and
/// compared against the coupling target `f_of_re(Re)`; `Re` then moves by
/// a fixed fraction toward agreement. The roughness is re-derived from
/// `eps_at(Re)` each step, which lets absolute-roughness callers track the
/// diameter as it changes with `Re`. Numerically cruder than Newton on
/// `f`; kept for parity with historical outputs.
pub fn damped_search<E>(
    coupling: &Coupling,
    eps_at: E,
    newton: &NewtonConfig,
    config: &DampedConfig,
) -> SolveResult<DampedOutcome>
where
    E: Fn(f64) -> f64,
{
    let mut re = config.re0;
    for iter in 0..config.max_iterations {
        let eps = roughness::clamp(eps_at(re)).eps;
        let f = newton_on_f(|f| colebrook::residual(f, re, eps), newton)?.f;
        let f_target = coupling.f_of_re(re);

        if (f - f_target).abs() / f < config.rel_tol {
            return Ok(DampedOutcome::Converged {
                re,
                f,
                iterations: iter,
            });
        }

        // The Colebrook factor falls with Re; step toward the crossing
        // with the coupling target depending on which side we are on.
        let widen = if coupling.target_falls_with_re() {
            f < f_target
        } else {
            f > f_target
        };
        re = if widen {
            re * (1.0 + config.step)
        } else {
            re * (1.0 - config.step)
        };

        if re < RE_TURBULENT_MIN {
            return Ok(DampedOutcome::LaminarFallback { iterations: iter });
        }
    }
    Err(SolveError::ConvergenceFailed {
        what: format!(
            "damped search exhausted {} iterations",
            config.max_iterations
        ),
    })
}
