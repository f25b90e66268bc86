//! High-level solver interface.
//!
//! The forward direction takes a coupling constant and roughness and
//! returns the admissible `(Re, f)` solution(s); the inverse direction
//! solves `Re -> f` at fixed `Re` and `f -> Re` at fixed `f`. All entry
//! points are pure and bounded; the only side effect is the advisory
//! channel (tracing) for roughness clamping and transitional-zone hits.

use crate::colebrook::{self, laminar_f, LAMINAR_COEFF};
use crate::coupling::Coupling;
use crate::error::{SolveError, SolveResult};
use crate::regime::{self, FlowSolution, Regime, Solutions, RE_TURBULENT_MIN};
use crate::roots::{
    bisect_re, damped_search, newton_on_f, BisectConfig, DampedConfig, DampedOutcome,
    NewtonConfig,
};
use crate::roughness;

/// Per-call solver options.
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Consider the laminar candidate. Disabling removes it
    /// unconditionally (the caller already knows the regime).
    pub check_laminar: bool,
    /// Consider the turbulent candidate.
    pub check_turbulent: bool,
    /// Emit an advisory when the roughness is clamped.
    pub roughness_clamp_notify: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            check_laminar: true,
            check_turbulent: true,
            roughness_clamp_notify: true,
        }
    }
}

fn apply_roughness(eps: f64, options: &SolveOptions) -> f64 {
    let clamped = roughness::clamp(eps);
    if clamped.reassigned && options.roughness_clamp_notify {
        tracing::warn!(
            requested = eps,
            reassigned = clamped.eps,
            "relative roughness above the valid domain; clamped"
        );
    }
    clamped.eps
}

fn laminar_candidate(coupling: &Coupling) -> FlowSolution {
    let re = coupling.laminar_re();
    FlowSolution {
        re,
        f: laminar_f(re),
        regime: Regime::Laminar,
    }
}

fn turbulent_candidate(coupling: &Coupling, eps: f64) -> SolveResult<FlowSolution> {
    // Reparameterize the residual as a function of f alone, holding the
    // coupling constant fixed.
    let outcome = newton_on_f(
        |f| colebrook::residual(f, coupling.re_of_f(f), eps),
        &NewtonConfig::default(),
    )?;
    Ok(FlowSolution {
        re: coupling.re_of_f(outcome.f),
        f: outcome.f,
        regime: Regime::Turbulent,
    })
}

/// Solve for the admissible `(Re, f)` pair(s) given a coupling constant
/// and relative roughness.
///
/// The laminar candidate comes from the closed form; the turbulent
/// candidate from Newton-Raphson on the reparameterized Colebrook
/// residual. Both, one, or neither may be admissible; neither is
/// `NoSolution`.
pub fn solve_from_coupling(
    coupling: &Coupling,
    eps: f64,
    options: &SolveOptions,
) -> SolveResult<Solutions> {
    let eps = apply_roughness(eps, options);

    let laminar = options.check_laminar.then(|| laminar_candidate(coupling));
    let turbulent = if options.check_turbulent {
        Some(turbulent_candidate(coupling, eps)?)
    } else {
        None
    };

    regime::select(laminar, turbulent)
}

/// Solve with the legacy damped multiplicative search.
///
/// Kept for behavior parity with the historical head-velocity and
/// head-flow-rate entry points. `eps_at` supplies the relative roughness
/// at each candidate `Re` (constant for relative-roughness callers; a
/// diameter-tracking closure for absolute-roughness callers). If the
/// search drops below the turbulent bound the closed-form laminar
/// solution is returned directly, preserving the historical fallback
/// policy.
pub fn solve_from_coupling_legacy<E>(
    coupling: &Coupling,
    eps_at: E,
    options: &SolveOptions,
) -> SolveResult<Solutions>
where
    E: Fn(f64) -> f64,
{
    // Advisory once, at the starting candidate.
    let _ = apply_roughness(eps_at(DampedConfig::default().re0), options);

    match damped_search(
        coupling,
        eps_at,
        &NewtonConfig::default(),
        &DampedConfig::default(),
    )? {
        DampedOutcome::Converged { re, f, iterations } => {
            tracing::debug!(re, f, iterations, "legacy damped search converged");
            regime::select(None, Some(FlowSolution {
                re,
                f,
                regime: Regime::Turbulent,
            }))
        }
        DampedOutcome::LaminarFallback { iterations } => {
            tracing::debug!(iterations, "legacy search abandoned; laminar fallback");
            Ok(Solutions::One(laminar_candidate(coupling)))
        }
    }
}

/// Friction factor at a known Reynolds number: laminar closed form below
/// the turbulent bound, Colebrook (Newton at fixed `Re`) above it.
pub fn re_to_f(re: f64, eps: f64) -> SolveResult<f64> {
    if !re.is_finite() || re <= 0.0 {
        return Err(SolveError::Domain {
            what: "Reynolds number must be positive",
        });
    }
    let eps = roughness::clamp(eps).eps;
    if re < RE_TURBULENT_MIN {
        return Ok(laminar_f(re));
    }
    let outcome = newton_on_f(
        |f| colebrook::residual(f, re, eps),
        &NewtonConfig::default(),
    )?;
    Ok(outcome.f)
}

/// Reynolds number(s) at a known friction factor.
///
/// The laminar candidate is `64/f`; the turbulent candidate comes from
/// bisection on `Re`. A missing bracket means `f` is outside the
/// turbulent range at that roughness and only the laminar candidate
/// remains.
pub fn f_to_re(f: f64, eps: f64) -> SolveResult<Solutions> {
    if !f.is_finite() || f <= 0.0 {
        return Err(SolveError::Domain {
            what: "friction factor must be positive",
        });
    }
    let eps = roughness::clamp(eps).eps;

    let laminar = Some(FlowSolution {
        re: LAMINAR_COEFF / f,
        f,
        regime: Regime::Laminar,
    });

    let turbulent = match bisect_re(
        |re| colebrook::residual(f, re, eps),
        &BisectConfig::default(),
    ) {
        Ok(re) => Some(FlowSolution {
            re,
            f,
            regime: Regime::Turbulent,
        }),
        Err(SolveError::NoBracket { .. }) => None,
        Err(e) => return Err(e),
    };

    regime::select(laminar, turbulent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 0.001;

    #[test]
    fn forward_dual_zone_returns_both() {
        // Laminar candidate at Re = 2000, turbulent root near 2825.
        let coupling = Coupling::Velocity { m: 1.6e-5 };
        match solve_from_coupling(&coupling, EPS, &SolveOptions::default()).unwrap() {
            Solutions::Both { turbulent, laminar } => {
                assert!((turbulent.re - 2825.16).abs() / 2825.16 < 1e-3);
                assert!((turbulent.f - 0.0452026).abs() / 0.0452026 < 1e-3);
                assert!((laminar.re - 2000.0).abs() < 1e-9);
                assert!((laminar.f - 0.032).abs() < 1e-12);
            }
            other => panic!("expected both regimes, got {other:?}"),
        }
    }

    #[test]
    fn forward_laminar_only() {
        // Newton lands below the turbulent bound; only laminar survives.
        let coupling = Coupling::Velocity { m: 6.4e-5 };
        match solve_from_coupling(&coupling, EPS, &SolveOptions::default()).unwrap() {
            Solutions::One(s) => {
                assert_eq!(s.regime, Regime::Laminar);
                assert!((s.re - 1000.0).abs() < 1e-9);
                assert!((s.f - 0.064).abs() < 1e-12);
            }
            other => panic!("expected laminar only, got {other:?}"),
        }
    }

    #[test]
    fn forward_turbulent_only_just_above_boundary() {
        // Laminar candidate at Re = 2350: inadmissible under the
        // half-open convention; the turbulent root near 3628 remains.
        let coupling = Coupling::Velocity {
            m: 64.0 / (2350.0 * 2350.0),
        };
        match solve_from_coupling(&coupling, EPS, &SolveOptions::default()).unwrap() {
            Solutions::One(s) => {
                assert_eq!(s.regime, Regime::Turbulent);
                assert!((s.re - 3628.14).abs() / 3628.14 < 1e-3);
                assert!((s.f - 0.0420463).abs() / 0.0420463 < 1e-3);
            }
            other => panic!("expected turbulent only, got {other:?}"),
        }
    }

    #[test]
    fn disabled_turbulent_check_yields_no_solution() {
        // Laminar candidate above the bound with the turbulent branch
        // disabled: inconsistent inputs, no partial output.
        let coupling = Coupling::Velocity { m: 1.2e-5 };
        let options = SolveOptions {
            check_turbulent: false,
            ..SolveOptions::default()
        };
        let err = solve_from_coupling(&coupling, EPS, &options).unwrap_err();
        assert!(matches!(err, SolveError::NoSolution { .. }));
    }

    #[test]
    fn disabled_laminar_check_removes_candidate() {
        let coupling = Coupling::Velocity { m: 1.6e-5 };
        let options = SolveOptions {
            check_laminar: false,
            ..SolveOptions::default()
        };
        match solve_from_coupling(&coupling, EPS, &options).unwrap() {
            Solutions::One(s) => assert_eq!(s.regime, Regime::Turbulent),
            other => panic!("expected turbulent only, got {other:?}"),
        }
    }

    #[test]
    fn roughness_above_domain_is_clamped_not_fatal() {
        let coupling = Coupling::Velocity { m: 1.6e-5 };
        // eps = 0.2 clamps to 0.05; still solves.
        let sols = solve_from_coupling(&coupling, 0.2, &SolveOptions::default()).unwrap();
        let primary = sols.primary();
        assert_eq!(primary.regime, Regime::Turbulent);
        // Solution satisfies the residual at the clamped roughness.
        let r = colebrook::residual(primary.f, primary.re, roughness::EPS_MAX).unwrap();
        assert!(r.abs() < 1e-2);
    }

    #[test]
    fn re_to_f_laminar_and_turbulent() {
        assert!((re_to_f(1000.0, EPS).unwrap() - 0.064).abs() < 1e-12);
        let f = re_to_f(1e5, 1e-4).unwrap();
        assert!((f - 0.0185139).abs() / 0.0185139 < 1e-3);
        let f_smooth = re_to_f(1e4, 0.0).unwrap();
        assert!((f_smooth - 0.0308830).abs() / 0.0308830 < 1e-3);
    }

    #[test]
    fn f_to_re_dual_zone() {
        // f = 0.03: laminar candidate 2133, turbulent root 14101.6.
        match f_to_re(0.03, EPS).unwrap() {
            Solutions::Both { turbulent, laminar } => {
                assert!((turbulent.re - 14101.6).abs() / 14101.6 < 1e-3);
                assert!((laminar.re - 64.0 / 0.03).abs() < 1e-9);
            }
            other => panic!("expected both regimes, got {other:?}"),
        }
    }

    #[test]
    fn f_to_re_laminar_only_when_no_bracket() {
        // f = 0.064 sits above the turbulent curve everywhere in the
        // bracket; laminar candidate Re = 1000 survives alone.
        match f_to_re(0.064, EPS).unwrap() {
            Solutions::One(s) => {
                assert_eq!(s.regime, Regime::Laminar);
                assert!((s.re - 1000.0).abs() < 1e-9);
            }
            other => panic!("expected laminar only, got {other:?}"),
        }
    }

    #[test]
    fn f_to_re_no_solution() {
        // f below the fully rough floor at eps = 0.05 has no turbulent
        // root, and the laminar candidate Re = 3200 is inadmissible.
        let err = f_to_re(0.02, 0.05).unwrap_err();
        assert!(matches!(err, SolveError::NoSolution { .. }));
    }

    #[test]
    fn round_trip_through_both_directions() {
        // (Re0, f0) on the Colebrook curve at eps = 0.002.
        let re0 = 5e4;
        let f0 = re_to_f(re0, 0.002).unwrap();
        let back = f_to_re(f0, 0.002).unwrap();
        let turb = back
            .iter()
            .find(|s| s.regime == Regime::Turbulent)
            .expect("turbulent root must exist");
        assert!((turb.re - re0).abs() / re0 < 1e-3);

        // Forward direction with the coupling constant implied by
        // (Re0, f0) recovers f0.
        let coupling = Coupling::Velocity { m: f0 / re0 };
        let sols = solve_from_coupling(&coupling, 0.002, &SolveOptions::default()).unwrap();
        assert!((sols.primary().f - f0).abs() / f0 < 1e-3);
    }

    #[test]
    fn invalid_inputs_are_domain_errors() {
        assert!(matches!(
            re_to_f(-10.0, EPS),
            Err(SolveError::Domain { .. })
        ));
        assert!(matches!(
            f_to_re(0.0, EPS),
            Err(SolveError::Domain { .. })
        ));
    }
}
