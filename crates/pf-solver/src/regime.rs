//! Flow-regime bounds, admissibility, and solution types.
//!
//! Boundary convention (fixed here, tested both ways): the definite
//! laminar range is `Re < 2.3e3`, half-open, so a candidate landing
//! exactly on `2.3e3` is turbulent-admissible and not laminar-admissible.
//! `4e3` is an informational soft bound only; candidates between the two
//! are physically ambiguous (both regimes are legitimate) and trigger an
//! advisory, never a rejection.

use crate::error::{SolveError, SolveResult};

/// Turbulent admissibility lower bound.
pub const RE_TURBULENT_MIN: f64 = 2.3e3;

/// Informational upper end of the transitional zone.
pub const RE_LAMINAR_SOFT_MAX: f64 = 4.0e3;

/// Flow regime of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Regime {
    Laminar,
    Turbulent,
}

/// A physically consistent `(Re, f)` pair.
///
/// Laminar solutions satisfy `f = 64/Re` exactly; turbulent solutions
/// satisfy the Colebrook residual to within solver tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowSolution {
    pub re: f64,
    pub f: f64,
    pub regime: Regime,
}

/// One or both admissible solutions. In the dual-root zone both regimes
/// are legitimate; the turbulent solution is reported first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Solutions {
    One(FlowSolution),
    Both {
        turbulent: FlowSolution,
        laminar: FlowSolution,
    },
}

impl Solutions {
    /// The preferred solution (turbulent first in the dual zone).
    pub fn primary(&self) -> &FlowSolution {
        match self {
            Solutions::One(s) => s,
            Solutions::Both { turbulent, .. } => turbulent,
        }
    }

    /// All solutions, turbulent first.
    pub fn iter(&self) -> impl Iterator<Item = FlowSolution> + '_ {
        let (first, second) = match self {
            Solutions::One(s) => (*s, None),
            Solutions::Both { turbulent, laminar } => (*turbulent, Some(*laminar)),
        };
        std::iter::once(first).chain(second)
    }
}

/// A laminar candidate is admissible strictly below the turbulent bound.
pub fn laminar_admissible(re: f64) -> bool {
    re < RE_TURBULENT_MIN
}

/// A turbulent candidate is admissible at or above the bound.
pub fn turbulent_admissible(re: f64) -> bool {
    re >= RE_TURBULENT_MIN
}

/// Whether `re` falls in the ambiguous transitional zone.
pub fn in_transition_zone(re: f64) -> bool {
    (RE_TURBULENT_MIN..RE_LAMINAR_SOFT_MAX).contains(&re)
}

/// Filter candidates through the admissibility bounds and assemble the
/// output, turbulent first. Errors with `NoSolution` when neither regime
/// survives.
pub fn select(
    laminar: Option<FlowSolution>,
    turbulent: Option<FlowSolution>,
) -> SolveResult<Solutions> {
    let laminar_ok = laminar.filter(|s| laminar_admissible(s.re));
    let turbulent_ok = turbulent.filter(|s| turbulent_admissible(s.re));

    if let Some(t) = &turbulent_ok {
        if in_transition_zone(t.re) {
            tracing::debug!(re = t.re, "turbulent solution in the transitional zone");
        }
    }

    match (turbulent_ok, laminar_ok) {
        (Some(turbulent), Some(laminar)) => Ok(Solutions::Both { turbulent, laminar }),
        (Some(t), None) => Ok(Solutions::One(t)),
        (None, Some(l)) => Ok(Solutions::One(l)),
        (None, None) => {
            let what = match (laminar, turbulent) {
                (Some(l), _) => format!(
                    "laminar candidate Re = {:.1} is above the laminar bound and no \
                     turbulent root is admissible",
                    l.re
                ),
                (None, Some(t)) => format!(
                    "turbulent candidate Re = {:.1} is below the turbulent bound",
                    t.re
                ),
                (None, None) => "no regime candidate was evaluated".to_string(),
            };
            Err(SolveError::NoSolution { what })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sol(re: f64, f: f64, regime: Regime) -> FlowSolution {
        FlowSolution { re, f, regime }
    }

    #[test]
    fn boundary_is_half_open() {
        // Exactly 2.3e3: turbulent-admissible, not laminar-admissible.
        assert!(!laminar_admissible(RE_TURBULENT_MIN));
        assert!(turbulent_admissible(RE_TURBULENT_MIN));
        // And the other way just below.
        assert!(laminar_admissible(RE_TURBULENT_MIN - 1e-9));
        assert!(!turbulent_admissible(RE_TURBULENT_MIN - 1e-9));
    }

    #[test]
    fn select_orders_turbulent_first() {
        let l = sol(2000.0, 0.032, Regime::Laminar);
        let t = sol(2825.0, 0.0452, Regime::Turbulent);
        match select(Some(l), Some(t)).unwrap() {
            Solutions::Both { turbulent, laminar } => {
                assert_eq!(turbulent.regime, Regime::Turbulent);
                assert_eq!(laminar.regime, Regime::Laminar);
            }
            other => panic!("expected both solutions, got {other:?}"),
        }
    }

    #[test]
    fn select_rejects_inadmissible_candidates() {
        // Laminar candidate above the bound, turbulent candidate below it.
        let l = sol(3000.0, 64.0 / 3000.0, Regime::Laminar);
        let t = sol(1500.0, 0.05, Regime::Turbulent);
        let err = select(Some(l), Some(t)).unwrap_err();
        assert!(matches!(err, SolveError::NoSolution { .. }));
    }

    #[test]
    fn select_with_no_candidates_is_no_solution() {
        assert!(matches!(
            select(None, None),
            Err(SolveError::NoSolution { .. })
        ));
    }

    #[test]
    fn primary_prefers_turbulent() {
        let l = sol(2000.0, 0.032, Regime::Laminar);
        let t = sol(2825.0, 0.0452, Regime::Turbulent);
        let both = select(Some(l), Some(t)).unwrap();
        assert_eq!(both.primary().regime, Regime::Turbulent);
        assert_eq!(both.iter().count(), 2);
    }
}
