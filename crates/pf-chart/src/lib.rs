//! Chart-state data for Moody-diagram rendering.
//!
//! Produces sampled curves (the laminar line, Colebrook curves per
//! roughness, and the dashed coupling-relation line) plus marked solution
//! points, as an explicit value object handed to whatever renders it.
//! There is no drawing here and no process-wide chart state.

use pf_solver::{re_to_f, Coupling, FlowSolution, SolveResult, RE_TURBULENT_MIN};
use serde::{Deserialize, Serialize};

/// Line style hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// A sampled curve in `(Re, f)` space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    pub label: String,
    pub style: LineStyle,
    /// `[re, f]` pairs, ascending in `re`.
    pub samples: Vec<[f64; 2]>,
}

/// A single highlighted solution point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedPoint {
    pub label: String,
    pub re: f64,
    pub f: f64,
}

/// Accumulated chart content. Built per call chain and passed around
/// explicitly; callers own it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartState {
    pub curves: Vec<Curve>,
    pub points: Vec<MarkedPoint>,
}

/// Log-spaced sample abscissae over `[lo, hi]`.
fn log_spaced(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let (llo, lhi) = (lo.log10(), hi.log10());
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            10f64.powf(llo + t * (lhi - llo))
        })
        .collect()
}

/// The `f = 64/Re` laminar line over `[re_lo, RE_TURBULENT_MIN]`.
pub fn laminar_curve(re_lo: f64, n: usize) -> Curve {
    Curve {
        label: "laminar f = 64/Re".to_string(),
        style: LineStyle::Solid,
        samples: log_spaced(re_lo, RE_TURBULENT_MIN, n)
            .into_iter()
            .map(|re| [re, 64.0 / re])
            .collect(),
    }
}

/// A Colebrook curve at fixed roughness over `[re_lo, re_hi]`.
pub fn colebrook_curve(eps: f64, re_lo: f64, re_hi: f64, n: usize) -> SolveResult<Curve> {
    let mut samples = Vec::with_capacity(n);
    for re in log_spaced(re_lo.max(RE_TURBULENT_MIN), re_hi, n) {
        samples.push([re, re_to_f(re, eps)?]);
    }
    Ok(Curve {
        label: format!("colebrook eps = {eps}"),
        style: LineStyle::Solid,
        samples,
    })
}

/// The dashed coupling-relation line `f = f_of_re(Re)` over
/// `[re_lo, re_hi]`.
pub fn coupling_curve(coupling: &Coupling, re_lo: f64, re_hi: f64, n: usize) -> Curve {
    Curve {
        label: "coupling relation".to_string(),
        style: LineStyle::Dashed,
        samples: log_spaced(re_lo, re_hi, n)
            .into_iter()
            .map(|re| [re, coupling.f_of_re(re)])
            .collect(),
    }
}

impl ChartState {
    pub fn push_curve(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    /// Mark a solver solution as a scatter point.
    pub fn mark_solution(&mut self, label: impl Into<String>, solution: &FlowSolution) {
        self.points.push(MarkedPoint {
            label: label.into(),
            re: solution.re,
            f: solution.f,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_solver::Regime;

    #[test]
    fn laminar_curve_follows_the_law() {
        let curve = laminar_curve(600.0, 20);
        assert_eq!(curve.samples.len(), 20);
        for [re, f] in &curve.samples {
            assert!((f - 64.0 / re).abs() < 1e-12);
        }
        // Ascending in Re, ending at the turbulent bound.
        assert!(curve.samples.windows(2).all(|w| w[0][0] < w[1][0]));
        assert!((curve.samples.last().unwrap()[0] - RE_TURBULENT_MIN).abs() < 1e-6);
    }

    #[test]
    fn colebrook_curve_samples_satisfy_residual() {
        let curve = colebrook_curve(0.0025, 4e3, 1e7, 25).unwrap();
        for [re, f] in &curve.samples {
            let r = pf_solver::residual(*f, *re, 0.0025).unwrap();
            assert!(r.abs() < 1e-2, "residual {r} at Re {re}");
        }
        // Friction factor decreases monotonically along the curve.
        assert!(curve.samples.windows(2).all(|w| w[0][1] > w[1][1]));
    }

    #[test]
    fn coupling_curve_passes_through_solution() {
        let coupling = Coupling::Velocity { m: 1.6e-5 };
        let curve = coupling_curve(&coupling, 1e3, 1e5, 10);
        assert_eq!(curve.style, LineStyle::Dashed);
        for [re, f] in &curve.samples {
            assert!((f - coupling.f_of_re(*re)).abs() / f < 1e-12);
        }
    }

    #[test]
    fn chart_state_serializes() {
        let mut chart = ChartState::default();
        chart.push_curve(laminar_curve(600.0, 5));
        chart.mark_solution(
            "case",
            &FlowSolution {
                re: 2825.0,
                f: 0.0452,
                regime: Regime::Turbulent,
            },
        );
        let json = serde_json::to_string(&chart).unwrap();
        let back: ChartState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.curves.len(), 1);
        assert_eq!(back.points.len(), 1);
        assert_eq!(back.points[0].label, "case");
    }
}
