//! Colebrook-White residual for turbulent pipe friction.

use crate::error::{SolveError, SolveResult};

/// Laminar law coefficient: `f = 64 / Re`.
pub const LAMINAR_COEFF: f64 = 64.0;

/// Friction factor from the laminar closed form.
#[inline]
pub fn laminar_f(re: f64) -> f64 {
    LAMINAR_COEFF / re
}

/// Evaluate the Colebrook-White residual
/// `1/sqrt(f) + 2*log10(eps/3.7 + 2.51/(Re*sqrt(f)))`.
///
/// A root defines the physically consistent turbulent `(Re, f)` pair.
/// Undefined for non-positive `f` or `Re`, or when the log argument is
/// non-positive.
pub fn residual(f: f64, re: f64, eps: f64) -> SolveResult<f64> {
    if !f.is_finite() || f <= 0.0 {
        return Err(SolveError::Domain {
            what: "friction factor must be positive",
        });
    }
    if !re.is_finite() || re <= 0.0 {
        return Err(SolveError::Domain {
            what: "Reynolds number must be positive",
        });
    }
    let sqrt_f = f.sqrt();
    let arg = eps / 3.7 + 2.51 / (re * sqrt_f);
    if arg <= 0.0 {
        return Err(SolveError::Domain {
            what: "non-positive log argument",
        });
    }
    Ok(1.0 / sqrt_f + 2.0 * arg.log10())
}

/// Minimum achievable turbulent friction factor at a given roughness,
/// `(2*log10(3.7/eps))^-2` (the fully rough limit, `Re -> inf`).
///
/// Below this value no turbulent root exists. Returns `None` for smooth
/// pipes (`eps = 0`), where the friction factor has no positive floor.
pub fn fully_rough_floor(eps: f64) -> Option<f64> {
    if eps > 0.0 {
        Some((2.0 * (3.7 / eps).log10()).powi(-2))
    } else {
        None
    }
}
