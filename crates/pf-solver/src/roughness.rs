//! Relative-roughness clamping policy.

/// Upper end of the valid relative-roughness range.
pub const EPS_MAX: f64 = 0.05;

/// Result of clamping a relative roughness into `[0, EPS_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    pub eps: f64,
    /// True when the input exceeded `EPS_MAX` and was reassigned.
    pub reassigned: bool,
}

/// Clamp a relative roughness into the valid domain.
///
/// Values above `EPS_MAX` are reassigned to `EPS_MAX`; the event is
/// reportable (callers may emit an advisory) but never an error.
pub fn clamp(eps: f64) -> Clamped {
    if eps > EPS_MAX {
        Clamped {
            eps: EPS_MAX,
            reassigned: true,
        }
    } else {
        Clamped {
            eps,
            reassigned: false,
        }
    }
}
