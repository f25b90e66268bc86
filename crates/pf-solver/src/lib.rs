//! Friction-factor solver for viscous flow through circular pipes.
//!
//! Given a dimensionless coupling constant derived from head-loss inputs
//! (or a friction factor / Reynolds number directly) and a relative
//! roughness, this crate finds the `(Re, f)` pair that satisfies both the
//! geometric relation and the regime law that applies at that `Re`:
//! `f = 64/Re` in the laminar range, the implicit Colebrook-White
//! correlation in the turbulent range.
//!
//! The unknowns are scalar; the solver offers Newton-Raphson on `f`,
//! bisection on `Re`, and a legacy damped multiplicative search kept for
//! behavior parity with the older head-velocity and head-flow-rate entry
//! points.

pub mod colebrook;
pub mod coupling;
pub mod error;
pub mod regime;
pub mod roots;
pub mod roughness;
pub mod solve;

pub use colebrook::{fully_rough_floor, laminar_f, residual, LAMINAR_COEFF};
pub use coupling::{Coupling, DiameterRelation, FluidProps, HeadLoss};
pub use error::{SolveError, SolveResult};
pub use regime::{
    FlowSolution, Regime, Solutions, RE_LAMINAR_SOFT_MAX, RE_TURBULENT_MIN,
};
pub use roots::{BisectConfig, DampedConfig, DampedOutcome, NewtonConfig};
pub use roughness::{clamp, Clamped, EPS_MAX};
pub use solve::{
    f_to_re, re_to_f, solve_from_coupling, solve_from_coupling_legacy, SolveOptions,
};
