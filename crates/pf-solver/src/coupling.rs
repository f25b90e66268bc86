//! Coupling constants: the dimensionless reduction of the physical inputs.
//!
//! Each head-loss parameterization (known velocity, known diameter, known
//! flow rate) reduces `h, L, g, rho, mu` plus its own variable to a single
//! positive constant that ties `f` to `Re`. The three reductions differ
//! algebraically but play an identical role for the solver, so they are one
//! strategy enum rather than duplicated entry points.

use crate::colebrook::LAMINAR_COEFF;
use crate::error::SolveResult;
use pf_core::numeric::ensure_positive;
use pf_core::units::{Accel, Density, DynVisc, Length, Velocity, VolumeRate};

/// Head-loss geometry shared by every parameterization.
#[derive(Debug, Clone, Copy)]
pub struct HeadLoss {
    /// Frictional head loss over the pipe run
    pub head: Length,
    /// Pipe length
    pub length: Length,
    /// Gravitational acceleration
    pub gravity: Accel,
}

/// Fluid properties shared by every parameterization.
#[derive(Debug, Clone, Copy)]
pub struct FluidProps {
    pub density: Density,
    pub viscosity: DynVisc,
}

/// Dimensionless coupling constant tying `f` to `Re`.
///
/// - `Velocity`: `f = m * Re` (Darcy relation with the diameter eliminated
///   through the known mean velocity)
/// - `Diameter`: `f = k / Re^2` (velocity eliminated through the known
///   diameter)
/// - `FlowRate`: `f = p / Re^5` (both eliminated through the known
///   volumetric flow rate)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coupling {
    Velocity { m: f64 },
    Diameter { k: f64 },
    FlowRate { p: f64 },
}

/// How the hydraulic diameter depends on the candidate `Re`.
///
/// Needed when the caller supplies an absolute roughness length: for the
/// velocity and flow-rate parameterizations the diameter is itself a
/// function of `Re`, so `eps = thk / D(Re)` must be re-derived at each
/// candidate during the legacy search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiameterRelation {
    /// Diameter known up front.
    Fixed(f64),
    /// `D = c * Re` (velocity parameterization, `c = mu / (rho * v)`).
    Linear { c: f64 },
    /// `D = c / Re` (flow-rate parameterization, `c = 4*rho*Q / (pi*mu)`).
    Inverse { c: f64 },
}

impl DiameterRelation {
    /// Hydraulic diameter at a candidate Reynolds number.
    pub fn at(&self, re: f64) -> f64 {
        match *self {
            DiameterRelation::Fixed(d) => d,
            DiameterRelation::Linear { c } => c * re,
            DiameterRelation::Inverse { c } => c / re,
        }
    }

    /// Relative roughness implied by an absolute roughness length at `re`.
    pub fn relative_roughness_at(&self, thk: f64, re: f64) -> f64 {
        thk / self.at(re)
    }
}

impl Coupling {
    /// Reduce head loss + mean velocity to the coupling constant
    /// `m = 2*g*h*mu / (rho*L*v^3)`.
    pub fn from_head_velocity(
        geom: &HeadLoss,
        fluid: &FluidProps,
        velocity: Velocity,
    ) -> SolveResult<(Self, DiameterRelation)> {
        let (h, l, g) = geom.validated()?;
        let (rho, mu) = fluid.validated()?;
        let v = ensure_positive(velocity.value, "mean velocity")?;
        let m = 2.0 * g * h * mu / (rho * l * v.powi(3));
        Ok((
            Coupling::Velocity { m },
            DiameterRelation::Linear { c: mu / (rho * v) },
        ))
    }

    /// Reduce head loss + hydraulic diameter to the coupling constant
    /// `k = 2*g*h*D^3*rho^2 / (L*mu^2)`.
    pub fn from_head_diameter(
        geom: &HeadLoss,
        fluid: &FluidProps,
        diameter: Length,
    ) -> SolveResult<(Self, DiameterRelation)> {
        let (h, l, g) = geom.validated()?;
        let (rho, mu) = fluid.validated()?;
        let d = ensure_positive(diameter.value, "hydraulic diameter")?;
        let k = 2.0 * g * h * d.powi(3) * rho.powi(2) / (l * mu.powi(2));
        Ok((Coupling::Diameter { k }, DiameterRelation::Fixed(d)))
    }

    /// Reduce head loss + volumetric flow rate to the coupling constant
    /// `p = 128*g*h*rho^5*Q^3 / (pi^3*L*mu^5)`.
    pub fn from_head_flow_rate(
        geom: &HeadLoss,
        fluid: &FluidProps,
        flow: VolumeRate,
    ) -> SolveResult<(Self, DiameterRelation)> {
        let (h, l, g) = geom.validated()?;
        let (rho, mu) = fluid.validated()?;
        let q = ensure_positive(flow.value, "flow rate")?;
        let pi3 = std::f64::consts::PI.powi(3);
        let p = 128.0 * g * h * rho.powi(5) * q.powi(3) / (pi3 * l * mu.powi(5));
        Ok((
            Coupling::FlowRate { p },
            DiameterRelation::Inverse {
                c: 4.0 * rho * q / (std::f64::consts::PI * mu),
            },
        ))
    }

    /// The raw constant.
    pub fn value(&self) -> f64 {
        match *self {
            Coupling::Velocity { m } => m,
            Coupling::Diameter { k } => k,
            Coupling::FlowRate { p } => p,
        }
    }

    /// Friction factor imposed by the physical inputs at a candidate `Re`.
    pub fn f_of_re(&self, re: f64) -> f64 {
        match *self {
            Coupling::Velocity { m } => m * re,
            Coupling::Diameter { k } => k / re.powi(2),
            Coupling::FlowRate { p } => p / re.powi(5),
        }
    }

    /// Reynolds number imposed by the physical inputs at a candidate `f`.
    pub fn re_of_f(&self, f: f64) -> f64 {
        match *self {
            Coupling::Velocity { m } => f / m,
            Coupling::Diameter { k } => (k / f).sqrt(),
            Coupling::FlowRate { p } => (p / f).powf(0.2),
        }
    }

    /// Closed-form laminar candidate: the `Re` where `64/Re` meets
    /// `f_of_re`.
    pub fn laminar_re(&self) -> f64 {
        match *self {
            Coupling::Velocity { m } => (LAMINAR_COEFF / m).sqrt(),
            Coupling::Diameter { k } => k / LAMINAR_COEFF,
            Coupling::FlowRate { p } => (p / LAMINAR_COEFF).powf(0.25),
        }
    }

    /// Whether `f_of_re` falls as `Re` grows (true for the diameter and
    /// flow-rate forms; the velocity form rises). Sets the step direction
    /// of the legacy damped search.
    pub(crate) fn target_falls_with_re(&self) -> bool {
        !matches!(self, Coupling::Velocity { .. })
    }
}

impl HeadLoss {
    fn validated(&self) -> SolveResult<(f64, f64, f64)> {
        let h = ensure_positive(self.head.value, "head loss")?;
        let l = ensure_positive(self.length.value, "pipe length")?;
        let g = ensure_positive(self.gravity.value, "gravity")?;
        Ok((h, l, g))
    }
}

impl FluidProps {
    fn validated(&self) -> SolveResult<(f64, f64)> {
        let rho = ensure_positive(self.density.value, "density")?;
        let mu = ensure_positive(self.viscosity.value, "viscosity")?;
        Ok((rho, mu))
    }
}
