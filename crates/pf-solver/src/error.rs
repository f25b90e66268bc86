//! Error types for solver operations.

use pf_core::PfError;
use thiserror::Error;

/// Errors that can occur while solving the regime equations.
#[derive(Error, Debug, Clone)]
pub enum SolveError {
    #[error("Residual evaluated outside its domain: {what}")]
    Domain { what: &'static str },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("No sign change in [{lo}, {hi}]: no turbulent root at this friction factor")]
    NoBracket { lo: f64, hi: f64 },

    #[error("No admissible flow regime: {what}")]
    NoSolution { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type SolveResult<T> = Result<T, SolveError>;

impl From<PfError> for SolveError {
    fn from(e: PfError) -> Self {
        match e {
            PfError::NonFinite { what, value: _ } => SolveError::Domain { what },
            PfError::InvalidArg { what } => SolveError::InvalidArg { what },
            PfError::Invariant { what } => SolveError::InvalidArg { what },
        }
    }
}

impl From<SolveError> for PfError {
    fn from(e: SolveError) -> Self {
        match e {
            SolveError::Domain { what } => PfError::InvalidArg { what },
            SolveError::ConvergenceFailed { what: _ } => PfError::InvalidArg {
                what: "convergence",
            },
            SolveError::NoBracket { .. } => PfError::InvalidArg { what: "bracket" },
            SolveError::NoSolution { what: _ } => PfError::InvalidArg {
                what: "no admissible regime",
            },
            SolveError::InvalidArg { what } => PfError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SolveError::Domain {
            what: "friction factor",
        };
        assert!(err.to_string().contains("friction factor"));
    }

    #[test]
    fn error_conversion() {
        let err = SolveError::InvalidArg { what: "test" };
        let core_err: PfError = err.into();
        assert!(matches!(core_err, PfError::InvalidArg { .. }));
    }
}
