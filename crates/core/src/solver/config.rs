//! Solver selection and constants
//!
//! Both solvers are controlled by a single constant each. Values are validated
//! when a solver is built; an out-of-range constant is rejected rather than
//! clamped, since clamping would silently change the requested behavior.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which diffusion model backs `step()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Integer pairwise flow between cardinal neighbors
    #[default]
    NeighborTransfer,
    /// Explicit finite-difference heat equation with sub-integer state
    Laplacian,
}

impl SolverKind {
    /// Human-readable backend name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NeighborTransfer => "neighbor-transfer",
            Self::Laplacian => "laplacian",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constants for the neighbor-transfer solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborTransferParams {
    /// Fraction of each neighbor difference moved per frame, in `(0, 1]`
    pub flow_rate: f32,
}

impl NeighborTransferParams {
    /// Default flow rate
    pub const DEFAULT_FLOW_RATE: f32 = 0.25;

    /// Validated constructor
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlowRateOutOfRange`] unless `0 < flow_rate <= 1`.
    pub fn new(flow_rate: f32) -> Result<Self, ConfigError> {
        let params = Self { flow_rate };
        params.validate()?;
        Ok(params)
    }

    /// Check the flow rate lies in `(0, 1]` (NaN is rejected)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlowRateOutOfRange`] on violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flow_rate > 0.0 && self.flow_rate <= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::FlowRateOutOfRange {
                value: self.flow_rate,
            })
        }
    }
}

impl Default for NeighborTransferParams {
    fn default() -> Self {
        Self {
            flow_rate: Self::DEFAULT_FLOW_RATE,
        }
    }
}

/// Constants for the Laplacian solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaplacianParams {
    /// Diffusivity per frame, in `(0, MAX_STABLE_DIFFUSIVITY]`
    pub diffusivity: f32,
}

impl LaplacianParams {
    /// Default diffusivity
    pub const DEFAULT_DIFFUSIVITY: f32 = 0.2;

    /// Stability limit of the explicit scheme on a 4-neighbor lattice
    ///
    /// Above this the update overshoots and oscillates with growing amplitude.
    pub const MAX_STABLE_DIFFUSIVITY: f32 = 0.25;

    /// Validated constructor
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DiffusivityOutOfRange`] unless
    /// `0 < diffusivity <= 0.25`.
    pub fn new(diffusivity: f32) -> Result<Self, ConfigError> {
        let params = Self { diffusivity };
        params.validate()?;
        Ok(params)
    }

    /// Check the diffusivity lies in `(0, 0.25]` (NaN is rejected)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DiffusivityOutOfRange`] on violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.diffusivity > 0.0 && self.diffusivity <= Self::MAX_STABLE_DIFFUSIVITY {
            Ok(())
        } else {
            Err(ConfigError::DiffusivityOutOfRange {
                value: self.diffusivity,
            })
        }
    }
}

impl Default for LaplacianParams {
    fn default() -> Self {
        Self {
            diffusivity: Self::DEFAULT_DIFFUSIVITY,
        }
    }
}

/// Host-level solver configuration
///
/// Carries constants for both solvers so switching `kind` does not lose the
/// other solver's settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Active solver
    pub kind: SolverKind,
    /// Neighbor-transfer constants
    pub neighbor_transfer: NeighborTransferParams,
    /// Laplacian constants
    pub laplacian: LaplacianParams,
}

impl SolverConfig {
    /// Default constants with the given solver active
    #[must_use]
    pub fn with_kind(kind: SolverKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Validate the constants of the active solver
    ///
    /// The inactive solver's constants are checked when it is selected.
    ///
    /// # Errors
    ///
    /// Returns the active solver's [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            SolverKind::NeighborTransfer => self.neighbor_transfer.validate(),
            SolverKind::Laplacian => self.laplacian.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SolverConfig::default().validate().is_ok());
        assert!(SolverConfig::with_kind(SolverKind::Laplacian)
            .validate()
            .is_ok());
        assert_eq!(SolverConfig::default().kind, SolverKind::NeighborTransfer);
    }

    #[test]
    fn test_flow_rate_bounds() {
        assert!(NeighborTransferParams::new(1.0).is_ok());
        assert!(NeighborTransferParams::new(0.01).is_ok());
        assert_eq!(
            NeighborTransferParams::new(0.0),
            Err(ConfigError::FlowRateOutOfRange { value: 0.0 })
        );
        assert!(NeighborTransferParams::new(1.5).is_err());
        assert!(NeighborTransferParams::new(f32::NAN).is_err());
    }

    #[test]
    fn test_diffusivity_bounds() {
        assert!(LaplacianParams::new(0.25).is_ok());
        assert!(LaplacianParams::new(0.2).is_ok());
        assert_eq!(
            LaplacianParams::new(0.3),
            Err(ConfigError::DiffusivityOutOfRange { value: 0.3 })
        );
        assert!(LaplacianParams::new(-0.1).is_err());
        assert!(LaplacianParams::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_only_active_solver_is_validated() {
        let config = SolverConfig {
            kind: SolverKind::NeighborTransfer,
            neighbor_transfer: NeighborTransferParams::default(),
            laplacian: LaplacianParams { diffusivity: 0.9 },
        };
        assert!(config.validate().is_ok());

        let config = SolverConfig {
            kind: SolverKind::Laplacian,
            ..config
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SolverKind::NeighborTransfer.to_string(), "neighbor-transfer");
        assert_eq!(SolverKind::Laplacian.name(), "laplacian");
    }
}
