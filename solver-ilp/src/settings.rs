//! Configuration settings for the ILP solver.

use solver_lp::LpSettings;

use crate::error::{IlpError, IlpResult};

/// Default integer feasibility tolerance.
///
/// A coordinate `v` of a relaxation solution is integral iff
/// `|v - round(v)| <= DEFAULT_INT_TOL`. Any tolerance must lie in `[0, 0.5)`.
pub const DEFAULT_INT_TOL: f64 = 1e-6;

/// ILP solver settings.
#[derive(Debug, Clone)]
pub struct IlpSettings {
    // === Termination criteria ===
    /// Maximum number of relaxations to solve. Nodes left unexplored once
    /// the cap is hit resolve as `IterationLimit`.
    ///
    /// Each relaxation is a dense simplex solve whose cost grows quickly with
    /// depth, so the default is sized for problems of a few dozen variables.
    pub max_nodes: u64,

    /// Integer feasibility tolerance (see [`DEFAULT_INT_TOL`]).
    pub int_tol: f64,

    // === Relaxation ===
    /// Settings for the simplex relaxation oracle.
    pub lp_settings: LpSettings,

    // === Output ===
    /// Print progress information.
    pub verbose: bool,

    /// Log frequency (print every N nodes).
    pub log_freq: u64,
}

impl Default for IlpSettings {
    fn default() -> Self {
        Self {
            max_nodes: 10_000,
            int_tol: DEFAULT_INT_TOL,
            lp_settings: LpSettings::default(),
            verbose: false,
            log_freq: 100,
        }
    }
}

impl IlpSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Set maximum nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Set the integer feasibility tolerance.
    pub fn with_int_tol(mut self, tol: f64) -> Self {
        self.int_tol = tol;
        self
    }

    /// Set the pivot budget of each relaxation solve.
    pub fn with_lp_max_iter(mut self, max_iter: usize) -> Self {
        self.lp_settings.max_iter = max_iter;
        self
    }

    /// Check that the settings describe a meaningful search.
    ///
    /// A negative or NaN `int_tol` makes exact integers fractional, and one of
    /// `0.5` or more accepts every value as integral.
    pub fn validate(&self) -> IlpResult<()> {
        if !(0.0..0.5).contains(&self.int_tol) {
            return Err(IlpError::InvalidSettings(format!(
                "int_tol must be in [0, 0.5), got {}",
                self.int_tol
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let s = IlpSettings::default()
            .with_max_nodes(10)
            .with_int_tol(1e-4)
            .with_lp_max_iter(50);

        assert_eq!(s.max_nodes, 10);
        assert_eq!(s.int_tol, 1e-4);
        assert_eq!(s.lp_settings.max_iter, 50);
        assert!(!s.verbose);
        assert_eq!(IlpSettings::default().max_nodes, 10_000);

        let v = IlpSettings::verbose();
        assert!(v.verbose);
        assert_eq!(v.log_freq, 1);
        assert_eq!(v.int_tol, DEFAULT_INT_TOL);
    }

    #[test]
    fn test_validate_int_tol() {
        assert!(IlpSettings::default().validate().is_ok());
        assert!(IlpSettings::default().with_int_tol(0.0).validate().is_ok());
        assert!(IlpSettings::default().with_int_tol(0.49).validate().is_ok());

        for tol in [-1e-6, 0.5, 0.7, f64::NAN, f64::INFINITY] {
            let err = IlpSettings::default().with_int_tol(tol).validate().unwrap_err();
            assert!(matches!(err, IlpError::InvalidSettings(_)), "{}", tol);
        }
    }
}
