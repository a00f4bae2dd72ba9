//! Integrality test on relaxation solutions.

/// Classification of a relaxation solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Integrality {
    /// Every coordinate is within tolerance of an integer.
    Integral,

    /// First coordinate that is not.
    Fractional {
        /// Variable index.
        index: usize,
        /// Its relaxation value.
        value: f64,
    },
}

/// Checks solution vectors against an integrality tolerance.
#[derive(Debug, Clone, Copy)]
pub struct IntegralityChecker {
    tol: f64,
}

impl IntegralityChecker {
    /// Create a checker with tolerance `tol`.
    pub fn new(tol: f64) -> Self {
        Self { tol }
    }

    /// Whether `v` is within tolerance of an integer.
    pub fn is_integral(&self, v: f64) -> bool {
        (v - v.round()).abs() <= self.tol
    }

    /// Find the lowest-index fractional coordinate of `x`, if any.
    pub fn classify(&self, x: &[f64]) -> Integrality {
        match x.iter().position(|&v| !self.is_integral(v)) {
            Some(index) => Integrality::Fractional {
                index,
                value: x[index],
            },
            None => Integrality::Integral,
        }
    }
}
