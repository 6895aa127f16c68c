use crate::{FlError, FlResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Absolute-only tolerance, e.g. `Tolerances::absolute(1e-3)` for m/s comparisons.
    pub const fn absolute(abs: Real) -> Self {
        Self { abs, rel: 0.0 }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> FlResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FlError::NonFinite { what, value: v })
    }
}

/// Accept finite, strictly positive values such as time steps.
pub fn ensure_positive(v: Real, what: &'static str) -> FlResult<Real> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(FlError::InvalidArg { what })
    }
}

/// Clamp `v` into `[min, max]`, mapping NaN to the in-range value nearest zero.
///
/// `f64::clamp` propagates NaN, which would hand the solver a NaN command.
pub fn clamp_finite(v: Real, min: Real, max: Real) -> Real {
    if v.is_nan() {
        0.0_f64.clamp(min, max)
    } else {
        v.clamp(min, max)
    }
}
