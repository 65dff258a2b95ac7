// Centralized tolerances for the numeric kernel.

pub const EPS_AREA: f64 = 1e-12; // degenerate ring area threshold
pub const EPS_DENOM: f64 = 1e-12; // denominator guard for parametric intersection

#[inline]
pub fn near_zero(x: f64, eps: f64) -> bool {
    x.abs() <= eps
}
