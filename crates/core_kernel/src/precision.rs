//! Numeric tolerances and rounding for `f64` amounts
//!
//! All amounts in the system are plain IEEE doubles. Comparisons against
//! exact values go through the tolerances defined here, and rounding is only
//! ever applied when presenting a value, never before further arithmetic.

/// Absolute tolerance for the per-bill "shares sum to one" check
pub const SHARE_TOLERANCE: f64 = 1e-8;

/// Absolute tolerance below which a balance is considered settled
///
/// Coarser than [`SHARE_TOLERANCE`] because settlement accumulates rounding
/// error across several transfers.
pub const SETTLEMENT_TOLERANCE: f64 = 1e-6;

/// Number of decimal places used when presenting amounts
pub const DISPLAY_DECIMALS: u32 = 2;

/// Most decimal places worth showing for an `f64`
pub const MAX_DISPLAY_DECIMALS: u32 = 17;

/// Rounds a value to the given number of decimal places
///
/// Requests beyond [`MAX_DISPLAY_DECIMALS`] are clamped to it.
///
/// # Example
///
/// ```rust
/// use core_kernel::round_to;
///
/// assert_eq!(round_to(12.3456, 2), 12.35);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DISPLAY_DECIMALS) as i32);
    let rounded = (value * factor).round() / factor;
    // avoid presenting "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Rounds a value to [`DISPLAY_DECIMALS`] places for presentation
pub fn round_for_display(value: f64) -> f64 {
    round_to(value, DISPLAY_DECIMALS)
}

/// Returns true when `a` and `b` differ by at most `tolerance`
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
