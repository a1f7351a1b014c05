//! 8-bit channel value to normalized intensity.

/// Map an 8-bit channel value to an intensity in `0.0..=1.0`.
///
/// The value is clamped to `0..=255` and normalized. When `gamma` is not
/// exactly 1.0 the result is raised to that power: exponents above 1 dim
/// mid-tones, exponents below 1 brighten them. The end points are fixed,
/// so `gamma_map(0, g) == 0.0` and `gamma_map(255, g) == 1.0` for any
/// positive `g`.
///
/// # Example
///
/// ```
/// use crt_stripes::gamma_map;
///
/// assert_eq!(gamma_map(255, 2.2), 1.0);
/// assert_eq!(gamma_map(-40, 1.0), 0.0);
/// assert!(gamma_map(128, 2.2) < gamma_map(128, 1.0));
/// ```
#[inline]
pub fn gamma_map(value: i32, gamma: f64) -> f64 {
    let intensity = f64::from(value.clamp(0, 255)) / 255.0;
    if gamma != 1.0 {
        intensity.powf(gamma)
    } else {
        intensity
    }
}
