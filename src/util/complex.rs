// internal utilities for dealing with Complex annoyances

use num::Complex;

use crate::RealScalar;

/// Round both components to `decimals` decimal digits.
///
/// The rounded value is the deduplication identity for roots, so two iterates
/// that land near the same root compare equal after rounding.
pub(crate) fn c_round<T: RealScalar>(z: Complex<T>, decimals: i32) -> Complex<T> {
    let scale = T::from_f64(10.0).expect("overflow").powi(decimals);
    Complex::new((z.re * scale).round() / scale, (z.im * scale).round() / scale)
}

pub(crate) fn c_is_finite<T: RealScalar>(z: Complex<T>) -> bool {
    z.re.is_finite() && z.im.is_finite()
}
