use num::{Complex, One, Zero};

use crate::RealScalar;

/// Dense univariate polynomial with complex coefficients, in ascending degree
/// order (`self.0[k]` is the coefficient of `x^k`).
///
/// Polynomials are kept normalized: no trailing zero coefficients, and always
/// at least one coefficient (the zero polynomial is `[0]`).
#[derive(Clone, Debug, PartialEq)]
pub struct Poly<T: RealScalar>(pub(crate) Vec<Complex<T>>);

impl<T: RealScalar> Poly<T> {
    /// Create a new polynomial from complex coefficients in ascending degree
    /// order, trimming trailing zeros.
    #[must_use]
    pub fn new(mut coeffs: Vec<Complex<T>>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(Complex::zero());
        }
        Self(coeffs)
    }

    /// Create a new polynomial from real coefficients in ascending degree order.
    #[must_use]
    pub fn from_real_slice(coeffs: &[T]) -> Self {
        Self::new(
            coeffs
                .iter()
                .map(|&c| Complex::new(c, T::zero()))
                .collect(),
        )
    }

    /// The monic polynomial with the given roots.
    ///
    /// ```
    /// use newton_basins::{complex, poly, Poly};
    ///
    /// // (x - 1)(x + 1) = x^2 - 1
    /// let p = Poly::from_roots(&[complex!(1.0), complex!(-1.0)]);
    /// assert_eq!(p, poly![-1.0, 0.0, 1.0]);
    /// ```
    #[must_use]
    pub fn from_roots(roots: &[Complex<T>]) -> Self {
        let mut coeffs = vec![Complex::<T>::one()];
        for r in roots {
            // multiply by (x - r)
            let mut next = vec![Complex::<T>::zero(); coeffs.len() + 1];
            for (k, c) in coeffs.iter().enumerate() {
                next[k + 1] = next[k + 1] + *c;
                next[k] = next[k] - *c * *r;
            }
            coeffs = next;
        }
        Self::new(coeffs)
    }

    #[must_use]
    pub fn zero() -> Self {
        Self(vec![Complex::zero()])
    }

    fn is_normalized(&self) -> bool {
        !self.0.is_empty() && (self.0.len() == 1 || !self.0.last().expect("infallible").is_zero())
    }

    /// Degree of the polynomial; constants (including zero) have degree 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        debug_assert!(self.is_normalized());
        self.0.len() - 1
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.0[0].is_zero()
    }

    #[must_use]
    pub fn coeffs(&self) -> &[Complex<T>] {
        &self.0
    }

    /// Evaluate at `x` using Horner's scheme.
    ///
    /// ```
    /// use newton_basins::{complex, poly};
    ///
    /// // x^2 + 2x + 1 at x = i
    /// let p = poly![1.0, 2.0, 1.0];
    /// assert_eq!(p.eval(complex!(0.0, 1.0)), complex!(0.0, 2.0));
    /// ```
    #[must_use]
    pub fn eval(&self, x: Complex<T>) -> Complex<T> {
        self.0
            .iter()
            .rev()
            .fold(Complex::zero(), |acc, c| acc * x + *c)
    }

    /// Derivative
    ///
    /// ```
    /// use newton_basins::poly;
    ///
    /// let p = poly![1.0, 2.0, 3.0];
    /// assert_eq!(p.diff(), poly![2.0, 6.0]);
    /// ```
    #[must_use]
    pub fn diff(&self) -> Self {
        debug_assert!(self.is_normalized());

        // derivative of a constant is zero
        if self.degree() == 0 {
            return Self::zero();
        }

        let coeffs = self
            .0
            .iter()
            .enumerate()
            .skip(1) // shift degrees down
            .map(|(n, c)| *c * T::from_usize(n).expect("degree too high to convert to T"))
            .collect();
        Self::new(coeffs)
    }
}
