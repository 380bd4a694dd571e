use num::{Complex, Zero};

use crate::{Poly, RealScalar};

/// The function is constant, so there is no derivative chain to iterate on.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("function is constant: derivative chain is degenerate")]
pub struct DegenerateFunction;

/// The function and all of its non-zero derivatives, built once per function
/// and shared (immutably) by every iteration that follows.
///
/// Entry `k` is the `k`-th derivative; for a degree-`d` polynomial the chain
/// stores orders `0..=d`, since differentiating past `d` yields the zero
/// function. Orders past the top therefore evaluate to zero.
#[derive(Clone, Debug)]
pub struct DerivativeChain<T: RealScalar> {
    derivs: Vec<Poly<T>>,
}

impl<T: RealScalar> DerivativeChain<T> {
    /// Differentiate `poly` until the chain terminates in the zero function.
    ///
    /// # Errors
    /// [`DegenerateFunction`] if `poly` is constant: the chain would collapse
    /// to a single entry, which none of the iteration rules are defined for.
    pub fn new(poly: &Poly<T>) -> Result<Self, DegenerateFunction> {
        let mut derivs = vec![poly.clone()];
        loop {
            let next = derivs.last().expect("infallible").diff();
            if next.is_zero() {
                break;
            }
            derivs.push(next);
        }
        if derivs.len() < 2 {
            return Err(DegenerateFunction);
        }
        Ok(Self { derivs })
    }

    /// The highest stored derivative order (the degree of the function).
    #[must_use]
    pub fn order(&self) -> usize {
        self.derivs.len() - 1
    }

    #[must_use]
    pub fn function(&self) -> &Poly<T> {
        &self.derivs[0]
    }

    /// Evaluate the `order`-th derivative at `x`; orders past [`Self::order`]
    /// are identically zero.
    #[must_use]
    pub fn eval(&self, order: usize, x: Complex<T>) -> Complex<T> {
        self.derivs.get(order).map_or_else(Complex::zero, |p| p.eval(x))
    }
}

#[cfg(test)]
mod test {
    use num::Zero;

    use super::{DegenerateFunction, DerivativeChain};

    #[test]
    fn cubic_chain() {
        // x^3 - 2x + 2
        let p = poly![2.0, -2.0, 0.0, 1.0];
        let chain = DerivativeChain::new(&p).unwrap();
        assert_eq!(chain.order(), 3);
        // f''(x) = 6x
        assert_eq!(chain.eval(2, complex!(2.0)), complex!(12.0));
        // f'''(x) = 6
        assert_eq!(chain.eval(3, complex!(5.0)), complex!(6.0));
        // past the top of the chain everything is zero
        assert!(chain.eval(4, complex!(5.0)).is_zero());
    }

    #[test]
    fn linear_chain_is_minimal() {
        let p = poly![-0.5, 1.0];
        let chain = DerivativeChain::new(&p).unwrap();
        assert_eq!(chain.order(), 1);
        assert_eq!(chain.eval(1, complex!(3.0)), complex!(1.0));
    }

    #[test]
    fn constant_is_degenerate() {
        let p = poly![42.0];
        assert!(matches!(
            DerivativeChain::new(&p),
            Err(DegenerateFunction)
        ));
    }
}
