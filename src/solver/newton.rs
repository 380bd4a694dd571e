use num::{Complex, Zero};

use super::Error;
use crate::{DerivativeChain, RealScalar};

/// Plain Newton iteration, kept as the comparison baseline for the robust
/// driver: the trivial step `x - f/f'`, convergence by closeness of
/// successive iterates, and no recovery whatsoever when the derivative
/// vanishes.
///
/// On success returns the number of iterations used (counting from 1) and the
/// final iterate.
///
/// # Errors
/// - [`Error::Stationary`] the instant `f'` is exactly zero at an iterate.
/// - [`Error::NoConverge`] with the last iterate if `max_iter` is exhausted.
pub fn newton<T: RealScalar>(
    chain: &DerivativeChain<T>,
    x0: Complex<T>,
    max_iter: usize,
    epsilon: T,
) -> Result<(usize, Complex<T>), Error<T>> {
    let mut x = x0;
    for i in 1..=max_iter {
        let fx = chain.eval(0, x);
        let dfx = chain.eval(1, x);

        // failed: got stuck at a stationary point
        if dfx.is_zero() {
            return Err(Error::Stationary(x));
        }

        let next = x - fx / dfx;

        // close enough
        if (next - x).norm() <= epsilon {
            return Ok((i, next));
        }

        x = next;
    }
    log::trace!("did not converge {{x0: {x0}, last: {x}}}");
    Err(Error::NoConverge(x))
}
