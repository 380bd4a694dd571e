//! Iteration drivers: the robust higher-order method and the plain Newton
//! baseline. Both share the [`Error`] taxonomy and the `(iterations, root)`
//! success shape.

use num::Complex;

use crate::RealScalar;

mod newton;
pub use newton::newton;
mod robust;
pub use robust::{robust, robust_step, robust_with, Step};

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error<T: RealScalar> {
    /// The iteration budget ran out; carries the last iterate instead of a
    /// sentinel "root" value.
    #[error("root finder did not converge within the given constraints")]
    NoConverge(Complex<T>),

    /// Plain Newton hit an exactly-zero derivative; the robust method never
    /// reports this, it recovers through higher orders instead.
    #[error("derivative is exactly zero at the current iterate")]
    Stationary(Complex<T>),

    #[error("unexpected error while running root finder")]
    Other(#[from] anyhow::Error),
}

/// One step of the robust iteration, as seen by an observer passed to
/// [`robust_with`]. `order` is the local multiplicity indicator the step
/// resolved to (1 for a plain Newton-like step).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRecord<T: RealScalar> {
    pub iteration: usize,
    pub order: usize,
    pub from: Complex<T>,
    pub to: Complex<T>,
}
