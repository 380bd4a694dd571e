#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
//! Basin-of-attraction maps for complex polynomials.
//!
//! Each point of a rectangular region of the complex plane is used as the
//! starting guess of an iterative root finder, and classified by the root it
//! converges to. The interesting part is the robust higher-order Newton step
//! ([`robust_step`]), which detects vanishing derivatives and picks a descent
//! direction from the local Taylor expansion, so it keeps making progress in
//! neighborhoods of multiple roots and inflection points where plain Newton
//! stalls or blows up. A plain Newton driver and classifier are included for
//! comparison.
//!
//! ```
//! use newton_basins::{classify, poly, BasinConfig, GridSize, Region};
//!
//! // x^3 - 1 has three roots; the grid cells classify into three basins
//! let p = poly![-1.0, 0.0, 0.0, 1.0];
//! let map = classify(
//!     &p,
//!     Region::new(-2.0, 2.0, -2.0, 2.0),
//!     GridSize { n_re: 8, n_im: 8 },
//!     &BasinConfig::default(),
//! )
//! .unwrap();
//! assert!(map.roots().len() >= 3);
//! ```

pub use num;

/// Shorthand for [`num::Complex::new`].
#[macro_export]
macro_rules! complex {
    () => {
        $crate::num::Complex::new($crate::num::Zero::zero(), $crate::num::Zero::zero())
    };
    ($re:expr) => {
        $crate::num::Complex::new($re, $crate::num::Zero::zero())
    };
    ($re:expr, $im:expr) => {
        $crate::num::Complex::new($re, $im)
    };
}

/// Create a [`Poly`] from real coefficients in ascending degree order.
///
/// ```
/// # use newton_basins::{poly, Poly};
/// // 1 + 2x + 3x^2
/// let p = poly![1.0, 2.0, 3.0];
/// assert_eq!(p.degree(), 2);
/// ```
#[macro_export]
macro_rules! poly {
    [$($coeff:expr),* $(,)?] => {
        $crate::Poly::from_real_slice(&[$($coeff),*])
    };
}

mod scalar;
pub use scalar::RealScalar;

mod util;

mod poly;
pub use poly::Poly;

/// Double precision polynomial.
pub type Poly64 = Poly<f64>;

mod chain;
pub use chain::{DegenerateFunction, DerivativeChain};

pub mod solver;
pub use solver::{newton, robust, robust_step, robust_with, Error as SolveError, Step, StepRecord};

mod basin;
pub use basin::{
    classify, classify_newton, classify_parallel, classify_with_progress, BasinClass, BasinConfig,
    BasinMap, ClassGrid, GridSize, Region,
};
