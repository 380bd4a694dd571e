use std::fmt;

use num::traits::FloatConst;
use num::{Float, FromPrimitive};

/// The real scalar types the solvers are generic over.
///
/// Bundles the float bounds used throughout the crate: ordinary float
/// arithmetic, float constants (for the direction table angles), conversions
/// from primitives (factorials, grid spacing) and thread safety (the parallel
/// classifier shares the derivative chain across workers).
pub trait RealScalar:
    Float + FloatConst + FromPrimitive + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

impl RealScalar for f32 {}
impl RealScalar for f64 {}
