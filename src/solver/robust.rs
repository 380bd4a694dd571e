use num::{Complex, Zero};

use super::{Error, StepRecord};
use crate::{DerivativeChain, RealScalar};

/// Outcome of a single robust step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step<T: RealScalar> {
    /// The local multiplicity indicator: the smallest derivative order whose
    /// magnitude at the current iterate is significant.
    pub order: usize,
    pub next: Complex<T>,
}

/// One step of the robust higher-order Newton iteration.
///
/// Where plain Newton computes `x - f/f'`, this step first scans the
/// derivative chain for the smallest order `k` with `|f^(k)(x)| >= epsilon`
/// (the local multiplicity indicator), blends the function value with that
/// derivative into `u_k = f·conj(f^(k))/k!`, and then picks one of the `2k`
/// directions of the k-fold symmetric neighborhood that the local Taylor
/// expansion guarantees to be a descent direction. The step length is damped
/// by a Lipschitz-type bound `A` on the higher-order remainder, so the step
/// stays safe close to degeneracies, at the cost of only local (and for
/// `k = 1` merely linear) convergence.
///
/// If every order up to the top of the chain is below `epsilon`, the iterate
/// sits in a fully degenerate neighborhood; the step falls back to order 1
/// with the last derivative value it computed, which keeps the iteration
/// moving without inventing precision that is not there.
#[allow(clippy::many_single_char_names)]
pub fn robust_step<T: RealScalar>(
    chain: &DerivativeChain<T>,
    x: Complex<T>,
    epsilon: T,
) -> Step<T> {
    let top = chain.order();
    let fx = chain.eval(0, x);
    let mut deriv = chain.eval(1, x);

    // order detection: walk up the chain until some derivative is significant
    let mut k = 1_usize;
    let mut k_factorial = T::one();
    while deriv.norm() < epsilon && k < top {
        k += 1;
        k_factorial = k_factorial * T::from_usize(k).expect("overflow");
        deriv = chain.eval(k, x);
    }
    if deriv.norm() < epsilon {
        // fully degenerate neighborhood: treat as order 1, keeping the
        // highest-order value as the working derivative
        log::trace!("all derivative orders below tolerance {{x: {x}}}");
        k = 1;
        k_factorial = T::one();
    }

    let u = fx * deriv.conj() / k_factorial;
    if u.is_zero() {
        // no direction information at all; stay put rather than divide by zero
        return Step { order: k, next: x };
    }

    // Lipschitz-type bound on the higher-order remainder, over orders k..=top
    // and the function value itself
    let mut bound = fx.norm().max(deriv.norm() / k_factorial);
    let mut j_factorial = k_factorial;
    for j in (k + 1)..=top {
        j_factorial = j_factorial * T::from_usize(j).expect("overflow");
        bound = bound.max(chain.eval(j, x).norm() / j_factorial);
    }

    // among the 2k symmetric directions, pick the one the sign of
    // Re/Im(u^(k-1)) proves to decrease |f|
    let ukk = u.powu(u32::try_from(k - 1).expect("order too high"));
    let gamma = ukk.re + ukk.re;
    let delta = -(ukk.im + ukk.im);
    let kf = T::from_usize(k).expect("overflow");
    let pi = T::PI();
    let two = T::from_f64(2.0).expect("overflow");
    let (ck, theta) = if gamma.abs() >= delta.abs() {
        (gamma.abs(), if gamma < T::zero() { T::zero() } else { pi / kf })
    } else {
        (
            delta.abs(),
            if delta < T::zero() {
                pi / (two * kf)
            } else {
                (two + T::one()) * pi / (two * kf)
            },
        )
    };

    let u_norm = u.norm();
    let six = T::from_f64(6.0).expect("overflow");
    let three = T::from_f64(3.0).expect("overflow");
    let scale = ck * u_norm.powi(2 - i32::try_from(k).expect("order too high")) / (six * bound * bound);
    let next = x + u * Complex::from_polar(T::one(), theta) * (scale / (three * u_norm));
    Step { order: k, next }
}

/// Run the robust iteration from `x0` until the joint convergence test
/// `|f(x)·f'(x)| < epsilon` holds, or the iteration budget runs out.
///
/// The joint test tolerates iterates sitting exactly on a multiple root
/// (where `f'` alone vanishes but `f` does not, and vice versa), which is why
/// it is used instead of an increment test. It is evaluated *before* each
/// step, so starting exactly on a root converges in one iteration.
///
/// On success returns the number of iterations used (counting from 1) and the
/// final iterate.
///
/// # Errors
/// [`Error::NoConverge`] with the last iterate if `max_iter` is exhausted.
pub fn robust<T: RealScalar>(
    chain: &DerivativeChain<T>,
    x0: Complex<T>,
    max_iter: usize,
    epsilon: T,
) -> Result<(usize, Complex<T>), Error<T>> {
    robust_with(chain, x0, max_iter, epsilon, |_| {})
}

/// Same as [`robust`], reporting every step taken to `on_step`. Useful for
/// instrumentation, e.g. observing which multiplicity orders were resolved
/// along the way.
pub fn robust_with<T: RealScalar>(
    chain: &DerivativeChain<T>,
    x0: Complex<T>,
    max_iter: usize,
    epsilon: T,
    mut on_step: impl FnMut(&StepRecord<T>),
) -> Result<(usize, Complex<T>), Error<T>> {
    let mut x = x0;
    for i in 1..=max_iter {
        if (chain.eval(0, x) * chain.eval(1, x)).norm() < epsilon {
            return Ok((i, x));
        }
        let step = robust_step(chain, x, epsilon);
        on_step(&StepRecord {
            iteration: i,
            order: step.order,
            from: x,
            to: step.next,
        });
        x = step.next;
    }
    log::trace!("did not converge {{x0: {x0}, last: {x}}}");
    Err(Error::NoConverge(x))
}
