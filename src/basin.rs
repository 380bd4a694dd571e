//! Grid classification: sample a rectangular region, run a driver per sample,
//! and deduplicate the roots found into a small palette of class ids.

use std::ops::Index;

use itertools::Itertools;
use num::Complex;
use rayon::prelude::*;

use crate::solver::{newton, robust, Error};
use crate::util::complex::{c_is_finite, c_round};
use crate::{DegenerateFunction, DerivativeChain, RealScalar};

/// The rectangular region of the complex plane to sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region<T: RealScalar> {
    pub re_min: T,
    pub re_max: T,
    pub im_min: T,
    pub im_max: T,
}

impl<T: RealScalar> Region<T> {
    #[must_use]
    pub const fn new(re_min: T, re_max: T, im_min: T, im_max: T) -> Self {
        Self {
            re_min,
            re_max,
            im_min,
            im_max,
        }
    }

    /// Sample point `(i, j)` of a regular grid: `re_min + i·Δre` along the
    /// real axis, `im_min + j·Δim` along the imaginary axis, with each axis
    /// step sized by its own sample count.
    fn sample(&self, i: usize, j: usize, grid: GridSize) -> Complex<T> {
        let d_re = (self.re_max - self.re_min) / T::from_usize(grid.n_re).expect("overflow");
        let d_im = (self.im_max - self.im_min) / T::from_usize(grid.n_im).expect("overflow");
        Complex::new(
            self.re_min + d_re * T::from_usize(i).expect("overflow"),
            self.im_min + d_im * T::from_usize(j).expect("overflow"),
        )
    }
}

/// Number of grid samples along the real and imaginary axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub n_re: usize,
    pub n_im: usize,
}

/// Tuning knobs of one classification run.
///
/// `epsilon` is both the convergence threshold of the driver and the
/// significance threshold of the order detection; `decimals` is the rounding
/// precision that decides when two roots count as the same root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasinConfig<T: RealScalar> {
    pub max_iter: usize,
    pub epsilon: T,
    pub decimals: i32,
}

impl<T: RealScalar> Default for BasinConfig<T> {
    fn default() -> Self {
        Self {
            max_iter: 500,
            epsilon: T::from_f64(1E-3).expect("overflow"),
            decimals: 3,
        }
    }
}

/// What a grid cell converged to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BasinClass<T: RealScalar> {
    /// A root, rounded to the configured precision.
    Root(Complex<T>),
    /// The driver failed for this cell (budget exhausted, stationary point,
    /// or a non-finite iterate). Failures share one class so the basin map
    /// visibly distinguishes non-converging regions.
    Diverged,
}

/// Row-major grid of class ids, `n_re` rows of `n_im` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassGrid {
    n_re: usize,
    n_im: usize,
    cells: Vec<u32>,
}

impl ClassGrid {
    /// `(n_re, n_im)`
    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        (self.n_re, self.n_im)
    }

    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }
}

impl Index<(usize, usize)> for ClassGrid {
    type Output = u32;

    fn index(&self, (i, j): (usize, usize)) -> &u32 {
        assert!(i < self.n_re && j < self.n_im, "grid index out of bounds");
        &self.cells[i * self.n_im + j]
    }
}

/// Result of one classification run: the classes in discovery order and the
/// fully populated grid of ids into them.
#[derive(Clone, Debug, PartialEq)]
pub struct BasinMap<T: RealScalar> {
    classes: Vec<BasinClass<T>>,
    grid: ClassGrid,
}

impl<T: RealScalar> BasinMap<T> {
    /// All classes, ordered by first sighting during the row-major scan.
    /// Class ids index into this slice.
    #[must_use]
    pub fn classes(&self) -> &[BasinClass<T>] {
        &self.classes
    }

    #[must_use]
    pub fn grid(&self) -> &ClassGrid {
        &self.grid
    }

    /// The distinct roots found, in discovery order (divergence classes
    /// filtered out).
    #[must_use]
    pub fn roots(&self) -> Vec<Complex<T>> {
        self.classes
            .iter()
            .filter_map(|class| match class {
                BasinClass::Root(root) => Some(*root),
                BasinClass::Diverged => None,
            })
            .collect_vec()
    }

    /// The class of cell `(i, j)`.
    #[must_use]
    pub fn class(&self, i: usize, j: usize) -> &BasinClass<T> {
        &self.classes[self.grid[(i, j)] as usize]
    }
}

/// Insertion-ordered root interner; the index of first sighting is the class id.
struct RootRegistry<T: RealScalar> {
    classes: Vec<BasinClass<T>>,
}

impl<T: RealScalar> RootRegistry<T> {
    fn new() -> Self {
        Self { classes: Vec::new() }
    }

    fn intern(&mut self, class: BasinClass<T>) -> u32 {
        let id = self
            .classes
            .iter()
            .position(|known| *known == class)
            .unwrap_or_else(|| {
                self.classes.push(class);
                self.classes.len() - 1
            });
        u32::try_from(id).expect("more classes than u32 can index")
    }
}

/// Classify every sample of `region` by the root the robust iteration
/// converges to from it.
///
/// The derivative chain is built once up front, so a degenerate (constant)
/// function fails before any grid work begins. Per-cell failures never abort
/// the scan; they fold into [`BasinClass::Diverged`]. The scan is row-major
/// over the real axis, and the result is deterministic and idempotent for
/// identical inputs.
///
/// # Errors
/// [`DegenerateFunction`] if `poly` is constant.
pub fn classify<T: RealScalar>(
    poly: &crate::Poly<T>,
    region: Region<T>,
    grid: GridSize,
    config: &BasinConfig<T>,
) -> Result<BasinMap<T>, DegenerateFunction> {
    classify_with_progress(poly, region, grid, config, |_| {})
}

/// Same as [`classify`], invoking `on_row` with the row index after each
/// completed row of the scan.
pub fn classify_with_progress<T: RealScalar>(
    poly: &crate::Poly<T>,
    region: Region<T>,
    grid: GridSize,
    config: &BasinConfig<T>,
    on_row: impl FnMut(usize),
) -> Result<BasinMap<T>, DegenerateFunction> {
    let chain = DerivativeChain::new(poly)?;
    let driver = |chain: &DerivativeChain<T>, x0| robust(chain, x0, config.max_iter, config.epsilon);
    Ok(classify_grid(&chain, region, grid, config, &driver, on_row))
}

/// The plain Newton counterpart of [`classify`], for comparison. Prefer a
/// tighter `epsilon` than the robust default here, since the increment
/// convergence test directly bounds the root error.
///
/// # Errors
/// [`DegenerateFunction`] if `poly` is constant.
pub fn classify_newton<T: RealScalar>(
    poly: &crate::Poly<T>,
    region: Region<T>,
    grid: GridSize,
    config: &BasinConfig<T>,
) -> Result<BasinMap<T>, DegenerateFunction> {
    let chain = DerivativeChain::new(poly)?;
    let driver = |chain: &DerivativeChain<T>, x0| newton(chain, x0, config.max_iter, config.epsilon);
    Ok(classify_grid(&chain, region, grid, config, &driver, |_| {}))
}

/// Parallel [`classify`]. Cells are classified independently on the rayon
/// pool (the per-cell iteration shares no mutable state), then class ids are
/// assigned in a sequential reduction over the finished cells in scan order,
/// so the hot loop stays lock-free and the output is identical to the
/// sequential classifier, ids included.
///
/// # Errors
/// [`DegenerateFunction`] if `poly` is constant.
pub fn classify_parallel<T: RealScalar>(
    poly: &crate::Poly<T>,
    region: Region<T>,
    grid: GridSize,
    config: &BasinConfig<T>,
) -> Result<BasinMap<T>, DegenerateFunction> {
    let chain = DerivativeChain::new(poly)?;
    assert!(
        grid.n_re > 0 && grid.n_im > 0,
        "grid must have at least one sample per axis"
    );
    let (max_iter, epsilon) = (config.max_iter, config.epsilon);
    let driver = move |chain: &DerivativeChain<T>, x0| robust(chain, x0, max_iter, epsilon);

    let outcomes: Vec<BasinClass<T>> = (0..grid.n_re)
        .into_par_iter()
        .flat_map_iter(|i| {
            let chain = &chain;
            let driver = &driver;
            (0..grid.n_im)
                .map(move |j| classify_cell(chain, region.sample(i, j, grid), config, driver))
        })
        .collect();

    let mut registry = RootRegistry::new();
    let cells = outcomes
        .into_iter()
        .map(|class| registry.intern(class))
        .collect_vec();
    log::debug!("{{classes: {}, cells: {}}}", registry.classes.len(), cells.len());
    Ok(BasinMap {
        classes: registry.classes,
        grid: ClassGrid {
            n_re: grid.n_re,
            n_im: grid.n_im,
            cells,
        },
    })
}

fn classify_grid<T, D>(
    chain: &DerivativeChain<T>,
    region: Region<T>,
    grid: GridSize,
    config: &BasinConfig<T>,
    driver: &D,
    mut on_row: impl FnMut(usize),
) -> BasinMap<T>
where
    T: RealScalar,
    D: Fn(&DerivativeChain<T>, Complex<T>) -> Result<(usize, Complex<T>), Error<T>>,
{
    assert!(
        grid.n_re > 0 && grid.n_im > 0,
        "grid must have at least one sample per axis"
    );
    let mut registry = RootRegistry::new();
    let mut cells = Vec::with_capacity(grid.n_re * grid.n_im);
    for i in 0..grid.n_re {
        for j in 0..grid.n_im {
            let class = classify_cell(chain, region.sample(i, j, grid), config, driver);
            cells.push(registry.intern(class));
        }
        on_row(i);
        log::trace!("classified row {i}");
    }
    log::debug!("{{classes: {}, cells: {}}}", registry.classes.len(), cells.len());
    BasinMap {
        classes: registry.classes,
        grid: ClassGrid {
            n_re: grid.n_re,
            n_im: grid.n_im,
            cells,
        },
    }
}

fn classify_cell<T, D>(
    chain: &DerivativeChain<T>,
    x0: Complex<T>,
    config: &BasinConfig<T>,
    driver: &D,
) -> BasinClass<T>
where
    T: RealScalar,
    D: Fn(&DerivativeChain<T>, Complex<T>) -> Result<(usize, Complex<T>), Error<T>>,
{
    match driver(chain, c_round(x0, config.decimals)) {
        Ok((_, root)) => {
            let root = c_round(root, config.decimals);
            // NaN never compares equal, so a non-finite result would leak a
            // fresh class per cell; fold it into the divergence class instead
            if c_is_finite(root) {
                BasinClass::Root(root)
            } else {
                BasinClass::Diverged
            }
        }
        Err(_) => BasinClass::Diverged,
    }
}
