use newton_basins::{
    classify, classify_newton, classify_parallel, classify_with_progress, complex, poly,
    BasinConfig, DerivativeChain, GridSize, Region,
};

/// The concrete scenario from the method's home turf: x^3 - 2x + 2 is the
/// classic function where plain Newton cycles, while the robust iteration
/// still classifies the whole grid.
#[test]
fn robust_scenario_cubic_with_newton_cycle() {
    let p = poly![2.0, -2.0, 0.0, 1.0];
    let region = Region::new(-2.0, 2.0, -2.0, 2.0);
    let grid = GridSize { n_re: 50, n_im: 50 };
    let config = BasinConfig::default();

    let map = classify(&p, region, grid, &config).unwrap();

    // grid fully populated with valid ids
    assert_eq!(map.grid().cells().len(), 50 * 50);
    let class_count = map.classes().len() as u32;
    assert!(map.grid().cells().iter().all(|&id| id < class_count));

    // all three roots of x^3 - 2x + 2 show up as classes
    let expected = [
        complex!(-1.769_292_354_238_631_4, 0.0),
        complex!(0.884_646_177_119_315_7, 0.589_742_805_022_205_8),
        complex!(0.884_646_177_119_315_7, -0.589_742_805_022_205_8),
    ];
    let roots = map.roots();
    assert!(roots.len() >= 3);
    for root in expected {
        assert!(
            roots.iter().any(|r| (*r - root).norm() < 2E-3),
            "missing root {root}, found {roots:?}"
        );
    }
}

/// Running the classifier twice with identical parameters must yield
/// bit-identical maps.
#[test]
fn classification_is_idempotent() {
    let p = poly![2.0, -2.0, 0.0, 1.0];
    let region = Region::new(-2.0, 2.0, -2.0, 2.0);
    let grid = GridSize { n_re: 20, n_im: 20 };
    let config = BasinConfig::default();

    let first = classify(&p, region, grid, &config).unwrap();
    let second = classify(&p, region, grid, &config).unwrap();
    assert_eq!(first, second);
}

/// The two-phase parallel classifier must agree with the sequential one
/// exactly, class ids included.
#[test]
fn parallel_matches_sequential() {
    let p = poly![-1.0, 0.0, 0.0, 1.0];
    let region = Region::new(-2.0, 2.0, -2.0, 2.0);
    let grid = GridSize { n_re: 16, n_im: 12 };
    let config = BasinConfig::default();

    let sequential = classify(&p, region, grid, &config).unwrap();
    let parallel = classify_parallel(&p, region, grid, &config).unwrap();
    assert_eq!(sequential, parallel);
}

/// Both drivers agree on x^3 - 3x from 2 + 0i: the root is √3.
#[test]
fn both_drivers_find_sqrt_three() {
    let p = poly![0.0, -3.0, 0.0, 1.0];
    let chain = DerivativeChain::new(&p).unwrap();
    let sqrt3 = complex!(3.0_f64.sqrt());

    let (_, root) = newton_basins::robust(&chain, complex!(2.0), 500, 1E-3).unwrap();
    assert!((root - sqrt3).norm() < 1E-3, "{root}");

    let (_, root) = newton_basins::newton(&chain, complex!(2.0), 500, 1E-8).unwrap();
    assert!((root - sqrt3).norm() < 1E-6, "{root}");
}

#[test]
fn progress_callback_reports_every_row() {
    let p = poly![-1.0, 0.0, 0.0, 1.0];
    let mut rows = Vec::new();
    classify_with_progress(
        &p,
        Region::new(-1.0, 1.0, -1.0, 1.0),
        GridSize { n_re: 5, n_im: 4 },
        &BasinConfig::default(),
        |i| rows.push(i),
    )
    .unwrap();
    assert_eq!(rows, vec![0, 1, 2, 3, 4]);
}

/// Random starting points: whatever a driver converges to must actually be
/// near a root of the polynomial.
#[test]
fn random_starts_land_on_roots() {
    let roots = [
        complex!(1.0, 0.0),
        complex!(-0.5, 0.75_f64.sqrt()),
        complex!(-0.5, -0.75_f64.sqrt()),
    ];
    let p = poly![-1.0, 0.0, 0.0, 1.0];
    let chain = DerivativeChain::new(&p).unwrap();
    let mut rng = fastrand::Rng::with_seed(7);

    for _ in 0..50 {
        let x0 = complex!(rng.f64() * 4.0 - 2.0, rng.f64() * 4.0 - 2.0);
        if let Ok((_, root)) = newton_basins::newton(&chain, x0, 500, 1E-10) {
            assert!(
                roots.iter().any(|r| (*r - root).norm() < 1E-6),
                "{x0} -> {root}"
            );
        }
    }
}

/// The robust and plain classifiers have the same shape; on a polynomial
/// without Newton pathologies in the sampled region they find the same roots.
#[test]
fn classifiers_agree_on_root_set() {
    let p = poly![-6.0, 11.0, -6.0, 1.0]; // (x-1)(x-2)(x-3)
    let region = Region::new(0.5, 3.5, -0.5, 0.5);
    let grid = GridSize { n_re: 10, n_im: 10 };

    let robust_map = classify(
        &p,
        region,
        grid,
        &BasinConfig {
            max_iter: 2000,
            epsilon: 1E-9,
            decimals: 3,
        },
    )
    .unwrap();
    let newton_map = classify_newton(
        &p,
        region,
        grid,
        &BasinConfig {
            max_iter: 500,
            epsilon: 1E-10,
            decimals: 3,
        },
    )
    .unwrap();

    let mut robust_roots = robust_map.roots();
    let mut newton_roots = newton_map.roots();
    robust_roots.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap());
    newton_roots.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap());
    assert_eq!(robust_roots, newton_roots);
}
