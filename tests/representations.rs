use nalgebra::DMatrix;
use ndarray::Array2;
use num_complex::Complex64;
use qchannels::utils::{
    DEFAULT_TOLERANCE, hermitian_eigenvalues, is_hermitian, is_positive_semidefinite, max_abs_diff,
    trace,
};
use qchannels::{
    QuantumChannel, choi_to_transfer, compose_in_series, kraus_to_choi, swap_last_two_subsystems,
    transfer_to_choi,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Array2<Complex64> {
    Array2::from_shape_fn((rows, cols), |_| {
        Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
    })
}

/// First `cols` columns of a random unitary, an isometry from `cols` to `rows`.
fn random_isometry(rng: &mut StdRng, rows: usize, cols: usize) -> Array2<Complex64> {
    let m = random_matrix(rng, rows, rows);
    let q = DMatrix::from_fn(rows, rows, |r, c| m[[r, c]]).qr().q();
    Array2::from_shape_fn((rows, cols), |(r, c)| q[(r, c)])
}

#[test]
fn choi_transfer_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..20 {
        let da = rng.random_range(1..=4);
        let db = rng.random_range(1..=4);
        let j = random_matrix(&mut rng, da * db, da * db);

        let t = choi_to_transfer(&j, da, db).unwrap();
        assert_eq!(t.dim(), (db * db, da * da));

        let back = transfer_to_choi(&t, da, db).unwrap();
        assert_eq!(back, j);
    }
}

#[test]
fn swap_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..10 {
        let da = rng.random_range(1..=3);
        let db = rng.random_range(1..=3);
        let d = da * db * db;
        let rho = random_matrix(&mut rng, d, d);

        let once = swap_last_two_subsystems(&rho, da, db).unwrap();
        let twice = swap_last_two_subsystems(&once, da, db).unwrap();
        assert_eq!(twice, rho);
    }
}

#[test]
fn choi_matrices_are_positive_semidefinite() {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..10 {
        let dc = rng.random_range(1..=4);
        let db = rng.random_range(1..=3);
        let da = rng.random_range(1..=3);
        let ops: Vec<_> = (0..dc).map(|_| random_matrix(&mut rng, db, da)).collect();

        let (cj_ba, cj_ca) = kraus_to_choi(&ops).unwrap();
        assert_eq!(cj_ba.dim(), (db * da, db * da));
        assert_eq!(cj_ca.dim(), (dc * da, dc * da));

        for cj in [&cj_ba, &cj_ca] {
            assert!(is_hermitian(cj, 1e-12));
            assert!(is_positive_semidefinite(cj, 1e-9));
        }

        // Both traces equal sum_i ||K_i||_F^2
        let frob: f64 = ops.iter().flat_map(|k| k.iter()).map(|x| x.norm_sqr()).sum();
        assert!((trace(&cj_ba).re - frob).abs() < 1e-9);
        assert!((trace(&cj_ca).re - frob).abs() < 1e-9);
    }
}

#[test]
fn identity_channel_choi_matrices() {
    let (cj_ba, cj_ca) = kraus_to_choi(&[Array2::eye(2)]).unwrap();

    let eigs = hermitian_eigenvalues(&cj_ba);
    let rank = eigs.iter().filter(|v| v.abs() > DEFAULT_TOLERANCE).count();
    assert_eq!(rank, 1);
    assert!((trace(&cj_ba).re - 2.0).abs() < 1e-12);

    assert_eq!(cj_ca, Array2::<Complex64>::eye(2));
}

#[test]
fn series_composition_of_isometries() {
    let mut rng = StdRng::seed_from_u64(42);
    let (da, db, dc) = (2, 3, 4);

    let v1 = random_isometry(&mut rng, db, da);
    let v2 = random_isometry(&mut rng, dc, db);

    let (cj1, _) = kraus_to_choi(&[v1.clone()]).unwrap();
    let (cj2, _) = kraus_to_choi(&[v2.clone()]).unwrap();
    let (direct, _) = kraus_to_choi(&[v2.dot(&v1)]).unwrap();

    let composed = compose_in_series(&cj1, &cj2, da, db, dc).unwrap();
    assert_eq!(composed.dim(), (dc * da, dc * da));
    assert!(max_abs_diff(&composed, &direct) < 1e-12);
}

#[test]
fn series_composition_of_unitaries() {
    let mut rng = StdRng::seed_from_u64(3);

    for n in 1..=4 {
        let u1 = random_isometry(&mut rng, n, n);
        let u2 = random_isometry(&mut rng, n, n);

        let (cj1, _) = kraus_to_choi(&[u1.clone()]).unwrap();
        let (cj2, _) = kraus_to_choi(&[u2.clone()]).unwrap();
        let (direct, _) = kraus_to_choi(&[u2.dot(&u1)]).unwrap();

        let composed = compose_in_series(&cj1, &cj2, n, n, n).unwrap();
        assert!(max_abs_diff(&composed, &direct) < 1e-12);
    }
}

#[test]
fn series_composition_matches_kraus_composition() {
    let first = QuantumChannel::amplitude_damping(0.35).unwrap();
    let second = QuantumChannel::erasure(0.2).unwrap();

    let (cj1, _) = first.choi_matrices().unwrap();
    let (cj2, _) = second.choi_matrices().unwrap();
    let (direct, _) = first.compose(&second).unwrap().choi_matrices().unwrap();

    let composed = compose_in_series(&cj1, &cj2, 2, 2, 3).unwrap();
    assert!(max_abs_diff(&composed, &direct) < 1e-12);
}

#[test]
fn series_composition_is_associative() {
    let a = QuantumChannel::depolarizing(0.2).unwrap();
    let b = QuantumChannel::phase_damping(0.6).unwrap();
    let c = QuantumChannel::erasure(0.1).unwrap();

    let (ja, _) = a.choi_matrices().unwrap();
    let (jb, _) = b.choi_matrices().unwrap();
    let (jc, _) = c.choi_matrices().unwrap();

    let left = compose_in_series(&compose_in_series(&ja, &jb, 2, 2, 2).unwrap(), &jc, 2, 2, 3)
        .unwrap();
    let right = compose_in_series(&ja, &compose_in_series(&jb, &jc, 2, 2, 3).unwrap(), 2, 2, 3)
        .unwrap();
    assert!(max_abs_diff(&left, &right) < 1e-12);
}
