#![allow(dead_code)]

use ferrite_rbm::{Environment, Matrix};

/// Two clusters, `[1, 0, 1, 0]` and `[0, 1, 0, 1]`, each with one sample
/// missing a unit.
pub fn cluster_data() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 0.0, 1.0, 0.0],
        vec![1.0, 0.0, 1.0, 0.0],
        vec![1.0, 0.0, 0.0, 0.0], // incomplete
        vec![1.0, 0.0, 1.0, 0.0],
        vec![0.0, 1.0, 0.0, 1.0],
        vec![0.0, 0.0, 0.0, 1.0], // incomplete
        vec![0.0, 1.0, 0.0, 1.0],
        vec![0.0, 1.0, 0.0, 1.0],
        vec![0.0, 1.0, 0.0, 1.0],
        vec![0.0, 1.0, 0.0, 1.0],
    ]
}

pub fn cluster_matrix() -> Matrix {
    Matrix::from_rows(&cluster_data()).unwrap()
}

pub fn seeded(seed: u64) -> Environment {
    let mut env = Environment::new();
    env.make_reproducible(seed);
    env
}

pub fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
    assert_eq!((a.rows, a.cols), (b.rows, b.cols));
    for (x, y) in a.data.iter().flatten().zip(b.data.iter().flatten()) {
        assert!((x - y).abs() <= tol, "{} and {} differ by more than {}", x, y, tol);
    }
}
