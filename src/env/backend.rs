use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::activation::sigmoid;
use crate::env::environment::{Environment, KernelMode, Precision};
use crate::math::matrix::Matrix;

/// Numeric backend built from an `Environment`: matrix kernels, precision
/// control and three independent RNG streams.
///
/// - `general`  — batch shuffling
/// - `array`    — weight initialisation
/// - `sampling` — Bernoulli draws during training and Gibbs sampling
#[derive(Debug, Clone)]
pub struct Backend {
    kernel: KernelMode,
    precision: Precision,
    retain_buffers: bool,
    general: StdRng,
    array: StdRng,
    sampling: StdRng,
}

impl Backend {
    pub fn new(env: &Environment) -> Backend {
        let stream = || match env.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Backend {
            kernel: env.kernel,
            precision: env.precision,
            retain_buffers: env.retain_buffers,
            general: stream(),
            array: stream(),
            sampling: stream(),
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn retain_buffers(&self) -> bool {
        self.retain_buffers
    }

    /// `a · b` using the configured kernel.
    pub fn matmul(&self, a: &Matrix, b: &Matrix) -> Matrix {
        match self.kernel {
            KernelMode::Direct => a.dot(b),
            KernelMode::Transposed => a.dot_transposed(&b.transpose()),
        }
    }

    /// `a · bᵀ`.
    pub fn matmul_bt(&self, a: &Matrix, b: &Matrix) -> Matrix {
        a.dot_transposed(b)
    }

    /// σ(x · w + bias), rounded to the configured precision.
    pub fn logistic_affine(&self, x: &Matrix, w: &Matrix, bias: &[f64]) -> Matrix {
        self.quantize(&self.matmul(x, w).add_row_vector(bias).map(sigmoid))
    }

    /// σ(x · wᵀ + bias), rounded to the configured precision.
    pub fn logistic_affine_bt(&self, x: &Matrix, w: &Matrix, bias: &[f64]) -> Matrix {
        self.quantize(&self.matmul_bt(x, w).add_row_vector(bias).map(sigmoid))
    }

    pub fn quantize(&self, m: &Matrix) -> Matrix {
        match self.precision {
            Precision::Double => m.clone(),
            Precision::Single => m.map(|x| Precision::Single.quantize(x)),
        }
    }

    /// Gaussian noise with standard deviation `std_dev` from the array stream.
    pub fn gaussian(&mut self, rows: usize, cols: usize, std_dev: f64) -> Matrix {
        let m = Matrix::gaussian(rows, cols, std_dev, &mut self.array);
        self.quantize(&m)
    }

    /// Xavier-scaled Gaussian noise from the array stream.
    pub fn xavier(&mut self, rows: usize, cols: usize) -> Matrix {
        let m = Matrix::xavier(rows, cols, &mut self.array);
        self.quantize(&m)
    }

    /// Draws a binary state where each entry is 1 with probability equal to
    /// the corresponding entry of `probabilities`.
    pub fn bernoulli(&mut self, probabilities: &Matrix) -> Matrix {
        let rng = &mut self.sampling;
        let data = probabilities.data.iter()
            .map(|row| {
                row.iter()
                    .map(|&p| if rng.gen::<f64>() < p { 1.0 } else { 0.0 })
                    .collect()
            })
            .collect();
        Matrix { rows: probabilities.rows, cols: probabilities.cols, data }
    }

    /// Shuffles `indices` in place using the general stream.
    pub fn shuffle(&mut self, indices: &mut [usize]) {
        indices.shuffle(&mut self.general);
    }
}
