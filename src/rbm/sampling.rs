use crate::activation::softplus;
use crate::error::{RbmError, Result};
use crate::math::matrix::Matrix;
use crate::rbm::rbm::Rbm;

impl Rbm {
    /// Hidden activation probabilities σ(V·W + c), one row per sample.
    ///
    /// Deterministic: returns expectations, not sampled states.
    pub fn visible_to_hidden(&self, visible: &Matrix) -> Result<Matrix> {
        Rbm::check_batch(visible, self.n_visible, "visible")?;
        Ok(self.backend.logistic_affine(visible, &self.weights, &self.hidden_bias))
    }

    /// Visible activation probabilities σ(H·Wᵀ + b), one row per sample.
    pub fn hidden_to_visible(&self, hidden: &Matrix) -> Result<Matrix> {
        Rbm::check_batch(hidden, self.n_hidden, "hidden")?;
        Ok(self.backend.logistic_affine_bt(hidden, &self.weights, &self.visible_bias))
    }

    /// Same as `visible_to_hidden`; the model's inference output.
    pub fn predict(&self, visible: &Matrix) -> Result<Matrix> {
        self.visible_to_hidden(visible)
    }

    /// `hidden_to_visible(visible_to_hidden(visible))`.
    pub fn reconstruct(&self, visible: &Matrix) -> Result<Matrix> {
        let hidden = self.visible_to_hidden(visible)?;
        self.hidden_to_visible(&hidden)
    }

    /// Mean squared difference between `visible` and its reconstruction.
    pub fn reconstruction_error(&self, visible: &Matrix) -> Result<f64> {
        let reconstructed = self.reconstruct(visible)?;
        let diff = visible - &reconstructed;
        let total: f64 = diff.data.iter().flatten().map(|d| d * d).sum();
        Ok(total / (visible.rows * visible.cols) as f64)
    }

    /// Runs `n_iter` rounds of block Gibbs sampling starting from `visible`
    /// and returns the final binary visible state.
    ///
    /// Each round samples h ~ p(h | v), then v ~ p(v | h). Draws come from the
    /// sampling stream, so results only repeat under an identical seed.
    pub fn gibbs_sampling(&mut self, visible: &Matrix, n_iter: usize) -> Result<Matrix> {
        if n_iter == 0 {
            return Err(RbmError::InvalidArgument("n_iter must be at least 1".into()));
        }
        Rbm::check_batch(visible, self.n_visible, "visible")?;

        let mut state = visible.clone();
        for _ in 0..n_iter {
            let hidden_proba = self.backend.logistic_affine(&state, &self.weights, &self.hidden_bias);
            let hidden = self.backend.bernoulli(&hidden_proba);
            let visible_proba = self.backend.logistic_affine_bt(&hidden, &self.weights, &self.visible_bias);
            state = self.backend.bernoulli(&visible_proba);
        }
        Ok(state)
    }

    /// Free energy of each sample:
    /// F(v) = -v·b - Σⱼ softplus((v·W + c)ⱼ).
    ///
    /// Lower means the model assigns the sample more probability. Only the
    /// ordering between samples is meaningful; the partition function is
    /// never computed.
    pub fn score(&self, visible: &Matrix) -> Result<Vec<f64>> {
        Rbm::check_batch(visible, self.n_visible, "visible")?;
        let pre_hidden = self.backend
            .matmul(visible, &self.weights)
            .add_row_vector(&self.hidden_bias);

        let energies = visible.data.iter()
            .zip(pre_hidden.data.iter())
            .map(|(v, x)| {
                let visible_term: f64 = v.iter().zip(self.visible_bias.iter()).map(|(v, b)| v * b).sum();
                let hidden_term: f64 = x.iter().map(|&x| softplus(x)).sum();
                self.backend.precision().quantize(-visible_term - hidden_term)
            })
            .collect();
        Ok(energies)
    }
}
