use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::error::{RbmError, Result};
use crate::math::matrix::Matrix;
use crate::rbm::rbm::Rbm;
use crate::train::batches::batch_ranges;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `rbm` with one-step contrastive divergence for `config.epochs`
/// epochs and returns the mean reconstruction error of the **last completed
/// epoch**.
///
/// # Arguments
/// - `rbm`    — mutable reference to the model; modified in place
/// - `data`   — training samples, each a `Vec<f64>` of length `n_visible`
/// - `config` — epochs, shuffling, optional progress channel, optional stop flag
///
/// # Errors
/// Everything is validated before the first update, so an error never leaves
/// the model partially trained:
/// - `InvalidArgument` if `epochs == 0` or `data` is empty
/// - `ShapeMismatch` if any sample length differs from `n_visible`
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop(rbm: &mut Rbm, data: &[Vec<f64>], config: &TrainConfig) -> Result<f64> {
    if config.epochs == 0 {
        return Err(RbmError::InvalidArgument("epochs must be at least 1".into()));
    }
    if data.is_empty() {
        return Err(RbmError::InvalidArgument("training data must not be empty".into()));
    }
    if let Some((i, sample)) = data.iter().enumerate().find(|(_, s)| s.len() != rbm.n_visible) {
        return Err(RbmError::shape(format!("sample {}", i), rbm.n_visible, sample.len()));
    }

    let dataset = Matrix::from_rows(data)?;
    let mut indices: Vec<usize> = (0..data.len()).collect();
    let mut scratch: Option<Gradients> = None;
    let mut last_error = 0.0;

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();

        if config.shuffle {
            rbm.backend.shuffle(&mut indices);
        }

        // ── One full pass over the training data ───────────────────────────
        let mut squared_error = 0.0;
        let mut batches = 0;
        for range in batch_ranges(data.len(), rbm.batch_size) {
            let batch = if config.shuffle {
                let rows: Vec<Vec<f64>> = indices[range].iter().map(|&i| data[i].clone()).collect();
                Matrix { rows: rows.len(), cols: rbm.n_visible, data: rows }
            } else {
                dataset.slice_rows(range.start, range.end)
            };

            let mut grads = match scratch.take() {
                Some(mut g) => {
                    g.reset();
                    g
                }
                None => Gradients::zeros(rbm.n_visible, rbm.n_hidden),
            };

            squared_error += contrastive_divergence(rbm, &batch, &mut grads);
            batches += 1;

            if rbm.backend.retain_buffers() {
                scratch = Some(grads);
            }
        }
        last_error = squared_error / (data.len() * rbm.n_visible) as f64;

        // ── Emit progress ─────────────────────────────────────────────────
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            reconstruction_error: last_error,
            batches,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last_error)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
}

/// Summed (not yet averaged) CD statistics for one batch.
struct Gradients {
    weights: Matrix,
    visible: Vec<f64>,
    hidden: Vec<f64>,
}

impl Gradients {
    fn zeros(n_visible: usize, n_hidden: usize) -> Gradients {
        Gradients {
            weights: Matrix::zeros(n_visible, n_hidden),
            visible: vec![0.0; n_visible],
            hidden: vec![0.0; n_hidden],
        }
    }

    fn reset(&mut self) {
        self.weights.data.iter_mut().flatten().for_each(|x| *x = 0.0);
        self.visible.iter_mut().for_each(|x| *x = 0.0);
        self.hidden.iter_mut().for_each(|x| *x = 0.0);
    }
}

/// One CD-1 update on `visible`. Returns the summed squared reconstruction
/// error of the batch.
///
/// All statistics are accumulated before any parameter is written, so the
/// update commits as a whole.
fn contrastive_divergence(rbm: &mut Rbm, visible: &Matrix, grads: &mut Gradients) -> f64 {
    // Positive phase.
    let hidden_pos = rbm.backend.logistic_affine(visible, &rbm.weights, &rbm.hidden_bias);
    let hidden_sample = rbm.backend.bernoulli(&hidden_pos);

    // Negative phase: reconstruct from the sampled hidden state.
    let visible_neg = rbm.backend.logistic_affine_bt(&hidden_sample, &rbm.weights, &rbm.visible_bias);
    let hidden_neg = rbm.backend.logistic_affine(&visible_neg, &rbm.weights, &rbm.hidden_bias);

    let mut squared_error = 0.0;
    for r in 0..visible.rows {
        let (v_pos, v_neg) = (visible.row(r), visible_neg.row(r));
        let (h_pos, h_neg) = (hidden_pos.row(r), hidden_neg.row(r));

        for i in 0..rbm.n_visible {
            let w_row = &mut grads.weights.data[i];
            for j in 0..rbm.n_hidden {
                w_row[j] += v_pos[i] * h_pos[j] - v_neg[i] * h_neg[j];
            }
            let diff = v_pos[i] - v_neg[i];
            grads.visible[i] += diff;
            squared_error += diff * diff;
        }
        for j in 0..rbm.n_hidden {
            grads.hidden[j] += h_pos[j] - h_neg[j];
        }
    }

    // Commit.
    let precision = rbm.backend.precision();
    let scale = rbm.step / visible.rows as f64;
    for (w_row, g_row) in rbm.weights.data.iter_mut().zip(grads.weights.data.iter()) {
        for (w, g) in w_row.iter_mut().zip(g_row.iter()) {
            *w = precision.quantize(*w + scale * g);
        }
    }
    for (b, g) in rbm.visible_bias.iter_mut().zip(grads.visible.iter()) {
        *b = precision.quantize(*b + scale * g);
    }
    for (c, g) in rbm.hidden_bias.iter_mut().zip(grads.hidden.iter()) {
        *c = precision.quantize(*c + scale * g);
    }

    squared_error
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    use crate::env::Environment;
    use crate::rbm::RbmConfig;

    fn data() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 0.0, 1.0, 0.0],
            vec![1.0, 0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 1.0, 0.0],
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 0.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0],
        ]
    }

    fn rbm(batch_size: usize, env: &Environment) -> Rbm {
        Rbm::new(RbmConfig::new(4, 1).batch_size(batch_size), env).unwrap()
    }

    fn seeded() -> Environment {
        let mut env = Environment::new();
        env.make_reproducible(0);
        env
    }

    #[test]
    fn reports_one_stat_per_epoch_with_partial_batches() {
        let mut model = rbm(7, &seeded());
        let (tx, rx) = mpsc::channel();
        train_loop(&mut model, &data(), &TrainConfig::new(3).with_progress(tx)).unwrap();

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 3);
        assert!(stats.iter().all(|s| s.batches == 2 && s.total_epochs == 3));
        assert_eq!(stats.last().unwrap().epoch, 3);
    }

    #[test]
    fn stop_flag_prevents_any_update() {
        let mut model = rbm(7, &seeded());
        let before = model.weights().clone();
        let flag = Arc::new(AtomicBool::new(true));
        train_loop(&mut model, &data(), &TrainConfig::new(5).with_stop_flag(flag)).unwrap();
        assert_eq!(model.weights(), &before);
    }

    #[test]
    fn dropped_receiver_stops_after_first_epoch() {
        let mut model = rbm(10, &seeded());
        let (tx, rx) = mpsc::channel();
        drop(rx);
        // One epoch runs, then the send fails.
        assert!(train_loop(&mut model, &data(), &TrainConfig::new(50).with_progress(tx)).is_ok());
    }

    #[test]
    fn retained_buffers_do_not_change_results() {
        let mut sandbox = seeded();
        sandbox.enable_sandbox_mode();
        let mut a = rbm(3, &seeded());
        let mut b = rbm(3, &sandbox);
        train_loop(&mut a, &data(), &TrainConfig::new(20)).unwrap();
        train_loop(&mut b, &data(), &TrainConfig::new(20)).unwrap();
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.hidden_bias(), b.hidden_bias());
    }

    #[test]
    fn shuffled_training_is_reproducible() {
        let mut a = rbm(3, &seeded());
        let mut b = rbm(3, &seeded());
        train_loop(&mut a, &data(), &TrainConfig::new(10).shuffled()).unwrap();
        train_loop(&mut b, &data(), &TrainConfig::new(10).shuffled()).unwrap();
        assert_eq!(a.weights(), b.weights());
    }

    #[test]
    fn validation_happens_before_any_update() {
        let mut model = rbm(2, &seeded());
        let before = model.weights().clone();
        let mut bad = data();
        bad[9] = vec![1.0, 0.0];

        let err = train_loop(&mut model, &bad, &TrainConfig::new(1)).unwrap_err();
        assert!(matches!(err, RbmError::ShapeMismatch { expected: 4, found: 2, .. }));
        assert_eq!(model.weights(), &before);
    }
}
