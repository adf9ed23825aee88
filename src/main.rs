use std::sync::mpsc;

use ferrite_rbm::{train_loop, Environment, Matrix, Rbm, RbmConfig, TrainConfig};

// Trains a 4-2 RBM on two binary patterns and prints per-epoch progress.
// Pass a seed as the first argument for a reproducible run.
fn main() -> ferrite_rbm::Result<()> {
    let mut env = Environment::from_process_env();
    if let Some(seed) = std::env::args().nth(1).and_then(|s| s.parse().ok()) {
        env.make_reproducible(seed);
    }

    let data = vec![
        vec![1.0, 0.0, 1.0, 0.0],
        vec![1.0, 0.0, 1.0, 0.0],
        vec![0.0, 1.0, 0.0, 1.0],
        vec![0.0, 1.0, 0.0, 1.0],
    ];

    let mut rbm = Rbm::new(RbmConfig::new(4, 2).batch_size(2), &env)?;
    let (tx, rx) = mpsc::channel();
    train_loop(&mut rbm, &data, &TrainConfig::new(200).with_progress(tx))?;

    for stats in rx.iter().filter(|s| s.epoch % 50 == 0) {
        println!(
            "epoch {:>4}/{}: reconstruction error = {:.6} ({} ms)",
            stats.epoch, stats.total_epochs, stats.reconstruction_error, stats.elapsed_ms
        );
    }

    let hidden = rbm.visible_to_hidden(&Matrix::from_rows(&data)?)?;
    for (sample, h) in data.iter().zip(hidden.data.iter()) {
        println!("{:?} -> {:.4?}", sample, h);
    }
    Ok(())
}
