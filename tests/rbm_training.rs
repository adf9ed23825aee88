mod common;

use std::sync::mpsc;

use common::{cluster_data, cluster_matrix, seeded};
use ferrite_rbm::{train_loop, Environment, Matrix, Rbm, RbmConfig, RbmError, TrainConfig};

#[test]
fn training_separates_the_two_clusters() {
    let mut rbm = Rbm::new(RbmConfig::new(4, 1), &seeded(0)).unwrap();
    rbm.train(&cluster_data(), 100).unwrap();

    let hidden = rbm.visible_to_hidden(&cluster_matrix()).unwrap();
    let output: Vec<f64> = hidden.data.iter().map(|h| h[0]).collect();

    // Which cluster maps to 1 depends on the initial weights.
    let a = output[0].round();
    assert!(output[..4].iter().all(|h| h.round() == a), "{:?}", output);
    assert!(output[4..].iter().all(|h| h.round() == 1.0 - a), "{:?}", output);

    // A typical sample sits further from the decision boundary than the
    // incomplete one of the same cluster.
    if a == 0.0 {
        assert!(output[0] < output[2], "{:?}", output);
        assert!(output[4] > output[5], "{:?}", output);
    } else {
        assert!(output[0] > output[2], "{:?}", output);
        assert!(output[4] < output[5], "{:?}", output);
    }
}

#[test]
fn reconstruction_error_drops_with_training() {
    let mut rbm = Rbm::new(RbmConfig::new(4, 2).step(0.1).batch_size(2), &seeded(3)).unwrap();
    let before = rbm.reconstruction_error(&cluster_matrix()).unwrap();
    rbm.train(&cluster_data(), 300).unwrap();
    let after = rbm.reconstruction_error(&cluster_matrix()).unwrap();
    assert!(after < before, "{} >= {}", after, before);
}

#[test]
fn uneven_batches_process_every_sample() {
    let data = cluster_data();
    assert_ne!(data.len() % 7, 0);

    let mut rbm = Rbm::new(RbmConfig::new(4, 1).batch_size(7), &seeded(0)).unwrap();
    let (tx, rx) = mpsc::channel();
    train_loop(&mut rbm, &data, &TrainConfig::new(2).with_progress(tx)).unwrap();

    let batches: Vec<usize> = rx.iter().map(|s| s.batches).collect();
    assert_eq!(batches, vec![2, 2]);
}

#[test]
fn same_seed_gives_identical_trajectories() {
    let run = |seed| {
        let mut rbm = Rbm::new(RbmConfig::new(4, 2).batch_size(3), &seeded(seed)).unwrap();
        rbm.train(&cluster_data(), 25).unwrap();
        rbm
    };

    let (a, b) = (run(11), run(11));
    assert_eq!(a.weights(), b.weights());
    assert_eq!(a.visible_bias(), b.visible_bias());
    assert_eq!(a.hidden_bias(), b.hidden_bias());

    let c = run(12);
    assert_ne!(a.weights(), c.weights());
}

#[test]
fn speed_mode_keeps_parameters_in_single_precision() {
    let mut env = seeded(0);
    env.enable_speed_mode();
    let mut rbm = Rbm::new(RbmConfig::new(4, 2), &env).unwrap();
    rbm.train(&cluster_data(), 10).unwrap();

    let single = |x: &f64| *x == *x as f32 as f64;
    assert!(rbm.weights().data.iter().flatten().all(single));
    assert!(rbm.visible_bias().iter().all(single));
    assert!(rbm.hidden_bias().iter().all(single));
}

#[test]
fn wrong_sample_length_is_a_shape_mismatch() {
    let mut rbm = Rbm::new(RbmConfig::new(4, 1), &seeded(0)).unwrap();
    let mut data = cluster_data();
    data[4].push(1.0);

    match rbm.train(&data, 1) {
        Err(RbmError::ShapeMismatch { expected, found, .. }) => assert_eq!((expected, found), (4, 5)),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn zero_epochs_and_empty_data_are_invalid() {
    let mut rbm = Rbm::new(RbmConfig::new(4, 1), &seeded(0)).unwrap();
    assert!(matches!(rbm.train(&cluster_data(), 0), Err(RbmError::InvalidArgument(_))));
    assert!(matches!(rbm.train(&[], 5), Err(RbmError::InvalidArgument(_))));
}

#[test]
fn invalid_hyperparameters_fail_construction() {
    let env = Environment::new();
    for config in [
        RbmConfig::new(0, 1),
        RbmConfig::new(4, 0),
        RbmConfig::new(4, 1).step(0.0),
        RbmConfig::new(4, 1).step(-0.1),
    ] {
        assert!(matches!(Rbm::new(config, &env), Err(RbmError::Configuration(_))));
    }
}

#[test]
fn fresh_model_maps_zeros_to_sigmoid_of_hidden_bias() {
    for (n_visible, n_hidden) in [(1, 1), (4, 3), (9, 2)] {
        let rbm = Rbm::new(RbmConfig::new(n_visible, n_hidden), &seeded(0)).unwrap();
        let zeros = Matrix::zeros(5, n_visible);
        let hidden = rbm.visible_to_hidden(&zeros).unwrap();
        assert!(hidden.data.iter().flatten().all(|&h| h == 0.5));
    }

    let hidden_bias = vec![-1.0, 0.0, 2.5];
    let rbm = Rbm::from_parts(
        RbmConfig::new(2, 3),
        Matrix::from_rows(&[vec![0.3, -0.7, 1.1], vec![2.0, 0.1, -0.4]]).unwrap(),
        vec![0.0; 2],
        hidden_bias.clone(),
        &Environment::new(),
    )
    .unwrap();
    let hidden = rbm.visible_to_hidden(&Matrix::zeros(1, 2)).unwrap();
    for (h, c) in hidden.data[0].iter().zip(hidden_bias.iter()) {
        assert!((h - ferrite_rbm::activation::sigmoid(*c)).abs() < 1e-12);
    }
}
