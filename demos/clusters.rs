use ferrite_rbm::{Environment, Matrix, Rbm, RbmConfig};

fn main() -> ferrite_rbm::Result<()> {
    let mut env = Environment::new();
    env.make_reproducible(0).enable_sandbox_mode();

    let data = vec![
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
    ];

    let mut rbm = Rbm::new(RbmConfig::new(4, 1).batch_size(1), &env)?;
    for round in 1..=5 {
        let error = rbm.train(&data, 100)?;
        println!("after {} epochs: reconstruction error = {:.6}", round * 100, error);
    }

    let batch = Matrix::from_rows(&data)?;
    let hidden = rbm.predict(&batch)?;
    let reconstructed = rbm.hidden_to_visible(&hidden)?;
    let energies = rbm.score(&batch)?;
    for i in 0..data.len() {
        println!(
            "{:?} -> h = {:.3}, reconstruction = {:.2?}, free energy = {:.3}",
            data[i], hidden.data[i][0], reconstructed.data[i], energies[i]
        );
    }

    let unknown = Matrix::from_rows(&[vec![0.0, 1.0, 0.0, 0.0]])?;
    println!("free energy of unseen [0, 1, 0, 0] = {:.3}", rbm.score(&unknown)?[0]);

    let samples = rbm.gibbs_sampling(&batch, 1)?;
    println!("one Gibbs step from the data: {:?}", samples.data);
    Ok(())
}
