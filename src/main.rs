// Trains a 2-3-1 sigmoid network on XOR.  Set RUST_LOG=info to watch progress.
use synaptic_mlp::{train_loop, ActivationFunction, NetworkSpec, Result, TrainConfig};

fn main() -> Result<()> {
    env_logger::init();

    let spec = NetworkSpec::new("xor", vec![2, 3, 1], ActivationFunction::Sigmoid, 0.5);
    let mut network = spec.build()?;

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![
        vec![0.0],
        vec![1.0],
        vec![1.0],
        vec![0.0],
    ];

    let config = TrainConfig::new(20_000)
        .with_target_error(0.01)
        .with_log_every(1000);
    let error = train_loop(&mut network, &inputs, &targets, &config)?;
    println!("final epoch error = {error:.6}");

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.forward(input)?[0]);
    }
    Ok(())
}
