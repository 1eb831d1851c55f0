use log::trace;

use crate::error::{NetworkError, Result};
use crate::network::network::Network;

/// One online pass over the dataset: `train` on every sample, in order.
///
/// Returns the summed aggregate error of all samples, each measured on the
/// outputs of its own forward pass (before that sample's update).
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut total_error = 0.0;
    for (i, (input, target)) in inputs.iter().zip(targets).enumerate() {
        network.train(input, target)?;
        let error = network.total_error();
        trace!("sample {i}: error={error}");
        total_error += error;
    }
    Ok(total_error)
}

/// Summed error over the dataset without changing any weight (inference only).
pub fn evaluate(network: &mut Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut total_error = 0.0;
    for (input, target) in inputs.iter().zip(targets) {
        network.forward(input)?;
        total_error += network.compute_error(target)?;
    }
    Ok(total_error)
}

pub(crate) fn check_dataset(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.len() != targets.len() {
        return Err(NetworkError::DimensionMismatch {
            what: "targets (sample count)",
            expected: inputs.len(),
            got: targets.len(),
        });
    }
    Ok(())
}
