use log::debug;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::network::network::Network;

/// Trained parameters of one non-input layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    /// One bias per neuron.
    pub biases: Vec<f64>,
    /// `weights[n][s]`: weight of the edge from neuron `s` of the previous
    /// layer into neuron `n`.
    pub weights: Vec<Vec<f64>>,
}

/// Everything needed to rebuild a network with identical forward behaviour.
///
/// `layers` has one entry per layer after the input layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub layer_sizes: Vec<usize>,
    pub activation: ActivationFunction,
    pub learning_rate: f64,
    pub layers: Vec<LayerParams>,
}

impl Network {
    /// Captures topology, activation, learning rate and every parameter.
    ///
    /// Fails with `UnserializableActivation` for `Custom` activations.
    pub fn snapshot(&self) -> Result<NetworkSnapshot> {
        if self.activation.is_custom() {
            return Err(NetworkError::UnserializableActivation(self.activation.name()));
        }

        let layers: Vec<LayerParams> = self.layers[1..]
            .iter()
            .map(|layer| {
                let neurons: Vec<_> = layer.neurons().iter().map(|id| &self.neurons[id.0]).collect();
                LayerParams {
                    biases: neurons.iter().map(|n| n.bias).collect(),
                    weights: neurons
                        .iter()
                        .map(|n| n.incoming.iter().map(|sid| self.synapses[sid.0].weight).collect::<Vec<f64>>())
                        .collect(),
                }
            })
            .collect();

        Ok(NetworkSnapshot {
            layer_sizes: self.layer_sizes(),
            activation: self.activation,
            learning_rate: self.learning_rate,
            layers,
        })
    }

    /// Rebuilds a network from a snapshot.  Caches start zeroed, as after
    /// construction.
    ///
    /// # Errors
    /// `InvalidTopology` / `InvalidLearningRate` as for construction, and
    /// `CorruptSnapshot` if any parameter shape disagrees with `layer_sizes`.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Network> {
        let mut network = Network::build(
            &snapshot.layer_sizes,
            snapshot.activation,
            snapshot.learning_rate,
            || 0.0,
        )?;
        check_shapes(snapshot)?;

        for (layer, params) in network.layers[1..].iter().zip(&snapshot.layers) {
            for (n, id) in layer.neurons().iter().enumerate() {
                let neuron = &mut network.neurons[id.0];
                neuron.bias = params.biases[n];
                for (sid, &weight) in neuron.incoming.iter().zip(&params.weights[n]) {
                    network.synapses[sid.0].weight = weight;
                }
            }
        }
        Ok(network)
    }

    /// Serializes the network to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot()?)?)
    }

    pub fn from_json(json: &str) -> Result<Network> {
        let snapshot: NetworkSnapshot = serde_json::from_str(json)?;
        Network::from_snapshot(&snapshot)
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let snapshot = self.snapshot()?;
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &snapshot)?;
        debug!("saved network to {path}");
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let snapshot: NetworkSnapshot = serde_json::from_reader(reader)?;
        debug!("loaded network from {path}");
        Network::from_snapshot(&snapshot)
    }
}

fn check_shapes(snapshot: &NetworkSnapshot) -> Result<()> {
    let sizes = &snapshot.layer_sizes;
    if snapshot.layers.len() != sizes.len() - 1 {
        return Err(NetworkError::CorruptSnapshot(format!(
            "{} parameter layers for {} layers",
            snapshot.layers.len(),
            sizes.len()
        )));
    }
    for (l, params) in snapshot.layers.iter().enumerate() {
        let (fan_in, size) = (sizes[l], sizes[l + 1]);
        if params.biases.len() != size || params.weights.len() != size {
            return Err(NetworkError::CorruptSnapshot(format!(
                "layer {} expects {size} neurons",
                l + 1
            )));
        }
        if let Some(n) = params.weights.iter().position(|w| w.len() != fan_in) {
            return Err(NetworkError::CorruptSnapshot(format!(
                "neuron {n} of layer {} expects {fan_in} weights",
                l + 1
            )));
        }
    }
    Ok(())
}
