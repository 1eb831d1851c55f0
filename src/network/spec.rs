use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::network::network::Network;

/// A serializable description of a network before any training: its
/// topology, activation, learning rate and optional initialization seed.
///
/// Stored as JSON independently of trained weights, so architectures can be
/// kept and rebuilt reproducibly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the model file stem.
    pub name: String,
    /// Neurons per layer, input layer first.
    pub layer_sizes: Vec<usize>,
    pub activation: ActivationFunction,
    pub learning_rate: f64,
    /// When set, `build` is deterministic.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    pub fn new(
        name: impl Into<String>,
        layer_sizes: Vec<usize>,
        activation: ActivationFunction,
        learning_rate: f64,
    ) -> NetworkSpec {
        NetworkSpec {
            name: name.into(),
            layer_sizes,
            activation,
            learning_rate,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> NetworkSpec {
        self.seed = Some(seed);
        self
    }

    /// Constructs a freshly initialized network from this description.
    pub fn build(&self) -> Result<Network> {
        match self.seed {
            Some(seed) => Network::with_seed(&self.layer_sizes, self.activation, self.learning_rate, seed),
            None => Network::new(&self.layer_sizes, self.activation, self.learning_rate),
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
