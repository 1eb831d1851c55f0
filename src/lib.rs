pub mod error;
pub mod activation;
pub mod layers;
pub mod network;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use activation::activation::{numeric_derivative, ActivationFunction, CustomActivation};
pub use layers::{Layer, Neuron, NeuronId, Synapse, SynapseId};
pub use network::network::Network;
pub use network::snapshot::{LayerParams, NetworkSnapshot};
pub use network::spec::NetworkSpec;
pub use train::{evaluate, train_loop, train_network, EpochStats, TrainConfig};
