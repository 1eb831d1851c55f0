pub mod layer;
pub mod neuron;
pub mod synapse;

pub use layer::Layer;
pub use neuron::{Neuron, NeuronId};
pub use synapse::{Synapse, SynapseId};
