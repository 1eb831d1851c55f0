use crate::layers::neuron::NeuronId;

/// Handle of a synapse inside a network's synapse arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SynapseId(pub(crate) usize);

impl SynapseId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Weighted edge from a neuron in layer i to a neuron in layer i + 1.
///
/// Both endpoints refer to it by `SynapseId`; the network arena owns it.
#[derive(Debug, Clone)]
pub struct Synapse {
    pub(crate) weight: f64,
    pub(crate) source: NeuronId,
    pub(crate) destination: NeuronId,
}

impl Synapse {
    pub(crate) fn new(weight: f64, source: NeuronId, destination: NeuronId) -> Synapse {
        Synapse { weight, source, destination }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn source(&self) -> NeuronId {
        self.source
    }

    pub fn destination(&self) -> NeuronId {
        self.destination
    }
}
