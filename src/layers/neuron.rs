use crate::layers::synapse::SynapseId;

/// Handle of a neuron inside a network's neuron arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeuronId(pub(crate) usize);

impl NeuronId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One unit of the network.
///
/// Input-layer neurons have no incoming synapses and a bias that is never
/// used; their `output` is written straight from the input vector.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub(crate) bias: f64,
    pub(crate) pre_activation: f64,
    pub(crate) output: f64,
    pub(crate) delta: f64,
    pub(crate) error: f64,
    pub(crate) incoming: Vec<SynapseId>,
    pub(crate) outgoing: Vec<SynapseId>,
}

impl Neuron {
    pub(crate) fn new(bias: f64) -> Neuron {
        Neuron {
            bias,
            pre_activation: 0.0,
            output: 0.0,
            delta: 0.0,
            error: 0.0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub(crate) fn input() -> Neuron {
        Neuron::new(0.0)
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Weighted input sum plus bias cached by the last forward pass.
    pub fn pre_activation(&self) -> f64 {
        self.pre_activation
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Half squared error against the last targets; zero outside the output layer.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Incoming synapses, one per neuron of the previous layer, in that layer's order.
    pub fn incoming(&self) -> &[SynapseId] {
        &self.incoming
    }

    /// Outgoing synapses, one per neuron of the next layer, in that layer's order.
    pub fn outgoing(&self) -> &[SynapseId] {
        &self.outgoing
    }
}
