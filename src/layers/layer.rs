use crate::layers::neuron::NeuronId;

/// Ordered neurons at one depth of the network.  Layer 0 is the input layer.
#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<NeuronId>,
}

impl Layer {
    pub(crate) fn new(neurons: Vec<NeuronId>) -> Layer {
        Layer { neurons }
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    pub fn neuron(&self, index: usize) -> Option<NeuronId> {
        self.neurons.get(index).copied()
    }
}
