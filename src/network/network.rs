use log::debug;
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::layers::{Layer, Neuron, NeuronId, Synapse, SynapseId};

/// A fully connected feed-forward network stored as arenas of neurons and
/// synapses.
///
/// The topology is fixed at construction.  Only weights, biases and the
/// per-neuron caches (pre-activation, output, delta, error) change afterwards.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) layers: Vec<Layer>,
    pub(crate) neurons: Vec<Neuron>,
    pub(crate) synapses: Vec<Synapse>,
    pub(crate) activation: ActivationFunction,
    pub(crate) learning_rate: f64,
    /// Set by `forward`, consumed by `backward`.
    pub(crate) fresh: bool,
}

impl Network {
    /// Builds a network with weights and biases drawn from an entropy-seeded
    /// generator.  See `with_rng` for the initialization scheme.
    pub fn new(
        layer_sizes: &[usize],
        activation: ActivationFunction,
        learning_rate: f64,
    ) -> Result<Network> {
        Network::with_rng(layer_sizes, activation, learning_rate, &mut StdRng::from_entropy())
    }

    /// Deterministic construction: equal seeds give bit-identical networks.
    pub fn with_seed(
        layer_sizes: &[usize],
        activation: ActivationFunction,
        learning_rate: f64,
        seed: u64,
    ) -> Result<Network> {
        Network::with_rng(layer_sizes, activation, learning_rate, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a network from `layer_sizes` (input layer first).
    ///
    /// Every neuron past the input layer gets one synapse from each neuron of
    /// the previous layer and a bias.  Weights and biases are drawn uniformly
    /// from [0, 1): for each neuron its incoming weights in source order, then
    /// its bias.
    ///
    /// # Errors
    /// - `InvalidTopology` if fewer than two layers are given or a layer is empty.
    /// - `InvalidLearningRate` if `learning_rate` is negative or not finite.
    pub fn with_rng<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        activation: ActivationFunction,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Network> {
        Network::build(layer_sizes, activation, learning_rate, || Standard.sample(&mut *rng))
    }

    /// Allocates the arenas, drawing every weight and bias from `sample`.
    pub(crate) fn build<F>(
        layer_sizes: &[usize],
        activation: ActivationFunction,
        learning_rate: f64,
        mut sample: F,
    ) -> Result<Network>
    where
        F: FnMut() -> f64,
    {
        validate_topology(layer_sizes)?;
        validate_learning_rate(learning_rate)?;

        let neuron_count: usize = layer_sizes.iter().sum();
        let synapse_count: usize = layer_sizes.windows(2).map(|w| w[0] * w[1]).sum();

        let mut neurons: Vec<Neuron> = Vec::with_capacity(neuron_count);
        let mut synapses: Vec<Synapse> = Vec::with_capacity(synapse_count);
        let mut layers: Vec<Layer> = Vec::with_capacity(layer_sizes.len());

        for (l, &size) in layer_sizes.iter().enumerate() {
            let mut ids = Vec::with_capacity(size);
            for _ in 0..size {
                let id = NeuronId(neurons.len());
                let neuron = match layers.last() {
                    None => Neuron::input(),
                    Some(previous) => {
                        let mut neuron = Neuron::new(0.0);
                        for &source in previous.neurons() {
                            let synapse_id = SynapseId(synapses.len());
                            synapses.push(Synapse::new(sample(), source, id));
                            neuron.incoming.push(synapse_id);
                            neurons[source.0].outgoing.push(synapse_id);
                        }
                        neuron.bias = sample();
                        neuron
                    }
                };
                neurons.push(neuron);
                ids.push(id);
            }
            debug_assert_eq!(ids.len(), layer_sizes[l]);
            layers.push(Layer::new(ids));
        }

        debug!(
            "built network: layers={:?} activation={} learning_rate={} synapses={}",
            layer_sizes,
            activation.name(),
            learning_rate,
            synapses.len()
        );

        Ok(Network {
            layers,
            neurons,
            synapses,
            activation,
            learning_rate,
            fresh: false,
        })
    }

    // ── Topology ───────────────────────────────────────────────────────────

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn input_size(&self) -> usize {
        self.input_layer().size()
    }

    pub fn output_size(&self) -> usize {
        self.output_layer().size()
    }

    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    pub(crate) fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    pub(crate) fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    // ── Configuration ──────────────────────────────────────────────────────

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Changes the step size used by subsequent `backward` calls.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    // ── Arena access ───────────────────────────────────────────────────────

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.neurons.get(id.0)
    }

    pub fn synapse(&self, id: SynapseId) -> Option<&Synapse> {
        self.synapses.get(id.0)
    }

    /// The `neuron`-th neuron of layer `layer`.
    pub fn neuron_at(&self, layer: usize, neuron: usize) -> Option<&Neuron> {
        let id = self.layers.get(layer)?.neuron(neuron)?;
        self.neurons.get(id.0)
    }

    pub fn output(&self, layer: usize, neuron: usize) -> Option<f64> {
        self.neuron_at(layer, neuron).map(Neuron::output)
    }

    pub fn pre_activation(&self, layer: usize, neuron: usize) -> Option<f64> {
        self.neuron_at(layer, neuron).map(Neuron::pre_activation)
    }

    pub fn bias(&self, layer: usize, neuron: usize) -> Option<f64> {
        self.neuron_at(layer, neuron).map(Neuron::bias)
    }

    pub fn delta(&self, layer: usize, neuron: usize) -> Option<f64> {
        self.neuron_at(layer, neuron).map(Neuron::delta)
    }

    pub fn neuron_error(&self, layer: usize, neuron: usize) -> Option<f64> {
        self.neuron_at(layer, neuron).map(Neuron::error)
    }

    /// Weight of the `synapse`-th incoming synapse of a neuron, i.e. the edge
    /// from neuron `synapse` of layer `layer - 1`.
    pub fn weight(&self, layer: usize, neuron: usize, synapse: usize) -> Option<f64> {
        let id = *self.neuron_at(layer, neuron)?.incoming.get(synapse)?;
        self.synapses.get(id.0).map(Synapse::weight)
    }

    /// Outputs of the final layer as of the last forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_layer()
            .neurons()
            .iter()
            .map(|id| self.neurons[id.0].output)
            .collect()
    }

    /// Sum of the per-neuron errors of the output layer.
    pub fn total_error(&self) -> f64 {
        self.output_layer()
            .neurons()
            .iter()
            .map(|id| self.neurons[id.0].error)
            .sum()
    }
}

fn validate_topology(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(NetworkError::InvalidTopology(format!(
            "a network needs at least 2 layers, got {}",
            layer_sizes.len()
        )));
    }
    if let Some(layer) = layer_sizes.iter().position(|&size| size == 0) {
        return Err(NetworkError::InvalidTopology(format!("layer {layer} has no neurons")));
    }
    Ok(())
}

fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if learning_rate.is_finite() && learning_rate >= 0.0 {
        Ok(())
    } else {
        Err(NetworkError::InvalidLearningRate(learning_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sigmoid_net(sizes: &[usize], seed: u64) -> Network {
        Network::with_seed(sizes, ActivationFunction::Sigmoid, 0.5, seed).unwrap()
    }

    #[test]
    fn rejects_single_layer() {
        let err = Network::with_seed(&[3], ActivationFunction::Sigmoid, 0.5, 1).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidTopology(_)));
    }

    #[test]
    fn rejects_empty_layer_list() {
        let err = Network::new(&[], ActivationFunction::Sigmoid, 0.5).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidTopology(_)));
    }

    #[test]
    fn rejects_zero_sized_layer() {
        let err = Network::with_seed(&[2, 0, 1], ActivationFunction::Sigmoid, 0.5, 1).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidTopology(_)));
    }

    #[test]
    fn rejects_bad_learning_rates() {
        for lr in [-0.1, f64::NAN, f64::INFINITY] {
            let err = Network::with_seed(&[2, 1], ActivationFunction::Sigmoid, lr, 1).unwrap_err();
            assert!(matches!(err, NetworkError::InvalidLearningRate(_)));
        }
        let mut net = sigmoid_net(&[2, 1], 1);
        assert!(net.set_learning_rate(-1.0).is_err());
        assert_eq!(net.learning_rate(), 0.5);
        net.set_learning_rate(0.0).unwrap();
        assert_eq!(net.learning_rate(), 0.0);
    }

    #[test]
    fn builds_fully_connected_layers() {
        let net = sigmoid_net(&[2, 3, 1], 7);
        assert_eq!(net.layer_count(), 3);
        assert_eq!(net.layer_sizes(), vec![2, 3, 1]);
        assert_eq!(net.synapse_count(), 2 * 3 + 3 * 1);

        for n in 0..3 {
            let neuron = net.neuron_at(1, n).unwrap();
            assert_eq!(neuron.incoming().len(), 2);
            assert_eq!(neuron.outgoing().len(), 1);
        }
        for n in 0..2 {
            let neuron = net.neuron_at(0, n).unwrap();
            assert!(neuron.incoming().is_empty());
            assert_eq!(neuron.outgoing().len(), 3);
        }
        assert_eq!(net.neuron_at(2, 0).unwrap().incoming().len(), 3);
        assert!(net.neuron_at(2, 0).unwrap().outgoing().is_empty());
    }

    #[test]
    fn synapse_endpoints_follow_layer_order() {
        let net = sigmoid_net(&[2, 3, 1], 7);
        let hidden = net.layer(1).unwrap();
        let input = net.layer(0).unwrap();
        for &dst in hidden.neurons() {
            let neuron = net.neuron(dst).unwrap();
            for (k, &sid) in neuron.incoming().iter().enumerate() {
                let synapse = net.synapse(sid).unwrap();
                assert_eq!(synapse.destination(), dst);
                assert_eq!(synapse.source(), input.neurons()[k]);
                assert!(net.neuron(synapse.source()).unwrap().outgoing().contains(&sid));
            }
        }
    }

    #[test]
    fn parameters_are_uniform_in_unit_interval() {
        let net = sigmoid_net(&[4, 8, 3], 11);
        for l in 1..net.layer_count() {
            for n in 0..net.layer(l).unwrap().size() {
                let bias = net.bias(l, n).unwrap();
                assert!((0.0..1.0).contains(&bias));
                for s in 0..net.layer(l - 1).unwrap().size() {
                    let w = net.weight(l, n, s).unwrap();
                    assert!((0.0..1.0).contains(&w));
                }
            }
        }
    }

    #[test]
    fn same_seed_gives_same_parameters() {
        let a = sigmoid_net(&[3, 4, 2], 42);
        let b = sigmoid_net(&[3, 4, 2], 42);
        let c = sigmoid_net(&[3, 4, 2], 43);
        let weights = |net: &Network| net.synapses.iter().map(Synapse::weight).collect::<Vec<_>>();
        assert_eq!(weights(&a), weights(&b));
        assert_ne!(weights(&a), weights(&c));
    }

    #[test]
    fn out_of_range_accessors_return_none() {
        let net = sigmoid_net(&[2, 3, 1], 3);
        assert!(net.output(3, 0).is_none());
        assert!(net.bias(1, 3).is_none());
        assert!(net.weight(1, 0, 2).is_none());
        assert!(net.weight(0, 0, 0).is_none());
        assert!(net.layer(5).is_none());
    }

    #[test]
    fn fresh_network_has_zeroed_caches() {
        let net = sigmoid_net(&[2, 2], 5);
        assert_eq!(net.outputs(), vec![0.0, 0.0]);
        assert_eq!(net.total_error(), 0.0);
        assert_eq!(net.delta(1, 0), Some(0.0));
    }
}
