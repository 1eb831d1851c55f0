use log::trace;

use crate::error::{NetworkError, Result};
use crate::network::network::Network;

impl Network {
    /// Runs `inputs` through the network and returns the output layer's values.
    ///
    /// Input neurons take their value verbatim.  Every other neuron caches
    ///   z = bias + Σ weight · source.output
    /// and outputs `activation.execute(z)`.  Weights and biases are untouched.
    ///
    /// # Errors
    /// `DimensionMismatch` if `inputs.len()` differs from the input layer size;
    /// the network is left unchanged in that case.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        let expected = self.input_size();
        if inputs.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                what: "inputs",
                expected,
                got: inputs.len(),
            });
        }

        for (id, &x) in self.layers[0].neurons().iter().zip(inputs) {
            self.neurons[id.0].output = x;
        }

        let activation = self.activation;
        // Layer i + 1 only reads outputs already written for layer i.
        for layer in &self.layers[1..] {
            for id in layer.neurons() {
                let neuron = &self.neurons[id.0];
                let z = neuron.bias
                    + neuron
                        .incoming
                        .iter()
                        .map(|sid| {
                            let synapse = &self.synapses[sid.0];
                            synapse.weight * self.neurons[synapse.source.0].output
                        })
                        .sum::<f64>();

                let neuron = &mut self.neurons[id.0];
                neuron.pre_activation = z;
                neuron.output = activation.execute(z);
            }
        }

        self.fresh = true;
        Ok(self.outputs())
    }

    /// Half squared error of the current outputs against `targets`.
    ///
    /// Stores `0.5 · (target - output)²` on each output neuron and returns the
    /// sum.  Informational only; `backward` does not read it.
    pub fn compute_error(&mut self, targets: &[f64]) -> Result<f64> {
        self.check_targets(targets)?;

        let output_layer = &self.layers[self.layers.len() - 1];
        let mut total = 0.0;
        for (id, &target) in output_layer.neurons().iter().zip(targets) {
            let neuron = &mut self.neurons[id.0];
            let diff = target - neuron.output;
            neuron.error = 0.5 * diff * diff;
            total += neuron.error;
        }
        Ok(total)
    }

    /// One gradient-descent step against `targets`, using the state cached by
    /// the preceding `forward`.
    ///
    /// Runs in two phases: every delta is computed (output layer first, then
    /// hidden layers in reverse) before any weight or bias moves, so hidden
    /// deltas always see this step's weights.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `targets.len()` differs from the output layer size.
    /// - `StaleState` if no `forward` ran since construction or the last `backward`.
    pub fn backward(&mut self, targets: &[f64]) -> Result<()> {
        self.check_targets(targets)?;
        if !self.fresh {
            return Err(NetworkError::StaleState);
        }

        self.compute_deltas(targets);
        self.apply_updates();
        self.fresh = false;

        trace!("backward step: error={}", self.total_error());
        Ok(())
    }

    /// `forward(inputs)` followed by `backward(targets)`.
    ///
    /// Targets are checked before the forward pass so a mismatch leaves the
    /// network untouched.
    pub fn train(&mut self, inputs: &[f64], targets: &[f64]) -> Result<()> {
        self.check_targets(targets)?;
        self.forward(inputs)?;
        self.backward(targets)
    }

    fn check_targets(&self, targets: &[f64]) -> Result<()> {
        let expected = self.output_size();
        if targets.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                what: "targets",
                expected,
                got: targets.len(),
            });
        }
        Ok(())
    }

    /// Phase one: deltas for every non-input neuron.  No parameter changes.
    fn compute_deltas(&mut self, targets: &[f64]) {
        let activation = self.activation;
        let last = self.layers.len() - 1;

        for (id, &target) in self.layers[last].neurons().iter().zip(targets) {
            let neuron = &mut self.neurons[id.0];
            let diff = target - neuron.output;
            neuron.error = 0.5 * diff * diff;
            neuron.delta = -diff * activation.derivative(neuron.pre_activation);
        }

        // Hidden layers only; the input layer carries no delta.
        for layer in self.layers[1..last].iter().rev() {
            for id in layer.neurons() {
                let downstream: f64 = self.neurons[id.0]
                    .outgoing
                    .iter()
                    .map(|sid| {
                        let synapse = &self.synapses[sid.0];
                        self.neurons[synapse.destination.0].delta * synapse.weight
                    })
                    .sum();

                let neuron = &mut self.neurons[id.0];
                neuron.delta = activation.derivative(neuron.pre_activation) * downstream;
            }
        }
    }

    /// Phase two: move every weight and bias against its gradient.
    fn apply_updates(&mut self) {
        let lr = self.learning_rate;

        for synapse in &mut self.synapses {
            let source_output = self.neurons[synapse.source.0].output;
            let destination_delta = self.neurons[synapse.destination.0].delta;
            synapse.weight -= lr * destination_delta * source_output;
        }

        for layer in &self.layers[1..] {
            for id in layer.neurons() {
                let neuron = &mut self.neurons[id.0];
                neuron.bias -= lr * neuron.delta;
            }
        }
    }
}
