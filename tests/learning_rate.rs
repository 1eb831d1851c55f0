use synaptic_mlp::{ActivationFunction, Network};

#[test]
fn zero_learning_rate_freezes_parameters_but_not_state() {
    let mut net = Network::with_seed(&[3, 4, 2], ActivationFunction::Sigmoid, 0.0, 31).unwrap();
    let before = net.snapshot().unwrap();

    let samples = [
        ([0.1, 0.2, 0.3], [1.0, 0.0]),
        ([0.9, -0.5, 0.0], [0.0, 1.0]),
        ([1.0, 1.0, 1.0], [0.5, 0.5]),
    ];

    let mut previous_outputs = Vec::new();
    for (inputs, targets) in samples.iter().cycle().take(30) {
        net.train(inputs, targets).unwrap();

        let outputs = net.outputs();
        assert_ne!(outputs, previous_outputs);
        assert!(net.total_error() > 0.0);
        assert_ne!(net.delta(2, 0), Some(0.0));
        assert_ne!(net.delta(1, 0), Some(0.0));
        previous_outputs = outputs;
    }

    let after = net.snapshot().unwrap();
    assert_eq!(after.layers, before.layers);
}

#[test]
fn positive_learning_rate_moves_parameters() {
    let mut net = Network::with_seed(&[3, 4, 2], ActivationFunction::Sigmoid, 0.3, 31).unwrap();
    let before = net.snapshot().unwrap();
    net.train(&[0.1, 0.2, 0.3], &[1.0, 0.0]).unwrap();
    assert_ne!(net.snapshot().unwrap().layers, before.layers);
}
