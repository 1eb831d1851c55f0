use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::check_dataset;

/// Trains `network` for up to `config.epochs` epochs and returns the summed
/// error of the **last completed epoch** (0.0 if no epoch ran).
///
/// Each epoch calls `Network::train` once per sample.  Errors from the
/// network (e.g. a sample of the wrong length) abort the run and are returned.
///
/// # Early termination
/// The loop stops early if:
/// - the epoch error drops below `config.target_error`,
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut order: Vec<usize> = (0..inputs.len()).collect();
    let mut rng = match config.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut last_error = 0.0;

    debug!(
        "training {:?} network on {} samples for up to {} epochs",
        network.layer_sizes(),
        inputs.len(),
        config.epochs
    );

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            info!("stop requested before epoch {epoch}");
            break;
        }

        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(&mut rng);
        }

        let mut total_error = 0.0;
        for &idx in &order {
            network.train(&inputs[idx], &targets[idx])?;
            total_error += network.total_error();
        }
        last_error = total_error;

        if !total_error.is_finite() {
            warn!("epoch {epoch}: error is {total_error}, training diverged");
        }

        let mean_error = if inputs.is_empty() {
            0.0
        } else {
            total_error / inputs.len() as f64
        };

        if config.log_every > 0 && epoch % config.log_every == 0 {
            info!("epoch {epoch}/{}: error = {total_error:.6}", config.epochs);
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            total_error,
            mean_error,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                info!("progress receiver dropped after epoch {epoch}");
                break;
            }
        }

        if let Some(target) = config.target_error {
            if total_error < target {
                info!("epoch {epoch}: error {total_error:.6} below target {target}");
                break;
            }
        }
    }

    Ok(last_error)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::error::NetworkError;

    fn and_gate() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
            vec![vec![0.0], vec![0.0], vec![0.0], vec![1.0]],
        )
    }

    fn net() -> Network {
        Network::with_seed(&[2, 2, 1], ActivationFunction::Sigmoid, 0.5, 13).unwrap()
    }

    #[test]
    fn sends_one_stats_message_per_epoch() {
        let (inputs, targets) = and_gate();
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(5);
        config.progress_tx = Some(tx);

        let last = train_loop(&mut net(), &inputs, &targets, &config).unwrap();
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].epoch, 1);
        assert_eq!(stats[4].total_epochs, 5);
        assert_eq!(stats[4].total_error, last);
        assert!((stats[4].mean_error - last / 4.0).abs() < 1e-12);
    }

    #[test]
    fn stops_at_target_error() {
        let (inputs, targets) = and_gate();
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(100_000).with_target_error(0.05);
        config.progress_tx = Some(tx);

        let last = train_loop(&mut net(), &inputs, &targets, &config).unwrap();
        drop(config);

        let epochs = rx.iter().count();
        assert!(last < 0.05);
        assert!(epochs < 100_000);
    }

    #[test]
    fn stop_flag_prevents_training() {
        let (inputs, targets) = and_gate();
        let mut network = net();
        let before = network.snapshot().unwrap();
        let mut config = TrainConfig::new(10);
        config.stop_flag = Some(Arc::new(AtomicBool::new(true)));

        assert_eq!(train_loop(&mut network, &inputs, &targets, &config).unwrap(), 0.0);
        assert_eq!(network.snapshot().unwrap().layers, before.layers);
    }

    #[test]
    fn dropped_receiver_ends_training() {
        let (inputs, targets) = and_gate();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut config = TrainConfig::new(1000);
        config.progress_tx = Some(tx);
        let last = train_loop(&mut net(), &inputs, &targets, &config).unwrap();
        assert!(last > 0.0);
    }

    #[test]
    fn seeded_shuffling_is_reproducible() {
        let (inputs, targets) = and_gate();
        let config = TrainConfig::new(20).with_shuffle_seed(99);
        let mut a = net();
        let mut b = net();
        let ea = train_loop(&mut a, &inputs, &targets, &config).unwrap();
        let eb = train_loop(&mut b, &inputs, &targets, &config).unwrap();
        assert_eq!(ea, eb);
        assert_eq!(a.snapshot().unwrap().layers, b.snapshot().unwrap().layers);
    }

    #[test]
    fn rejects_mismatched_dataset() {
        let (inputs, mut targets) = and_gate();
        targets.truncate(3);
        let err = train_loop(&mut net(), &inputs, &targets, &TrainConfig::new(1)).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { .. }));
    }
}
