use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      : maximum number of full passes over the training data
/// - `target_error`: stop once an epoch's summed error drops below this
/// - `shuffle`     : visit samples in a fresh random order every epoch
/// - `shuffle_seed`: seed for the shuffling generator; entropy when `None`
/// - `log_every`   : emit an `info!` line every this many epochs (0 = never)
/// - `progress_tx` : optional channel sender; one `EpochStats` is sent per
///                    completed epoch.  If the receiver is dropped the loop
///                    terminates early.
/// - `stop_flag`   : optional atomic flag; when set to `true` from another
///                    thread the loop terminates after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub target_error: Option<f64>,
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// In-order training for `epochs` epochs with no early stop, channel or flag.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            target_error: None,
            shuffle: false,
            shuffle_seed: None,
            log_every: 0,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_target_error(mut self, target_error: f64) -> Self {
        self.target_error = Some(target_error);
        self
    }

    /// Enables per-epoch shuffling with a fixed seed.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle = true;
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}
