pub mod network;
pub mod propagation;
pub mod snapshot;
pub mod spec;

pub use network::Network;
pub use snapshot::{LayerParams, NetworkSnapshot};
pub use spec::NetworkSpec;
