pub mod activation;

pub use activation::{numeric_derivative, ActivationFunction, CustomActivation, DERIVATIVE_STEP};
