use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Step size of the centered finite-difference derivative.
pub const DERIVATIVE_STEP: f64 = 1e-6;

/// Centered finite-difference approximation of `f'(x)`:
///   (f(x + h) - f(x - h)) / 2h
pub fn numeric_derivative<F>(f: F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + DERIVATIVE_STEP) - f(x - DERIVATIVE_STEP)) / (2.0 * DERIVATIVE_STEP)
}

/// A caller-supplied activation known only by its `execute` function.
///
/// The derivative falls back to `numeric_derivative`.  The declared range is
/// informational; it is not enforced on the function's output.
#[derive(Debug, Clone, Copy)]
pub struct CustomActivation {
    pub name: &'static str,
    pub function: fn(f64) -> f64,
    pub min: f64,
    pub max: f64,
}

/// The scalar nonlinearity shared by every non-input neuron of a network.
///
/// `derivative(x)` is always evaluated at the pre-activation value, i.e. the
/// same argument that was passed to `execute(x)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    /// max(x, 0)
    ReLU,
    Identity,
    Tanh,
    /// Not persistable: a function pointer has no stable identifier.
    #[serde(skip)]
    Custom(CustomActivation),
}

impl ActivationFunction {
    /// Wraps a plain function; its derivative is approximated numerically.
    pub fn custom(name: &'static str, function: fn(f64) -> f64, min: f64, max: f64) -> Self {
        ActivationFunction::Custom(CustomActivation { name, function, min, max })
    }

    pub fn execute(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Custom(custom) => (custom.function)(x),
        }
    }

    /// Local gradient at the pre-activation value `x`.  Analytic for the
    /// built-in variants; finite-difference for `Custom`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.execute(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Custom(custom) => numeric_derivative(custom.function, x),
        }
    }

    /// `(min, max)` of the output range.  Bounds of the built-in variants are
    /// open except ReLU's lower bound.
    pub fn range(&self) -> (f64, f64) {
        match self {
            ActivationFunction::Sigmoid => (0.0, 1.0),
            ActivationFunction::ReLU => (0.0, f64::INFINITY),
            ActivationFunction::Identity => (f64::NEG_INFINITY, f64::INFINITY),
            ActivationFunction::Tanh => (-1.0, 1.0),
            ActivationFunction::Custom(custom) => (custom.min, custom.max),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Identity => "identity",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::Custom(custom) => custom.name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ActivationFunction::Custom(_))
    }
}
