//! Element-wise activation functions.
//!
//! Names follow the Keras layer config (`relu`, `linear`, `sigmoid`, `tanh`) so
//! exported models deserialize without renaming.
//!
//! Numerical notes:
//! - `sigmoid` is evaluated piecewise so that large negative inputs do not
//!   overflow `exp(-x)`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    /// Apply the activation to one pre-activation value.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_and_linear() {
        assert_eq!(Activation::Relu.apply(-2.0), 0.0);
        assert_eq!(Activation::Relu.apply(1.5), 1.5);
        assert_eq!(Activation::Linear.apply(-3.25), -3.25);
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert!((Activation::Sigmoid.apply(0.0) - 0.5).abs() < 1e-12);
        let lo = Activation::Sigmoid.apply(-1000.0);
        let hi = Activation::Sigmoid.apply(1000.0);
        assert!(lo.is_finite() && lo >= 0.0 && lo < 1e-12);
        assert!((hi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parses_keras_names() {
        let a: Activation = serde_json::from_str("\"tanh\"").unwrap();
        assert_eq!(a, Activation::Tanh);
        assert!(serde_json::from_str::<Activation>("\"softmax\"").is_err());
    }
}
