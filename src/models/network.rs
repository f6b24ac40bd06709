//! Dense feed-forward price network.
//!
//! The network is exported from the training environment as JSON with Keras
//! conventions: each layer has a `kernel` with one row per input and one column
//! per unit, a `bias` per unit, and an activation name. Evaluation is
//! `h' = act(Wᵀ h + b)` layer by layer; the final layer has a single unit.
//!
//! Shapes are validated once at load, so `predict` cannot fail afterwards.

use nalgebra::{DMatrix, DVector};
use serde::Deserialize;

use crate::domain::{FEATURE_LEN, FeatureVector};
use crate::error::ArtifactError;
use crate::math::Activation;
use crate::models::PriceModel;

const WHAT: &str = "price model";

/// On-disk layer description.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerSpec {
    pub activation: Activation,
    pub kernel: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

/// On-disk network description.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSpec {
    pub input_dim: usize,
    pub layers: Vec<LayerSpec>,
}

#[derive(Debug, Clone)]
struct DenseLayer {
    /// `units x inputs` (the Keras kernel, transposed).
    weights: DMatrix<f64>,
    bias: DVector<f64>,
    activation: Activation,
}

/// A validated, ready-to-evaluate network.
#[derive(Debug, Clone)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Parse and validate a network from its JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ArtifactError> {
        let spec: NetworkSpec =
            serde_json::from_str(text).map_err(|source| ArtifactError::Parse { what: WHAT, source })?;
        Self::from_spec(spec)
    }

    /// Validate shapes and values, then build the evaluation matrices.
    pub fn from_spec(spec: NetworkSpec) -> Result<Self, ArtifactError> {
        if spec.input_dim != FEATURE_LEN {
            return Err(shape(format!(
                "input_dim is {}, expected {FEATURE_LEN} (year + one-hot work item)",
                spec.input_dim
            )));
        }
        if spec.layers.is_empty() {
            return Err(shape("no layers".to_string()));
        }

        let mut layers = Vec::with_capacity(spec.layers.len());
        let mut inputs = spec.input_dim;

        for (idx, layer) in spec.layers.into_iter().enumerate() {
            if layer.kernel.len() != inputs {
                return Err(shape(format!(
                    "layer {idx} kernel has {} rows, expected {inputs}",
                    layer.kernel.len()
                )));
            }
            let units = layer.bias.len();
            if units == 0 {
                return Err(shape(format!("layer {idx} has no units")));
            }
            if let Some(row) = layer.kernel.iter().position(|r| r.len() != units) {
                return Err(shape(format!(
                    "layer {idx} kernel row {row} has {} columns, expected {units}",
                    layer.kernel[row].len()
                )));
            }
            if layer.kernel.iter().flatten().any(|v| !v.is_finite()) {
                return Err(ArtifactError::NonFinite {
                    what: WHAT,
                    field: format!("layers[{idx}].kernel"),
                });
            }
            if layer.bias.iter().any(|v| !v.is_finite()) {
                return Err(ArtifactError::NonFinite {
                    what: WHAT,
                    field: format!("layers[{idx}].bias"),
                });
            }

            let kernel = &layer.kernel;
            let weights = DMatrix::from_fn(units, inputs, |unit, input| kernel[input][unit]);
            layers.push(DenseLayer {
                weights,
                bias: DVector::from_vec(layer.bias),
                activation: layer.activation,
            });
            inputs = units;
        }

        if inputs != 1 {
            return Err(shape(format!("final layer has {inputs} units, expected 1")));
        }

        Ok(Self { layers })
    }

    /// Number of dense layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// `(inputs, units, activation)` per layer, for diagnostics.
    pub fn layer_shapes(&self) -> Vec<(usize, usize, Activation)> {
        self.layers
            .iter()
            .map(|l| (l.weights.ncols(), l.weights.nrows(), l.activation))
            .collect()
    }

    fn forward(&self, input: &[f64]) -> f64 {
        let mut h = DVector::from_column_slice(input);
        for layer in &self.layers {
            let mut z = &layer.weights * &h + &layer.bias;
            z.apply(|v| *v = layer.activation.apply(*v));
            h = z;
        }
        h[0]
    }
}

impl PriceModel for DenseNetwork {
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.forward(features.as_slice())
    }
}

fn shape(detail: String) -> ArtifactError {
    ArtifactError::Shape { what: WHAT, detail }
}
