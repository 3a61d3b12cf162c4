//! Linear regression: `y = w^T x + b`.
//!
//! The model is inference-only and free from training hyperparameters; it
//! is constructed from exported weights and validated once on load.

use crate::error::{EstimatorError, Result};
use crate::model::Predictor;
use crate::preprocessing::FeatureVector;
use crate::schema::FEATURE_COUNT;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Serializable representation of linear model parameters.
///
/// `weights[i]` multiplies the value at position `i` of the feature order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializableLinearParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// A fitted linear regressor over the twelve house features.
#[derive(Clone, Debug)]
pub struct LinearRegressor {
    weights: Array1<f64>,
    bias: f64,
}

impl LinearRegressor {
    /// Reconstruct from parameters.
    ///
    /// # Errors
    /// - [`EstimatorError::FeatureMismatch`] unless there are exactly twelve weights.
    /// - [`EstimatorError::InvalidArtifact`] if any parameter is not finite.
    pub fn from_params(params: SerializableLinearParams) -> Result<Self> {
        if params.weights.len() != FEATURE_COUNT {
            return Err(EstimatorError::FeatureMismatch {
                expected_features: FEATURE_COUNT,
                got_features: params.weights.len(),
            });
        }
        if let Some(idx) = params.weights.iter().position(|w| !w.is_finite()) {
            return Err(EstimatorError::InvalidArtifact(format!(
                "linear weight {} is not finite",
                idx
            )));
        }
        if !params.bias.is_finite() {
            return Err(EstimatorError::InvalidArtifact(
                "linear bias is not finite".to_string(),
            ));
        }

        Ok(LinearRegressor {
            weights: Array1::from(params.weights),
            bias: params.bias,
        })
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn extract_params(&self) -> SerializableLinearParams {
        SerializableLinearParams {
            weights: self.weights.to_vec(),
            bias: self.bias,
        }
    }
}

impl Predictor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let y = self.weights.dot(&features.view()) + self.bias;
        if y.is_finite() {
            Ok(y)
        } else {
            Err(EstimatorError::Predictor(format!(
                "linear model produced {}",
                y
            )))
        }
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}
