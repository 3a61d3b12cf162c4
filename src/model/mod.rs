//! Pre-trained regression models.
//!
//! Every model is inference-only: it carries the parameters needed to
//! predict and nothing from training. Models sit behind the [`Predictor`]
//! trait so callers never depend on a particular algorithm or file layout.

pub mod forest;
pub mod linear;

pub use forest::{Aggregation, RegressionTree, TreeEnsemble, TreeEnsembleParams, TreeNode};
pub use linear::{LinearRegressor, SerializableLinearParams};

use crate::error::Result;
use crate::preprocessing::FeatureVector;
use crate::serialization::{Artifact, ArtifactKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// An opaque trained regression function.
pub trait Predictor: Send + Sync {
    /// Estimate for one feature vector.
    ///
    /// # Errors
    /// [`crate::EstimatorError::Predictor`] if no finite estimate can be produced.
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    /// Short algorithm name for logs.
    fn name(&self) -> &'static str;
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        (**self).predict(features)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// On-disk form of the model artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelParams {
    Linear(SerializableLinearParams),
    TreeEnsemble(TreeEnsembleParams),
}

/// Any model the artifact can hold.
#[derive(Clone, Debug)]
pub enum RegressionModel {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

impl Predictor for RegressionModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        match self {
            RegressionModel::Linear(model) => model.predict(features),
            RegressionModel::TreeEnsemble(model) => model.predict(features),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            RegressionModel::Linear(model) => model.name(),
            RegressionModel::TreeEnsemble(model) => model.name(),
        }
    }
}

impl From<LinearRegressor> for RegressionModel {
    fn from(model: LinearRegressor) -> Self {
        RegressionModel::Linear(model)
    }
}

impl From<TreeEnsemble> for RegressionModel {
    fn from(model: TreeEnsemble) -> Self {
        RegressionModel::TreeEnsemble(model)
    }
}

impl Artifact for RegressionModel {
    type Params = ModelParams;

    const KIND: ArtifactKind = ArtifactKind::Model;

    fn extract_params(&self) -> ModelParams {
        match self {
            RegressionModel::Linear(model) => ModelParams::Linear(model.extract_params()),
            RegressionModel::TreeEnsemble(model) => {
                ModelParams::TreeEnsemble(model.extract_params())
            }
        }
    }

    fn from_params(params: ModelParams) -> Result<Self> {
        let model: RegressionModel = match params {
            ModelParams::Linear(p) => LinearRegressor::from_params(p)?.into(),
            ModelParams::TreeEnsemble(p) => TreeEnsemble::from_params(p)?.into(),
        };
        info!(model = model.name(), "regression model ready");
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, EstimatorError};
    use crate::schema::FEATURE_COUNT;

    fn unit_linear() -> RegressionModel {
        LinearRegressor::from_params(SerializableLinearParams {
            weights: vec![1.0; FEATURE_COUNT],
            bias: 0.5,
        })
        .unwrap()
        .into()
    }

    #[test]
    fn test_dispatch_and_name() {
        let model = unit_linear();
        let x = FeatureVector::from_ordered([1.0; FEATURE_COUNT]);
        assert_eq!(model.predict(&x).unwrap(), 12.5);
        assert_eq!(model.name(), "linear");

        let boxed: Box<dyn Predictor> = Box::new(model);
        assert_eq!(boxed.predict(&x).unwrap(), 12.5);
    }

    #[test]
    fn test_model_serialization() {
        let model = unit_linear();
        let dir = tempfile::tempdir().unwrap();
        for name in ["house_price_model.bin", "house_price_model.json"] {
            let path = dir.path().join(name);
            model.save_to_file(&path).unwrap();
            let loaded = RegressionModel::load_from_file(&path).unwrap();
            assert_eq!(loaded.extract_params(), model.extract_params());
        }
    }

    #[test]
    fn test_json_layout_is_externally_tagged() {
        let json = r#"{"linear": {"weights": [0,0,0,0,0,0,0,0,0,0,0,0], "bias": 7.0}}"#;
        let params: ModelParams = serde_json::from_str(json).unwrap();
        let model = RegressionModel::from_params(params).unwrap();
        let x = FeatureVector::from_ordered([3.0; FEATURE_COUNT]);
        assert_eq!(model.predict(&x).unwrap(), 7.0);
    }

    #[test]
    fn test_invalid_model_file_is_artifact_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("house_price_model.json");
        std::fs::write(&path, r#"{"linear": {"weights": [1.0], "bias": 0.0}}"#).unwrap();

        let err = RegressionModel::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactLoad);
        match err {
            EstimatorError::ArtifactLoad { source, .. } => {
                assert!(matches!(*source, EstimatorError::FeatureMismatch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
