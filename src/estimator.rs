//! Build → predict → display for one interaction.

use crate::config::EstimatorConfig;
use crate::display::{truncate_estimate, PriceFormatter};
use crate::error::{EstimatorError, Result};
use crate::model::{Predictor, RegressionModel};
use crate::preprocessing::{EncodingTables, FeatureVector, FeatureVectorBuilder, RawInputs};
use crate::serialization::Artifact;
use tracing::{debug, info};

/// Result of one successful prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimate {
    /// The vector the predictor saw.
    pub features: FeatureVector,
    /// Predictor output before truncation.
    pub raw_prediction: f64,
    /// Whole, non-negative price.
    pub price: u64,
    /// Formatted line for display.
    pub message: String,
}

/// Loaded artifacts plus display settings. Immutable once built.
#[derive(Clone, Debug)]
pub struct HousePriceEstimator<P: Predictor = RegressionModel> {
    tables: EncodingTables,
    predictor: P,
    formatter: PriceFormatter,
}

impl HousePriceEstimator<RegressionModel> {
    /// Load both artifacts named by `config`.
    ///
    /// # Errors
    /// [`crate::EstimatorError::ArtifactLoad`] if either artifact is missing,
    /// corrupt, or does not cover the form's vocabulary.
    pub fn load(config: &EstimatorConfig) -> Result<Self> {
        let tables = EncodingTables::load_from_file(&config.encoders_path)?;
        tables.verify_vocabulary().map_err(|source| {
            EstimatorError::artifact_load(EncodingTables::KIND, config.encoders_path.clone(), source)
        })?;
        let predictor = RegressionModel::load_from_file(&config.model_path)?;
        info!(
            model = predictor.name(),
            model_path = %config.model_path.display(),
            encoders_path = %config.encoders_path.display(),
            "estimator ready"
        );
        Ok(Self::new(tables, predictor, config.display.clone()))
    }
}

impl<P: Predictor> HousePriceEstimator<P> {
    pub fn new(tables: EncodingTables, predictor: P, formatter: PriceFormatter) -> Self {
        HousePriceEstimator {
            tables,
            predictor,
            formatter,
        }
    }

    pub fn tables(&self) -> &EncodingTables {
        &self.tables
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn formatter(&self) -> &PriceFormatter {
        &self.formatter
    }

    /// Model input for `raw`.
    pub fn features(&self, raw: &RawInputs) -> Result<FeatureVector> {
        FeatureVectorBuilder::new(&self.tables).build(raw)
    }

    /// Run one full interaction.
    pub fn estimate(&self, raw: &RawInputs) -> Result<Estimate> {
        let features = self.features(raw)?;
        let raw_prediction = self.predictor.predict(&features)?;
        let price = truncate_estimate(raw_prediction)?;
        debug!(
            model = self.predictor.name(),
            features = ?features.as_slice(),
            raw_prediction,
            price,
            "estimate"
        );
        Ok(Estimate {
            features,
            raw_prediction,
            price,
            message: self.formatter.message(price),
        })
    }
}
