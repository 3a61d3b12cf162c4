//! Categorical feature encoding.
//!
//! [`EncodingTables`] is the resolver: one [`FrozenLabelEncoder`] per
//! categorical field, loaded once at startup and read-only afterwards.
//!
//! # Artifact layout
//!
//! ```json
//! {
//!   "mainroad": { "no": 0, "yes": 1 },
//!   "furnishingstatus": { "furnished": 0, "semi-furnished": 1, "unfurnished": 2 }
//! }
//! ```
//!
//! All seven categorical fields must be present. Field names that are not
//! categorical fields are rejected.

mod label;

pub use label::{FrozenLabelEncoder, LabelEncoderParams};

use crate::error::{EstimatorError, Result};
use crate::schema::{CategoricalField, BINARY_LABELS};
use crate::serialization::{Artifact, ArtifactKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Class lists exported from training, ordered by code.
const TRAINING_BINARY_CLASSES: [&str; 2] = ["no", "yes"];
const TRAINING_FURNISHING_CLASSES: [&str; 3] = ["furnished", "semi-furnished", "unfurnished"];

/// Serializable parameters for [`EncodingTables`]: field name -> table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodingTablesParams {
    pub tables: BTreeMap<String, LabelEncoderParams>,
}

/// Frozen label-to-code tables for every categorical field.
#[derive(Clone, Debug)]
pub struct EncodingTables {
    encoders: BTreeMap<CategoricalField, FrozenLabelEncoder>,
}

impl EncodingTables {
    /// The tables the shipped model was trained with.
    ///
    /// Identical to `assets/label_encoders.json`.
    pub fn training_vocabulary() -> Self {
        let encoders = CategoricalField::ALL
            .into_iter()
            .map(|field| {
                let classes: &[&str] = match field {
                    CategoricalField::FurnishingStatus => &TRAINING_FURNISHING_CLASSES,
                    _ => &TRAINING_BINARY_CLASSES,
                };
                (field, FrozenLabelEncoder::from_ordered_classes(field, classes))
            })
            .collect();
        EncodingTables { encoders }
    }

    /// Build from one encoder per categorical field.
    pub fn new(encoders: impl IntoIterator<Item = FrozenLabelEncoder>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for encoder in encoders {
            let field = encoder.field();
            if map.insert(field, encoder).is_some() {
                return Err(EstimatorError::InvalidArtifact(format!(
                    "two encoding tables for {}",
                    field
                )));
            }
        }
        let tables = EncodingTables { encoders: map };
        tables.check_complete()?;
        Ok(tables)
    }

    fn check_complete(&self) -> Result<()> {
        match CategoricalField::ALL
            .into_iter()
            .find(|field| !self.encoders.contains_key(field))
        {
            Some(missing) => Err(EstimatorError::InvalidArtifact(format!(
                "no encoding table for {}",
                missing
            ))),
            None => Ok(()),
        }
    }

    /// Trained code for `label` in `field`.
    ///
    /// # Errors
    /// [`EstimatorError::UnknownCategory`] when `label` is not in the field's
    /// vocabulary. Callers must not substitute a default code.
    pub fn resolve(&self, field: CategoricalField, label: &str) -> Result<u32> {
        self.encoder(field)?.transform(label)
    }

    /// Label carrying `code` in `field`.
    pub fn decode(&self, field: CategoricalField, code: u32) -> Result<&str> {
        self.encoder(field)?.inverse_transform(code)
    }

    /// Labels of `field` ordered by code.
    pub fn classes(&self, field: CategoricalField) -> &[String] {
        self.encoders
            .get(&field)
            .map(|e| e.classes())
            .unwrap_or_default()
    }

    fn encoder(&self, field: CategoricalField) -> Result<&FrozenLabelEncoder> {
        // Unreachable after check_complete, reported rather than assumed.
        self.encoders
            .get(&field)
            .ok_or_else(|| EstimatorError::InvalidArtifact(format!("no encoding table for {}", field)))
    }

    /// Check that every label the input form can offer has a code, and that
    /// yes/no fields carry exactly those two labels.
    pub fn verify_vocabulary(&self) -> Result<()> {
        for field in CategoricalField::ALL {
            let encoder = self.encoder(field)?;
            if let Some(label) = field.vocabulary().iter().find(|l| !encoder.contains(l)) {
                return Err(EstimatorError::InvalidArtifact(format!(
                    "encoding table for {} has no code for '{}'",
                    field, label
                )));
            }
            if field.vocabulary() == &BINARY_LABELS[..] && !self.is_binary(field) {
                return Err(EstimatorError::InvalidArtifact(format!(
                    "encoding table for {} is not a yes/no table: {:?}",
                    field,
                    encoder.classes()
                )));
            }
        }
        Ok(())
    }

    /// Whether `field` is a yes/no field under these tables.
    pub fn is_binary(&self, field: CategoricalField) -> bool {
        let classes = self.classes(field);
        classes.len() == BINARY_LABELS.len()
            && BINARY_LABELS.iter().all(|l| classes.iter().any(|c| c == l))
    }
}

impl Artifact for EncodingTables {
    type Params = EncodingTablesParams;

    const KIND: ArtifactKind = ArtifactKind::Encoders;

    fn extract_params(&self) -> EncodingTablesParams {
        EncodingTablesParams {
            tables: self
                .encoders
                .iter()
                .map(|(field, encoder)| (field.name().to_string(), encoder.extract_params()))
                .collect(),
        }
    }

    fn from_params(params: EncodingTablesParams) -> Result<Self> {
        let encoders = params
            .tables
            .into_iter()
            .map(|(name, table)| {
                let field = name
                    .parse::<CategoricalField>()
                    .map_err(EstimatorError::InvalidArtifact)?;
                FrozenLabelEncoder::from_params(field, table)
            })
            .collect::<Result<Vec<_>>>()?;
        let tables = Self::new(encoders)?;
        info!(
            fields = tables.encoders.len(),
            labels = tables.encoders.values().map(|e| e.n_classes()).sum::<usize>(),
            "encoding tables ready"
        );
        Ok(tables)
    }
}
