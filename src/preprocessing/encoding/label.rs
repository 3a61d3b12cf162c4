//! Frozen label encoding for a single categorical field.
//!
//! Maps string labels to the integer codes assigned when the model was trained.

use crate::error::{EstimatorError, Result};
use crate::schema::CategoricalField;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Serializable parameters for a [`FrozenLabelEncoder`]: `label -> code`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoderParams {
    pub mapping: BTreeMap<String, u32>,
}

/// Label encoder with a mapping fixed at training time.
///
/// There is deliberately no `fit`: codes are loaded, never derived, since a
/// re-derived mapping can silently disagree with the one the model saw.
#[derive(Clone, Debug)]
pub struct FrozenLabelEncoder {
    field: CategoricalField,
    /// Labels ordered by code.
    classes_: Vec<String>,
    /// Mapping from label to code.
    class_to_code: HashMap<String, u32>,
}

impl FrozenLabelEncoder {
    /// Build from an exported class list; a label's code is its position.
    pub fn from_classes<S: AsRef<str>>(field: CategoricalField, classes: &[S]) -> Result<Self> {
        let mapping = classes
            .iter()
            .enumerate()
            .map(|(code, label)| (label.as_ref().to_string(), code as u32))
            .collect::<BTreeMap<_, _>>();
        if mapping.len() != classes.len() {
            return Err(EstimatorError::InvalidArtifact(format!(
                "duplicate label in class list for {}",
                field
            )));
        }
        Self::from_params(field, LabelEncoderParams { mapping })
    }

    /// Codes assigned by position in `classes`, which must hold distinct labels.
    pub(crate) fn from_ordered_classes(field: CategoricalField, classes: &[&str]) -> Self {
        FrozenLabelEncoder {
            field,
            classes_: classes.iter().map(|label| label.to_string()).collect(),
            class_to_code: classes
                .iter()
                .enumerate()
                .map(|(code, label)| (label.to_string(), code as u32))
                .collect(),
        }
    }

    /// Reconstruct from parameters, rejecting empty tables and shared codes.
    pub fn from_params(field: CategoricalField, params: LabelEncoderParams) -> Result<Self> {
        if params.mapping.is_empty() {
            return Err(EstimatorError::InvalidArtifact(format!(
                "encoding table for {} is empty",
                field
            )));
        }

        let mut by_code: BTreeMap<u32, String> = BTreeMap::new();
        for (label, &code) in &params.mapping {
            if let Some(other) = by_code.insert(code, label.clone()) {
                return Err(EstimatorError::InvalidArtifact(format!(
                    "labels '{}' and '{}' share code {} in {}",
                    other, label, code, field
                )));
            }
        }

        Ok(FrozenLabelEncoder {
            field,
            classes_: by_code.into_values().collect(),
            class_to_code: params.mapping.into_iter().collect(),
        })
    }

    pub fn field(&self) -> CategoricalField {
        self.field
    }

    /// Labels ordered by ascending code.
    pub fn classes(&self) -> &[String] {
        &self.classes_
    }

    pub fn n_classes(&self) -> usize {
        self.classes_.len()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.class_to_code.contains_key(label)
    }

    /// Code for `label`. Exact, case-sensitive match.
    pub fn transform(&self, label: &str) -> Result<u32> {
        self.class_to_code
            .get(label)
            .copied()
            .ok_or_else(|| EstimatorError::UnknownCategory {
                field: self.field,
                label: label.to_string(),
            })
    }

    /// Label carrying `code`.
    pub fn inverse_transform(&self, code: u32) -> Result<&str> {
        self.class_to_code
            .iter()
            .find(|(_, &c)| c == code)
            .map(|(label, _)| label.as_str())
            .ok_or(EstimatorError::UnknownCode {
                field: self.field,
                code,
            })
    }

    pub fn extract_params(&self) -> LabelEncoderParams {
        LabelEncoderParams {
            mapping: self
                .class_to_code
                .iter()
                .map(|(label, &code)| (label.clone(), code))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn furnishing() -> FrozenLabelEncoder {
        FrozenLabelEncoder::from_classes(
            CategoricalField::FurnishingStatus,
            &["furnished", "semi-furnished", "unfurnished"],
        )
        .unwrap()
    }

    #[test]
    fn test_from_ordered_classes_matches_from_classes() {
        let classes = ["furnished", "semi-furnished", "unfurnished"];
        let direct =
            FrozenLabelEncoder::from_ordered_classes(CategoricalField::FurnishingStatus, &classes);
        let checked = furnishing();
        assert_eq!(direct.classes(), checked.classes());
        assert_eq!(direct.extract_params(), checked.extract_params());
        assert_eq!(direct.transform("unfurnished").unwrap(), 2);
    }

    #[test]
    fn test_label_encoder_basic() {
        let encoder = furnishing();

        assert_eq!(encoder.n_classes(), 3);
        assert_eq!(encoder.transform("furnished").unwrap(), 0);
        assert_eq!(encoder.transform("semi-furnished").unwrap(), 1);
        assert_eq!(encoder.transform("unfurnished").unwrap(), 2);
    }

    #[test]
    fn test_label_encoder_keeps_opaque_codes() {
        let mapping = BTreeMap::from([("no".to_string(), 7), ("yes".to_string(), 3)]);
        let encoder =
            FrozenLabelEncoder::from_params(CategoricalField::Basement, LabelEncoderParams { mapping })
                .unwrap();

        assert_eq!(encoder.transform("yes").unwrap(), 3);
        assert_eq!(encoder.transform("no").unwrap(), 7);
        assert_eq!(encoder.classes(), &["yes".to_string(), "no".to_string()]);
    }

    #[test]
    fn test_label_encoder_inverse() {
        let encoder = furnishing();
        for label in ["furnished", "semi-furnished", "unfurnished"] {
            let code = encoder.transform(label).unwrap();
            assert_eq!(encoder.inverse_transform(code).unwrap(), label);
        }
        assert!(matches!(
            encoder.inverse_transform(3),
            Err(EstimatorError::UnknownCode { code: 3, .. })
        ));
    }

    #[test]
    fn test_label_encoder_unknown_error() {
        let encoder = furnishing();
        let err = encoder.transform("Furnished").unwrap_err();
        match err {
            EstimatorError::UnknownCategory { field, label } => {
                assert_eq!(field, CategoricalField::FurnishingStatus);
                assert_eq!(label, "Furnished");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(encoder.transform("").is_err());
        assert!(encoder.transform(" furnished").is_err());
    }

    #[test]
    fn test_label_encoder_rejects_shared_codes() {
        let mapping = BTreeMap::from([("no".to_string(), 0), ("yes".to_string(), 0)]);
        let result =
            FrozenLabelEncoder::from_params(CategoricalField::Mainroad, LabelEncoderParams { mapping });
        assert!(matches!(result, Err(EstimatorError::InvalidArtifact(_))));
    }

    #[test]
    fn test_label_encoder_rejects_duplicate_classes() {
        let result = FrozenLabelEncoder::from_classes(CategoricalField::Mainroad, &["no", "no"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_label_encoder_empty_data() {
        let empty: [&str; 0] = [];
        let result = FrozenLabelEncoder::from_classes(CategoricalField::Mainroad, &empty);
        assert!(result.is_err());
    }

    #[test]
    fn test_label_encoder_params_round_trip() {
        let encoder = furnishing();
        let rebuilt =
            FrozenLabelEncoder::from_params(encoder.field(), encoder.extract_params()).unwrap();
        assert_eq!(rebuilt.classes(), encoder.classes());
        for label in encoder.classes() {
            assert_eq!(rebuilt.transform(label).unwrap(), encoder.transform(label).unwrap());
        }
    }
}
