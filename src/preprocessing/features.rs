//! Raw form values and the model-ordered feature vector built from them.

use crate::error::Result;
use crate::preprocessing::encoding::EncodingTables;
use crate::schema::{CategoricalField, Field, FEATURE_COUNT, FEATURE_ORDER};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One value per field, as the input form produced it.
///
/// Missing fields deserialize to the form defaults (see [`RawInputs::default`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawInputs {
    pub area: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub stories: u32,
    pub mainroad: String,
    pub guestroom: String,
    pub basement: String,
    pub hotwaterheating: String,
    pub airconditioning: String,
    pub parking: f64,
    pub prefarea: String,
    pub furnishingstatus: String,
}

impl Default for RawInputs {
    /// The values the form shows before the user touches anything.
    fn default() -> Self {
        RawInputs {
            area: 3000.0,
            bedrooms: 3,
            bathrooms: 2,
            stories: 2,
            mainroad: "yes".to_string(),
            guestroom: "yes".to_string(),
            basement: "yes".to_string(),
            hotwaterheating: "yes".to_string(),
            airconditioning: "yes".to_string(),
            parking: 1.0,
            prefarea: "yes".to_string(),
            furnishingstatus: "furnished".to_string(),
        }
    }
}

/// A single raw value, borrowed from a [`RawInputs`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawValue<'a> {
    /// Numeric field, widened losslessly to `f64`.
    Number(f64),
    /// Categorical field and its label.
    Label(CategoricalField, &'a str),
}

impl RawInputs {
    pub fn value(&self, field: Field) -> RawValue<'_> {
        match field {
            Field::Area => RawValue::Number(self.area),
            Field::Bedrooms => RawValue::Number(f64::from(self.bedrooms)),
            Field::Bathrooms => RawValue::Number(f64::from(self.bathrooms)),
            Field::Stories => RawValue::Number(f64::from(self.stories)),
            Field::Parking => RawValue::Number(self.parking),
            Field::Mainroad => self.labelled(CategoricalField::Mainroad),
            Field::Guestroom => self.labelled(CategoricalField::Guestroom),
            Field::Basement => self.labelled(CategoricalField::Basement),
            Field::Hotwaterheating => self.labelled(CategoricalField::HotWaterHeating),
            Field::Airconditioning => self.labelled(CategoricalField::AirConditioning),
            Field::Prefarea => self.labelled(CategoricalField::PrefArea),
            Field::Furnishingstatus => self.labelled(CategoricalField::FurnishingStatus),
        }
    }

    fn labelled(&self, field: CategoricalField) -> RawValue<'_> {
        RawValue::Label(field, self.label(field))
    }

    /// Raw label of a categorical field.
    pub fn label(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Mainroad => &self.mainroad,
            CategoricalField::Guestroom => &self.guestroom,
            CategoricalField::Basement => &self.basement,
            CategoricalField::HotWaterHeating => &self.hotwaterheating,
            CategoricalField::AirConditioning => &self.airconditioning,
            CategoricalField::PrefArea => &self.prefarea,
            CategoricalField::FurnishingStatus => &self.furnishingstatus,
        }
    }

    pub fn label_mut(&mut self, field: CategoricalField) -> &mut String {
        match field {
            CategoricalField::Mainroad => &mut self.mainroad,
            CategoricalField::Guestroom => &mut self.guestroom,
            CategoricalField::Basement => &mut self.basement,
            CategoricalField::HotWaterHeating => &mut self.hotwaterheating,
            CategoricalField::AirConditioning => &mut self.airconditioning,
            CategoricalField::PrefArea => &mut self.prefarea,
            CategoricalField::FurnishingStatus => &mut self.furnishingstatus,
        }
    }
}

/// Twelve numeric values in [`FEATURE_ORDER`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wrap values that are already in feature order.
    pub fn from_ordered(values: [f64; FEATURE_COUNT]) -> Self {
        FeatureVector(values)
    }

    pub fn get(&self, field: Field) -> f64 {
        self.0[field.position()]
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.0[..])
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.0.to_vec())
    }

    /// `(field, value)` pairs in feature order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        FEATURE_ORDER.iter().copied().zip(self.0.iter().copied())
    }
}

impl Index<Field> for FeatureVector {
    type Output = f64;

    fn index(&self, field: Field) -> &f64 {
        &self.0[field.position()]
    }
}

/// Assembles feature vectors from raw inputs using frozen encoding tables.
#[derive(Clone, Copy, Debug)]
pub struct FeatureVectorBuilder<'a> {
    tables: &'a EncodingTables,
}

impl<'a> FeatureVectorBuilder<'a> {
    pub fn new(tables: &'a EncodingTables) -> Self {
        FeatureVectorBuilder { tables }
    }

    /// Build the model input for one record.
    ///
    /// Numeric fields pass through untouched; categorical fields are replaced
    /// by their trained codes.
    ///
    /// # Errors
    /// The first [`crate::EstimatorError::UnknownCategory`] hit, in feature
    /// order. No vector is produced in that case.
    pub fn build(&self, raw: &RawInputs) -> Result<FeatureVector> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, field) in values.iter_mut().zip(FEATURE_ORDER) {
            *slot = match raw.value(field) {
                RawValue::Number(value) => value,
                RawValue::Label(cat, label) => f64::from(self.tables.resolve(cat, label)?),
            };
        }
        Ok(FeatureVector(values))
    }
}
