//! House attributes, their kinds and the feature order the model was trained on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of values in a feature vector.
pub const FEATURE_COUNT: usize = 12;

/// Labels offered by every yes/no field.
pub const BINARY_LABELS: [&str; 2] = ["yes", "no"];

/// Labels offered by `furnishingstatus`.
pub const FURNISHING_LABELS: [&str; 3] = ["furnished", "semi-furnished", "unfurnished"];

/// How a field's raw value reaches the feature vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Real-valued, passed through.
    Continuous,
    /// Small integer count, passed through.
    Discrete,
    /// String label, replaced by its trained code.
    Categorical,
}

/// One of the twelve house attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Area,
    Bedrooms,
    Bathrooms,
    Stories,
    Mainroad,
    Guestroom,
    Basement,
    Hotwaterheating,
    Airconditioning,
    Parking,
    Prefarea,
    Furnishingstatus,
}

/// Column order used when the model was trained.
///
/// A vector in any other order is accepted by the model without complaint and
/// yields a wrong price, so every producer of feature vectors indexes through
/// this table.
pub const FEATURE_ORDER: [Field; FEATURE_COUNT] = [
    Field::Area,
    Field::Bedrooms,
    Field::Bathrooms,
    Field::Stories,
    Field::Mainroad,
    Field::Guestroom,
    Field::Basement,
    Field::Hotwaterheating,
    Field::Airconditioning,
    Field::Parking,
    Field::Prefarea,
    Field::Furnishingstatus,
];

impl Field {
    /// Column name as it appears in the training data.
    pub fn name(self) -> &'static str {
        match self {
            Field::Area => "area",
            Field::Bedrooms => "bedrooms",
            Field::Bathrooms => "bathrooms",
            Field::Stories => "stories",
            Field::Mainroad => "mainroad",
            Field::Guestroom => "guestroom",
            Field::Basement => "basement",
            Field::Hotwaterheating => "hotwaterheating",
            Field::Airconditioning => "airconditioning",
            Field::Parking => "parking",
            Field::Prefarea => "prefarea",
            Field::Furnishingstatus => "furnishingstatus",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Area | Field::Parking => FieldKind::Continuous,
            Field::Bedrooms | Field::Bathrooms | Field::Stories => FieldKind::Discrete,
            _ => FieldKind::Categorical,
        }
    }

    /// Index of this field in [`FEATURE_ORDER`].
    pub fn position(self) -> usize {
        match self {
            Field::Area => 0,
            Field::Bedrooms => 1,
            Field::Bathrooms => 2,
            Field::Stories => 3,
            Field::Mainroad => 4,
            Field::Guestroom => 5,
            Field::Basement => 6,
            Field::Hotwaterheating => 7,
            Field::Airconditioning => 8,
            Field::Parking => 9,
            Field::Prefarea => 10,
            Field::Furnishingstatus => 11,
        }
    }

    /// The categorical view of this field, if it is one.
    pub fn as_categorical(self) -> Option<CategoricalField> {
        match self {
            Field::Mainroad => Some(CategoricalField::Mainroad),
            Field::Guestroom => Some(CategoricalField::Guestroom),
            Field::Basement => Some(CategoricalField::Basement),
            Field::Hotwaterheating => Some(CategoricalField::HotWaterHeating),
            Field::Airconditioning => Some(CategoricalField::AirConditioning),
            Field::Prefarea => Some(CategoricalField::PrefArea),
            Field::Furnishingstatus => Some(CategoricalField::FurnishingStatus),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field whose raw value is a string label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoricalField {
    Mainroad,
    Guestroom,
    Basement,
    HotWaterHeating,
    AirConditioning,
    PrefArea,
    FurnishingStatus,
}

impl CategoricalField {
    /// All categorical fields, in feature order.
    pub const ALL: [CategoricalField; 7] = [
        CategoricalField::Mainroad,
        CategoricalField::Guestroom,
        CategoricalField::Basement,
        CategoricalField::HotWaterHeating,
        CategoricalField::AirConditioning,
        CategoricalField::PrefArea,
        CategoricalField::FurnishingStatus,
    ];

    pub fn field(self) -> Field {
        match self {
            CategoricalField::Mainroad => Field::Mainroad,
            CategoricalField::Guestroom => Field::Guestroom,
            CategoricalField::Basement => Field::Basement,
            CategoricalField::HotWaterHeating => Field::Hotwaterheating,
            CategoricalField::AirConditioning => Field::Airconditioning,
            CategoricalField::PrefArea => Field::Prefarea,
            CategoricalField::FurnishingStatus => Field::Furnishingstatus,
        }
    }

    pub fn name(self) -> &'static str {
        self.field().name()
    }

    /// Labels the input form offers for this field, in display order.
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            CategoricalField::FurnishingStatus => &FURNISHING_LABELS,
            _ => &BINARY_LABELS,
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoricalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoricalField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("'{}' is not a categorical field", s))
    }
}
