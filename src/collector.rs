//! The input form: one control per field, its domain and its default.
//!
//! Rendering is left to whatever front end hosts the form. This module only
//! describes the controls and checks that a submitted record stays inside
//! them.

use crate::error::{EstimatorError, Result};
use crate::preprocessing::{RawInputs, RawValue};
use crate::schema::{Field, BINARY_LABELS, FEATURE_ORDER, FURNISHING_LABELS};

/// The set of values a control can produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Domain {
    /// Number input or slider: `min..=max` reachable from `min` in `step` increments.
    Range { min: f64, max: f64, step: f64 },
    /// Select box over numbers.
    NumberChoice(&'static [f64]),
    /// Select box over labels.
    LabelChoice(&'static [&'static str]),
}

/// A single form control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Control {
    pub field: Field,
    pub caption: &'static str,
    pub domain: Domain,
}

const BEDROOM_CHOICES: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
const BATHROOM_CHOICES: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
const STORY_CHOICES: [f64; 4] = [1.0, 2.0, 3.0, 4.0];

impl Control {
    pub fn for_field(field: Field) -> Control {
        let (caption, domain) = match field {
            Field::Area => (
                "Area (sq ft)",
                Domain::Range {
                    min: 500.0,
                    max: 10_000.0,
                    step: 100.0,
                },
            ),
            Field::Bedrooms => ("Bedrooms", Domain::NumberChoice(&BEDROOM_CHOICES)),
            Field::Bathrooms => ("Bathrooms", Domain::NumberChoice(&BATHROOM_CHOICES)),
            Field::Stories => ("Stories", Domain::NumberChoice(&STORY_CHOICES)),
            Field::Parking => (
                "Parking Spaces",
                Domain::Range {
                    min: 0.0,
                    max: 3.0,
                    step: 1.0,
                },
            ),
            Field::Mainroad => ("Main Road Access", Domain::LabelChoice(&BINARY_LABELS)),
            Field::Guestroom => ("Guest Room", Domain::LabelChoice(&BINARY_LABELS)),
            Field::Basement => ("Basement", Domain::LabelChoice(&BINARY_LABELS)),
            Field::Hotwaterheating => ("Hot Water Heating", Domain::LabelChoice(&BINARY_LABELS)),
            Field::Airconditioning => ("Air Conditioning", Domain::LabelChoice(&BINARY_LABELS)),
            Field::Prefarea => ("Preferred Area", Domain::LabelChoice(&BINARY_LABELS)),
            Field::Furnishingstatus => (
                "Furnishing Status",
                Domain::LabelChoice(&FURNISHING_LABELS),
            ),
        };
        Control {
            field,
            caption,
            domain,
        }
    }

    /// Check one raw value against this control.
    pub fn check(&self, value: RawValue<'_>) -> Result<()> {
        let reason = match (self.domain, value) {
            (Domain::Range { min, max, step }, RawValue::Number(x)) => {
                if !x.is_finite() || x < min || x > max {
                    Some(format!("{} is outside {}..={}", x, min, max))
                } else if !on_step(x, min, step) {
                    Some(format!("{} is not a multiple of {} from {}", x, step, min))
                } else {
                    None
                }
            }
            (Domain::NumberChoice(choices), RawValue::Number(x)) => {
                (!choices.contains(&x)).then(|| format!("{} is not one of {:?}", x, choices))
            }
            (Domain::LabelChoice(labels), RawValue::Label(_, label)) => {
                (!labels.iter().any(|l| *l == label))
                    .then(|| format!("'{}' is not one of {:?}", label, labels))
            }
            (_, other) => Some(format!("{:?} does not fit this control", other)),
        };
        match reason {
            Some(reason) => Err(EstimatorError::InvalidInput {
                field: self.field,
                reason,
            }),
            None => Ok(()),
        }
    }
}

fn on_step(x: f64, min: f64, step: f64) -> bool {
    let steps = (x - min) / step;
    (steps - steps.round()).abs() < 1e-9
}

/// All controls, in feature order.
pub fn form() -> [Control; 12] {
    FEATURE_ORDER.map(Control::for_field)
}

/// Reject a record that no combination of form controls could have produced.
pub fn validate(raw: &RawInputs) -> Result<()> {
    form()
        .iter()
        .try_for_each(|control| control.check(raw.value(control.field)))
}
