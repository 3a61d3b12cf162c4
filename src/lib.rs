//! # house-price-estimator
//!
//! Estimates a house price from twelve attributes using frozen categorical
//! encoders and a pre-trained regression model.
//!
//! ## Core Design Principles
//!
//! - **Frozen Encoding**: label-to-code tables are loaded from the training
//!   artifact, never re-fit. A re-derived mapping could assign different
//!   codes and the model would silently return wrong prices.
//! - **Order Is a Contract**: feature vectors always follow
//!   [`schema::FEATURE_ORDER`], the column order used in training.
//! - **Opaque Predictor**: models sit behind the [`model::Predictor`] trait;
//!   callers never see the algorithm or its file format.
//! - **Explicit State**: artifacts are loaded once and handed to the
//!   estimator; there are no globals.
//!
//! ## Quick Start
//!
//! ```rust
//! use house_price_estimator::display::PriceFormatter;
//! use house_price_estimator::model::{LinearRegressor, SerializableLinearParams};
//! use house_price_estimator::preprocessing::{EncodingTables, RawInputs};
//! use house_price_estimator::HousePriceEstimator;
//!
//! let model = LinearRegressor::from_params(SerializableLinearParams {
//!     weights: vec![1000.0; 12],
//!     bias: 0.0,
//! })?;
//! let estimator = HousePriceEstimator::new(
//!     EncodingTables::training_vocabulary(),
//!     model,
//!     PriceFormatter::default(),
//! );
//!
//! let estimate = estimator.estimate(&RawInputs::default())?;
//! assert_eq!(estimate.message, "Estimated House Price: ₹ 3,014,000");
//! # Ok::<(), house_price_estimator::EstimatorError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `schema`: fields, kinds and the training feature order
//! - `preprocessing`: encoding tables and the feature vector builder
//! - `model`: the `Predictor` trait, linear and tree-ensemble models
//! - `collector`: input form controls, defaults and domain checks
//! - `display`: truncation and currency formatting
//! - `estimator`: one build → predict → display pass
//! - `config`: artifact locations and display settings
//! - `serialization`: artifact formats (JSON and bincode)

/// Error types shared by every module.
pub mod error;

/// Field definitions and the feature order.
pub mod schema;

/// Encoding tables and feature vector assembly.
pub mod preprocessing;

/// Pre-trained regression models.
pub mod model;

/// Input form controls.
pub mod collector;

/// Price rendering.
pub mod display;

pub mod estimator;

pub mod config;

/// Artifact persistence.
pub mod serialization;

pub use error::{ErrorKind, EstimatorError, Result};
pub use estimator::{Estimate, HousePriceEstimator};
pub use model::{Predictor, RegressionModel};
pub use preprocessing::{EncodingTables, FeatureVector, FeatureVectorBuilder, RawInputs};
pub use schema::{CategoricalField, Field, FEATURE_COUNT, FEATURE_ORDER};
