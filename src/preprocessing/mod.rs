//! Turning raw form values into model input.
//!
//! # Design Philosophy
//!
//! - **Frozen encoders**: categorical codes come from the training artifact and
//!   are never re-fit at inference time.
//! - **Fixed order**: feature vectors are always laid out in
//!   [`crate::schema::FEATURE_ORDER`].
//! - **No guessing**: an unknown label aborts the build; nothing is defaulted.
//!
//! # Example
//!
//! ```
//! use house_price_estimator::preprocessing::{EncodingTables, FeatureVectorBuilder, RawInputs};
//!
//! let tables = EncodingTables::training_vocabulary();
//! let vector = FeatureVectorBuilder::new(&tables).build(&RawInputs::default())?;
//! assert_eq!(vector.len(), 12);
//! # Ok::<(), house_price_estimator::EstimatorError>(())
//! ```

pub mod encoding;
pub mod features;

pub use encoding::{EncodingTables, EncodingTablesParams, FrozenLabelEncoder, LabelEncoderParams};
pub use features::{FeatureVector, FeatureVectorBuilder, RawInputs, RawValue};
