//! Persistence of the startup artifacts.
//!
//! Artifacts hold only plain data (label maps, weights, tree nodes). The
//! on-disk encoding is picked from the file extension: `.json` files go
//! through `serde_json`, everything else through `bincode`.

use crate::error::{EstimatorError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A trait for parameter representations that can be serialized to and from bytes.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> std::result::Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: Serialize + DeserializeOwned,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> std::result::Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

/// Which of the two startup artifacts a file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Encoders,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Model => f.write_str("model"),
            ArtifactKind::Encoders => f.write_str("encoders"),
        }
    }
}

/// Byte encoding of an artifact file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactFormat {
    Bincode,
    Json,
}

impl ArtifactFormat {
    /// `.json` (any case) selects JSON; anything else is bincode.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ArtifactFormat::Json,
            _ => ArtifactFormat::Bincode,
        }
    }

    pub fn encode<T: Serialize + DeserializeOwned>(self, value: &T) -> Result<Vec<u8>> {
        match self {
            ArtifactFormat::Bincode => Ok(value.to_bytes()?),
            ArtifactFormat::Json => Ok(serde_json::to_vec_pretty(value)?),
        }
    }

    pub fn decode<T: Serialize + DeserializeOwned>(self, bytes: &[u8]) -> Result<T> {
        match self {
            ArtifactFormat::Bincode => Ok(T::from_bytes(bytes)?),
            ArtifactFormat::Json => Ok(serde_json::from_slice(bytes)?),
        }
    }
}

/// A loaded, validated artifact with a plain-data parameter form.
///
/// # Guarantees
/// - `extract_params()` followed by `from_params()` reproduces the artifact.
/// - `from_params()` rejects parameters that break the artifact's invariants,
///   so a value of `Self` is always usable.
pub trait Artifact: Sized {
    /// Serializable representation of the artifact.
    type Params: Serialize + DeserializeOwned;

    const KIND: ArtifactKind;

    fn extract_params(&self) -> Self::Params;

    fn from_params(params: Self::Params) -> Result<Self>;

    /// Save to `path`, encoded according to its extension.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = ArtifactFormat::from_path(path).encode(&self.extract_params())?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load from `path`. Every failure is reported as [`EstimatorError::ArtifactLoad`].
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let load = || -> Result<Self> {
            let bytes = std::fs::read(path)?;
            let params = ArtifactFormat::from_path(path).decode::<Self::Params>(&bytes)?;
            Self::from_params(params)
        };
        load().map_err(|source| EstimatorError::artifact_load(Self::KIND, path, source))
    }
}
