// Copyright (c) 2021-2024 Espresso Systems (espressosys.com)
// This file is part of the bls-keygen repository.

// You should have received a copy of the MIT License
// along with the bls-keygen repository. If not, see <https://mit-license.org/>.

//! Error type for `bn254-keys`
//!
//! This module provides [`KeyError`], which is an enum representing possible faults that can
//! occur while deriving, encoding or persisting a key.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for key derivation and configuration output
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyError {
    /// The private scalar was not a decimal integer
    #[error("Invalid decimal scalar: {input:?}")]
    InvalidScalar {
        /// The rejected input
        input: String,
    },

    /// Bytes or coordinates do not describe a point in the precompile format
    #[error("Invalid point format for precompile: {reason}")]
    InvalidPointFormat {
        /// What was wrong with the encoding
        reason: String,
    },

    /// The point is on the curve but outside the prime-order subgroup
    #[error("Point not in correct subgroup")]
    PointNotInSubgroup,

    /// A coordinate is not below the base field modulus
    #[error("Number not in valid field order")]
    InvalidFieldOrder,

    /// Reading or writing a configuration file failed
    #[error("I/O error on `{}`", path.display())]
    Io {
        /// The file being accessed
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// Failed to encode or decode the JSON configuration
    #[error("Failed to (de)serialize JSON")]
    Json(#[from] serde_json::Error),

    /// Failed to (de)serialize a point with the canonical arkworks encoding
    #[error("Failed to (de)serialize point")]
    Serialization(#[from] ark_serialize::SerializationError),
}

impl KeyError {
    /// Shorthand for [`KeyError::InvalidPointFormat`]
    pub(crate) fn point_format(reason: impl Into<String>) -> Self {
        Self::InvalidPointFormat {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn cause_is_reported_once() {
        let err = KeyError::Io {
            path: PathBuf::from("script/BLSConfig.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert_eq!(err.to_string(), "I/O error on `script/BLSConfig.json`");
        assert_eq!(err.source().unwrap().to_string(), "no such directory");

        let err = KeyError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(err.to_string(), "Failed to (de)serialize JSON");
        assert!(err.source().is_some());
    }
}
