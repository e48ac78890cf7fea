// Copyright (c) 2021-2024 Espresso Systems (espressosys.com)
// This file is part of the bls-keygen repository.

// You should have received a copy of the MIT License
// along with the bls-keygen repository. If not, see <https://mit-license.org/>.

//! JSON configuration consumed by a BN254 BLS verifier

use std::{fs, path::Path};

use ark_ff::PrimeField;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::KeyError,
    keys::PublicKey,
    precompile::{
        decode_g1, decode_g2, validate_field_order, FIELD_ELEMENT_SIZE, G1_POINT_SIZE,
        G2_POINT_SIZE,
    },
};

/// Where the configuration is written unless told otherwise
pub const DEFAULT_OUTPUT_PATH: &str = "script/BLSConfig.json";

/// Public key coordinates as decimal strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsConfig {
    /// G1 x
    #[serde(rename = "g1X")]
    pub g1_x: String,
    /// G1 y
    #[serde(rename = "g1Y")]
    pub g1_y: String,
    /// G2 x, real part
    #[serde(rename = "g2X")]
    pub g2_x: String,
    /// G2 x, imaginary part
    #[serde(rename = "g2X1")]
    pub g2_x1: String,
    /// G2 y, real part
    #[serde(rename = "g2Y")]
    pub g2_y: String,
    /// G2 y, imaginary part
    #[serde(rename = "g2Y1")]
    pub g2_y1: String,
}

impl From<&PublicKey> for BlsConfig {
    fn from(pk: &PublicKey) -> Self {
        let (g1, g2) = (pk.g1(), pk.g2());
        Self {
            g1_x: to_decimal(&g1.x),
            g1_y: to_decimal(&g1.y),
            g2_x: to_decimal(&g2.x.c0),
            g2_x1: to_decimal(&g2.x.c1),
            g2_y: to_decimal(&g2.y.c0),
            g2_y1: to_decimal(&g2.y.c1),
        }
    }
}

impl BlsConfig {
    /// Pretty printed JSON with two-space indentation and a trailing newline
    ///
    /// # Errors
    /// Returns [`KeyError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, KeyError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Create or truncate the file at `path` and write the configuration into it.
    /// The parent directory must already exist.
    ///
    /// # Errors
    /// Returns [`KeyError::Io`] if the file cannot be written.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), KeyError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| KeyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("wrote BLS configuration");
        Ok(())
    }

    /// Load a configuration previously written by [`BlsConfig::write_to`]
    ///
    /// # Errors
    /// Returns [`KeyError::Io`] if the file cannot be read and [`KeyError::Json`] if it is not
    /// a configuration object.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| KeyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parse and validate the coordinates back into a public key.
    ///
    /// Each coordinate must be a canonical base field element and both points must be valid
    /// group elements.
    ///
    /// # Errors
    /// - [`KeyError::InvalidPointFormat`] if a coordinate is not a decimal integer or a point
    ///   is off the curve
    /// - [`KeyError::InvalidFieldOrder`] if a coordinate is not below the modulus
    /// - [`KeyError::PointNotInSubgroup`] if the G2 point is outside the prime-order subgroup
    pub fn to_public_key(&self) -> Result<PublicKey, KeyError> {
        let mut g1 = [0u8; G1_POINT_SIZE];
        for (chunk, value) in g1
            .chunks_exact_mut(FIELD_ELEMENT_SIZE)
            .zip([&self.g1_x, &self.g1_y])
        {
            put_decimal(chunk, value)?;
        }

        // precompile layout, imaginary part first
        let mut g2 = [0u8; G2_POINT_SIZE];
        for (chunk, value) in g2
            .chunks_exact_mut(FIELD_ELEMENT_SIZE)
            .zip([&self.g2_x1, &self.g2_x, &self.g2_y1, &self.g2_y])
        {
            put_decimal(chunk, value)?;
        }

        Ok(PublicKey::from_points(decode_g1(&g1)?, decode_g2(&g2)?))
    }
}

/// Canonical decimal form of a field element, zero is `"0"`
fn to_decimal<F: PrimeField>(f: &F) -> String {
    let n: BigUint = (*f).into();
    n.to_string()
}

/// Parse a decimal coordinate into a 32-byte big-endian slot
fn put_decimal(out: &mut [u8], value: &str) -> Result<(), KeyError> {
    let not_decimal =
        || KeyError::point_format(format!("coordinate {value:?} is not a decimal integer"));
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_decimal());
    }
    let n = BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(not_decimal)?;
    if !validate_field_order(&n) {
        return Err(KeyError::InvalidFieldOrder);
    }
    let bytes = n.to_bytes_be();
    out[FIELD_ELEMENT_SIZE - bytes.len()..].copy_from_slice(&bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keys::generate_key_pair, precompile::FIELD_MODULUS, scalar::PrivateKey};

    /// Public key for `sk = 1`, i.e. the generators
    fn generator_config() -> BlsConfig {
        BlsConfig {
            g1_x: "1".into(),
            g1_y: "2".into(),
            g2_x: "10857046999023057135944570762232829481370756359578518086990519993285655852781"
                .into(),
            g2_x1: "11559732032986387107991004021392285783925812861821192530917403151452391805634"
                .into(),
            g2_y: "8495653923123431417604973247489272438418190587263600148770280649306958101930"
                .into(),
            g2_y1: "4082367875863433681332203403145435568316851327593401208105741076214120093531"
                .into(),
        }
    }

    #[test]
    fn unit_scalar_gives_generator_coordinates() {
        let pk = generate_key_pair(&PrivateKey::from_decimal("1").unwrap());
        assert_eq!(BlsConfig::from(&pk), generator_config());
    }

    #[test]
    fn doubled_generator_coordinates() {
        let pk = generate_key_pair(&PrivateKey::from_decimal("2").unwrap());
        let config = BlsConfig::from(&pk);
        assert_eq!(
            config.g1_x,
            "1368015179489954701390400359078579693043519447331113978918064868415326638035"
        );
        assert_eq!(
            config.g1_y,
            "9918110051302171585080402603319702774565515993150576347155970296011118125764"
        );
    }

    #[test]
    fn negative_scalar_negates_y() {
        let pk = generate_key_pair(&PrivateKey::from_decimal("-1").unwrap());
        let config = BlsConfig::from(&pk);
        assert_eq!(config.g1_x, "1");
        assert_eq!(
            config.g1_y,
            "21888242871839275222246405745257275088696311157297823662689037894645226208581"
        );
    }

    #[test]
    fn identity_renders_as_zeroes() {
        let pk = generate_key_pair(&PrivateKey::from_decimal("0").unwrap());
        let config = BlsConfig::from(&pk);
        for value in [
            &config.g1_x,
            &config.g1_y,
            &config.g2_x,
            &config.g2_x1,
            &config.g2_y,
            &config.g2_y1,
        ] {
            assert_eq!(value, "0");
        }
        assert_eq!(config.to_public_key().unwrap(), pk);
    }

    #[test]
    fn json_has_fixed_keys_in_order() {
        let json = generator_config().to_json().unwrap();
        let expected = "{\n  \"g1X\": \"1\",\n  \"g1Y\": \"2\",\n  \"g2X\": \"10857046999023057135944570762232829481370756359578518086990519993285655852781\",\n  \"g2X1\": \"11559732032986387107991004021392285783925812861821192530917403151452391805634\",\n  \"g2Y\": \"8495653923123431417604973247489272438418190587263600148770280649306958101930\",\n  \"g2Y1\": \"4082367875863433681332203403145435568316851327593401208105741076214120093531\"\n}\n";
        assert_eq!(json, expected);
    }

    #[test]
    fn validates_coordinates() {
        let mut config = generator_config();
        config.g1_y = "3".into();
        assert!(matches!(
            config.to_public_key(),
            Err(KeyError::InvalidPointFormat { .. })
        ));

        let mut config = generator_config();
        config.g2_x = FIELD_MODULUS.into();
        assert!(matches!(
            config.to_public_key(),
            Err(KeyError::InvalidFieldOrder)
        ));

        let mut config = generator_config();
        config.g1_x = "0x01".into();
        assert!(matches!(
            config.to_public_key(),
            Err(KeyError::InvalidPointFormat { .. })
        ));

        let mut config = generator_config();
        config.g2_y1 = "1".repeat(100);
        assert!(matches!(
            config.to_public_key(),
            Err(KeyError::InvalidFieldOrder)
        ));
    }
}
