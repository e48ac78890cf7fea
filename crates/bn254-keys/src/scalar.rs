// Copyright (c) 2021-2024 Espresso Systems (espressosys.com)
// This file is part of the bls-keygen repository.

// You should have received a copy of the MIT License
// along with the bls-keygen repository. If not, see <https://mit-license.org/>.

//! Parsing of the private scalar and the private key built from it

use std::fmt;

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField, Zero};
use num_bigint::{BigInt, BigUint, Sign};
use tracing::warn;

use crate::error::KeyError;

/// Parse a decimal integer of arbitrary size.
///
/// Accepts an optional `+` or `-` sign followed by ASCII digits. Surrounding whitespace is
/// ignored. No range check is applied, reduction happens in [`PrivateKey::from_integer`].
///
/// # Errors
/// Returns [`KeyError::InvalidScalar`] if the input is not a decimal integer.
pub fn parse_scalar(input: &str) -> Result<BigInt, KeyError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(KeyError::InvalidScalar {
            input: input.to_string(),
        });
    }
    BigInt::parse_bytes(trimmed.as_bytes(), 10).ok_or_else(|| KeyError::InvalidScalar {
        input: input.to_string(),
    })
}

/// BLS private key: a scalar of the BN254 group order
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey {
    /// The scalar, reduced modulo the group order
    scalar: Fr,
}

impl PrivateKey {
    /// Build a private key from an arbitrary integer.
    ///
    /// The integer is reduced modulo the group order `r`, negative values wrap around to
    /// `r - (|n| mod r)`. Multiplying a generator by the reduced scalar gives the same point as
    /// multiplying by the original integer.
    #[must_use]
    pub fn from_integer(n: &BigInt) -> Self {
        let magnitude = n.magnitude();
        let mut scalar = Fr::from_be_bytes_mod_order(&magnitude.to_bytes_be());
        if n.sign() == Sign::Minus {
            scalar = -scalar;
        }

        if scalar.is_zero() {
            warn!("private scalar is zero modulo the group order, public key is the identity");
        } else if magnitude >= &BigUint::from(Fr::MODULUS) {
            warn!("private scalar exceeds the group order and was reduced");
        } else if n.sign() == Sign::Minus {
            warn!("private scalar is negative and was reduced modulo the group order");
        }

        Self { scalar }
    }

    /// Parse a decimal string and build a private key from it
    ///
    /// # Errors
    /// Returns [`KeyError::InvalidScalar`] if the input is not a decimal integer.
    pub fn from_decimal(input: &str) -> Result<Self, KeyError> {
        parse_scalar(input).map(|n| Self::from_integer(&n))
    }

    /// The reduced scalar
    #[must_use]
    pub fn scalar(&self) -> Fr {
        self.scalar
    }

    /// 32-byte big-endian encoding of the reduced scalar
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.scalar.into_bigint().to_bytes_be()
    }
}

impl From<Fr> for PrivateKey {
    fn from(scalar: Fr) -> Self {
        Self { scalar }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}
