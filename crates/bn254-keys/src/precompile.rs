// Copyright (c) 2021-2024 Espresso Systems (espressosys.com)
// This file is part of the bls-keygen repository.

// You should have received a copy of the MIT License
// along with the bls-keygen repository. If not, see <https://mit-license.org/>.

//! Point layouts understood by the Ethereum BN254 precompiles (EIP-196/197).
//!
//! Every coordinate is a 32-byte big-endian integer below the base field modulus. G2
//! coordinates live in `Fq2` and are written imaginary part first. The point at infinity is
//! written as all zeroes.

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ff::{BigInteger, PrimeField, Zero};
use num_bigint::BigUint;

use crate::error::KeyError;

/// Size of a base field element in precompile layout
pub const FIELD_ELEMENT_SIZE: usize = 32;
/// 32 bytes for x, 32 bytes for y
pub const G1_POINT_SIZE: usize = 2 * FIELD_ELEMENT_SIZE;
/// 64 bytes for x, 64 bytes for y
pub const G2_POINT_SIZE: usize = 4 * FIELD_ELEMENT_SIZE;

/// The BN254 base field modulus in decimal
pub const FIELD_MODULUS: &str =
    "21888242871839275222246405745257275088696311157297823662689037894645226208583";

/// The BN254 base field modulus
#[must_use]
pub fn field_modulus() -> BigUint {
    BigUint::from(Fq::MODULUS)
}

/// Whether `n` is a canonical base field element, i.e. `n < FIELD_MODULUS`
#[must_use]
pub fn validate_field_order(n: &BigUint) -> bool {
    n < &field_modulus()
}

/// Write a G1 point as `x || y`
#[must_use]
pub fn encode_g1(p: &G1Affine) -> [u8; G1_POINT_SIZE] {
    let mut out = [0u8; G1_POINT_SIZE];
    if !p.infinity {
        write_coordinate(&mut out[..32], &p.x);
        write_coordinate(&mut out[32..], &p.y);
    }
    out
}

/// Write a G2 point as `x.c1 || x.c0 || y.c1 || y.c0`
#[must_use]
pub fn encode_g2(p: &G2Affine) -> [u8; G2_POINT_SIZE] {
    let mut out = [0u8; G2_POINT_SIZE];
    if !p.infinity {
        write_coordinate(&mut out[..32], &p.x.c1);
        write_coordinate(&mut out[32..64], &p.x.c0);
        write_coordinate(&mut out[64..96], &p.y.c1);
        write_coordinate(&mut out[96..], &p.y.c0);
    }
    out
}

/// Read a G1 point written by [`encode_g1`]
///
/// # Errors
/// - [`KeyError::InvalidPointFormat`] on a wrong length or a point off the curve
/// - [`KeyError::InvalidFieldOrder`] if a coordinate is not below the modulus
pub fn decode_g1(bytes: &[u8]) -> Result<G1Affine, KeyError> {
    check_len(bytes, G1_POINT_SIZE, "G1")?;
    let x = read_coordinate(&bytes[..32])?;
    let y = read_coordinate(&bytes[32..])?;
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::identity());
    }

    let p = G1Affine::new_unchecked(x, y);
    if !p.is_on_curve() {
        return Err(KeyError::point_format("G1 point is not on the curve"));
    }
    // G1 has cofactor 1
    if !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KeyError::PointNotInSubgroup);
    }
    Ok(p)
}

/// Read a G2 point written by [`encode_g2`]
///
/// # Errors
/// - [`KeyError::InvalidPointFormat`] on a wrong length or a point off the twist
/// - [`KeyError::InvalidFieldOrder`] if a coordinate is not below the modulus
/// - [`KeyError::PointNotInSubgroup`] if the point is outside the order-`r` subgroup
pub fn decode_g2(bytes: &[u8]) -> Result<G2Affine, KeyError> {
    check_len(bytes, G2_POINT_SIZE, "G2")?;
    let x = Fq2::new(read_coordinate(&bytes[32..64])?, read_coordinate(&bytes[..32])?);
    let y = Fq2::new(read_coordinate(&bytes[96..])?, read_coordinate(&bytes[64..96])?);
    if x.is_zero() && y.is_zero() {
        return Ok(G2Affine::identity());
    }

    let p = G2Affine::new_unchecked(x, y);
    if !p.is_on_curve() {
        return Err(KeyError::point_format("G2 point is not on the curve"));
    }
    if !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KeyError::PointNotInSubgroup);
    }
    Ok(p)
}

/// Reject inputs that are not exactly `expected` bytes long
fn check_len(bytes: &[u8], expected: usize, group: &str) -> Result<(), KeyError> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(KeyError::point_format(format!(
            "{group} point must be {expected} bytes, got {}",
            bytes.len()
        )))
    }
}

/// Write `f` as a 32-byte big-endian integer into `out`
fn write_coordinate(out: &mut [u8], f: &Fq) {
    out.copy_from_slice(&f.into_bigint().to_bytes_be());
}

/// Read a 32-byte big-endian integer, rejecting non-canonical values
fn read_coordinate(bytes: &[u8]) -> Result<Fq, KeyError> {
    if !validate_field_order(&BigUint::from_bytes_be(bytes)) {
        return Err(KeyError::InvalidFieldOrder);
    }
    Ok(Fq::from_be_bytes_mod_order(bytes))
}
