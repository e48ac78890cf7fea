// Copyright (c) 2021-2024 Espresso Systems (espressosys.com)
// This file is part of the bls-keygen repository.

// You should have received a copy of the MIT License
// along with the bls-keygen repository. If not, see <https://mit-license.org/>.

//! BLS public keys over BN254
//!
//! A public key is kept in both groups: the G2 point is what a pairing based verifier checks
//! signatures against, the G1 point lets a contract aggregate keys cheaply.

use ark_bn254::{G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use tracing::{debug, instrument};

use crate::{
    error::KeyError,
    precompile::{encode_g2, G2_POINT_SIZE},
    scalar::PrivateKey,
};

/// BLS public key, the private scalar times the fixed generator of each group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    /// `sk · G1`
    g1: G1Affine,
    /// `sk · G2`
    g2: G2Affine,
}

impl PublicKey {
    /// The public key in G1
    #[must_use]
    pub fn g1(&self) -> &G1Affine {
        &self.g1
    }

    /// The public key in G2
    #[must_use]
    pub fn g2(&self) -> &G2Affine {
        &self.g2
    }

    /// Default byte form of the key: the G2 point in precompile layout
    #[must_use]
    pub fn to_bytes(&self) -> [u8; G2_POINT_SIZE] {
        encode_g2(&self.g2)
    }

    /// Compressed canonical encoding of both points, G1 first
    ///
    /// # Errors
    /// Propagates serialization failures from arkworks.
    pub fn to_compressed_bytes(&self) -> Result<Vec<u8>, KeyError> {
        let mut buf = vec![];
        self.g1.serialize_compressed(&mut buf)?;
        self.g2.serialize_compressed(&mut buf)?;
        Ok(buf)
    }

    /// Inverse of [`PublicKey::to_compressed_bytes`]. Points are checked for curve and
    /// subgroup membership. Whether both points carry the same scalar is not checked.
    ///
    /// # Errors
    /// Returns [`KeyError::Serialization`] on malformed or invalid points.
    pub fn from_compressed_bytes(mut bytes: &[u8]) -> Result<Self, KeyError> {
        let g1 = G1Affine::deserialize_compressed(&mut bytes)?;
        let g2 = G2Affine::deserialize_compressed(&mut bytes)?;
        if !bytes.is_empty() {
            return Err(KeyError::point_format(format!(
                "{} trailing bytes after compressed public key",
                bytes.len()
            )));
        }
        Ok(Self { g1, g2 })
    }

    /// Assemble a public key from points validated elsewhere
    pub(crate) fn from_points(g1: G1Affine, g2: G2Affine) -> Self {
        Self { g1, g2 }
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(sk: &PrivateKey) -> Self {
        generate_key_pair(sk)
    }
}

/// Derive the public key for `sk` against the standard BN254 generators
#[instrument(skip_all)]
#[must_use]
pub fn generate_key_pair(sk: &PrivateKey) -> PublicKey {
    let scalar = sk.scalar();
    let g1 = (G1Affine::generator() * scalar).into_affine();
    let g2 = (G2Affine::generator() * scalar).into_affine();
    debug!(%g1, %g2, "derived public key");
    PublicKey { g1, g2 }
}

/// A private key together with its public key
#[derive(Clone, Debug)]
pub struct KeyPair {
    /// The private scalar
    sk: PrivateKey,
    /// The derived public key
    pk: PublicKey,
}

impl KeyPair {
    /// Derive the public half from `sk`
    #[must_use]
    pub fn from_private(sk: PrivateKey) -> Self {
        let pk = generate_key_pair(&sk);
        Self { sk, pk }
    }

    /// The private key
    #[must_use]
    pub fn private_key(&self) -> &PrivateKey {
        &self.sk
    }

    /// The public key
    #[must_use]
    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }
}
