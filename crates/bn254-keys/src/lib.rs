// Copyright (c) 2021-2024 Espresso Systems (espressosys.com)
// This file is part of the bls-keygen repository.

// You should have received a copy of the MIT License
// along with the bls-keygen repository. If not, see <https://mit-license.org/>.

//! BLS key pairs over BN254 and the verifier configuration derived from them.
//!
//! The curve arithmetic is provided by arkworks. This crate turns a decimal scalar into a
//! public key in both G1 and G2 and writes the coordinates as a flat JSON object.

pub mod config;
pub mod error;
pub mod keys;
pub mod logging;
pub mod precompile;
pub mod scalar;

pub use config::{BlsConfig, DEFAULT_OUTPUT_PATH};
pub use error::KeyError;
pub use keys::{generate_key_pair, KeyPair, PublicKey};
pub use scalar::{parse_scalar, PrivateKey};
