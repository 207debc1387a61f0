//! HTLC preimage hashing and verification.
//!
//! Verification is a pure function of the committed hash, the declared
//! preimage length and the candidate preimage, so it can be checked
//! without touching any ledger state.

use std::fmt;

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use strum::{AsRefStr, Display, EnumIter};
use thiserror::Error;

/// Hash algorithm an HTLC commits to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HashAlgorithm {
    Ripemd160,
    Sha1,
    Sha256,
    /// RIPEMD160(SHA256(x)), as used by Bitcoin scripts
    Hash160,
}

impl HashAlgorithm {
    /// Size in bytes of a digest produced by this algorithm
    pub const fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::Ripemd160 | HashAlgorithm::Sha1 | HashAlgorithm::Hash160 => 20,
            HashAlgorithm::Sha256 => 32,
        }
    }

    /// Hash a preimage with this algorithm
    pub fn hash(&self, preimage: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Ripemd160 => Ripemd160::digest(preimage).to_vec(),
            HashAlgorithm::Sha1 => Sha1::digest(preimage).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(preimage).to_vec(),
            HashAlgorithm::Hash160 => Ripemd160::digest(Sha256::digest(preimage)).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreimageError {
    #[error("Invalid digest length for {algorithm}: expected {expected} bytes, got {got}")]
    InvalidDigestLength {
        algorithm: HashAlgorithm,
        expected: usize,
        got: usize,
    },

    #[error("Preimage length mismatch: expected {expected} bytes, got {got}")]
    LengthMismatch { expected: u64, got: u64 },

    #[error("Preimage does not match the committed {0} digest")]
    DigestMismatch(HashAlgorithm),
}

/// A committed preimage hash: the algorithm tag plus its digest
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreimageHash {
    pub algorithm: HashAlgorithm,
    #[serde(with = "hex::serde")]
    pub digest: Vec<u8>,
}

impl PreimageHash {
    pub fn new(algorithm: HashAlgorithm, digest: Vec<u8>) -> Result<Self, PreimageError> {
        let hash = Self { algorithm, digest };
        hash.validate()?;
        Ok(hash)
    }

    /// Commit to a known preimage
    pub fn of(algorithm: HashAlgorithm, preimage: &[u8]) -> Self {
        Self {
            algorithm,
            digest: algorithm.hash(preimage),
        }
    }

    /// Check the digest has the size the algorithm produces
    pub fn validate(&self) -> Result<(), PreimageError> {
        let expected = self.algorithm.digest_size();
        if self.digest.len() != expected {
            return Err(PreimageError::InvalidDigestLength {
                algorithm: self.algorithm,
                expected,
                got: self.digest.len(),
            });
        }
        Ok(())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.digest)
    }
}

impl fmt::Debug for PreimageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

impl fmt::Display for PreimageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Verify a candidate preimage against a committed hash and declared length.
///
/// The length is checked first: a preimage of the wrong size is rejected
/// without hashing it.
pub fn verify_preimage(
    committed: &PreimageHash,
    preimage_length: u64,
    preimage: &[u8],
) -> Result<(), PreimageError> {
    let got = preimage.len() as u64;
    if got != preimage_length {
        return Err(PreimageError::LengthMismatch {
            expected: preimage_length,
            got,
        });
    }

    if committed.algorithm.hash(preimage) != committed.digest {
        return Err(PreimageError::DigestMismatch(committed.algorithm));
    }

    Ok(())
}
