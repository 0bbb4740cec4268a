//! Torrent identity hashes.
//!
//! A torrent is named by up to two digests: the v1 sha-1 info-hash and the
//! v2 sha-256 root hash. Either may be absent, and an all-zero digest is a
//! placeholder rather than a concrete identity (engines hand these out for
//! half-constructed add requests).

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Byte length of a v1 (sha-1) digest.
pub const V1_LEN: usize = 20;
/// Byte length of a v2 (sha-256) digest.
pub const V2_LEN: usize = 32;

/// Combined v1/v2 torrent identity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct InfoHash {
    /// Optional v1 sha-1 digest.
    pub v1: Option<[u8; V1_LEN]>,
    /// Optional v2 sha-256 digest.
    pub v2: Option<[u8; V2_LEN]>,
}

impl InfoHash {
    /// Identity carrying only a v1 digest.
    #[must_use]
    pub const fn from_v1(digest: [u8; V1_LEN]) -> Self {
        Self {
            v1: Some(digest),
            v2: None,
        }
    }

    /// Identity carrying only a v2 digest.
    #[must_use]
    pub const fn from_v2(digest: [u8; V2_LEN]) -> Self {
        Self {
            v1: None,
            v2: Some(digest),
        }
    }

    /// Whether at least one digest is present and not an all-zero placeholder.
    #[must_use]
    pub fn has_concrete(&self) -> bool {
        let v1_real = self.v1.is_some_and(|digest| digest.iter().any(|b| *b != 0));
        let v2_real = self.v2.is_some_and(|digest| digest.iter().any(|b| *b != 0));
        v1_real || v2_real
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(digest) = self.v1 {
            return write!(f, "{}", hex::encode(digest));
        }
        if let Some(digest) = self.v2 {
            return write!(f, "{}", hex::encode(digest));
        }
        write!(f, "<unset>")
    }
}

/// Failure to parse a textual hash representation.
#[derive(Debug, Error)]
pub enum HashParseError {
    /// The text length matches no supported encoding.
    #[error("unsupported hash length {0}")]
    UnsupportedLength(usize),
    /// The text is not valid for the encoding implied by its length.
    #[error("malformed hash text")]
    Malformed,
}

impl FromStr for InfoHash {
    type Err = HashParseError;

    /// Accepts 40-char hex (v1), 64-char hex (v2), or 32-char BASE32 (v1).
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.len() {
            40 => {
                let bytes = hex::decode(text).map_err(|_| HashParseError::Malformed)?;
                let digest: [u8; V1_LEN] =
                    bytes.try_into().map_err(|_| HashParseError::Malformed)?;
                Ok(Self::from_v1(digest))
            }
            64 => {
                let bytes = hex::decode(text).map_err(|_| HashParseError::Malformed)?;
                let digest: [u8; V2_LEN] =
                    bytes.try_into().map_err(|_| HashParseError::Malformed)?;
                Ok(Self::from_v2(digest))
            }
            32 => {
                let bytes = BASE32
                    .decode(text.to_uppercase().as_bytes())
                    .map_err(|_| HashParseError::Malformed)?;
                let digest: [u8; V1_LEN] =
                    bytes.try_into().map_err(|_| HashParseError::Malformed)?;
                Ok(Self::from_v1(digest))
            }
            other => Err(HashParseError::UnsupportedLength(other)),
        }
    }
}
