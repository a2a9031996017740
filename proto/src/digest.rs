// Copyright (c) 2025-2026 The Tapsign Developers

//! Signature digest handling

use core::fmt::{self, Display};
use core::str::FromStr;

use crate::error::ValidationError;

/// A 256-bit signature digest in hex form, with or without a `0x` prefix
///
/// The original text is retained verbatim (prefix and case included) so a
/// decoded frame re-encodes byte-identical.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SignatureDigest(String);

impl SignatureDigest {
    /// Digest text as serialized on the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decoded digest bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut b = [0u8; 32];
        let h = self.0.strip_prefix("0x").unwrap_or(&self.0);
        // Infallible, hex validated on construction
        let _ = hex::decode_to_slice(h, &mut b);
        b
    }
}

impl FromStr for SignatureDigest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let h = s.strip_prefix("0x").unwrap_or(s);

        let mut b = [0u8; 32];
        if h.len() != 64 || hex::decode_to_slice(h, &mut b).is_err() {
            return Err(ValidationError::InvalidSignatureDigest(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }
}

impl Display for SignatureDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
