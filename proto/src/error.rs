// Copyright (c) 2025-2026 The Tapsign Developers

use strum::Display;

/// Frame decode errors
///
/// All codec errors are synchronous and recoverable, the caller corrects
/// the offending input and retries.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Wrong number of colon-separated components
    #[error("invalid frame: expected 7 components but got {0}")]
    MalformedFrame(usize),

    /// Unrecognised frame prefix
    #[error("invalid prefix, proto.{{sign,pubkey}} expected (got {0})")]
    UnknownPrefix(String),

    /// Unrecognised signing curve token
    #[error("invalid signing curve: {0}")]
    InvalidCurve(String),

    /// Unrecognised key hashing token
    #[error("invalid key hashing: {0}")]
    InvalidHashing(String),

    /// Unrecognised key encoding token
    #[error("invalid key encoding: {0}")]
    InvalidEncoding(String),

    /// Frame prefix disagrees with digest presence
    #[error("frame prefix does not match signature digest presence")]
    PrefixMismatch,

    /// Semantic field validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Semantic field validation errors
///
/// Each failure names the offending field via [`ValidationError::field`]
/// so a form layer can attach the message to the right input.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ValidationError {
    /// Derivation path does not match the BIP-44 grammar
    #[error("expected a valid BIP44 path but got {0}")]
    InvalidDerivationPath(String),

    /// Signature digest is not a 256-bit hex string
    #[error("invalid signature hash: expected a 256-bit digest in hex format but got {0}")]
    InvalidSignatureDigest(String),

    /// Callback rejected by the configured policy
    #[error("invalid callback: expected a valid address but got {0}")]
    InvalidCallback(String),
}

/// Request field identifiers, used to attach validation errors to inputs
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Curve,
    Hashing,
    Encoding,
    DerivationPath,
    SignatureDigest,
    Callback,
}

impl ValidationError {
    /// Field this validation failure pertains to
    pub fn field(&self) -> Field {
        match self {
            ValidationError::InvalidDerivationPath(_) => Field::DerivationPath,
            ValidationError::InvalidSignatureDigest(_) => Field::SignatureDigest,
            ValidationError::InvalidCallback(_) => Field::Callback,
        }
    }
}

impl ProtocolError {
    /// Field this decode failure pertains to, where one applies
    pub fn field(&self) -> Option<Field> {
        match self {
            ProtocolError::InvalidCurve(_) => Some(Field::Curve),
            ProtocolError::InvalidHashing(_) => Some(Field::Hashing),
            ProtocolError::InvalidEncoding(_) => Some(Field::Encoding),
            ProtocolError::Validation(e) => Some(e.field()),
            _ => None,
        }
    }
}
