// Copyright (c) 2025-2026 The Tapsign Developers

//! Raw transfer request frames
//!
//! ## Encoding
//!
//! ```text
//! proto.send:<address>:<unsigned-tx>
//! ```
//!
//! The unsigned transaction is the final field, so embedded colons survive
//! the bounded split just like the signing-frame callback.

use core::fmt::{self, Display};
use core::str::FromStr;

use crate::{error::ProtocolError, request::RequestKind, TRANSFER_PREFIX};

/// Number of fields in a transfer frame
pub const TRANSFER_FIELDS: usize = 3;

/// A raw transfer request carrying an unsigned transaction for the device
/// to sign and broadcast-format
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TransferRequest {
    /// Sender address
    pub address: String,
    /// Unsigned transaction text, opaque to the protocol
    pub tx: String,
}

impl TransferRequest {
    /// Create a new transfer request
    pub fn new(address: impl Into<String>, tx: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            tx: tx.into(),
        }
    }

    /// Request kind for transport post-processing
    pub fn kind(&self) -> RequestKind {
        RequestKind::Transfer
    }

    /// Encode to wire text
    pub fn to_wire(&self) -> String {
        format!("{}:{}:{}", TRANSFER_PREFIX, self.address, self.tx)
    }
}

impl Display for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl FromStr for TransferRequest {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(TRANSFER_FIELDS, ':').collect();
        if parts.len() != TRANSFER_FIELDS {
            return Err(ProtocolError::MalformedFrame(parts.len()));
        }

        if parts[0] != TRANSFER_PREFIX {
            return Err(ProtocolError::UnknownPrefix(parts[0].to_string()));
        }

        Ok(Self::new(parts[1], parts[2]))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transfer_roundtrip() {
        let t = TransferRequest::new("0x00a3291f", "0xf86c0a85..:raw:..");

        let wire = t.to_wire();
        assert_eq!(wire, "proto.send:0x00a3291f:0xf86c0a85..:raw:..");

        let decoded: TransferRequest = wire.parse().unwrap();
        assert_eq!(decoded, t);
        assert_eq!(decoded.tx, "0xf86c0a85..:raw:..");
        assert_eq!(decoded.kind(), RequestKind::Transfer);
    }

    #[test]
    fn transfer_rejects_bad_frames() {
        assert_eq!(
            "proto.send".parse::<TransferRequest>(),
            Err(ProtocolError::MalformedFrame(1))
        );
        assert_eq!(
            "eth.send:a:b".parse::<TransferRequest>(),
            Err(ProtocolError::UnknownPrefix("eth.send".to_string()))
        );
    }
}
