// Copyright (c) 2025-2026 The Tapsign Developers

use crate::transport::TransportError;

/// Tapsign host API error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A delivery is already in flight; the radio resource is exclusive
    #[error("a delivery is already in flight")]
    Busy,

    /// The proximity transport is not available on this host
    #[error("proximity transport unavailable")]
    Unavailable,

    /// Transport failure outside the session flow
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Session engine rejected the delivery
    #[error(transparent)]
    Session(#[from] tapsign_core::engine::Error),

    /// Frame decode failure
    #[error(transparent)]
    Protocol(#[from] tapsign_proto::ProtocolError),

    /// Field validation failure
    #[error(transparent)]
    Validation(#[from] tapsign_proto::ValidationError),

    /// Configuration file could not be read
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}
