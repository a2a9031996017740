// Copyright (c) 2025-2026 The Tapsign Developers

/// [Session][super::Session] errors
///
/// Display strings double as the user-facing status shown when the session
/// is invalidated. None of these are fatal: each ends one delivery attempt
/// and returns control to the caller.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Error {
    /// Zero or multiple tags in the field
    #[error("signing device protocol is invalid")]
    ProtocolViolation,

    /// Could not connect to the detected tag
    #[error("could not connect to signing device")]
    ConnectionError,

    /// Tag does not support record writing
    #[error("protocol is not supported by this device")]
    Unsupported,

    /// Tag is read only
    #[error("device tag is only readable")]
    ReadOnlyTarget,

    /// Capability query returned an unrecognised status
    #[error("unknown status of device")]
    UnknownCapability,

    /// Record write failed
    #[error("failed to write request to device")]
    WriteError,

    /// Request payload exceeds the record limit
    #[error("request payload too large ({0} bytes)")]
    PayloadOverflow(usize),

    /// Event is not legal in the current session state
    #[error("unexpected event for session state")]
    UnexpectedEvent,
}
