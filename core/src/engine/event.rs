// Copyright (c) 2025-2026 The Tapsign Developers

use strum::{Display, EnumIter, EnumString, EnumVariantNames};

/// Tag write capability, as reported by the capability query
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TagCapability {
    /// Record writing is not supported by the tag
    NotSupported,
    /// Tag is readable only
    ReadOnly,
    /// Tag accepts record writes
    ReadWrite,
    /// Any other / unrecognised status
    Unknown,
}

/// [`Session`][super::Session] input events, reported by the radio driver
///
/// Radio callbacks arrive on whatever thread the transport uses; the caller
/// is responsible for funnelling them into the session one at a time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Event {
    /// Begin the proximity session
    Start,

    /// The transport detected `n` tags in the field
    TagsDetected(usize),

    /// Connection to the single detected tag succeeded
    ConnectComplete,

    /// Connection to the single detected tag failed
    ConnectFailed,

    /// Capability query answered with the tag's write capability
    Capability(TagCapability),

    /// Record write committed
    WriteComplete,

    /// Record write failed
    WriteFailed,

    /// The transport ended the session (voluntary invalidation, user walked
    /// away, timeout, or external invalidation)
    SessionEnded,
}
