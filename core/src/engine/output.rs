// Copyright (c) 2025-2026 The Tapsign Developers

use tapsign_proto::WellKnownRecord;

use super::Error;

/// [`Session`][super::Session] output commands (in response to events),
/// executed by the radio driver
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    /// Await tag detection
    AwaitTags,

    /// Connect to the single detected tag
    Connect,

    /// Query the connected tag's write capability
    QueryCapability,

    /// Write the request record to the tag
    Write(WellKnownRecord),

    /// Invalidate the session: with an error status on failure, or
    /// voluntarily (prompting the user to scan for the response) on
    /// successful delivery
    EndSession { error: Option<Error> },

    /// Session terminated; report completion exactly once, with the
    /// delivery context on success and nothing otherwise
    Complete(Option<String>),
}
