// Copyright (c) 2025-2026 The Tapsign Developers

//! The [Session] state machine drives delivery of one request frame.
//!
//! This handles [Event] inputs and returns [Output] commands to the caller,
//! see [tapsign_proto] for frame formats and the record encoding.

use strum::Display;

use tapsign_proto::{RequestKind, WellKnownRecord};

mod event;
pub use event::{Event, TagCapability};

mod output;
pub use output::Output;

mod error;
pub use error::Error;

/// Session internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, Display)]
pub enum State {
    /// Idle, no session running
    Idle,
    /// Proximity session started, awaiting tag detection
    Started,
    /// Exactly one tag detected, connection pending
    TagDetected,
    /// Connected to the tag, capability query pending
    Connected,
    /// Capability confirmed read-write, record write pending
    Writing,
    /// Write committed, session ending voluntarily
    Delivered,
    /// Delivery failed, session ending with an error status
    Failed(Error),
    /// Session ended externally before the write committed
    Cancelled,
}

impl State {
    /// Whether the session has reached a terminal outcome
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Delivered | State::Failed(_) | State::Cancelled)
    }
}

/// One attempt to deliver exactly one request payload
///
/// Created when a request is initiated and consumed when the session
/// terminates and its completion has been reported.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Delivery {
    payload: String,
    kind: RequestKind,
    delivered: bool,
    result_context: Option<String>,
}

impl Delivery {
    /// Create a delivery attempt for the provided wire text
    ///
    /// `result_context` is the opaque value handed back on successful
    /// delivery; for a signing request this is the original unsigned
    /// transaction text, not device output.
    pub fn new(payload: String, kind: RequestKind, result_context: Option<String>) -> Self {
        Self {
            payload,
            kind,
            delivered: false,
            result_context,
        }
    }

    /// Wire text carried by this attempt
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Request kind, selects completion post-processing only
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Whether the write step has committed
    pub fn delivered(&self) -> bool {
        self.delivered
    }
}

/// [Session] carries one [Delivery] through the proximity handshake
///
/// The record to write is built up front so a payload that cannot frame
/// is rejected before any radio interaction.
pub struct Session {
    state: State,
    delivery: Delivery,
    record: WellKnownRecord,
    completed: bool,
}

impl Session {
    /// Create a new session for one delivery attempt
    pub fn new(delivery: Delivery) -> Result<Self, Error> {
        let record = WellKnownRecord::new(delivery.payload())
            .map_err(|_| Error::PayloadOverflow(delivery.payload().len()))?;

        Ok(Self {
            state: State::Idle,
            delivery,
            record,
            completed: false,
        })
    }

    /// Current session state
    pub fn state(&self) -> State {
        self.state
    }

    /// Delivery attempt carried by this session
    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// Handle one external event, answering with the next command
    ///
    /// Transitions to `Failed` are reported as [Output::EndSession] with the
    /// error attached; `Err` is reserved for events that are not legal in
    /// the current state and leaves the state untouched.
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        log::debug!("state: {} event: {:?}", self.state, evt);

        match (self.state, evt) {
            (State::Idle, Event::Start) => {
                self.state = State::Started;
                Ok(Output::AwaitTags)
            }

            // Exactly one tag is acceptable
            (State::Started, Event::TagsDetected(1)) => {
                self.state = State::TagDetected;
                Ok(Output::Connect)
            }
            (State::Started, Event::TagsDetected(_)) => self.fail(Error::ProtocolViolation),

            (State::TagDetected, Event::ConnectComplete) => {
                self.state = State::Connected;
                Ok(Output::QueryCapability)
            }
            (State::TagDetected, Event::ConnectFailed) => self.fail(Error::ConnectionError),

            // Capability outcome and write command are one transition, the
            // capability-known instant has no separate external event
            (State::Connected, Event::Capability(TagCapability::ReadWrite)) => {
                self.state = State::Writing;
                Ok(Output::Write(self.record.clone()))
            }
            (State::Connected, Event::Capability(TagCapability::NotSupported)) => {
                self.fail(Error::Unsupported)
            }
            (State::Connected, Event::Capability(TagCapability::ReadOnly)) => {
                self.fail(Error::ReadOnlyTarget)
            }
            (State::Connected, Event::Capability(TagCapability::Unknown)) => {
                self.fail(Error::UnknownCapability)
            }

            (State::Writing, Event::WriteComplete) => {
                self.delivery.delivered = true;
                self.state = State::Delivered;
                Ok(Output::EndSession { error: None })
            }
            (State::Writing, Event::WriteFailed) => self.fail(Error::WriteError),

            // Session end after a terminal transition fires completion,
            // latched so a repeated end cannot re-emit it
            (State::Delivered, Event::SessionEnded) if !self.completed => {
                self.completed = true;
                Ok(Output::Complete(self.delivery.result_context.clone()))
            }
            (State::Failed(_), Event::SessionEnded) if !self.completed => {
                self.completed = true;
                Ok(Output::Complete(None))
            }

            // External invalidation mid-flow is a non-error cancellation
            (s, Event::SessionEnded) if !s.is_terminal() => {
                self.state = State::Cancelled;
                self.completed = true;
                Ok(Output::Complete(None))
            }

            _ => Err(Error::UnexpectedEvent),
        }
    }

    /// Enter a failure terminal state, requesting invalidation with the
    /// matching user-facing message
    fn fail(&mut self, e: Error) -> Result<Output, Error> {
        log::warn!("delivery failed: {e}");

        self.state = State::Failed(e);
        Ok(Output::EndSession { error: Some(e) })
    }
}
