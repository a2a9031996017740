// Copyright (c) 2025-2026 The Tapsign Developers

//! Generic proximity transport abstraction
//!
//! [TagTransport] is the only surface the delivery runner touches: session
//! begin, tag detection, connect, capability query, record write and
//! invalidation. Timeout policy lives entirely inside the transport and
//! surfaces as [`TransportError::Timeout`], which the runner treats the
//! same as an external cancellation.

use async_trait::async_trait;

pub use tapsign_core::engine::TagCapability;
use tapsign_proto::WellKnownRecord;

/// Transport errors
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Session ended externally (user dismissed, system invalidation)
    #[error("session cancelled")]
    Cancelled,

    /// Transport-level timeout
    #[error("session timed out")]
    Timeout,

    /// Underlying IO failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other transport failure
    #[error("transport failure: {0}")]
    Failed(String),
}

impl TransportError {
    /// Whether this error means the session simply went away rather than a
    /// delivery step failing
    pub fn is_cancellation(&self) -> bool {
        matches!(self, TransportError::Cancelled | TransportError::Timeout)
    }
}

/// Proximity (tap-to-connect) transport abstraction
///
/// One session at a time: the runner holds the transport exclusively for
/// the duration of a delivery attempt, so implementations need no internal
/// flow guarding.
#[async_trait]
pub trait TagTransport {
    /// Whether the radio capability is available on this host
    fn available(&self) -> bool;

    /// Begin a proximity session, showing the provided user-facing status
    async fn begin(&mut self, status: &str) -> Result<(), TransportError>;

    /// Wait for tag detection, returning the number of tags in the field
    async fn poll_tags(&mut self) -> Result<usize, TransportError>;

    /// Connect to the single detected tag
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Query the connected tag's write capability
    async fn query_capability(&mut self) -> Result<TagCapability, TransportError>;

    /// Write a record to the connected tag
    async fn write(&mut self, record: &WellKnownRecord) -> Result<(), TransportError>;

    /// End the session, with an error status message on failure
    async fn invalidate(&mut self, message: Option<&str>);
}

pub mod mock {
    //! Scripted transport for tests and the CLI demo

    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::{Mutex, Notify};

    use super::{TagCapability, TagTransport, TransportError};
    use tapsign_proto::WellKnownRecord;

    /// Delivery step at which the mock reports cancellation
    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    pub enum CancelPoint {
        Detect,
        Connect,
        Query,
        Write,
    }

    #[derive(Default)]
    struct MockLogInner {
        statuses: Vec<String>,
        written: Vec<WellKnownRecord>,
        invalidations: Vec<Option<String>>,
    }

    /// Shared record of everything a [MockTransport] was asked to do
    #[derive(Clone, Default)]
    pub struct MockLog(Arc<Mutex<MockLogInner>>);

    impl MockLog {
        /// Status strings shown at session begin
        pub async fn statuses(&self) -> Vec<String> {
            self.0.lock().await.statuses.clone()
        }

        /// Records written to the tag
        pub async fn written(&self) -> Vec<WellKnownRecord> {
            self.0.lock().await.written.clone()
        }

        /// Invalidation messages, `None` for voluntary (successful) ends
        pub async fn invalidations(&self) -> Vec<Option<String>> {
            self.0.lock().await.invalidations.clone()
        }
    }

    /// Scripted tag transport
    ///
    /// Defaults to a happy path: radio available, one read-write tag,
    /// connect and write succeed.
    pub struct MockTransport {
        tags: usize,
        capability: TagCapability,
        connect_ok: bool,
        write_ok: bool,
        available: bool,
        cancel_at: Option<CancelPoint>,
        gate: Option<Arc<Notify>>,
        log: MockLog,
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                tags: 1,
                capability: TagCapability::ReadWrite,
                connect_ok: true,
                write_ok: true,
                available: true,
                cancel_at: None,
                gate: None,
                log: MockLog::default(),
            }
        }

        /// Shared log handle, valid after the transport is moved away
        pub fn log(&self) -> MockLog {
            self.log.clone()
        }

        /// Report `n` tags on detection
        pub fn with_tags(mut self, n: usize) -> Self {
            self.tags = n;
            self
        }

        /// Report the provided capability on query
        pub fn with_capability(mut self, c: TagCapability) -> Self {
            self.capability = c;
            self
        }

        /// Fail the connection step
        pub fn failing_connect(mut self) -> Self {
            self.connect_ok = false;
            self
        }

        /// Fail the write step
        pub fn failing_write(mut self) -> Self {
            self.write_ok = false;
            self
        }

        /// Report the radio capability as unavailable
        pub fn unavailable(mut self) -> Self {
            self.available = false;
            self
        }

        /// Report cancellation at the provided step
        pub fn cancel_at(mut self, p: CancelPoint) -> Self {
            self.cancel_at = Some(p);
            self
        }

        /// Hold tag detection until the provided [Notify] fires
        pub fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn cancelled(&self, p: CancelPoint) -> Result<(), TransportError> {
            match self.cancel_at == Some(p) {
                true => Err(TransportError::Cancelled),
                false => Ok(()),
            }
        }
    }

    #[async_trait]
    impl TagTransport for MockTransport {
        fn available(&self) -> bool {
            self.available
        }

        async fn begin(&mut self, status: &str) -> Result<(), TransportError> {
            self.log.0.lock().await.statuses.push(status.to_string());
            Ok(())
        }

        async fn poll_tags(&mut self) -> Result<usize, TransportError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.cancelled(CancelPoint::Detect)?;
            Ok(self.tags)
        }

        async fn connect(&mut self) -> Result<(), TransportError> {
            self.cancelled(CancelPoint::Connect)?;
            match self.connect_ok {
                true => Ok(()),
                false => Err(TransportError::Failed("mock connect failure".to_string())),
            }
        }

        async fn query_capability(&mut self) -> Result<TagCapability, TransportError> {
            self.cancelled(CancelPoint::Query)?;
            Ok(self.capability)
        }

        async fn write(&mut self, record: &WellKnownRecord) -> Result<(), TransportError> {
            self.cancelled(CancelPoint::Write)?;
            match self.write_ok {
                true => {
                    self.log.0.lock().await.written.push(record.clone());
                    Ok(())
                }
                false => Err(TransportError::Failed("mock write failure".to_string())),
            }
        }

        async fn invalidate(&mut self, message: Option<&str>) {
            self.log
                .0
                .lock()
                .await
                .invalidations
                .push(message.map(|m| m.to_string()));
        }
    }
}
