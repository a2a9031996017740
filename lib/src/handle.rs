// Copyright (c) 2025-2026 The Tapsign Developers

//! Handle for submitting deliveries over a proximity transport
//!
//! This drives the [Session] state machine against a [TagTransport],
//! translating transport outcomes into session events and session outputs
//! into transport calls.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::{oneshot, Mutex};

use tapsign_core::engine::{Delivery, Event, Output, Session, TagCapability};
use tapsign_proto::{
    DerivationPath, KeyEncoding, KeyHashing, Request, SigningCurve, TransferRequest,
};

use crate::{transport::TagTransport, Error};

/// User-facing status shown while waiting for a tap
const TAP_STATUS: &str = "Tap to Confirm";

/// User-facing status shown after a successful write, prompting the user
/// to read the device's answer over the scanning channel
const SCAN_STATUS: &str = "Scan to Transmit";

/// Delivery handle for a proximity [TagTransport].
///
/// The underlying radio resource is exclusive, so only one delivery may be
/// in flight at a time; a second submission is rejected with
/// [`Error::Busy`] until the previous completion has fired.
pub struct SessionHandle<T: TagTransport> {
    /// Transport handle, held for the duration of a delivery
    transport: Arc<Mutex<T>>,
    /// In-flight delivery slot
    in_flight: Arc<AtomicBool>,
    /// Last user-facing session status
    last_status: Arc<Mutex<Option<String>>>,
}

impl<T: TagTransport> Clone for SessionHandle<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            in_flight: self.in_flight.clone(),
            last_status: self.last_status.clone(),
        }
    }
}

/// Create a [SessionHandle] wrapper from a type implementing [TagTransport]
impl<T: TagTransport> From<T> for SessionHandle<T> {
    fn from(t: T) -> Self {
        Self {
            transport: Arc::new(Mutex::new(t)),
            in_flight: Arc::new(AtomicBool::new(false)),
            last_status: Arc::new(Mutex::new(None)),
        }
    }
}

/// Single-shot completion for one delivery attempt
///
/// Resolves exactly once when the session terminates: the delivery context
/// on success, `None` on failure or cancellation. Awaiting the ticket
/// observes the result on the caller's own task.
pub struct DeliveryTicket {
    rx: oneshot::Receiver<Option<String>>,
}

impl DeliveryTicket {
    /// Wait for the delivery to terminate
    pub async fn wait(self) -> Option<String> {
        self.rx.await.unwrap_or(None)
    }
}

/// Cleared-on-drop marker for the in-flight delivery slot
struct FlightGuard(Arc<AtomicBool>);

impl FlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        match flag.swap(true, Ordering::AcqRel) {
            false => Some(Self(flag.clone())),
            true => None,
        }
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T: TagTransport + Send + 'static> SessionHandle<T> {
    /// Create a new session handle owning the provided transport
    pub fn new(transport: T) -> Self {
        Self::from(transport)
    }

    /// Submit an expert-mode / signing request for delivery
    ///
    /// On success the completion carries the serialized wire text as its
    /// context; the device's answer arrives over the scanning channel.
    pub fn submit(&self, request: &Request) -> Result<DeliveryTicket, Error> {
        let wire = request.to_wire();
        let delivery = Delivery::new(wire.clone(), request.kind(), Some(wire));

        self.start(delivery)
    }

    /// Submit a public-key derivation request for the provided path,
    /// using the device address conventions (hashed, bech32-encoded key)
    pub fn submit_pubkey(&self, path: DerivationPath) -> Result<DeliveryTicket, Error> {
        let request = Request::pubkey(
            SigningCurve::Secp256k1,
            KeyHashing::Ripemd160,
            KeyEncoding::Bech32,
            path,
        );

        self.submit(&request)
    }

    /// Submit a raw transfer request
    ///
    /// On success the completion carries the original unsigned transaction
    /// text, for the caller to correlate with the device's answer.
    pub fn submit_transfer(&self, request: &TransferRequest) -> Result<DeliveryTicket, Error> {
        let delivery = Delivery::new(
            request.to_wire(),
            request.kind(),
            Some(request.tx.clone()),
        );

        self.start(delivery)
    }

    /// Last user-facing session status ("Scan to Transmit" or the retained
    /// error string from the most recent failure)
    pub async fn last_status(&self) -> Option<String> {
        self.last_status.lock().await.clone()
    }

    /// Start a delivery attempt, spawning the session drive loop
    ///
    /// Must be called within a tokio runtime.
    fn start(&self, delivery: Delivery) -> Result<DeliveryTicket, Error> {
        let guard = FlightGuard::acquire(&self.in_flight).ok_or(Error::Busy)?;

        // Radio capability must be available before a session can begin;
        // reported up front rather than silently never completing
        {
            let t = self.transport.try_lock().map_err(|_| Error::Busy)?;
            if !t.available() {
                return Err(Error::Unavailable);
            }
        }

        let session = Session::new(delivery)?;
        let (done_tx, done_rx) = oneshot::channel();

        tokio::spawn(drive(
            self.transport.clone(),
            session,
            done_tx,
            self.last_status.clone(),
            guard,
        ));

        Ok(DeliveryTicket { rx: done_rx })
    }
}

/// Drive one session to termination against the transport
///
/// Holds the transport for the whole attempt and fires the completion
/// exactly once; dropping the guard afterwards frees the in-flight slot.
async fn drive<T: TagTransport>(
    transport: Arc<Mutex<T>>,
    mut session: Session,
    done: oneshot::Sender<Option<String>>,
    last_status: Arc<Mutex<Option<String>>>,
    _guard: FlightGuard,
) {
    let mut t = transport.lock().await;
    let mut evt = Event::Start;

    let result = loop {
        let out = match session.update(&evt) {
            Ok(v) => v,
            Err(e) => {
                // Runner / engine disagreement, terminate the attempt
                log::error!("session update failed: {e}");
                break None;
            }
        };

        evt = match out {
            Output::AwaitTags => match t.begin(TAP_STATUS).await {
                Ok(()) => match t.poll_tags().await {
                    Ok(n) => Event::TagsDetected(n),
                    Err(e) => {
                        if !e.is_cancellation() {
                            log::warn!("tag detection failed: {e}");
                        }
                        Event::SessionEnded
                    }
                },
                Err(e) => {
                    log::warn!("session begin failed: {e}");
                    Event::SessionEnded
                }
            },
            Output::Connect => match t.connect().await {
                Ok(()) => Event::ConnectComplete,
                Err(e) if e.is_cancellation() => Event::SessionEnded,
                Err(e) => {
                    log::warn!("connect failed: {e}");
                    Event::ConnectFailed
                }
            },
            Output::QueryCapability => match t.query_capability().await {
                Ok(c) => Event::Capability(c),
                Err(e) if e.is_cancellation() => Event::SessionEnded,
                Err(e) => {
                    log::warn!("capability query failed: {e}");
                    Event::Capability(TagCapability::Unknown)
                }
            },
            Output::Write(record) => match t.write(&record).await {
                Ok(()) => Event::WriteComplete,
                Err(e) if e.is_cancellation() => Event::SessionEnded,
                Err(e) => {
                    log::warn!("record write failed: {e}");
                    Event::WriteFailed
                }
            },
            Output::EndSession { error } => {
                let status = match &error {
                    Some(e) => e.to_string(),
                    None => SCAN_STATUS.to_string(),
                };
                *last_status.lock().await = Some(status.clone());

                t.invalidate(error.map(|_| status.as_str())).await;
                Event::SessionEnded
            }
            Output::Complete(context) => break context,
        };
    };

    log::debug!("delivery terminated: {}", session.state());

    // The single completion fire; the receiver may have been dropped if the
    // caller lost interest, which is fine
    let _ = done.send(result);
}
