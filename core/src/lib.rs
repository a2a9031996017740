// Copyright (c) 2025-2026 The Tapsign Developers

//! Tap-to-sign delivery session core
//!
//! This provides the [Session][engine::Session] state machine carrying one
//! request frame to a hardware signing device over a proximity link.
//!
//! Interactions with the [Session][engine::Session] are performed via
//! [Event][engine::Event]s and [Output][engine::Output]s: the radio driver
//! reports what happened, the session answers with the next command to
//! issue. The session itself performs no IO, making every terminal path
//! directly testable.
//!
//! ## Delivery
//!
//! One delivery attempt runs:
//!
//! ```text
//! Idle -> Started -> TagDetected -> Connected -> Writing -> Delivered
//! ```
//!
//! with `Failed` reachable from every non-terminal state and `Cancelled`
//! covering external invalidation before the write commits. Exactly one
//! [Output::Complete][engine::Output::Complete] is emitted per session,
//! only after a terminal state has been reached, carrying the delivery
//! context on success and nothing otherwise.
//!
//! Note the device's actual cryptographic answer never travels back over
//! this link; a successful session only acknowledges delivery, and the
//! response is retrieved out of band.

pub mod engine;
