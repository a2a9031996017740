// Copyright (c) 2025-2026 The Tapsign Developers

//! Tap-to-sign host library (and CLI)
//!
//! This crate glues the request codec to a proximity transport: callers
//! build a validated [Request][tapsign_proto::Request], submit it through a
//! [SessionHandle], and await a single-shot completion telling them whether
//! the device acknowledged delivery. The device's actual answer (derived
//! key, signature) is retrieved over a secondary scanning channel that is
//! not modelled here.

/// Transport abstraction and test transport implementations
pub mod transport;

/// Re-export `tapsign-proto` for consumers
pub use tapsign_proto::{self as proto};

/// Re-export the session engine for consumers
pub use tapsign_core::engine;

mod handle;
pub use handle::{DeliveryTicket, SessionHandle};

mod params;
pub use params::{Defaults, RequestParams};

mod error;
pub use error::Error;
