// Copyright (c) 2025-2026 The Tapsign Developers

//! Protocol / frame definitions for tap-to-sign device communication
//!
//! This module provides a protocol specification and reference implementation
//! for building requests understood by tap-to-sign hardware devices.
//!
//! Requests use a compact colon-delimited textual encoding to simplify
//! implementation across independently evolving host and firmware codebases
//! (and because the proximity channel already imposes a textual well-known
//! record convention, see [record]).
//!
//! A signing frame carries exactly [`FRAME_FIELDS`] fields:
//!
//! ```text
//! <prefix>:<curve>:<hashing|"">:<encoding>:<bip44-path>:<sig-digest|"">:<callback|"">
//! ```
//!
//! No field is escaped. The callback is always the final field so that
//! embedded colons survive the bounded split on the receiving side.
//! All enum fields round-trip through their canonical lowercase token.

pub mod fields;
pub use fields::{KeyEncoding, KeyHashing, SigningCurve};

pub mod path;
pub use path::DerivationPath;

pub mod digest;
pub use digest::SignatureDigest;

pub mod request;
pub use request::{CallbackPolicy, Request, RequestKind};

pub mod transfer;
pub use transfer::TransferRequest;

pub mod record;
pub use record::WellKnownRecord;

mod error;
pub use error::{Field, ProtocolError, ValidationError};

/// Frame prefix for signing requests (digest present)
pub const SIGN_PREFIX: &str = "proto.sign";

/// Frame prefix for public-key derivation requests (digest absent)
pub const PUBKEY_PREFIX: &str = "proto.pubkey";

/// Frame prefix for raw transfer requests, see [TransferRequest]
pub const TRANSFER_PREFIX: &str = "proto.send";

/// Number of fields in a signing / public-key frame
pub const FRAME_FIELDS: usize = 7;
