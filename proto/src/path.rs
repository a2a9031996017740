// Copyright (c) 2025-2026 The Tapsign Developers

//! BIP-44 derivation path handling
//!
//! Devices only accept a constrained BIP-44 shape:
//!
//! ```text
//! m/44'/<coin>'?/<account>'/<chain>/<index>
//! ```
//!
//! with a mandatory hardened account tier, an optional hardening marker on
//! the coin type, the chain digit constrained to `0` or `1`, and 1-10 digit
//! indices. Anything else is rejected before a frame is built.

use core::fmt::{self, Display};
use core::str::FromStr;

use crate::error::ValidationError;

/// A validated BIP-44 derivation path, e.g. `m/44'/0'/0'/0/0`
///
/// Construction is only possible through [`FromStr`], so a held value is
/// always well-formed. The original text is retained verbatim for lossless
/// frame round-trips.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DerivationPath(String);

impl DerivationPath {
    /// Path text as serialized on the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DerivationPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match check_bip44(s) {
            Some(()) => Ok(Self(s.to_string())),
            None => Err(ValidationError::InvalidDerivationPath(s.to_string())),
        }
    }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DerivationPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check a path against the fixed BIP-44 grammar, `None` on any violation
fn check_bip44(s: &str) -> Option<()> {
    let s = s.strip_prefix("m/44'/")?;

    // Coin type, hardening marker optional
    let s = take_index(s)?;
    let s = s.strip_prefix('\'').unwrap_or(s);
    let s = s.strip_prefix('/')?;

    // Account tier, hardening mandatory
    let s = take_index(s)?;
    let s = s.strip_prefix('\'')?;
    let s = s.strip_prefix('/')?;

    // Single chain digit, external or change only
    let s = s.strip_prefix(['0', '1'])?;
    let s = s.strip_prefix('/')?;

    // Address index, no trailing hardening permitted
    let s = take_index(s)?;
    s.is_empty().then_some(())
}

/// Consume a 1-10 digit index, returning the remainder
fn take_index(s: &str) -> Option<&str> {
    let n = s.bytes().take_while(|b| b.is_ascii_digit()).count();
    if (1..=10).contains(&n) {
        Some(&s[n..])
    } else {
        None
    }
}
