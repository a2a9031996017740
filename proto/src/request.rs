// Copyright (c) 2025-2026 The Tapsign Developers

//! Signing / public-key request frames
//!
//! ## Encoding
//!
//! ```text
//! <prefix>:<curve>:<hashing|"">:<encoding>:<bip44-path>:<sig-digest|"">:<callback|"">
//! ```
//!
//! The request kind is not carried as an explicit discriminant, it is
//! inferred from digest presence (and cross-checked against the prefix on
//! decode). A future scheme with an optional digest would need a tagged
//! prefix instead.

use core::fmt::{self, Display};
use core::str::FromStr;

use crate::{
    error::{ProtocolError, ValidationError},
    DerivationPath, KeyEncoding, KeyHashing, SignatureDigest, SigningCurve, FRAME_FIELDS,
    PUBKEY_PREFIX, SIGN_PREFIX,
};

/// Request kind, used by the transport layer to select the context handed
/// back on delivery
#[derive(Copy, Clone, PartialEq, Eq, Debug, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RequestKind {
    /// Transaction signing request
    Sign,
    /// Public-key derivation request
    #[strum(serialize = "pubkey")]
    PublicKey,
    /// Raw transfer request, see [TransferRequest][crate::TransferRequest]
    Transfer,
}

/// Callback field validation policy
///
/// The original host intentionally disabled callback validation, so the
/// default accepts any opaque string. [`CallbackPolicy::RequireUri`] demands
/// a minimal `scheme://remainder` shape.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum CallbackPolicy {
    /// Accept any non-empty callback string
    #[default]
    Opaque,
    /// Require a URI-shaped callback
    RequireUri,
}

impl CallbackPolicy {
    /// Check a non-empty callback value against this policy
    pub fn check(&self, callback: &str) -> Result<(), ValidationError> {
        match self {
            CallbackPolicy::Opaque => Ok(()),
            CallbackPolicy::RequireUri => {
                if is_uri_shaped(callback) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidCallback(callback.to_string()))
                }
            }
        }
    }
}

fn is_uri_shaped(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    let head_ok = chars.next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false);
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    head_ok && tail_ok && !rest.is_empty()
}

/// An immutable, validated device request
///
/// Every field type enforces its own grammar, so a held [Request] is always
/// serializable; converting user input into a [Request] is where validation
/// failures surface (see the host-side parameter builder).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Request {
    /// Signing curve
    pub curve: SigningCurve,
    /// Public key hashing scheme
    pub hashing: KeyHashing,
    /// Public key / address encoding
    pub encoding: KeyEncoding,
    /// BIP-44 derivation path selecting the keypair
    pub path: DerivationPath,
    /// Digest to sign, absent for public-key requests
    pub digest: Option<SignatureDigest>,
    /// Opaque callback address, carried but not interpreted
    pub callback: Option<String>,
}

impl Request {
    /// Build a public-key derivation request
    pub fn pubkey(
        curve: SigningCurve,
        hashing: KeyHashing,
        encoding: KeyEncoding,
        path: DerivationPath,
    ) -> Self {
        Self {
            curve,
            hashing,
            encoding,
            path,
            digest: None,
            callback: None,
        }
    }

    /// Build a signing request for the provided digest
    pub fn sign(
        curve: SigningCurve,
        hashing: KeyHashing,
        encoding: KeyEncoding,
        path: DerivationPath,
        digest: SignatureDigest,
    ) -> Self {
        Self {
            curve,
            hashing,
            encoding,
            path,
            digest: Some(digest),
            callback: None,
        }
    }

    /// Request kind, inferred from digest presence
    pub fn kind(&self) -> RequestKind {
        match self.digest {
            Some(_) => RequestKind::Sign,
            None => RequestKind::PublicKey,
        }
    }

    /// Frame prefix matching [`Request::kind`]
    pub fn prefix(&self) -> &'static str {
        match self.kind() {
            RequestKind::Sign => SIGN_PREFIX,
            _ => PUBKEY_PREFIX,
        }
    }

    /// Encode to wire text
    pub fn to_wire(&self) -> String {
        let hashing = match self.hashing {
            KeyHashing::None => String::new(),
            h => h.to_string(),
        };

        format!(
            "{}:{}:{}:{}:{}:{}:{}",
            self.prefix(),
            self.curve,
            hashing,
            self.encoding,
            self.path,
            self.digest.as_ref().map(|d| d.as_str()).unwrap_or(""),
            self.callback.as_deref().unwrap_or(""),
        )
    }

    /// Decode wire text under the provided callback policy
    ///
    /// Either yields a fully validated [Request] or fails, never partial
    /// state. Split is bounded to [`FRAME_FIELDS`] components with the
    /// remainder kept intact in the final (callback) field, and empty
    /// components are preserved.
    pub fn from_wire(s: &str, policy: CallbackPolicy) -> Result<Self, ProtocolError> {
        let parts: Vec<&str> = s.splitn(FRAME_FIELDS, ':').collect();
        if parts.len() != FRAME_FIELDS {
            return Err(ProtocolError::MalformedFrame(parts.len()));
        }

        if parts[0] != SIGN_PREFIX && parts[0] != PUBKEY_PREFIX {
            return Err(ProtocolError::UnknownPrefix(parts[0].to_string()));
        }

        let curve = SigningCurve::from_str(parts[1])
            .map_err(|_| ProtocolError::InvalidCurve(parts[1].to_string()))?;

        // Empty hashing field encodes `none`
        let h = if parts[2].is_empty() { "none" } else { parts[2] };
        let hashing =
            KeyHashing::from_str(h).map_err(|_| ProtocolError::InvalidHashing(parts[2].to_string()))?;

        let encoding = KeyEncoding::from_str(parts[3])
            .map_err(|_| ProtocolError::InvalidEncoding(parts[3].to_string()))?;

        let path = DerivationPath::from_str(parts[4])?;

        let digest = match parts[5] {
            "" => None,
            d => Some(SignatureDigest::from_str(d)?),
        };

        let callback = match parts[6] {
            "" => None,
            c => {
                policy.check(c)?;
                Some(c.to_string())
            }
        };

        // The prefix must agree with the kind inference
        if (parts[0] == SIGN_PREFIX) != digest.is_some() {
            return Err(ProtocolError::PrefixMismatch);
        }

        Ok(Self {
            curve,
            hashing,
            encoding,
            path,
            digest,
            callback,
        })
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

/// Decode with the default (opaque) callback policy
impl FromStr for Request {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s, CallbackPolicy::default())
    }
}
