// Copyright (c) 2025-2026 The Tapsign Developers

//! Request parameter form state and stored defaults
//!
//! [RequestParams] is the mutable object a form layer edits freely; nothing
//! is validated until [`RequestParams::build`] converts it into an immutable
//! [Request], surfacing per-field errors for the UI to attach. [Defaults]
//! is the read-only configuration the form is seeded from, loaded once at
//! startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tapsign_proto::{
    CallbackPolicy, KeyEncoding, KeyHashing, Request, SigningCurve, ValidationError,
};

use crate::Error;

/// Stored expert-mode defaults
///
/// Tokens serialize through the same strum strings as the wire format, so
/// a stored default always round-trips into a valid frame field.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Default signing curve
    pub curve: SigningCurve,
    /// Default key hashing scheme
    pub hashing: KeyHashing,
    /// Default key encoding
    pub encoding: KeyEncoding,
    /// Default derivation path
    pub derivation_path: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            curve: SigningCurve::Secp256k1,
            hashing: KeyHashing::Ripemd160,
            encoding: KeyEncoding::Bech32,
            derivation_path: "m/44'/1'/0'/0/0".to_string(),
        }
    }
}

impl Defaults {
    /// Load defaults from a TOML file
    pub fn load(path: &Path) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }
}

/// Mutable request form state
///
/// Free-form strings for the validated fields, edited by a UI and converted
/// into an immutable [Request] at submission time.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RequestParams {
    /// Signing curve
    pub curve: SigningCurve,
    /// Key hashing scheme
    pub hashing: KeyHashing,
    /// Key encoding
    pub encoding: KeyEncoding,
    /// BIP-44 derivation path text
    pub path: String,
    /// Signature digest text, empty for a public-key request
    pub digest: String,
    /// Callback address, empty for none
    pub callback: String,
}

impl RequestParams {
    /// Create form state seeded from stored defaults
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            curve: defaults.curve,
            hashing: defaults.hashing,
            encoding: defaults.encoding,
            path: defaults.derivation_path.clone(),
            ..Default::default()
        }
    }

    /// Validate and convert into an immutable [Request]
    ///
    /// The first failing field is reported; [`ValidationError::field`]
    /// identifies it for form highlighting.
    pub fn build(&self, policy: CallbackPolicy) -> Result<Request, ValidationError> {
        let path = self.path.parse()?;

        let digest = match self.digest.as_str() {
            "" => None,
            d => Some(d.parse()?),
        };

        let callback = match self.callback.as_str() {
            "" => None,
            c => {
                policy.check(c)?;
                Some(c.to_string())
            }
        };

        Ok(Request {
            curve: self.curve,
            hashing: self.hashing,
            encoding: self.encoding,
            path,
            digest,
            callback,
        })
    }
}

#[cfg(test)]
mod test {
    use tapsign_proto::{Field, RequestKind};

    use super::*;

    #[test]
    fn defaults_roundtrip_toml() {
        let d = Defaults::default();

        let s = toml::to_string(&d).unwrap();
        assert!(s.contains("curve = \"secp256k1\""));
        assert!(s.contains("hashing = \"ripemd160\""));
        assert!(s.contains("encoding = \"bech32\""));

        let decoded: Defaults = toml::from_str(&s).unwrap();
        assert_eq!(decoded, d);
    }

    #[test]
    fn defaults_fill_missing_keys() {
        let d: Defaults = toml::from_str("curve = \"ed25519\"").unwrap();
        assert_eq!(d.curve, SigningCurve::Ed25519);
        assert_eq!(d.hashing, KeyHashing::Ripemd160);
        assert_eq!(d.derivation_path, "m/44'/1'/0'/0/0");
    }

    #[test]
    fn build_pubkey_request_from_defaults() {
        let params = RequestParams::from_defaults(&Defaults::default());

        let r = params.build(CallbackPolicy::default()).unwrap();
        assert_eq!(r.kind(), RequestKind::PublicKey);
        assert_eq!(r.to_wire(), "proto.pubkey:secp256k1:ripemd160:bech32:m/44'/1'/0'/0/0::");
    }

    #[test]
    fn build_reports_offending_field() {
        let mut params = RequestParams::from_defaults(&Defaults::default());

        params.path = "m/44'/1'/0'/2/0".to_string();
        let e = params.build(CallbackPolicy::default()).unwrap_err();
        assert_eq!(e.field(), Field::DerivationPath);

        params.path = "m/44'/1'/0'/0/0".to_string();
        params.digest = "0xnope".to_string();
        let e = params.build(CallbackPolicy::default()).unwrap_err();
        assert_eq!(e.field(), Field::SignatureDigest);

        params.digest = "0".repeat(64);
        params.callback = "not a url".to_string();
        let e = params.build(CallbackPolicy::RequireUri).unwrap_err();
        assert_eq!(e.field(), Field::Callback);

        // Opaque policy carries the same callback through
        let r = params.build(CallbackPolicy::Opaque).unwrap();
        assert_eq!(r.kind(), RequestKind::Sign);
        assert_eq!(r.callback.as_deref(), Some("not a url"));
    }
}
