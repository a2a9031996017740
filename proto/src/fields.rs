// Copyright (c) 2025-2026 The Tapsign Developers

//! Request field enumerations
//!
//! Wire tokens, stored defaults and CLI values all share the canonical
//! lowercase token provided by the strum derives, so parameters persisted
//! by a host round-trip unchanged through the wire encoding.

use strum::{Display, EnumIter, EnumString, EnumVariantNames};

/// Signing curve selection
#[derive(
    Copy, Clone, Default, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum SigningCurve {
    #[default]
    Secp256k1,
    Secp256k1r,
    Ed25519,
}

/// Public key hashing scheme
///
/// [`KeyHashing::None`] is encoded as an empty field on the wire and
/// substituted back on decode.
#[derive(
    Copy, Clone, Default, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum KeyHashing {
    #[default]
    Sha256,
    Ripemd160,
    None,
    Sha3_160,
}

/// Public key / address encoding
#[derive(
    Copy, Clone, Default, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum KeyEncoding {
    #[default]
    Hex,
    Base58,
    Bech32,
}
