// Copyright (c) 2025-2026 The Tapsign Developers

//! Well-known proximity record framing
//!
//! The device reads a single NDEF short record tagged with the well-known
//! text type (`0x54`), whose payload is the UTF-8 wire text. Short-record
//! framing caps the payload at 255 bytes, which every frame the codec
//! emits fits in comfortably.
//!
//! ## Encoding:
//! ```text
//!  0                   1                   2                   3
//! +---------------+---------------+---------------+---------------+
//! |  HEADER 0xD1  | TYPE_LEN 0x01 |  PAYLOAD_LEN  |  TYPE  0x54   |
//! +---------------+---------------+---------------+---------------+
//! |                       PAYLOAD (UTF-8 text)                    |
//! +---------------------------------------------------------------+
//! ```

use encdec::{DecodeOwned, Encode};

/// NDEF well-known text record type byte
pub const WELL_KNOWN_TYPE: u8 = 0x54;

/// Record header: MB | ME | SR, TNF = well-known
pub const RECORD_HEADER: u8 = 0xd1;

/// Maximum payload for a short record (one length byte)
pub const MAX_PAYLOAD: usize = 255;

/// Record framing overhead: header, type length, payload length, type
const HEADER_LEN: usize = 4;

/// Record errors
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum RecordError {
    /// Payload exceeds the short-record limit
    #[error("record payload too large ({0} bytes, max {MAX_PAYLOAD})")]
    PayloadOverflow(usize),

    /// Buffer too small for encode / decode
    #[error("invalid record length")]
    InvalidLength,

    /// Unexpected header or type byte
    #[error("invalid record header")]
    InvalidHeader,

    /// Payload is not valid UTF-8
    #[error("record payload is not utf-8")]
    InvalidUtf8,
}

impl From<encdec::Error> for RecordError {
    fn from(e: encdec::Error) -> Self {
        match e {
            encdec::Error::Length => RecordError::InvalidLength,
            encdec::Error::Utf8 => RecordError::InvalidUtf8,
        }
    }
}

/// A single well-known-type record carrying one request frame
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WellKnownRecord {
    payload: Vec<u8>,
}

impl WellKnownRecord {
    /// Create a record from wire text
    pub fn new(payload: &str) -> Result<Self, RecordError> {
        if payload.len() > MAX_PAYLOAD {
            return Err(RecordError::PayloadOverflow(payload.len()));
        }

        Ok(Self {
            payload: payload.as_bytes().to_vec(),
        })
    }

    /// Raw payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as wire text
    pub fn payload_str(&self) -> Result<&str, RecordError> {
        core::str::from_utf8(&self.payload).map_err(|_| RecordError::InvalidUtf8)
    }

    /// Encode to an owned byte vector
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buff = vec![0u8; HEADER_LEN + self.payload.len()];
        // Infallible, buffer sized above
        let _ = self.encode(&mut buff);
        buff
    }
}

impl Encode for WellKnownRecord {
    type Error = RecordError;

    fn encode_len(&self) -> Result<usize, RecordError> {
        Ok(HEADER_LEN + self.payload.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, RecordError> {
        let n = HEADER_LEN + self.payload.len();
        if buff.len() < n {
            return Err(RecordError::InvalidLength);
        }

        buff[0] = RECORD_HEADER;
        buff[1] = 1;
        buff[2] = self.payload.len() as u8;
        buff[3] = WELL_KNOWN_TYPE;
        buff[4..n].copy_from_slice(&self.payload);

        Ok(n)
    }
}

impl DecodeOwned for WellKnownRecord {
    type Output = Self;
    type Error = RecordError;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), RecordError> {
        if buff.len() < HEADER_LEN {
            return Err(RecordError::InvalidLength);
        }

        if buff[0] != RECORD_HEADER || buff[1] != 1 || buff[3] != WELL_KNOWN_TYPE {
            return Err(RecordError::InvalidHeader);
        }

        let n = buff[2] as usize;
        if buff.len() < HEADER_LEN + n {
            return Err(RecordError::InvalidLength);
        }

        let payload = buff[HEADER_LEN..HEADER_LEN + n].to_vec();

        Ok((Self { payload }, HEADER_LEN + n))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record_encode_decode() {
        let r = WellKnownRecord::new("proto.pubkey:secp256k1::hex:m/44'/0'/0'/0/0::").unwrap();

        let b = r.to_bytes();
        assert_eq!(&b[..4], &[RECORD_HEADER, 1, r.payload().len() as u8, WELL_KNOWN_TYPE]);

        let (decoded, n) = WellKnownRecord::decode_owned(&b).unwrap();
        assert_eq!(n, b.len());
        assert_eq!(decoded, r);
        assert_eq!(
            decoded.payload_str().unwrap(),
            "proto.pubkey:secp256k1::hex:m/44'/0'/0'/0/0::"
        );
    }

    #[test]
    fn record_rejects_oversize_payload() {
        let s = "x".repeat(MAX_PAYLOAD + 1);
        assert_eq!(
            WellKnownRecord::new(&s),
            Err(RecordError::PayloadOverflow(MAX_PAYLOAD + 1))
        );
    }

    #[test]
    fn record_rejects_bad_framing() {
        assert_eq!(
            WellKnownRecord::decode_owned(&[0xd1, 1]),
            Err(RecordError::InvalidLength)
        );
        assert_eq!(
            WellKnownRecord::decode_owned(&[0x00, 1, 0, WELL_KNOWN_TYPE]),
            Err(RecordError::InvalidHeader)
        );
        // Truncated payload
        assert_eq!(
            WellKnownRecord::decode_owned(&[0xd1, 1, 4, WELL_KNOWN_TYPE, b'a']),
            Err(RecordError::InvalidLength)
        );
    }

    #[test]
    fn record_encode_short_buffer() {
        let r = WellKnownRecord::new("abc").unwrap();
        let mut buff = [0u8; 4];
        assert_eq!(r.encode(&mut buff), Err(RecordError::InvalidLength));
        assert_eq!(r.encode_len(), Ok(7));
    }
}
