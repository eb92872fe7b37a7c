//! Serial commitment scheme.
//!
//! A commitment is `SHA-256(batch_id ++ serial)` where `batch_id` is the
//! 8-byte big-endian batch identifier and `serial` is the plaintext serial
//! number in UTF-8. The plaintext never leaves the manufacturer's tooling
//! or the scanning client; the registry stores and compares digests only.
//!
//! # Hex format
//!
//! [`SerialCommitment::to_hex`] produces raw lowercase hex (64 chars, no
//! prefix), the form the `stellar` CLI expects for `BytesN<32>` arguments.
//! [`SerialCommitment::from_hex`] accepts both `0x`-prefixed and raw hex.

use sha2::{Digest, Sha256};

/// Opaque 32-byte commitment to one serialized unit of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SerialCommitment(pub [u8; 32]);

/// Compute the commitment for `serial` within batch `batch_id`.
pub fn serial_commitment(batch_id: u64, serial: &str) -> SerialCommitment {
    let mut hasher = Sha256::new();
    hasher.update(batch_id.to_be_bytes());
    hasher.update(serial.as_bytes());
    SerialCommitment(hasher.finalize().into())
}

impl SerialCommitment {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}
