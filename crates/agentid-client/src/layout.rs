//! Identity account layout.
//!
//! Layout (263 bytes, zero padded after `verified_at`):
//! - 8 bytes: discriminator
//! - 32 bytes: owner
//! - 4 bytes: uri length (u32 LE)
//! - N bytes: metadata uri (UTF-8)
//! - 8 bytes: registered_at (i64 LE)
//! - 1 byte: is_verified
//! - 8 bytes: verified_at (i64 LE, 0 when unverified)

use solana_program::pubkey::Pubkey;

use crate::constants::{
    FIXED_SUFFIX_LEN, IDENTITY_ACCOUNT_SIZE, MAX_METADATA_URI_LEN, URI_OFFSET,
};
use crate::errors::LayoutError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub discriminator: [u8; 8],
    pub owner: Pubkey,
    pub metadata_uri: String,
    pub registered_at: i64,
    pub is_verified: bool,
    pub verified_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStatus {
    Registered,
    Verified,
}

impl IdentityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Verified => "verified",
        }
    }
}

impl IdentityRecord {
    /// Decode a raw identity account.
    ///
    /// Bounds are checked before every slice; no input can make this panic.
    pub fn decode(data: &[u8]) -> Result<Self, LayoutError> {
        if data.len() != IDENTITY_ACCOUNT_SIZE {
            return Err(LayoutError::InvalidLength {
                expected: IDENTITY_ACCOUNT_SIZE,
                actual: data.len(),
            });
        }

        let mut discriminator = [0u8; 8];
        discriminator.copy_from_slice(&data[0..8]);

        let mut owner = [0u8; 32];
        owner.copy_from_slice(&data[8..40]);

        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&data[40..URI_OFFSET]);
        let uri_len = u32::from_le_bytes(len_bytes) as usize;

        let available = data.len() - URI_OFFSET;
        if uri_len > available {
            return Err(LayoutError::MalformedUri { uri_len, available });
        }
        let uri_end = URI_OFFSET + uri_len;

        let needed = uri_end + FIXED_SUFFIX_LEN;
        if needed > data.len() {
            return Err(LayoutError::TruncatedRecord { needed, actual: data.len() });
        }

        let metadata_uri = std::str::from_utf8(&data[URI_OFFSET..uri_end])
            .map_err(|_| LayoutError::InvalidUtf8)?
            .to_string();

        let registered_at = read_i64(data, uri_end);
        let is_verified = data[uri_end + 8] == 1;
        let verified_at = read_i64(data, uri_end + 9);

        Ok(Self {
            discriminator,
            owner: Pubkey::new_from_array(owner),
            metadata_uri,
            registered_at,
            is_verified,
            verified_at,
        })
    }

    /// Encode into a full, zero-padded account buffer.
    pub fn encode(&self) -> Result<Vec<u8>, LayoutError> {
        let uri = self.metadata_uri.as_bytes();
        if uri.len() > MAX_METADATA_URI_LEN {
            return Err(LayoutError::UriTooLong { len: uri.len(), max: MAX_METADATA_URI_LEN });
        }

        let mut data = vec![0u8; IDENTITY_ACCOUNT_SIZE];
        data[0..8].copy_from_slice(&self.discriminator);
        data[8..40].copy_from_slice(self.owner.as_ref());
        data[40..URI_OFFSET].copy_from_slice(&(uri.len() as u32).to_le_bytes());

        let uri_end = URI_OFFSET + uri.len();
        data[URI_OFFSET..uri_end].copy_from_slice(uri);
        data[uri_end..uri_end + 8].copy_from_slice(&self.registered_at.to_le_bytes());
        data[uri_end + 8] = u8::from(self.is_verified);
        data[uri_end + 9..uri_end + 17].copy_from_slice(&self.verified_at.to_le_bytes());

        Ok(data)
    }

    pub fn status(&self) -> IdentityStatus {
        if self.is_verified {
            IdentityStatus::Verified
        } else {
            IdentityStatus::Registered
        }
    }
}

fn read_i64(data: &[u8], at: usize) -> i64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[at..at + 8]);
    i64::from_le_bytes(buf)
}
