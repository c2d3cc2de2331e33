use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::app_error::{AppError, AppResult};

const TOKEN_BYTES: usize = 32;

/// Generates a one-time login token: 256 bits from the OS CSPRNG, base64url without padding.
pub fn generate_token() -> AppResult<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::Internal(format!("failed to gather entropy: {e}")))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

/// Lookup key for a raw token. Only this value is ever persisted.
pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    let out = hasher.finalize();
    hex::encode(out)
}
