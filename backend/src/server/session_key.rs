//! Cookie signing key loading.

use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use tracing::warn;
use zeroize::Zeroize;

/// Shortest key material accepted from disk.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Errors raised while loading the session key.
#[derive(thiserror::Error, Debug)]
pub enum SessionKeyError {
    /// Reading the key file failed and ephemeral keys are not allowed.
    #[error("failed to read session key at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file holds too few bytes.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Read the signing key from `path`.
///
/// When the file cannot be read and `allow_ephemeral` is set, a random key is
/// generated instead; sessions then do not survive a restart. The raw bytes
/// are zeroed once the key has been derived.
///
/// # Errors
///
/// Returns [`SessionKeyError::TooShort`] for files under
/// [`SESSION_KEY_MIN_LEN`] bytes and [`SessionKeyError::Read`] for unreadable
/// files when ephemeral keys are disallowed.
pub fn load_session_key(path: &Path, allow_ephemeral: bool) -> Result<Key, SessionKeyError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionKeyError::TooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionKeyError::Read {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}
