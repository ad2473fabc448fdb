//! A small, self-contained SHA256/SHA224, HMAC and PBKDF2-HMAC implementation
//!
//! ```
//! use pbkdf2_sha256::{hash, hmac, Variant, PBKDF2};
//!
//! let digest = hash(b"abc", Variant::Sha224);
//! assert_eq!(digest.len(), 28);
//!
//! let mac = hmac(b"key", b"message", Variant::Sha256);
//! assert_eq!(mac.len(), 32);
//!
//! let mut key = [0u8; 32];
//! PBKDF2::derive(&mut key, b"password", b"salt", 4096).unwrap();
//! ```

#![no_std]
#![allow(
    non_snake_case,
    clippy::cast_lossless,
    clippy::many_single_char_names,
    clippy::unreadable_literal,
    clippy::upper_case_acronyms
)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
mod hmac;
mod pbkdf2;
mod sha256;
mod traits;

pub use error::Error;
pub use hmac::HMAC;
pub use pbkdf2::PBKDF2;
pub use sha256::{Context, Hash, Hash224, Output, Variant, BLOCK_LEN, MAX_OUTPUT_LEN};
#[cfg(feature = "traits010")]
pub use traits::{WrappedHash, WrappedHash224};

/// Compute the `variant` digest of `input`
pub fn hash(input: impl AsRef<[u8]>, variant: Variant) -> Output {
    Context::hash(input, variant)
}

/// Compute HMAC(`key`, `input`) with the `variant` digest
pub fn hmac(key: impl AsRef<[u8]>, input: impl AsRef<[u8]>, variant: Variant) -> Output {
    HMAC::mac(input, key, variant)
}

/// Derive `key_length` bytes with PBKDF2-HMAC-SHA256
///
/// The request is validated before anything is allocated.
#[cfg(feature = "alloc")]
pub fn derive_key(
    password: impl AsRef<[u8]>,
    salt: impl AsRef<[u8]>,
    iterations: u32,
    key_length: usize,
) -> Result<alloc::vec::Vec<u8>, Error> {
    PBKDF2::blocks(Variant::Sha256, key_length, iterations)?;
    let mut out = alloc::vec![0u8; key_length];
    PBKDF2::derive(&mut out, password, salt, iterations)?;
    Ok(out)
}
