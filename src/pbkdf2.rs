//! PBKDF2 (RFC 8018) with HMAC-SHA256 or HMAC-SHA224 as the PRF

use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::error::Error;
use crate::hmac::HMAC;
use crate::sha256::{Variant, MAX_OUTPUT_LEN};

/// Block indices are encoded as 32-bit big-endian integers and start at 1.
const MAX_BLOCKS: u64 = u32::MAX as u64;

pub struct PBKDF2;

impl PBKDF2 {
    /// Checks a request and returns the number of PRF blocks it needs.
    pub(crate) fn blocks(variant: Variant, key_length: usize, iterations: u32) -> Result<u64, Error> {
        if iterations == 0 {
            debug!(%variant, key_length, "rejecting key derivation: zero iterations");
            return Err(Error::InvalidIterationCount);
        }
        let blocks = (key_length as u64).div_ceil(variant.output_len() as u64);
        if blocks > MAX_BLOCKS {
            debug!(%variant, key_length, blocks, "rejecting key derivation: output too long");
            return Err(Error::OutputTooLong);
        }
        Ok(blocks)
    }

    /// Fill `out` with PBKDF2-HMAC-SHA256(`password`, `salt`, `iterations`)
    pub fn derive(
        out: &mut [u8],
        password: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
        iterations: u32,
    ) -> Result<(), Error> {
        Self::derive_with(Variant::Sha256, out, password, salt, iterations)
    }

    /// Fill `out` with PBKDF2 using HMAC over the `variant` digest.
    ///
    /// `out` is left untouched if the request is rejected.
    pub fn derive_with(
        variant: Variant,
        out: &mut [u8],
        password: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
        iterations: u32,
    ) -> Result<(), Error> {
        let blocks = Self::blocks(variant, out.len(), iterations)?;
        trace!(%variant, iterations, key_length = out.len(), blocks, "deriving key");

        let salt = salt.as_ref();
        let hlen = variant.output_len();
        let mut prf = HMAC::new(password, variant);
        let mut u = [0u8; MAX_OUTPUT_LEN];
        let mut t = [0u8; MAX_OUTPUT_LEN];

        for (counter, chunk) in (1..=u32::MAX).zip(out.chunks_mut(hlen)) {
            prf.update(salt);
            prf.update(counter.to_be_bytes());
            let mut mac = prf.finalize_reset();
            u[..hlen].copy_from_slice(&mac);
            t[..hlen].copy_from_slice(&mac);
            for _ in 1..iterations {
                prf.update(&u[..hlen]);
                mac.zeroize();
                mac = prf.finalize_reset();
                u[..hlen].copy_from_slice(&mac);
                for (a, &b) in t.iter_mut().zip(&u[..hlen]) {
                    *a ^= b;
                }
            }
            mac.zeroize();
            chunk.copy_from_slice(&t[..chunk.len()]);
        }

        u.zeroize();
        t.zeroize();
        Ok(())
    }
}
