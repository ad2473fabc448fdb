//! HMAC (RFC 2104) over SHA-256 or SHA-224

use zeroize::Zeroize;

use crate::sha256::{Context, Output, Variant, BLOCK_LEN, MAX_OUTPUT_LEN};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Keyed MAC state.
///
/// The key pads are computed once by [`HMAC::new`]; [`HMAC::reset`] and
/// [`HMAC::finalize_reset`] reuse them, which is what makes repeated MACs
/// under one key cheap. Pads and the inner context are wiped on drop.
#[derive(Clone)]
pub struct HMAC {
    ih: Context,
    ipad: [u8; BLOCK_LEN],
    opad: [u8; BLOCK_LEN],
}

impl HMAC {
    /// Compute HMAC(`k`, `input`) with the `variant` digest
    pub fn mac(input: impl AsRef<[u8]>, k: impl AsRef<[u8]>, variant: Variant) -> Output {
        let mut hmac = HMAC::new(k, variant);
        hmac.update(input);
        hmac.finalize()
    }

    pub fn new(k: impl AsRef<[u8]>, variant: Variant) -> HMAC {
        let k = k.as_ref();
        let mut hk = [0u8; MAX_OUTPUT_LEN];
        let k2 = if k.len() > BLOCK_LEN {
            let mut digest = Context::hash(k, variant);
            hk[..digest.len()].copy_from_slice(&digest);
            digest.zeroize();
            &hk[..variant.output_len()]
        } else {
            k
        };
        let mut ipad = [IPAD; BLOCK_LEN];
        let mut opad = [OPAD; BLOCK_LEN];
        for ((i, o), &b) in ipad.iter_mut().zip(opad.iter_mut()).zip(k2.iter()) {
            *i ^= b;
            *o ^= b;
        }
        hk.zeroize();
        let mut ih = Context::new(variant);
        ih.update(&ipad[..]);
        HMAC { ih, ipad, opad }
    }

    pub fn variant(&self) -> Variant {
        self.ih.variant()
    }

    /// Absorb content
    pub fn update(&mut self, input: impl AsRef<[u8]>) {
        self.ih.update(input);
    }

    /// Forget absorbed content, keeping the key
    pub fn reset(&mut self) {
        let variant = self.variant();
        self.ih.zeroize();
        self.ih = Context::new(variant);
        self.ih.update(&self.ipad[..]);
    }

    fn finish(&mut self) -> Output {
        let variant = self.variant();
        let mut inner = self.ih.finalize();
        self.ih.zeroize();
        let mut oh = Context::new(variant);
        oh.update(&self.opad[..]);
        oh.update(&inner[..]);
        inner.zeroize();
        oh.finalize()
    }

    /// Compute the MAC over the entire input
    pub fn finalize(mut self) -> Output {
        self.finish()
    }

    /// Compute the MAC over the entire input, then start over with the same key
    pub fn finalize_reset(&mut self) -> Output {
        let mac = self.finish();
        self.reset();
        mac
    }
}

impl Drop for HMAC {
    fn drop(&mut self) {
        self.ih.zeroize();
        self.ipad.zeroize();
        self.opad.zeroize();
    }
}
