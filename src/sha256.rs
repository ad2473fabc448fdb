//! Streaming SHA-256 and SHA-224 (FIPS 180-2)

use core::fmt;
use core::ops::Deref;

use zeroize::Zeroize;

/// Size of a compression block, in bytes
pub const BLOCK_LEN: usize = 64;

/// Size of the largest digest (SHA-256), in bytes
pub const MAX_OUTPUT_LEN: usize = 32;

#[inline(always)]
fn load_be(base: &[u8], offset: usize) -> u32 {
    let addr = &base[offset..];
    (addr[3] as u32) | (addr[2] as u32) << 8 | (addr[1] as u32) << 16 | (addr[0] as u32) << 24
}

#[inline(always)]
fn store_be(base: &mut [u8], offset: usize, x: u32) {
    let addr = &mut base[offset..];
    addr[3] = x as u8;
    addr[2] = (x >> 8) as u8;
    addr[1] = (x >> 16) as u8;
    addr[0] = (x >> 24) as u8;
}

/// Which member of the SHA-256 family a context computes.
///
/// Both variants share the compression function; they differ only in the
/// initial state and in how many bytes of the final state are emitted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Sha256,
    Sha224,
}

impl Variant {
    /// Digest size in bytes: 32 for SHA-256, 28 for SHA-224.
    pub const fn output_len(self) -> usize {
        match self {
            Variant::Sha256 => 32,
            Variant::Sha224 => 28,
        }
    }

    const fn iv(self) -> [u32; 8] {
        match self {
            Variant::Sha256 => [
                0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c,
                0x1f83d9ab, 0x5be0cd19,
            ],
            Variant::Sha224 => [
                0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511,
                0x64f98fa7, 0xbefa4fa4,
            ],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Sha256 => f.write_str("SHA-256"),
            Variant::Sha224 => f.write_str("SHA-224"),
        }
    }
}

struct W([u32; 16]);

#[derive(Copy, Clone)]
struct State([u32; 8]);

impl W {
    fn new(input: &[u8]) -> Self {
        let mut w = [0u32; 16];
        for (i, e) in w.iter_mut().enumerate() {
            *e = load_be(input, i * 4)
        }
        W(w)
    }

    #[inline(always)]
    fn Ch(x: u32, y: u32, z: u32) -> u32 {
        z ^ (x & (y ^ z))
    }

    #[inline(always)]
    fn Maj(x: u32, y: u32, z: u32) -> u32 {
        (x & y) | (z & (x | y))
    }

    #[inline(always)]
    fn Sigma0(x: u32) -> u32 {
        x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
    }

    #[inline(always)]
    fn Sigma1(x: u32) -> u32 {
        x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
    }

    #[inline(always)]
    fn sigma0(x: u32) -> u32 {
        x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
    }

    #[inline(always)]
    fn sigma1(x: u32) -> u32 {
        x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
    }

    // W[t] = s1(W[t-2]) + W[t-7] + s0(W[t-15]) + W[t-16], over a 16-word window
    #[cfg_attr(feature = "opt_size", inline(never))]
    #[cfg_attr(not(feature = "opt_size"), inline(always))]
    fn M(&mut self, i: usize) {
        let w = &mut self.0;
        w[i] = w[i]
            .wrapping_add(Self::sigma1(w[(i + 14) & 15]))
            .wrapping_add(w[(i + 9) & 15])
            .wrapping_add(Self::sigma0(w[(i + 1) & 15]));
    }

    #[inline]
    fn expand(&mut self) {
        for i in 0..16 {
            self.M(i);
        }
    }

    // One round. The working variables rotate through `state` instead of
    // being shuffled, so round `i` sees `a` at index `(16 - i) & 7`.
    #[cfg_attr(feature = "opt_size", inline(never))]
    #[cfg_attr(not(feature = "opt_size"), inline(always))]
    fn F(&self, state: &mut State, i: usize, k: u32) {
        let t = &mut state.0;
        let a = (16 - i) & 7;
        let (b, c, d) = ((a + 1) & 7, (a + 2) & 7, (a + 3) & 7);
        let (e, f, g, h) = ((a + 4) & 7, (a + 5) & 7, (a + 6) & 7, (a + 7) & 7);
        t[h] = t[h]
            .wrapping_add(Self::Sigma1(t[e]))
            .wrapping_add(Self::Ch(t[e], t[f], t[g]))
            .wrapping_add(k)
            .wrapping_add(self.0[i]);
        t[d] = t[d].wrapping_add(t[h]);
        t[h] = t[h]
            .wrapping_add(Self::Sigma0(t[a]))
            .wrapping_add(Self::Maj(t[a], t[b], t[c]));
    }

    fn G(&self, state: &mut State, s: usize) {
        let rc = &ROUND_CONSTANTS[s * 16..][..16];
        for (i, &k) in rc.iter().enumerate() {
            self.F(state, i, k);
        }
    }
}

const ROUND_CONSTANTS: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

impl State {
    fn new(variant: Variant) -> Self {
        State(variant.iv())
    }

    #[inline(always)]
    fn add(&mut self, x: &State) {
        for (s, &e) in self.0.iter_mut().zip(x.0.iter()) {
            *s = s.wrapping_add(e);
        }
    }

    fn store(&self, out: &mut [u8]) {
        for (i, &e) in self.0.iter().enumerate() {
            store_be(out, i * 4, e);
        }
    }

    /// Compresses every full block of `input`, returns the length of the tail.
    fn blocks(&mut self, mut input: &[u8]) -> usize {
        let mut t = *self;
        let mut inlen = input.len();
        while inlen >= BLOCK_LEN {
            let mut w = W::new(input);
            w.G(&mut t, 0);
            w.expand();
            w.G(&mut t, 1);
            w.expand();
            w.G(&mut t, 2);
            w.expand();
            w.G(&mut t, 3);
            t.add(self);
            self.0 = t.0;
            input = &input[BLOCK_LEN..];
            inlen -= BLOCK_LEN;
        }
        inlen
    }
}

/// A finalized digest or MAC: 32 bytes for SHA-256, 28 for SHA-224.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Output {
    bytes: [u8; MAX_OUTPUT_LEN],
    len: usize,
}

impl Output {
    fn from_state(state: &State, variant: Variant) -> Self {
        let mut bytes = [0u8; MAX_OUTPUT_LEN];
        state.store(&mut bytes);
        let len = variant.output_len();
        bytes[len..].zeroize();
        Output { bytes, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Deref for Output {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Output {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Output(")?;
        for b in self.as_bytes() {
            write!(f, "{b:02x}")?;
        }
        f.write_str(")")
    }
}

impl Zeroize for Output {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

/// Streaming digest state for either variant.
///
/// Full blocks are compressed as soon as they are complete, so at most 63
/// bytes are ever buffered between calls to [`Context::update`].
#[derive(Copy, Clone)]
pub struct Context {
    state: State,
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    total_len: u64,
    variant: Variant,
}

impl Context {
    pub fn new(variant: Variant) -> Context {
        Context {
            state: State::new(variant),
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            total_len: 0,
            variant,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Number of bytes absorbed so far.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    fn _update(&mut self, input: impl AsRef<[u8]>) {
        let input = input.as_ref();
        let mut n = input.len();
        self.total_len = self.total_len.wrapping_add(n as u64);
        let av = BLOCK_LEN - self.buffer_len;
        let tc = ::core::cmp::min(n, av);
        self.buffer[self.buffer_len..self.buffer_len + tc].copy_from_slice(&input[0..tc]);
        self.buffer_len += tc;
        n -= tc;
        let pos = tc;
        if self.buffer_len == BLOCK_LEN {
            self.state.blocks(&self.buffer);
            self.buffer_len = 0;
        }
        if self.buffer_len == 0 && n > 0 {
            let rb = self.state.blocks(&input[pos..]);
            if rb > 0 {
                self.buffer[..rb].copy_from_slice(&input[pos + n - rb..]);
                self.buffer_len = rb;
            }
        }
    }

    /// Absorb content
    pub fn update(&mut self, input: impl AsRef<[u8]>) {
        self._update(input)
    }

    /// Pad, append the bit length and return the digest of everything absorbed
    pub fn finalize(mut self) -> Output {
        let mut padded = [0u8; 2 * BLOCK_LEN];
        padded[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        padded[self.buffer_len] = 0x80;
        let r = if self.buffer_len < BLOCK_LEN - 8 {
            BLOCK_LEN
        } else {
            2 * BLOCK_LEN
        };
        let bits = self.total_len.wrapping_mul(8);
        padded[r - 8..r].copy_from_slice(&bits.to_be_bytes());
        self.state.blocks(&padded[..r]);
        padded.zeroize();
        let out = Output::from_state(&self.state, self.variant);
        self.zeroize();
        out
    }

    /// Compute the `variant` digest of `input`
    pub fn hash(input: impl AsRef<[u8]>, variant: Variant) -> Output {
        let mut h = Context::new(variant);
        h.update(input);
        h.finalize()
    }
}

impl Zeroize for Context {
    fn zeroize(&mut self) {
        self.state.0.zeroize();
        self.buffer.zeroize();
        self.buffer_len.zeroize();
        self.total_len.zeroize();
    }
}

/// SHA-256 with a fixed-size output.
#[derive(Copy, Clone)]
pub struct Hash(Context);

impl Hash {
    pub fn new() -> Hash {
        Hash(Context::new(Variant::Sha256))
    }

    pub(crate) fn _update(&mut self, input: impl AsRef<[u8]>) {
        self.0._update(input)
    }

    /// Absorb content
    pub fn update(&mut self, input: impl AsRef<[u8]>) {
        self._update(input)
    }

    /// Compute SHA256(absorbed content)
    pub fn finalize(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0.finalize());
        out
    }

    /// Compute SHA256(`input`)
    pub fn hash(input: &[u8]) -> [u8; 32] {
        let mut h = Hash::new();
        h.update(input);
        h.finalize()
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-224 with a fixed-size output.
#[derive(Copy, Clone)]
pub struct Hash224(Context);

impl Hash224 {
    pub fn new() -> Hash224 {
        Hash224(Context::new(Variant::Sha224))
    }

    pub(crate) fn _update(&mut self, input: impl AsRef<[u8]>) {
        self.0._update(input)
    }

    /// Absorb content
    pub fn update(&mut self, input: impl AsRef<[u8]>) {
        self._update(input)
    }

    /// Compute SHA224(absorbed content)
    pub fn finalize(self) -> [u8; 28] {
        let mut out = [0u8; 28];
        out.copy_from_slice(&self.0.finalize());
        out
    }

    /// Compute SHA224(`input`)
    pub fn hash(input: &[u8]) -> [u8; 28] {
        let mut h = Hash224::new();
        h.update(input);
        h.finalize()
    }
}

impl Default for Hash224 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    const ABC_448: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
    const ABC_896: &[u8] = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";

    #[test]
    fn fips_180_2_sha256() {
        assert_eq!(
            Hash::hash(b"abc"),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(
            Hash::hash(ABC_448),
            hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1")
        );
        assert_eq!(
            Hash::hash(ABC_896),
            hex!("cf5b16a778af8380036ce59e7b0492370b249b11e8f07a51afac45037afee9d1")
        );
        assert_eq!(
            Hash::hash(b""),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn fips_180_2_sha224() {
        assert_eq!(
            Hash224::hash(b"abc"),
            hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
        );
        assert_eq!(
            Hash224::hash(ABC_448),
            hex!("75388b16512776cc5dba5da1fd890150b0c6455cb4f58b1952522525")
        );
        assert_eq!(
            Hash224::hash(ABC_896),
            hex!("c97ca9a559850ce97a04a96def6d99a9e0e0e2ab14e6b8df265fc0b3")
        );
        assert_eq!(
            Hash224::hash(b""),
            hex!("d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f")
        );
    }

    #[test]
    fn million_a() {
        let buf = [b'a'; 1000];
        let mut h256 = Context::new(Variant::Sha256);
        let mut h224 = Context::new(Variant::Sha224);
        for _ in 0..1000 {
            h256.update(buf);
            h224.update(buf);
        }
        assert_eq!(h256.total_len(), 1_000_000);
        assert_eq!(
            h256.finalize().as_bytes(),
            hex!("cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0")
        );
        assert_eq!(
            h224.finalize().as_bytes(),
            hex!("20794655980c91d8bbb4c1ea97618a4bf03f42581948b2ee4ee7ad67")
        );
    }

    #[test]
    fn padding_boundaries() {
        let vectors: [(usize, [u8; 32], [u8; 28]); 7] = [
            (
                55,
                hex!("9f4390f8d30c2dd92ec9f095b65e2b9ae9b0a925a5258e241c9f1e910f734318"),
                hex!("fb0bd626a70c28541dfa781bb5cc4d7d7f56622a58f01a0b1ddd646f"),
            ),
            (
                56,
                hex!("b35439a4ac6f0948b6d6f9e3c6af0f5f590ce20f1bde7090ef7970686ec6738a"),
                hex!("d40854fc9caf172067136f2e29e1380b14626bf6f0dd06779f820dcd"),
            ),
            (
                63,
                hex!("7d3e74a05d7db15bce4ad9ec0658ea98e3f06eeecf16b4c6fff2da457ddc2f34"),
                hex!("1d4e051f4d6fed2a63fd2421e65834cec00d64456553de3496ae8b1d"),
            ),
            (
                64,
                hex!("ffe054fe7ae0cb6dc65c3af9b61d5209f439851db43d0ba5997337df154668eb"),
                hex!("a88cd5cde6d6fe9136a4e58b49167461ea95d388ca2bdb7afdc3cbf4"),
            ),
            (
                65,
                hex!("635361c48bb9eab14198e76ea8ab7f1a41685d6ad62aa9146d301d4f17eb0ae0"),
                hex!("ff8716f600af42959d0efb52e1f21b01bb328733009344d511c299fb"),
            ),
            (
                119,
                hex!("31eba51c313a5c08226adf18d4a359cfdfd8d2e816b13f4af952f7ea6584dcfb"),
                hex!("e000e6709d26667b631faa7fc1bd404eb4774003c5fb4f51a0184875"),
            ),
            (
                120,
                hex!("2f3d335432c70b580af0e8e1b3674a7c020d683aa5f73aaaedfdc55af904c21c"),
                hex!("66924e30a9929327e7a6cf03747397226ed2efc180ebe3dea7132a79"),
            ),
        ];
        let input = [b'a'; 120];
        for (len, sha256, sha224) in vectors {
            assert_eq!(Hash::hash(&input[..len]), sha256, "SHA-256 of {len} bytes");
            assert_eq!(Hash224::hash(&input[..len]), sha224, "SHA-224 of {len} bytes");
        }
    }

    #[test]
    fn byte_at_a_time() {
        let mut h = Context::new(Variant::Sha256);
        for &b in ABC_896 {
            h.update([b]);
            assert!(h.buffer_len < BLOCK_LEN);
        }
        assert_eq!(h.total_len(), ABC_896.len() as u64);
        assert_eq!(h.finalize(), Context::hash(ABC_896, Variant::Sha256));
    }

    #[test]
    fn empty_updates_are_no_ops() {
        let mut h = Context::new(Variant::Sha224);
        h.update([]);
        h.update(b"ab");
        h.update([]);
        h.update(b"c");
        assert_eq!(h.finalize().as_bytes(), Hash224::hash(b"abc"));
    }

    #[test]
    fn output_lengths() {
        assert_eq!(Context::hash(b"abc", Variant::Sha256).len(), 32);
        assert_eq!(Context::hash(b"abc", Variant::Sha224).len(), 28);
        assert_eq!(Variant::default(), Variant::Sha256);
    }

    #[test]
    fn sha224_is_not_a_truncated_sha256() {
        let full = Hash::hash(b"abc");
        let short = Hash224::hash(b"abc");
        assert_ne!(&full[..28], &short[..]);
    }
}
