//! Incremental 32-bit MurmurHash3.
//!
//! Bytes may be fed in arbitrary chunks; the result equals the one-shot
//! MurmurHash3 (x86, 32-bit) of the concatenated input as long as the
//! caller reports the total length at finalization. Parameter hashes are
//! built this way, one field at a time.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

///
/// MurmurState
///
/// Running `(hash, carry, total_length)` triple.
/// The low two bits of `carry` count the pending tail bytes, which sit in
/// its high bytes.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MurmurState {
    pub hash: u32,
    pub carry: u32,
    pub total_length: u32,
}

impl MurmurState {
    #[must_use]
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            hash: seed,
            carry: 0,
            total_length: 0,
        }
    }

    /// Feed bytes and account for them in `total_length`.
    pub fn update(&mut self, bytes: &[u8]) {
        process(&mut self.hash, &mut self.carry, bytes);
        self.total_length = self.total_length.wrapping_add(bytes.len() as u32);
    }

    #[must_use]
    pub const fn finish(&self) -> u32 {
        finalize(self.hash, self.carry, self.total_length)
    }
}

/// One-shot MurmurHash3 (x86, 32-bit).
#[must_use]
pub fn murmur3_32(bytes: &[u8], seed: u32) -> u32 {
    let mut state = MurmurState::with_seed(seed);
    state.update(bytes);

    state.finish()
}

#[inline]
const fn mix_block(h1: u32, k1: u32) -> u32 {
    let k1 = k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
    let h1 = (h1 ^ k1).rotate_left(13);

    h1.wrapping_mul(5).wrapping_add(0xe654_6b64)
}

/// Advance `(h1, carry)` over `bytes` without finalizing.
pub fn process(h1: &mut u32, carry: &mut u32, bytes: &[u8]) {
    let mut h = *h1;
    let mut c = *carry;
    let mut n = (c & 3) as usize;
    let mut rest = bytes;

    // top up a partial block left by the previous call
    let fill = (4 - n) & 3;
    if fill != 0 && fill <= rest.len() {
        for &byte in &rest[..fill] {
            c = (c >> 8) | (u32::from(byte) << 24);
        }
        h = mix_block(h, c);
        n = 0;
        rest = &rest[fill..];
    }

    if n == 0 {
        let mut blocks = rest.chunks_exact(4);
        for block in &mut blocks {
            let k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            h = mix_block(h, k1);
        }
        rest = blocks.remainder();
    }

    for &byte in rest {
        c = (c >> 8) | (u32::from(byte) << 24);
        n += 1;
        if n == 4 {
            h = mix_block(h, c);
            n = 0;
        }
    }

    *h1 = h;
    *carry = (c & !0xff) | n as u32;
}

/// Finalize a running hash.
#[must_use]
pub const fn finalize(h: u32, carry: u32, total_length: u32) -> u32 {
    let mut h = h;
    let n = carry & 3;

    if n != 0 {
        let k1 = (carry >> ((4 - n) * 8))
            .wrapping_mul(C1)
            .rotate_left(15)
            .wrapping_mul(C2);
        h ^= k1;
    }

    h ^= total_length;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;

    h
}

///
/// TESTS
///
