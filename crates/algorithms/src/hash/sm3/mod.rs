//! SM3 hash function
//!
//! This module implements the SM3 cryptographic hash function as specified
//! in GB/T 32905-2016: a 256-bit Merkle–Damgård construction over 512-bit
//! blocks. Every higher layer of the workspace consumes it - message
//! digests and identity binding in `gmcrypt-sign`, keystream and integrity
//! tag derivation in `gmcrypt-pke`.

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

use crate::error::Result;
use crate::hash::{HashAlgorithm, HashFunction};
use crate::types::Digest;
use gmcrypt_params::utils::hash::{SM3_BLOCK_SIZE, SM3_OUTPUT_SIZE};

// Round constants for rounds 0..16 and 16..64
const T0: u32 = 0x79CC_4519;
const T1: u32 = 0x7A87_9D8A;

/// Marker type for the SM3 algorithm
pub enum Sm3Algorithm {}

impl HashAlgorithm for Sm3Algorithm {
    const OUTPUT_SIZE: usize = SM3_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SM3_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SM3";
}

/// SM3 hash function state
#[derive(Clone, Zeroize)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; SM3_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Sm3 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Boolean mixing function FF_j: XOR form for the first 16 rounds,
/// majority afterwards
#[inline(always)]
fn ff(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

/// Boolean mixing function GG_j: XOR form for the first 16 rounds,
/// chooser afterwards
#[inline(always)]
fn gg(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (!x & z)
    }
}

/// Permutation P0, applied in the compression rounds
#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

/// Permutation P1, applied in the message expansion
#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

impl Sm3 {
    fn init_state() -> [u32; 8] {
        [
            0x7380_166F,
            0x4914_B2B9,
            0x1724_42D7,
            0xDA8A_0600,
            0xA96F_30BC,
            0x1631_38AA,
            0xE38D_EE4D,
            0xB0FB_0E4E,
        ]
    }

    fn new() -> Self {
        Sm3 {
            state: Self::init_state(),
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    fn compress(state: &mut [u32; 8], block: &[u8; SM3_BLOCK_SIZE]) {
        // Message schedule: 68 expanded words W, then 64 XOR-combined words W'
        let mut w = [0u32; 68];
        for i in 0..16 {
            w[i] = BigEndian::read_u32(&block[i * 4..]);
        }
        for i in 16..68 {
            w[i] = p1(w[i - 16] ^ w[i - 9] ^ w[i - 3].rotate_left(15))
                ^ w[i - 13].rotate_left(7)
                ^ w[i - 6];
        }
        let mut w_prime = [0u32; 64];
        for i in 0..64 {
            w_prime[i] = w[i] ^ w[i + 4];
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

        for j in 0..64 {
            let t_j = if j < 16 { T0 } else { T1 };
            let ss1 = a
                .rotate_left(12)
                .wrapping_add(e)
                .wrapping_add(t_j.rotate_left((j % 32) as u32))
                .rotate_left(7);
            let ss2 = ss1 ^ a.rotate_left(12);
            let tt1 = ff(a, b, c, j)
                .wrapping_add(d)
                .wrapping_add(ss2)
                .wrapping_add(w_prime[j]);
            let tt2 = gg(e, f, g, j)
                .wrapping_add(h)
                .wrapping_add(ss1)
                .wrapping_add(w[j]);

            d = c;
            c = b.rotate_left(9);
            b = a;
            a = tt1;
            h = g;
            g = f.rotate_left(19);
            f = e;
            e = p0(tt2);
        }

        // The feed-forward is an XOR in SM3, not the addition of SHA-2
        state[0] ^= a;
        state[1] ^= b;
        state[2] ^= c;
        state[3] ^= d;
        state[4] ^= e;
        state[5] ^= f;
        state[6] ^= g;
        state[7] ^= h;
    }

    fn update_internal(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SM3_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SM3_BLOCK_SIZE {
                let mut block = [0u8; SM3_BLOCK_SIZE];
                block.copy_from_slice(&self.buffer);
                Self::compress(&mut self.state, &block);
                self.total_bytes += SM3_BLOCK_SIZE as u64;
                self.buffer_idx = 0;
            }
        }
    }

    fn finalize_internal(&mut self) -> [u8; SM3_OUTPUT_SIZE] {
        self.total_bytes += self.buffer_idx as u64;
        let bit_len = self.total_bytes * 8;

        // Padding: 0x80, then zeros until length ≡ 56 (mod 64), then the
        // 8-byte big-endian bit length of the original message
        self.buffer[self.buffer_idx] = 0x80;
        if self.buffer_idx >= 56 {
            for byte in &mut self.buffer[self.buffer_idx + 1..] {
                *byte = 0;
            }
            let mut block = [0u8; SM3_BLOCK_SIZE];
            block.copy_from_slice(&self.buffer);
            Self::compress(&mut self.state, &block);
            self.buffer = [0u8; SM3_BLOCK_SIZE];
        } else {
            for byte in &mut self.buffer[self.buffer_idx + 1..56] {
                *byte = 0;
            }
        }

        BigEndian::write_u64(&mut self.buffer[56..], bit_len);
        let mut block = [0u8; SM3_BLOCK_SIZE];
        block.copy_from_slice(&self.buffer);
        Self::compress(&mut self.state, &block);

        let mut out = [0u8; SM3_OUTPUT_SIZE];
        for (i, &word) in self.state.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        self.zeroize();
        out
    }
}

impl HashFunction for Sm3 {
    type Algorithm = Sm3Algorithm;
    type Output = Digest<SM3_OUTPUT_SIZE>;

    fn new() -> Self {
        Sm3::new()
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.update_internal(data);
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        Ok(Digest::new(self.finalize_internal()))
    }
}
