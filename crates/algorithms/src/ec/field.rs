//! 256-bit integer representation shared by field and order arithmetic

use zeroize::Zeroize;

use crate::ec::FIELD_ELEMENT_SIZE;

/// Number of 32-bit limbs in a 256-bit integer (8 × 32 = 256 bits)
pub(crate) const NLIMBS: usize = 8;

/// A 256-bit unsigned integer stored as eight little-endian 32-bit limbs.
///
/// The value carries no modulus of its own: reduction is performed through
/// [`Modulus`](super::Modulus), which normalizes results into `[0, m)` for
/// the field prime or the group order. Byte serialization is big-endian,
/// the encoding used for every field element, coordinate, and key component
/// on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct FieldElement(pub(crate) [u32; NLIMBS]);

impl FieldElement {
    /// The additive identity: 0
    #[inline]
    pub fn zero() -> Self {
        FieldElement([0u32; NLIMBS])
    }

    /// The multiplicative identity: 1
    #[inline]
    pub fn one() -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = 1;
        FieldElement(limbs)
    }

    /// Create a field element from big-endian bytes.
    ///
    /// The value is taken as-is; callers needing a canonical representative
    /// reduce it through a [`Modulus`](super::Modulus).
    pub fn from_bytes(bytes: &[u8; FIELD_ELEMENT_SIZE]) -> Self {
        // limb 0 must hold the 4 least-significant bytes, limb 7 the 4 most-significant
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }
        FieldElement(limbs)
    }

    /// Convert this integer into big-endian bytes.
    pub fn to_bytes(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; FIELD_ELEMENT_SIZE];
        for (i, &limb) in self.0.iter().enumerate() {
            let limb_bytes = limb.to_be_bytes();
            let offset = (NLIMBS - 1 - i) * 4;
            out[offset..offset + 4].copy_from_slice(&limb_bytes);
        }
        out
    }

    /// Check if the value is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Return true if the value is even (least-significant bit = 0).
    #[inline(always)]
    pub(crate) fn is_even(&self) -> bool {
        (self.0[0] & 1) == 0
    }

    /// Bit `i` of the value, with bit 0 the least significant
    #[inline(always)]
    pub(crate) fn bit(&self, i: usize) -> bool {
        (self.0[i / 32] >> (i % 32)) & 1 == 1
    }

    /// Number of significant bits; zero for the value 0
    pub(crate) fn bit_len(&self) -> usize {
        for i in (0..NLIMBS).rev() {
            if self.0[i] != 0 {
                return i * 32 + (32 - self.0[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Compare two limb arrays for greater-than-or-equal
    #[inline(always)]
    pub(crate) fn geq(a: &[u32; NLIMBS], b: &[u32; NLIMBS]) -> bool {
        for i in (0..NLIMBS).rev() {
            if a[i] > b[i] {
                return true;
            }
            if a[i] < b[i] {
                return false;
            }
        }
        true // equal
    }

    /// Full 256-bit addition, returning the carry-out limb
    #[inline(always)]
    pub(crate) fn adc8(a: &[u32; NLIMBS], b: &[u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut carry = 0u64;

        #[allow(clippy::needless_range_loop)] // Index used for multiple arrays
        for i in 0..NLIMBS {
            let tmp = a[i] as u64 + b[i] as u64 + carry;
            r[i] = tmp as u32;
            carry = tmp >> 32;
        }
        (r, carry as u32)
    }

    /// Full 256-bit subtraction, returning the borrow-out limb
    #[inline(always)]
    pub(crate) fn sbb8(a: &[u32; NLIMBS], b: &[u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut borrow = 0i64;

        #[allow(clippy::needless_range_loop)] // Index used for multiple arrays
        for i in 0..NLIMBS {
            let tmp = a[i] as i64 - b[i] as i64 - borrow;
            if tmp < 0 {
                r[i] = (tmp + (1i64 << 32)) as u32;
                borrow = 1;
            } else {
                r[i] = tmp as u32;
                borrow = 0;
            }
        }
        (r, borrow as u32)
    }

    /// Logical shift right by one bit, shifting `carry` into the top bit
    #[inline(always)]
    pub(crate) fn shr1(limbs: &[u32; NLIMBS], carry: u32) -> [u32; NLIMBS] {
        let mut r = [0u32; NLIMBS];
        let mut high = carry & 1;
        for i in (0..NLIMBS).rev() {
            r[i] = (limbs[i] >> 1) | (high << 31);
            high = limbs[i] & 1;
        }
        r
    }
}
