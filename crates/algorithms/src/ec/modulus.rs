//! Modular arithmetic over an explicit 256-bit modulus
//!
//! One engine serves both moduli of a curve: the field prime p for
//! coordinate arithmetic and the group order n for scalar arithmetic.
//! Every operation normalizes its result into `[0, m)`.

use crate::ec::field::{FieldElement, NLIMBS};
use crate::ec::FIELD_ELEMENT_SIZE;
use crate::error::{Error, Result};

/// A fixed 256-bit modulus together with arithmetic over `[0, m)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modulus {
    m: [u32; NLIMBS],
}

impl Modulus {
    /// Create a modulus from big-endian bytes. The modulus must exceed one.
    pub fn new(bytes: &[u8; FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let m = FieldElement::from_bytes(bytes);
        if m.is_zero() || m == FieldElement::one() {
            return Err(Error::param("Modulus", "modulus must exceed one"));
        }
        Ok(Modulus { m: m.0 })
    }

    /// The modulus value itself
    pub fn value(&self) -> FieldElement {
        FieldElement(self.m)
    }

    /// True if `x` is canonical, i.e. `x < m`
    pub fn contains(&self, x: &FieldElement) -> bool {
        !FieldElement::geq(&x.0, &self.m)
    }

    /// (a + b) mod m, for canonical a and b
    pub fn add(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        debug_assert!(self.contains(a) && self.contains(b));
        let (sum, carry) = FieldElement::adc8(&a.0, &b.0);

        // If the addition overflowed or sum >= m, subtract m once
        if carry == 1 || FieldElement::geq(&sum, &self.m) {
            let (reduced, _) = FieldElement::sbb8(&sum, &self.m);
            FieldElement(reduced)
        } else {
            FieldElement(sum)
        }
    }

    /// (a - b) mod m, for canonical a and b
    pub fn sub(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        debug_assert!(self.contains(a) && self.contains(b));
        let (diff, borrow) = FieldElement::sbb8(&a.0, &b.0);

        if borrow == 1 {
            // Result went negative; add m back
            let (fixed, _) = FieldElement::adc8(&diff, &self.m);
            FieldElement(fixed)
        } else {
            FieldElement(diff)
        }
    }

    /// (-a) mod m, for canonical a
    pub fn neg(&self, a: &FieldElement) -> FieldElement {
        if a.is_zero() {
            FieldElement::zero()
        } else {
            let (r, _) = FieldElement::sbb8(&self.m, &a.0);
            FieldElement(r)
        }
    }

    /// Reduce an arbitrary 256-bit integer into `[0, m)`.
    ///
    /// Horner evaluation over the bits of `x`. The modulus may be far
    /// smaller than the input, so a single conditional subtraction is not
    /// enough in general.
    pub fn reduce(&self, x: &FieldElement) -> FieldElement {
        if self.contains(x) {
            return x.clone();
        }
        let one = FieldElement::one();
        let mut r = FieldElement::zero();
        for i in (0..x.bit_len()).rev() {
            r = self.add(&r, &r);
            if x.bit(i) {
                r = self.add(&r, &one);
            }
        }
        r
    }

    /// Reduce big-endian bytes into `[0, m)`
    pub fn reduce_bytes(&self, bytes: &[u8; FIELD_ELEMENT_SIZE]) -> FieldElement {
        self.reduce(&FieldElement::from_bytes(bytes))
    }

    /// (a * b) mod m by binary double-and-add, most-significant bit first,
    /// for canonical a and b
    pub fn mul(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        debug_assert!(self.contains(a) && self.contains(b));
        let mut acc = FieldElement::zero();
        for i in (0..b.bit_len()).rev() {
            // acc = acc * 2 (mod m)
            acc = self.add(&acc, &acc);
            // if this bit of b is set, acc = acc + a (mod m)
            if b.bit(i) {
                acc = self.add(&acc, a);
            }
        }
        acc
    }

    /// Modular inverse by the binary extended Euclidean algorithm.
    ///
    /// Requires an odd modulus with gcd(a, m) = 1; both hold for the prime
    /// field and prime-order moduli this engine serves. Inverting zero
    /// fails with [`Error::InvalidInverse`] - for well-formed keys and
    /// points that never happens and callers treat it as an invariant
    /// violation.
    pub fn inv(&self, a: &FieldElement) -> Result<FieldElement> {
        if self.m[0] & 1 == 0 {
            return Err(Error::param("Modulus", "inversion requires an odd modulus"));
        }
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(Error::InvalidInverse {
                context: "inverse of 0 does not exist",
            });
        }

        // Invariants: x1 * a ≡ u (mod m), x2 * a ≡ v (mod m)
        let mut u = a.0;
        let mut v = self.m;
        let mut x1 = FieldElement::one();
        let mut x2 = FieldElement::zero();

        while !is_one(&u) && !is_one(&v) {
            while u[0] & 1 == 0 {
                u = FieldElement::shr1(&u, 0);
                x1 = self.half(&x1);
            }
            while v[0] & 1 == 0 {
                v = FieldElement::shr1(&v, 0);
                x2 = self.half(&x2);
            }
            if FieldElement::geq(&u, &v) {
                let (diff, _) = FieldElement::sbb8(&u, &v);
                u = diff;
                x1 = self.sub(&x1, &x2);
            } else {
                let (diff, _) = FieldElement::sbb8(&v, &u);
                v = diff;
                x2 = self.sub(&x2, &x1);
            }

            // Only reachable when gcd(a, m) > 1, i.e. a composite modulus
            if u.iter().all(|&w| w == 0) || v.iter().all(|&w| w == 0) {
                return Err(Error::InvalidInverse {
                    context: "element shares a factor with the modulus",
                });
            }
        }

        Ok(if is_one(&u) { x1 } else { x2 })
    }

    /// x / 2 mod m, for odd m
    fn half(&self, x: &FieldElement) -> FieldElement {
        if x.is_even() {
            FieldElement(FieldElement::shr1(&x.0, 0))
        } else {
            // (x + m) is even; the sum may carry into bit 256
            let (sum, carry) = FieldElement::adc8(&x.0, &self.m);
            FieldElement(FieldElement::shr1(&sum, carry))
        }
    }
}

#[inline(always)]
fn is_one(limbs: &[u32; NLIMBS]) -> bool {
    limbs[0] == 1 && limbs[1..].iter().all(|&w| w == 0)
}
