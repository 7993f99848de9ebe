//! Curve group operations over explicit domain parameters

use gmcrypt_params::sm2::CurveParams;
use rand::{CryptoRng, RngCore};

use crate::ec::field::FieldElement;
use crate::ec::modulus::Modulus;
use crate::ec::point::Point;
use crate::ec::FIELD_ELEMENT_SIZE;
use crate::error::{Error, Result};

/// Maximum rejection-sampling attempts when drawing a uniform scalar.
/// The per-draw rejection probability is below 2⁻³² for both supported
/// parameter sets, so exhausting the cap means the RNG is broken.
const MAX_SCALAR_ATTEMPTS: usize = 64;

/// A short Weierstrass curve with its two moduli and base point.
///
/// Built once from a [`CurveParams`] constant and then threaded, immutable,
/// through every group operation. Distinct `Curve` values are fully
/// independent, so tests can run alternate parameter sets in parallel.
#[derive(Clone, Debug)]
pub struct Curve {
    field: Modulus,
    order: Modulus,
    a: FieldElement,
    b: FieldElement,
    g: Point,
    name: &'static str,
}

impl Curve {
    /// Build a curve from domain parameters.
    ///
    /// Validates that the generator coordinates are canonical field
    /// elements and that G satisfies the curve equation.
    pub fn new(params: &CurveParams) -> Result<Self> {
        let field = Modulus::new(&params.p)?;
        let order = Modulus::new(&params.n)?;
        let a = field.reduce_bytes(&params.a);
        let b = field.reduce_bytes(&params.b);

        let g_x = FieldElement::from_bytes(&params.g_x);
        let g_y = FieldElement::from_bytes(&params.g_y);
        if !field.contains(&g_x) || !field.contains(&g_y) {
            return Err(Error::param("Curve", "generator coordinate out of range"));
        }

        let curve = Curve {
            field,
            order,
            a,
            b,
            g: Point::Affine { x: g_x, y: g_y },
            name: params.name,
        };
        if !curve.is_on_curve(&curve.g) {
            return Err(Error::PointNotOnCurve {
                context: "generator does not satisfy the curve equation",
            });
        }
        Ok(curve)
    }

    /// Human-readable name of the parameter set
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The base point G
    pub fn generator(&self) -> &Point {
        &self.g
    }

    /// Arithmetic modulo the field prime p
    pub fn field(&self) -> &Modulus {
        &self.field
    }

    /// Arithmetic modulo the group order n
    pub fn order(&self) -> &Modulus {
        &self.order
    }

    /// Curve coefficient a
    pub fn coefficient_a(&self) -> &FieldElement {
        &self.a
    }

    /// Curve coefficient b
    pub fn coefficient_b(&self) -> &FieldElement {
        &self.b
    }

    /// Curve membership check.
    ///
    /// The identity is on every curve; an affine pair must satisfy
    /// y² ≡ x³ + ax + b (mod p).
    pub fn is_on_curve(&self, point: &Point) -> bool {
        let (x, y) = match point.coordinates() {
            None => return true,
            Some(coords) => coords,
        };
        let f = &self.field;
        let y_sq = f.mul(y, y);
        let x_cu = f.mul(&f.mul(x, x), x);
        let rhs = f.add(&f.add(&x_cu, &f.mul(&self.a, x)), &self.b);
        y_sq == rhs
    }

    /// Group negation: -(x, y) = (x, (p - y) mod p); -∞ = ∞
    pub fn negate(&self, point: &Point) -> Point {
        match point.coordinates() {
            None => Point::Identity,
            Some((x, y)) => Point::Affine {
                x: x.clone(),
                y: self.field.neg(y),
            },
        }
    }

    /// Full Weierstrass chord-and-tangent addition.
    ///
    /// Adding a point to its negation yields the identity. The slope
    /// denominator (2y for doubling, x2 - x1 otherwise) is invertible for
    /// every valid pair of points on a prime-order curve; an
    /// `InvalidInverse` out of this function is an invariant violation, not
    /// an expected outcome.
    pub fn add(&self, p1: &Point, p2: &Point) -> Result<Point> {
        let (x1, y1) = match p1.coordinates() {
            None => return Ok(p2.clone()),
            Some(coords) => coords,
        };
        let (x2, y2) = match p2.coordinates() {
            None => return Ok(p1.clone()),
            Some(coords) => coords,
        };
        let f = &self.field;

        if x1 == x2 && y1 != y2 {
            // inverse pair
            return Ok(Point::Identity);
        }

        let slope = if x1 == x2 {
            // tangent: (3x₁² + a) / 2y₁
            let x1_sq = f.mul(x1, x1);
            let numer = f.add(&f.add(&f.add(&x1_sq, &x1_sq), &x1_sq), &self.a);
            let denom = f.add(y1, y1);
            f.mul(&numer, &f.inv(&denom)?)
        } else {
            // chord: (y₂ - y₁) / (x₂ - x₁)
            f.mul(&f.sub(y2, y1), &f.inv(&f.sub(x2, x1))?)
        };

        let x3 = f.sub(&f.sub(&f.mul(&slope, &slope), x1), x2);
        let y3 = f.sub(&f.mul(&slope, &f.sub(x1, &x3)), y1);
        Ok(Point::Affine { x: x3, y: y3 })
    }

    /// Point doubling: add(P, P)
    pub fn double(&self, point: &Point) -> Result<Point> {
        self.add(point, point)
    }

    /// Scalar multiplication k·P by least-significant-bit-first
    /// double-and-add.
    ///
    /// Returns the identity when P = ∞ or k ≡ 0 (mod n). Not constant
    /// time: the bit pattern of k drives the branch sequence.
    pub fn scalar_mult(&self, k: &FieldElement, point: &Point) -> Result<Point> {
        let k = self.order.reduce(k);
        if point.is_identity() || k.is_zero() {
            return Ok(Point::Identity);
        }

        let mut result = Point::Identity;
        let mut addend = point.clone();
        for i in 0..k.bit_len() {
            if k.bit(i) {
                result = self.add(&result, &addend)?;
            }
            addend = self.add(&addend, &addend)?;
        }
        Ok(result)
    }

    /// Validate and build an affine point from raw big-endian coordinates.
    ///
    /// Rejects coordinates outside `[0, p)` and pairs that fail the curve
    /// equation.
    pub fn point_from_bytes(
        &self,
        x_bytes: &[u8; FIELD_ELEMENT_SIZE],
        y_bytes: &[u8; FIELD_ELEMENT_SIZE],
    ) -> Result<Point> {
        let x = FieldElement::from_bytes(x_bytes);
        let y = FieldElement::from_bytes(y_bytes);
        if !self.field.contains(&x) || !self.field.contains(&y) {
            return Err(Error::param("Point", "coordinate out of field range"));
        }
        let point = Point::Affine { x, y };
        if !self.is_on_curve(&point) {
            return Err(Error::PointNotOnCurve {
                context: "supplied point fails the curve equation",
            });
        }
        Ok(point)
    }

    /// Draw a uniform scalar in [1, n-1] by rejection sampling.
    pub fn generate_scalar<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<FieldElement> {
        let mut bytes = [0u8; FIELD_ELEMENT_SIZE];
        for _ in 0..MAX_SCALAR_ATTEMPTS {
            rng.fill_bytes(&mut bytes);
            let candidate = FieldElement::from_bytes(&bytes);
            if !candidate.is_zero() && self.order.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(Error::Processing {
            operation: "scalar generation",
            details: "rejection sampling cap exceeded",
        })
    }

    /// Generate a keypair: a uniform secret scalar d in [1, n-1] and the
    /// public point Q = d·G.
    pub fn generate_keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(FieldElement, Point)> {
        let d = self.generate_scalar(rng)?;
        let q = self.scalar_mult(&d, &self.g)?;
        Ok((d, q))
    }
}
