//! Affine points on a short Weierstrass curve

use crate::ec::field::FieldElement;
use crate::ec::{FIELD_ELEMENT_SIZE, POINT_COORDINATES_SIZE};

/// A point on the curve: the distinguished point at infinity (the group
/// identity) or an affine coordinate pair with 0 ≤ x, y < p.
///
/// Infinity is an explicit variant rather than an absent value, so the
/// group law can match on it directly and "identity" can never be confused
/// with "missing".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity
    Identity,
    /// An affine coordinate pair
    Affine {
        /// x-coordinate
        x: FieldElement,
        /// y-coordinate
        y: FieldElement,
    },
}

impl Point {
    /// The identity (point at infinity)
    pub fn identity() -> Self {
        Point::Identity
    }

    /// Is this the identity point?
    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    /// Borrow the affine coordinates; `None` for the identity
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        match self {
            Point::Identity => None,
            Point::Affine { x, y } => Some((x, y)),
        }
    }

    /// x-coordinate as big-endian bytes; `None` for the identity
    pub fn x_coordinate_bytes(&self) -> Option<[u8; FIELD_ELEMENT_SIZE]> {
        self.coordinates().map(|(x, _)| x.to_bytes())
    }

    /// y-coordinate as big-endian bytes; `None` for the identity
    pub fn y_coordinate_bytes(&self) -> Option<[u8; FIELD_ELEMENT_SIZE]> {
        self.coordinates().map(|(_, y)| y.to_bytes())
    }

    /// Serialize as raw x ‖ y, 32 big-endian bytes each; `None` for the
    /// identity, which has no affine encoding
    pub fn serialize_coordinates(&self) -> Option<[u8; POINT_COORDINATES_SIZE]> {
        self.coordinates().map(|(x, y)| {
            let mut out = [0u8; POINT_COORDINATES_SIZE];
            out[..FIELD_ELEMENT_SIZE].copy_from_slice(&x.to_bytes());
            out[FIELD_ELEMENT_SIZE..].copy_from_slice(&y.to_bytes());
            out
        })
    }
}
