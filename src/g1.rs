use core::ops::Add;
use num::CheckedAdd;
use solana_bn254::{
    compression::prelude::{alt_bn128_g1_compress, alt_bn128_g1_decompress},
    prelude::{alt_bn128_addition, alt_bn128_multiplication},
};

use crate::consts::{G1_IDENTITY, G1_POINT_LEN};
use crate::errors::BLSError;

/// Uncompressed G1 point, `x || y` big-endian as the EVM precompiles expect.
/// Signatures and hashed messages live here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct G1Point(pub [u8; 64]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct G1CompressedPoint(pub [u8; 32]);

impl G1Point {
    pub const fn identity() -> Self {
        Self(G1_IDENTITY)
    }

    pub fn is_identity(&self) -> bool {
        self.0 == G1_IDENTITY
    }

    /// `self * scalar`, with `scalar` as 32 big-endian bytes.
    pub fn mul_scalar(&self, scalar: &[u8; 32]) -> Result<G1Point, BLSError> {
        let mut input = [0u8; 96];
        input[..64].copy_from_slice(&self.0);
        input[64..].copy_from_slice(scalar);

        let out = alt_bn128_multiplication(&input).map_err(|_| BLSError::AltBN128MulError)?;
        Ok(G1Point(
            out.try_into().map_err(|_| BLSError::AltBN128MulError)?,
        ))
    }

    pub fn try_add(&self, rhs: &Self) -> Result<G1Point, BLSError> {
        let mut input = [0u8; 128];
        input[..64].copy_from_slice(&self.0);
        input[64..].copy_from_slice(&rhs.0);

        let out = alt_bn128_addition(&input).map_err(|_| BLSError::AltBN128AddError)?;
        Ok(G1Point(
            out.try_into().map_err(|_| BLSError::AltBN128AddError)?,
        ))
    }
}

impl Add for G1Point {
    type Output = G1Point;

    /// # Panics
    ///
    /// Panics if the backend rejects either operand. Only the tests add points
    /// this way; library paths go through [`G1Point::try_add`].
    fn add(self, rhs: Self) -> G1Point {
        self.checked_add(&rhs).expect("G1Point addition failed")
    }
}

impl CheckedAdd for G1Point {
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.try_add(rhs).ok()
    }
}

impl TryFrom<&[u8]> for G1Point {
    type Error = BLSError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(G1Point(value.try_into().map_err(|_| {
            BLSError::InvalidPointLength {
                expected: G1_POINT_LEN,
                actual: value.len(),
            }
        })?))
    }
}

impl TryFrom<&G1Point> for G1CompressedPoint {
    type Error = BLSError;

    fn try_from(value: &G1Point) -> Result<Self, Self::Error> {
        Ok(G1CompressedPoint(
            alt_bn128_g1_compress(&value.0).map_err(|_| BLSError::G1PointCompressionError)?,
        ))
    }
}

impl TryFrom<G1Point> for G1CompressedPoint {
    type Error = BLSError;

    fn try_from(value: G1Point) -> Result<Self, Self::Error> {
        G1CompressedPoint::try_from(&value)
    }
}

impl TryFrom<&G1CompressedPoint> for G1Point {
    type Error = BLSError;

    fn try_from(value: &G1CompressedPoint) -> Result<Self, Self::Error> {
        Ok(G1Point(
            alt_bn128_g1_decompress(&value.0).map_err(|_| BLSError::G1PointDecompressionError)?,
        ))
    }
}
