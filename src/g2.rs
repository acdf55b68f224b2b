#[cfg(not(target_os = "solana"))]
use ark_bn254::Fr;
#[cfg(not(target_os = "solana"))]
use ark_ec::AffineRepr;
#[cfg(not(target_os = "solana"))]
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use solana_bn254::compression::prelude::{alt_bn128_g2_compress, alt_bn128_g2_decompress};

use crate::config::DomainTag;
use crate::consts::{G2_IDENTITY, G2_MINUS_ONE, G2_POINT_LEN};
use crate::errors::BLSError;
use crate::g1::G1Point;
use crate::hash::hash_to_curve;
use crate::verify::pairing_check;

/// Uncompressed G2 point, `x.c1 | x.c0 | y.c1 | y.c0` big-endian. Public keys
/// live here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct G2Point(pub [u8; 128]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct G2CompressedPoint(pub [u8; 64]);

impl G2Point {
    pub fn is_identity(&self) -> bool {
        self.0 == G2_IDENTITY
    }

    /// Checks a single signature: `e(H(m), pk) * e(sig, -g2) == 1`.
    ///
    /// This is the per-signer fallback; batches go through
    /// [`crate::verify::verify`].
    pub fn verify<T: AsRef<[u8]>>(
        &self,
        signature: &G1Point,
        message: T,
        domain: &DomainTag,
    ) -> Result<(), BLSError> {
        // A share from a key in [1, r) over a hashed point is never the identity.
        if self.is_identity() || signature.is_identity() {
            return Err(BLSError::VerificationFailed);
        }

        let mut input = [0u8; 384];

        // Hash message to curve
        input[..64].clone_from_slice(&hash_to_curve(message, domain)?.0);
        // Public key (uncompressed)
        input[64..192].clone_from_slice(&self.0);
        // Signature (uncompressed)
        input[192..256].clone_from_slice(&signature.0);
        // Pair with negative generator in G2
        input[256..].clone_from_slice(&G2_MINUS_ONE);

        if pairing_check(&input) {
            Ok(())
        } else {
            Err(BLSError::VerificationFailed)
        }
    }
}

impl G2CompressedPoint {
    pub fn verify<T: AsRef<[u8]>>(
        &self,
        signature: &G1Point,
        message: T,
        domain: &DomainTag,
    ) -> Result<(), BLSError> {
        G2Point::try_from(self)?.verify(signature, message, domain)
    }
}

#[cfg(not(target_os = "solana"))]
impl TryFrom<&crate::privkey::PrivKey> for G2CompressedPoint {
    type Error = BLSError;

    fn try_from(value: &crate::privkey::PrivKey) -> Result<G2CompressedPoint, Self::Error> {
        let mut sk = *value.scalar_bytes();

        sk.reverse();

        let secret_key =
            Fr::deserialize_compressed(&sk[..]).map_err(|_| BLSError::SecretKeyError);

        zeroize::Zeroize::zeroize(&mut sk);

        let g2_public_key = ark_bn254::G2Affine::generator() * secret_key?;

        let mut g2_public_key_bytes = [0u8; 64];

        g2_public_key
            .serialize_compressed(&mut &mut g2_public_key_bytes[..])
            .map_err(|_| BLSError::G2PointCompressionError)?;

        g2_public_key_bytes.reverse();

        Ok(Self(g2_public_key_bytes))
    }
}

#[cfg(not(target_os = "solana"))]
impl TryFrom<&crate::privkey::PrivKey> for G2Point {
    type Error = BLSError;

    fn try_from(value: &crate::privkey::PrivKey) -> Result<G2Point, Self::Error> {
        G2Point::try_from(&G2CompressedPoint::try_from(value)?)
    }
}

impl TryFrom<&[u8]> for G2Point {
    type Error = BLSError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(G2Point(value.try_into().map_err(|_| {
            BLSError::InvalidPointLength {
                expected: G2_POINT_LEN,
                actual: value.len(),
            }
        })?))
    }
}

impl TryFrom<&G2Point> for G2CompressedPoint {
    type Error = BLSError;

    fn try_from(value: &G2Point) -> Result<Self, Self::Error> {
        Ok(G2CompressedPoint(
            alt_bn128_g2_compress(&value.0).map_err(|_| BLSError::G2PointCompressionError)?,
        ))
    }
}

impl TryFrom<&G2CompressedPoint> for G2Point {
    type Error = BLSError;

    fn try_from(value: &G2CompressedPoint) -> Result<Self, Self::Error> {
        Ok(G2Point(
            alt_bn128_g2_decompress(&value.0).map_err(|_| BLSError::G2PointDecompressionError)?,
        ))
    }
}
