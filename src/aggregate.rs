use crate::errors::BLSError;
use crate::g1::{G1CompressedPoint, G1Point};

/// Sum of a batch of signature shares together with how many shares went in.
/// The count is what lets the verifier refuse pair lists of the wrong size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AggregateSignature {
    point: G1Point,
    count: usize,
}

impl AggregateSignature {
    pub fn point(&self) -> &G1Point {
        &self.point
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// 64-byte `x || y` encoding carried in `UserOpsPerAggregator.signature`.
    pub fn to_bytes(&self) -> [u8; 64] {
        self.point.0
    }

    pub fn compress(&self) -> Result<G1CompressedPoint, BLSError> {
        G1CompressedPoint::try_from(&self.point)
    }

    /// Rebuilds an aggregate received over the wire. `count` must be the
    /// number of operations it claims to cover.
    pub fn from_parts(point: G1Point, count: usize) -> Self {
        Self { point, count }
    }
}

/// Sums signature shares in G1, starting from the identity.
///
/// Addition is commutative, so any permutation of `signatures` yields the same
/// bytes. Duplicates are summed like any other share.
pub fn aggregate(signatures: &[G1Point]) -> Result<AggregateSignature, BLSError> {
    if signatures.is_empty() {
        return Err(BLSError::EmptyBatch);
    }

    let point = signatures
        .iter()
        .try_fold(G1Point::identity(), |acc, s| acc.try_add(s))?;

    Ok(AggregateSignature {
        point,
        count: signatures.len(),
    })
}
