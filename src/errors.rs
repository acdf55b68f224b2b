use thiserror::Error;

use crate::config::AggregatorContext;
use crate::operation::Address;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BLSError {
    #[error("invalid secret key")]
    SecretKeyError,
    #[error("alt_bn128 addition failed")]
    AltBN128AddError,
    #[error("alt_bn128 multiplication failed")]
    AltBN128MulError,
    #[error("alt_bn128 pairing failed")]
    AltBN128PairingError,
    /// Every try-and-increment attempt missed the curve. Only reachable with a
    /// broken domain or curve setup, so callers must not retry.
    #[error("hash to curve exhausted its attempts")]
    HashToCurveError,
    #[error("serialization error")]
    SerializationError,
    #[error("G1 point compression failed")]
    G1PointCompressionError,
    #[error("G1 point decompression failed")]
    G1PointDecompressionError,
    #[error("G2 point compression failed")]
    G2PointCompressionError,
    #[error("G2 point decompression failed")]
    G2PointDecompressionError,
    #[error("invalid point length: expected {expected} bytes, got {actual}")]
    InvalidPointLength { expected: usize, actual: usize },

    /// Aggregation or bundling called without any element.
    #[error("empty batch")]
    EmptyBatch,
    /// Signed operations do not share one aggregator.
    #[error("operation {index} targets aggregator {found:?}, expected {expected:?}")]
    AggregatorMismatch {
        index: usize,
        expected: AggregatorContext,
        found: AggregatorContext,
    },
    /// Verification pairs do not line up with what the aggregate was built over.
    #[error("invalid batch: aggregate covers {expected} signatures, got {actual} pairs")]
    InvalidBatch { expected: usize, actual: usize },
    #[error("BLS signature verification failed")]
    VerificationFailed,

    #[error("no public key registered for sender {0}")]
    UnknownSender(Address),
    #[error("value does not fit in a 256-bit word")]
    WordOverflow,
}
