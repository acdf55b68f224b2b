use tracing::{debug, warn};

use crate::aggregate::{aggregate, AggregateSignature};
use crate::config::AggregatorContext;
use crate::errors::BLSError;
use crate::g1::G1Point;
use crate::g2::G2Point;
use crate::operation::{Address, UserOperation};

/// One operation with the key that signed it and its signature share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedOperation {
    pub operation: UserOperation,
    pub aggregator: AggregatorContext,
    pub public_key: G2Point,
    pub signature: G1Point,
}

/// `UserOpsPerAggregator`: operations that settle under one aggregate
/// signature. Fields are fixed once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    operations: Vec<UserOperation>,
    aggregator: AggregatorContext,
    signature: AggregateSignature,
}

impl Bundle {
    pub fn operations(&self) -> &[UserOperation] {
        &self.operations
    }

    pub fn aggregator(&self) -> &Address {
        &self.aggregator.address
    }

    pub fn context(&self) -> &AggregatorContext {
        &self.aggregator
    }

    pub fn signature(&self) -> &AggregateSignature {
        &self.signature
    }

    pub fn signature_bytes(&self) -> [u8; 64] {
        self.signature.to_bytes()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Packs signed operations into a [`Bundle`], keeping their order and
/// replacing the individual shares with their aggregate.
pub fn build_bundle(records: Vec<SignedOperation>) -> Result<Bundle, BLSError> {
    let Some(first) = records.first() else {
        return Err(BLSError::EmptyBatch);
    };
    let aggregator = first.aggregator;

    if let Some((index, found)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| r.aggregator != aggregator)
    {
        warn!(index, expected = ?aggregator, found = ?found.aggregator, "aggregator mismatch in batch");
        return Err(BLSError::AggregatorMismatch {
            index,
            expected: aggregator,
            found: found.aggregator,
        });
    }

    let signatures: Vec<G1Point> = records.iter().map(|r| r.signature).collect();
    let signature = aggregate(&signatures)?;
    let operations: Vec<UserOperation> = records.into_iter().map(|r| r.operation).collect();

    debug!(
        operations = operations.len(),
        aggregator = %aggregator.address,
        "assembled bundle"
    );

    Ok(Bundle {
        operations,
        aggregator,
        signature,
    })
}
