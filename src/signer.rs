use crate::bundle::SignedOperation;
use crate::config::{AggregatorContext, DomainTag, SchemeConfig};
use crate::errors::BLSError;
use crate::g1::G1Point;
use crate::g2::G2Point;
use crate::operation::UserOperation;
use crate::privkey::PrivKey;

/// Signing capability for one wallet key. Owns its [`PrivKey`] for life and
/// only ever hands out signatures and the cached public key.
#[derive(Debug)]
pub struct Signer {
    key: PrivKey,
    public_key: G2Point,
    domain: DomainTag,
}

impl Signer {
    pub fn new(key: PrivKey, config: &SchemeConfig) -> Result<Self, BLSError> {
        let public_key = G2Point::try_from(&key)?;
        Ok(Self {
            key,
            public_key,
            domain: *config.domain(),
        })
    }

    pub fn random(config: &SchemeConfig) -> Result<Self, BLSError> {
        Self::new(PrivKey::from_random(), config)
    }

    pub fn public_key(&self) -> &G2Point {
        &self.public_key
    }

    pub fn domain(&self) -> &DomainTag {
        &self.domain
    }

    pub fn sign<T: AsRef<[u8]>>(&self, message: T) -> Result<G1Point, BLSError> {
        self.key.sign(message, &self.domain)
    }

    /// Signs the operation's request id for `aggregator` and returns the
    /// record the bundle builder consumes.
    pub fn sign_operation(
        &self,
        operation: UserOperation,
        aggregator: &AggregatorContext,
    ) -> Result<SignedOperation, BLSError> {
        let signature = self.sign(operation.request_id(aggregator)?)?;
        Ok(SignedOperation {
            operation,
            aggregator: *aggregator,
            public_key: self.public_key,
            signature,
        })
    }
}
