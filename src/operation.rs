//! EIP-4337 user operations and the request id each wallet key signs.
//!
//! Encoding follows `abi.encode`: every value occupies one 32-byte big-endian
//! word and dynamic byte fields are replaced by their keccak-256 digest, so an
//! EVM-side aggregator recomputes the exact same bytes.

use core::fmt;

use num::BigUint;

use crate::config::AggregatorContext;
use crate::errors::BLSError;

pub type Word = [u8; 32];

/// 20-byte EVM account address.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub fn to_word(&self) -> Word {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&self.0);
        word
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl From<[u8; 20]> for Address {
    fn from(value: [u8; 20]) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserOperation {
    pub sender: Address,
    pub nonce: BigUint,
    pub init_code: Vec<u8>,
    pub call_data: Vec<u8>,
    pub call_gas_limit: BigUint,
    pub verification_gas_limit: BigUint,
    pub pre_verification_gas: BigUint,
    pub max_fee_per_gas: BigUint,
    pub max_priority_fee_per_gas: BigUint,
    pub paymaster_and_data: Vec<u8>,
    /// Per-operation signature slot. Left empty for aggregated operations and
    /// never part of the request id.
    pub signature: Vec<u8>,
}

impl UserOperation {
    /// Operation for `sender` with every other field zero or empty.
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            ..Default::default()
        }
    }

    pub fn with_nonce(mut self, nonce: impl Into<BigUint>) -> Self {
        self.nonce = nonce.into();
        self
    }

    pub fn with_init_code(mut self, init_code: impl Into<Vec<u8>>) -> Self {
        self.init_code = init_code.into();
        self
    }

    pub fn with_call_data(mut self, call_data: impl Into<Vec<u8>>) -> Self {
        self.call_data = call_data.into();
        self
    }

    pub fn with_gas(
        mut self,
        call_gas_limit: impl Into<BigUint>,
        verification_gas_limit: impl Into<BigUint>,
        pre_verification_gas: impl Into<BigUint>,
    ) -> Self {
        self.call_gas_limit = call_gas_limit.into();
        self.verification_gas_limit = verification_gas_limit.into();
        self.pre_verification_gas = pre_verification_gas.into();
        self
    }

    pub fn with_fees(
        mut self,
        max_fee_per_gas: impl Into<BigUint>,
        max_priority_fee_per_gas: impl Into<BigUint>,
    ) -> Self {
        self.max_fee_per_gas = max_fee_per_gas.into();
        self.max_priority_fee_per_gas = max_priority_fee_per_gas.into();
        self
    }

    pub fn with_paymaster_and_data(mut self, paymaster_and_data: impl Into<Vec<u8>>) -> Self {
        self.paymaster_and_data = paymaster_and_data.into();
        self
    }

    /// `keccak256(abi.encode(...))` over every field except `signature`.
    pub fn hash(&self) -> Result<Word, BLSError> {
        let words = [
            self.sender.to_word(),
            uint_word(&self.nonce)?,
            keccak(&self.init_code),
            keccak(&self.call_data),
            uint_word(&self.call_gas_limit)?,
            uint_word(&self.verification_gas_limit)?,
            uint_word(&self.pre_verification_gas)?,
            uint_word(&self.max_fee_per_gas)?,
            uint_word(&self.max_priority_fee_per_gas)?,
            keccak(&self.paymaster_and_data),
        ];
        Ok(keccak(words.concat()))
    }

    /// The message a wallet signs: `keccak256(abi.encode(hash, aggregator, chainId))`.
    pub fn request_id(&self, context: &AggregatorContext) -> Result<Word, BLSError> {
        let words = [
            self.hash()?,
            context.address.to_word(),
            u64_word(context.chain_id),
        ];
        Ok(keccak(words.concat()))
    }
}

fn keccak<T: AsRef<[u8]>>(data: T) -> Word {
    keccak_hash::keccak(data.as_ref()).0
}

fn uint_word(value: &BigUint) -> Result<Word, BLSError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(BLSError::WordOverflow);
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

fn u64_word(value: u64) -> Word {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

#[cfg(test)]
mod tests {
    use num::{BigUint, One};

    use super::{uint_word, Address, UserOperation};
    use crate::config::AggregatorContext;
    use crate::errors::BLSError;

    fn context() -> AggregatorContext {
        AggregatorContext::new(Address([0xaa; 20]), 534352)
    }

    fn op() -> UserOperation {
        UserOperation::new(Address([0x11; 20]))
            .with_nonce(7u64)
            .with_call_data(vec![0xa9, 0x05, 0x9c, 0xbb])
            .with_gas(100_000u64, 150_000u64, 21_000u64)
            .with_fees(2_000_000_000u64, 1_000_000_000u64)
    }

    #[test]
    fn request_id_ignores_builder_order() {
        let reordered = UserOperation::new(Address([0x11; 20]))
            .with_fees(2_000_000_000u64, 1_000_000_000u64)
            .with_gas(100_000u64, 150_000u64, 21_000u64)
            .with_call_data(vec![0xa9, 0x05, 0x9c, 0xbb])
            .with_nonce(7u64);
        assert_eq!(op().request_id(&context()), reordered.request_id(&context()));
    }

    #[test]
    fn request_id_ignores_signature_field() {
        let mut signed = op();
        signed.signature = vec![1, 2, 3];
        assert_eq!(op().request_id(&context()), signed.request_id(&context()));
    }

    #[test]
    fn request_id_commits_to_every_field() {
        let base = op().request_id(&context()).unwrap();

        let variants = [
            op().with_nonce(8u64),
            op().with_call_data(vec![0xa9, 0x05, 0x9c, 0xbc]),
            op().with_init_code(vec![0x01]),
            op().with_paymaster_and_data(vec![0x02]),
            op().with_gas(100_001u64, 150_000u64, 21_000u64),
            op().with_fees(2_000_000_000u64, 1_000_000_001u64),
            UserOperation { sender: Address([0x12; 20]), ..op() },
        ];
        for variant in variants {
            assert_ne!(variant.request_id(&context()).unwrap(), base);
        }
    }

    #[test]
    fn request_id_commits_to_aggregator_and_chain() {
        let base = op().request_id(&context()).unwrap();
        let other_chain = AggregatorContext::new(Address([0xaa; 20]), 1);
        let other_aggregator = AggregatorContext::new(Address([0xab; 20]), 534352);
        assert_ne!(op().request_id(&other_chain).unwrap(), base);
        assert_ne!(op().request_id(&other_aggregator).unwrap(), base);
    }

    #[test]
    fn uint_word_bounds() {
        let max = (BigUint::one() << 256u32) - BigUint::one();
        assert_eq!(uint_word(&max).unwrap(), [0xff; 32]);
        assert_eq!(
            uint_word(&(BigUint::one() << 256u32)).unwrap_err(),
            BLSError::WordOverflow
        );
        let mut expected = [0u8; 32];
        expected[31] = 5;
        assert_eq!(uint_word(&BigUint::from(5u8)).unwrap(), expected);
    }

    #[test]
    fn oversized_nonce_is_rejected() {
        let op = op().with_nonce(BigUint::one() << 300u32);
        assert_eq!(op.request_id(&context()).unwrap_err(), BLSError::WordOverflow);
    }

    #[test]
    fn address_formats_as_hex() {
        let mut bytes = [0u8; 20];
        bytes[19] = 0xab;
        assert_eq!(
            Address(bytes).to_string(),
            "0x00000000000000000000000000000000000000ab"
        );
        assert_eq!(Address(bytes).to_word()[31], 0xab);
    }
}
