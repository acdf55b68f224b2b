use core::fmt;

use crate::consts::DEFAULT_DOMAIN_LABEL;
use crate::operation::Address;

/// Fixed 32-byte tag that scopes every hash-to-curve call to one scheme instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainTag([u8; 32]);

impl DomainTag {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives the tag as `keccak256(label)`, the form EVM verifiers store.
    pub fn from_label<T: AsRef<[u8]>>(label: T) -> Self {
        Self(keccak_hash::keccak(label.as_ref()).0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Default for DomainTag {
    fn default() -> Self {
        Self::from_label(DEFAULT_DOMAIN_LABEL)
    }
}

impl fmt::Debug for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainTag(0x")?;
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}

/// Scheme-wide settings. Build once before signing or verifying and share by
/// reference; there are no setters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemeConfig {
    domain: DomainTag,
}

impl SchemeConfig {
    pub const fn new(domain: DomainTag) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &DomainTag {
        &self.domain
    }
}

/// One deployed aggregator: request ids commit to both fields, so signatures
/// made for one deployment never verify under another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AggregatorContext {
    pub address: Address,
    pub chain_id: u64,
}

impl AggregatorContext {
    pub const fn new(address: Address, chain_id: u64) -> Self {
        Self { address, chain_id }
    }
}
