#![allow(unexpected_cfgs)]

pub mod aggregate;
pub mod bundle;
pub mod config;
pub mod consts;
pub mod errors;
pub mod g1;
pub mod g2;
pub mod hash;
pub mod operation;
pub mod privkey;
#[cfg(not(target_os = "solana"))]
pub mod signer;
pub mod verify;

pub use crate::aggregate::{aggregate, AggregateSignature};
pub use crate::bundle::{build_bundle, Bundle, SignedOperation};
pub use crate::config::{AggregatorContext, DomainTag, SchemeConfig};
pub use crate::errors::BLSError;
pub use crate::g1::{G1CompressedPoint, G1Point};
pub use crate::g2::{G2CompressedPoint, G2Point};
pub use crate::hash::hash_to_curve;
pub use crate::operation::{Address, UserOperation};
pub use crate::privkey::PrivKey;
#[cfg(not(target_os = "solana"))]
pub use crate::signer::Signer;
pub use crate::verify::{
    require_valid, verify, verify_bundle, verify_bundle_strict, verify_individually,
    PublicKeyProvider,
};

#[cfg(all(test, not(target_os = "solana")))]
mod tests;
