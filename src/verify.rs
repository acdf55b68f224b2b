//! Batch verification, the dual of [`crate::aggregate::aggregate`].
//!
//! For shares `s_i = H(m_i) * sk_i` and keys `pk_i = g2 * sk_i`, the aggregate
//! `S = sum(s_i)` is valid iff
//!
//! ```text
//! e(H(m_1), pk_1) * ... * e(H(m_k), pk_k) * e(S, -g2) == 1
//! ```
//!
//! which is evaluated as a single multi-pairing of `k + 1` pairs. Pairs are
//! matched index for index, but the order of the list itself is irrelevant.

use solana_bn254::prelude::alt_bn128_pairing;
use tracing::debug;

use crate::aggregate::AggregateSignature;
use crate::bundle::Bundle;
use crate::config::{DomainTag, SchemeConfig};
use crate::consts::{G2_MINUS_ONE, PAIRING_ELEMENT_LEN, PAIRING_ONE};
use crate::errors::BLSError;
use crate::g1::G1Point;
use crate::g2::G2Point;
use crate::hash::hash_to_curve;
use crate::operation::{Address, Word};

/// Resolves the BLS key registered for a wallet, as the entry point does by
/// asking the account contract.
pub trait PublicKeyProvider {
    fn public_key(&self, sender: &Address) -> Result<G2Point, BLSError>;
}

/// Runs the pairing precompile over `input`. Inputs the backend rejects count
/// as a failed check.
pub(crate) fn pairing_check(input: &[u8]) -> bool {
    match alt_bn128_pairing(input) {
        Ok(r) => r[..] == PAIRING_ONE[..],
        Err(_) => false,
    }
}

/// Checks `aggregate` against the `(public key, message)` pairs it was built
/// from.
///
/// Returns `Ok(false)` for every cryptographic failure without saying which
/// pair was at fault, including a pair whose key is the identity point. An
/// empty list, or one whose length differs from the aggregate's share count,
/// is a caller error.
pub fn verify<M: AsRef<[u8]>>(
    aggregate: &AggregateSignature,
    pairs: &[(G2Point, M)],
    domain: &DomainTag,
) -> Result<bool, BLSError> {
    let k = pairs.len();
    if k == 0 || k != aggregate.count() {
        return Err(BLSError::InvalidBatch {
            expected: aggregate.count(),
            actual: k,
        });
    }

    // e(H(m), 0) == 1 for every m, so an identity key would vouch for anything.
    if let Some(index) = pairs.iter().position(|(pk, _)| pk.is_identity()) {
        debug!(pairs = k, index, "identity public key in batch");
        return Ok(false);
    }

    let mut input = vec![0u8; PAIRING_ELEMENT_LEN * (k + 1)];

    // Pairs (H(m_i), PK_i)
    for (i, (pk, message)) in pairs.iter().enumerate() {
        let off = PAIRING_ELEMENT_LEN * i;
        input[off..off + 64].copy_from_slice(&hash_to_curve(message, domain)?.0);
        input[off + 64..off + 192].copy_from_slice(&pk.0);
    }

    // Final pair: (S, negative generator)
    let off = PAIRING_ELEMENT_LEN * k;
    input[off..off + 64].copy_from_slice(&aggregate.point().0);
    input[off + 64..off + 192].copy_from_slice(&G2_MINUS_ONE);

    let ok = pairing_check(&input);
    debug!(pairs = k, ok, "batch verification");
    Ok(ok)
}

/// [`verify`], with a failed check reported as [`BLSError::VerificationFailed`].
pub fn require_valid<M: AsRef<[u8]>>(
    aggregate: &AggregateSignature,
    pairs: &[(G2Point, M)],
    domain: &DomainTag,
) -> Result<(), BLSError> {
    if verify(aggregate, pairs, domain)? {
        Ok(())
    } else {
        Err(BLSError::VerificationFailed)
    }
}

/// Entry-point side check of a whole bundle: recompute every request id
/// against the bundle's aggregator, look up each sender's key, then verify
/// the aggregate once.
pub fn verify_bundle(
    bundle: &Bundle,
    config: &SchemeConfig,
    keys: &impl PublicKeyProvider,
) -> Result<bool, BLSError> {
    let pairs = bundle
        .operations()
        .iter()
        .map(|op| -> Result<(G2Point, Word), BLSError> {
            Ok((keys.public_key(&op.sender)?, op.request_id(bundle.context())?))
        })
        .collect::<Result<Vec<_>, BLSError>>()?;

    verify(bundle.signature(), &pairs, config.domain())
}

pub fn verify_bundle_strict(
    bundle: &Bundle,
    config: &SchemeConfig,
    keys: &impl PublicKeyProvider,
) -> Result<(), BLSError> {
    if verify_bundle(bundle, config, keys)? {
        Ok(())
    } else {
        Err(BLSError::VerificationFailed)
    }
}

/// Verifies each share on its own, one verdict per entry.
///
/// This costs a pairing per signer and is meant for isolating a bad share
/// after a batch was rejected.
pub fn verify_individually<M: AsRef<[u8]>>(
    entries: &[(G2Point, M, G1Point)],
    domain: &DomainTag,
) -> Result<Vec<bool>, BLSError> {
    entries
        .iter()
        .map(|(pk, message, signature)| match pk.verify(signature, message, domain) {
            Ok(()) => Ok(true),
            Err(BLSError::VerificationFailed) => Ok(false),
            Err(e) => Err(e),
        })
        .collect()
}
