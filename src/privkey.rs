use core::fmt;

#[cfg(not(target_os = "solana"))]
use rand::RngCore;
use zeroize::Zeroize;

use crate::config::DomainTag;
use crate::consts::SCALAR_MODULUS;
use crate::errors::BLSError;
use crate::g1::G1Point;
use crate::hash::hash_to_curve;

/// Secret scalar in `[1, r)`, 32 bytes big-endian. The bytes never leave the
/// value and are wiped on drop.
pub struct PrivKey([u8; 32]);

impl PrivKey {
    #[cfg(not(target_os = "solana"))]
    pub fn from_random() -> PrivKey {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            if is_canonical_scalar(&bytes) {
                return Self(bytes);
            }
            bytes.zeroize();
        }
    }

    /// Signature share `H(message) * sk` in G1.
    pub fn sign<T: AsRef<[u8]>>(&self, message: T, domain: &DomainTag) -> Result<G1Point, BLSError> {
        hash_to_curve(message, domain)?.mul_scalar(&self.0)
    }

    pub(crate) fn scalar_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl TryFrom<[u8; 32]> for PrivKey {
    type Error = BLSError;

    fn try_from(mut value: [u8; 32]) -> Result<Self, Self::Error> {
        if is_canonical_scalar(&value) {
            Ok(Self(value))
        } else {
            value.zeroize();
            Err(BLSError::SecretKeyError)
        }
    }
}

impl Drop for PrivKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivKey(<redacted>)")
    }
}

fn is_canonical_scalar(bytes: &[u8; 32]) -> bool {
    *bytes != [0u8; 32] && *bytes < SCALAR_MODULUS
}
