use dashu::integer::UBig;
use solana_bn254::compression::prelude::alt_bn128_g1_decompress;
use tracing::warn;

use crate::config::DomainTag;
use crate::consts::{HASH_TO_CURVE_ATTEMPTS, MODULUS, NORMALIZE_MODULUS};
use crate::errors::BLSError;
use crate::g1::G1Point;

/// Maps `message` onto G1 under `domain` by try-and-increment over
/// `sha256(domain || message || [n])`.
///
/// Alt-BN128 G1 has cofactor one, so any decompressed point already lies in the
/// prime-order subgroup.
pub fn hash_to_curve<T: AsRef<[u8]>>(message: T, domain: &DomainTag) -> Result<G1Point, BLSError> {
    let modulus = UBig::from_be_bytes(&MODULUS);

    (0..HASH_TO_CURVE_ATTEMPTS)
        .find_map(|n: u8| {
            let hash =
                solana_nostd_sha256::hashv(&[&domain.as_bytes()[..], message.as_ref(), &[n]]);

            // Big-endian byte order matches numeric order.
            if hash >= NORMALIZE_MODULUS {
                return None;
            }

            let x = UBig::from_be_bytes(&hash) % &modulus;

            alt_bn128_g1_decompress(&pad32(&x.to_be_bytes()))
                .ok()
                .map(G1Point)
        })
        .ok_or_else(|| {
            warn!(domain = ?domain, "hash to curve exhausted every attempt");
            BLSError::HashToCurveError
        })
}

#[inline]
fn pad32(x: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let ofs = 32 - x.len();
    out[ofs..].copy_from_slice(x);
    out
}

#[cfg(test)]
mod tests {
    use super::{hash_to_curve, pad32};
    use crate::config::DomainTag;
    use crate::consts::G1_IDENTITY;

    #[test]
    fn deterministic() {
        let domain = DomainTag::default();
        let a = hash_to_curve(b"transfer", &domain).unwrap();
        let b = hash_to_curve(b"transfer", &domain).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_messages_map_to_distinct_points() {
        let domain = DomainTag::default();
        let a = hash_to_curve(b"transfer(1)", &domain).unwrap();
        let b = hash_to_curve(b"transfer(2)", &domain).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn domain_separates_outputs() {
        let a = hash_to_curve(b"same", &DomainTag::from_label("domain-a")).unwrap();
        let b = hash_to_curve(b"same", &DomainTag::from_label("domain-b")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn total_over_empty_and_long_inputs() {
        let domain = DomainTag::default();
        let empty = hash_to_curve(b"", &domain).unwrap();
        let long = hash_to_curve(vec![0xabu8; 4096], &domain).unwrap();
        assert_ne!(empty.0, G1_IDENTITY);
        assert_ne!(long.0, G1_IDENTITY);
    }

    #[test]
    fn pad32_left_pads() {
        let out = pad32(&[0x01, 0x02]);
        assert_eq!(out[..30], [0u8; 30]);
        assert_eq!(out[30..], [0x01, 0x02]);
    }
}
