use std::thread;

use crate::{
    aggregate, build_bundle, verify, AggregatorContext, Address, BLSError, DomainTag, G1Point,
    G2Point, PrivKey, SchemeConfig, Signer, UserOperation,
};

const TRANSFER: &[u8] = b"transfer(1,recipient=0xAB..)";

fn fixed_signer(first_byte: u8, config: &SchemeConfig) -> Signer {
    let key = PrivKey::try_from([
        first_byte, 0x6f, 0x05, 0xb4, 0x64, 0xd2, 0xca, 0xb2, 0x72, 0x95, 0x4c, 0x66, 0x0d, 0xd4,
        0x5c, 0xf8, 0xab, 0x0b, 0x26, 0x13, 0x65, 0x4d, 0xcc, 0xc7, 0x4c, 0x11, 0x55, 0xfe,
        0xba, 0xaf, 0xb5, 0xc9,
    ])
    .expect("scalar below r");
    Signer::new(key, config).expect("signer")
}

#[test]
fn single_signature_roundtrip() {
    let config = SchemeConfig::default();
    let signer = Signer::random(&config).unwrap();
    let sig = signer.sign(TRANSFER).unwrap();

    let agg = aggregate(&[sig]).unwrap();
    assert!(verify(&agg, &[(*signer.public_key(), TRANSFER)], config.domain()).unwrap());
}

#[test]
fn three_signers_same_message() {
    let config = SchemeConfig::new(DomainTag::from_label("eip4337.bls.domain"));
    let signers: Vec<Signer> = [0x21, 0x22, 0x23]
        .into_iter()
        .map(|b| fixed_signer(b, &config))
        .collect();

    let shares: Vec<G1Point> = signers.iter().map(|s| s.sign(TRANSFER).unwrap()).collect();
    let agg = aggregate(&shares).unwrap();

    let pairs: Vec<(G2Point, &[u8])> = signers.iter().map(|s| (*s.public_key(), TRANSFER)).collect();
    assert!(verify(&agg, &pairs, config.domain()).unwrap());

    for skip in 0..pairs.len() {
        let partial: Vec<_> = pairs
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, p)| *p)
            .collect();
        assert_eq!(
            verify(&agg, &partial, config.domain()).unwrap_err(),
            BLSError::InvalidBatch { expected: 3, actual: 2 }
        );
    }
}

#[test]
fn every_aggregation_order_verifies() {
    let config = SchemeConfig::default();
    let signers: Vec<Signer> = (0..3).map(|_| Signer::random(&config).unwrap()).collect();
    let messages: Vec<Vec<u8>> = (0..3).map(|i| format!("op-{i}").into_bytes()).collect();
    let shares: Vec<G1Point> = signers
        .iter()
        .zip(&messages)
        .map(|(s, m)| s.sign(m).unwrap())
        .collect();
    let pairs: Vec<(G2Point, &Vec<u8>)> = signers
        .iter()
        .zip(&messages)
        .map(|(s, m)| (*s.public_key(), m))
        .collect();

    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    let reference = aggregate(&shares).unwrap();
    for order in orders {
        let permuted: Vec<G1Point> = order.iter().map(|&i| shares[i]).collect();
        let agg = aggregate(&permuted).unwrap();
        assert_eq!(agg.to_bytes(), reference.to_bytes());
        assert!(verify(&agg, &pairs, config.domain()).unwrap());
    }
}

#[test]
fn substituted_message_binds_to_what_was_signed() {
    let config = SchemeConfig::default();
    let signer = Signer::random(&config).unwrap();
    let message_a = b"transfer(1,recipient=0xAB..)";
    let message_b = b"transfer(9,recipient=0xCD..)";

    // The signer was handed B where A was intended.
    let agg = aggregate(&[signer.sign(message_b).unwrap()]).unwrap();

    assert!(!verify(&agg, &[(*signer.public_key(), message_a)], config.domain()).unwrap());
    assert!(verify(&agg, &[(*signer.public_key(), message_b)], config.domain()).unwrap());
}

#[test]
fn parallel_signers_join_in_any_order() {
    let config = SchemeConfig::default();
    let context = AggregatorContext::new(Address([0x5c; 20]), 534351);
    let signers: Vec<Signer> = (0..8).map(|_| Signer::random(&config).unwrap()).collect();

    let mut records = thread::scope(|scope| {
        let handles: Vec<_> = signers
            .iter()
            .enumerate()
            .map(|(i, signer)| {
                scope.spawn(move || {
                    let op = UserOperation::new(Address([i as u8; 20]))
                        .with_nonce(i as u64)
                        .with_call_data(TRANSFER.to_vec());
                    signer.sign_operation(op, &context)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("signer thread"))
            .collect::<Result<Vec<_>, BLSError>>()
    })
    .unwrap();

    // Shares arrive out of order; the bundle keeps whatever order it is given.
    records.reverse();
    let pairs: Vec<(G2Point, [u8; 32])> = records
        .iter()
        .map(|r| (r.public_key, r.operation.request_id(&context).unwrap()))
        .collect();

    let bundle = build_bundle(records).unwrap();
    assert!(verify(bundle.signature(), &pairs, config.domain()).unwrap());
}

#[test]
fn batch_of_twenty_from_one_wallet() {
    let config = SchemeConfig::default();
    let context = AggregatorContext::new(Address([0x77; 20]), 534351);
    let wallet = Signer::random(&config).unwrap();
    let sender = Address([0x10; 20]);

    let records: Vec<_> = (0..20u64)
        .map(|nonce| {
            let op = UserOperation::new(sender)
                .with_nonce(nonce)
                .with_call_data(TRANSFER.to_vec());
            wallet.sign_operation(op, &context).unwrap()
        })
        .collect();
    let pairs: Vec<_> = records
        .iter()
        .map(|r| (r.public_key, r.operation.request_id(&context).unwrap()))
        .collect();

    let bundle = build_bundle(records).unwrap();
    assert_eq!(bundle.signature_bytes().len(), 64);
    assert!(verify(bundle.signature(), &pairs, config.domain()).unwrap());
}
