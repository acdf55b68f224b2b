/// Alt-BN128 base field modulus `p`, big-endian.
pub const MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d, 0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
];

/// `5 * p`, the largest multiple of the base field modulus below 2^256.
/// Digests at or above this bound are rejected to keep `h mod p` unbiased.
pub const NORMALIZE_MODULUS: [u8; 32] = [
    0xf1, 0xf5, 0x88, 0x3e, 0x65, 0xf8, 0x20, 0xd0, 0x99, 0x91, 0x5c, 0x90, 0x87, 0x86, 0xb9, 0xd3,
    0xf5, 0x87, 0x14, 0xd7, 0x0a, 0x38, 0xf4, 0xc2, 0x2c, 0xa2, 0xbc, 0x72, 0x3a, 0x70, 0xf2, 0x63,
];

/// Alt-BN128 scalar field modulus `r`, big-endian. Private keys live in `[1, r)`.
pub const SCALAR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// G1 generator `(1, 2)` in uncompressed precompile layout.
pub const G1_GENERATOR: [u8; 64] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02,
];

/// The point at infinity as the precompiles encode it.
pub const G1_IDENTITY: [u8; 64] = [0u8; 64];

/// The G2 point at infinity. A public key equal to it pairs to one with
/// every message.
pub const G2_IDENTITY: [u8; 128] = [0u8; 128];

/// Negated G2 generator, `x.c1 | x.c0 | y.c1 | y.c0` big-endian.
pub const G2_MINUS_ONE: [u8; 128] = [
    // x.c1
    0x19, 0x8e, 0x93, 0x93, 0x92, 0x0d, 0x48, 0x3a, 0x72, 0x60, 0xbf, 0xb7, 0x31, 0xfb, 0x5d, 0x25,
    0xf1, 0xaa, 0x49, 0x33, 0x35, 0xa9, 0xe7, 0x12, 0x97, 0xe4, 0x85, 0xb7, 0xae, 0xf3, 0x12, 0xc2,
    // x.c0
    0x18, 0x00, 0xde, 0xef, 0x12, 0x1f, 0x1e, 0x76, 0x42, 0x6a, 0x00, 0x66, 0x5e, 0x5c, 0x44, 0x79,
    0x67, 0x43, 0x22, 0xd4, 0xf7, 0x5e, 0xda, 0xdd, 0x46, 0xde, 0xbd, 0x5c, 0xd9, 0x92, 0xf6, 0xed,
    // -y.c1
    0x27, 0x5d, 0xc4, 0xa2, 0x88, 0xd1, 0xaf, 0xb3, 0xcb, 0xb1, 0xac, 0x09, 0x18, 0x75, 0x24, 0xc7,
    0xdb, 0x36, 0x39, 0x5d, 0xf7, 0xbe, 0x3b, 0x99, 0xe6, 0x73, 0xb1, 0x3a, 0x07, 0x5a, 0x65, 0xec,
    // -y.c0
    0x1d, 0x9b, 0xef, 0xcd, 0x05, 0xa5, 0x32, 0x3e, 0x6d, 0xa4, 0xd4, 0x35, 0xf3, 0xb6, 0x17, 0xcd,
    0xb3, 0xaf, 0x83, 0x28, 0x5c, 0x2d, 0xf7, 0x11, 0xef, 0x39, 0xc0, 0x15, 0x71, 0x82, 0x7f, 0x9d,
];

/// Pairing precompile output for a product equal to one.
pub const PAIRING_ONE: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
];

/// Try-and-increment attempts before hashing to G1 gives up.
pub const HASH_TO_CURVE_ATTEMPTS: u8 = 255;

/// Label keccak-hashed into the default domain tag.
pub const DEFAULT_DOMAIN_LABEL: &str = "eip4337.bls.domain";

pub const G1_POINT_LEN: usize = 64;
pub const G2_POINT_LEN: usize = 128;
pub const PAIRING_ELEMENT_LEN: usize = G1_POINT_LEN + G2_POINT_LEN;
