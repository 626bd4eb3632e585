//! Self-contained Ed25519 (RFC 8032): key expansion, deterministic
//! signing, and verification, built on the field and point modules
//! rather than any external curve library. Field inversion and scalar
//! multiplication run in constant time; nothing here branches on
//! secret data.

mod field;
mod point;
mod scalar;
mod sha512;

use point::Point;
use sha512::sha512;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Length of a seed, public key, or scalar, in bytes.
pub const SEED_LENGTH: usize = 32;
/// Length of a public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;
/// Length of an expanded secret key (`seed || public key`), in bytes.
pub const SECRET_KEY_LENGTH: usize = 64;
/// Length of a signature (`R || S`), in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Expands a 32-byte seed into its clamped scalar, nonce prefix, and
/// public key, per RFC 8032 §5.1.5 steps 1-3.
fn expand_seed(seed: &[u8; SEED_LENGTH]) -> ([u8; 32], [u8; 32], [u8; PUBLIC_KEY_LENGTH]) {
    let mut h = sha512(seed);

    let mut a = [0u8; 32];
    a.copy_from_slice(&h[..32]);
    a[0] &= 248;
    a[31] &= 127;
    a[31] |= 64;

    let mut prefix = [0u8; 32];
    prefix.copy_from_slice(&h[32..]);

    let public = Point::scalar_base_mult(&a).pack();

    h.zeroize();
    (a, prefix, public)
}

/// Derives the 64-byte expanded secret key and 32-byte public key for
/// `seed`. The expanded secret key is `seed || public_key`, matching
/// the layout `sign` and `public_from_secret` expect.
pub fn keypair_from_seed(
    seed: &[u8; SEED_LENGTH],
) -> ([u8; SECRET_KEY_LENGTH], [u8; PUBLIC_KEY_LENGTH]) {
    let (mut a, mut prefix, public) = expand_seed(seed);
    a.zeroize();
    prefix.zeroize();

    let mut secret = [0u8; SECRET_KEY_LENGTH];
    secret[..32].copy_from_slice(seed);
    secret[32..].copy_from_slice(&public);
    (secret, public)
}

/// Extracts the public key half of an expanded secret key.
pub fn public_from_secret(secret: &[u8; SECRET_KEY_LENGTH]) -> [u8; PUBLIC_KEY_LENGTH] {
    let mut public = [0u8; PUBLIC_KEY_LENGTH];
    public.copy_from_slice(&secret[32..]);
    public
}

/// Signs `message` with `secret` (the `seed || public_key` expanded
/// form `keypair_from_seed` produces), returning the `R || S`
/// signature.
pub fn sign(message: &[u8], secret: &[u8; SECRET_KEY_LENGTH]) -> [u8; SIGNATURE_LENGTH] {
    let mut seed = [0u8; SEED_LENGTH];
    seed.copy_from_slice(&secret[..32]);
    let public = public_from_secret(secret);

    let (mut a, prefix, _) = expand_seed(&seed);
    seed.zeroize();

    let r_hash = {
        let mut buf = Vec::with_capacity(32 + message.len());
        buf.extend_from_slice(&prefix);
        buf.extend_from_slice(message);
        sha512(&buf)
    };
    let r = scalar::reduce(&r_hash);
    let big_r = Point::scalar_base_mult(&r).pack();

    let k_hash = {
        let mut buf = Vec::with_capacity(64 + message.len());
        buf.extend_from_slice(&big_r);
        buf.extend_from_slice(&public);
        buf.extend_from_slice(message);
        sha512(&buf)
    };
    let k = scalar::reduce(&k_hash);

    let s = scalar::mul_add(&r, &k, &a);
    a.zeroize();

    let mut signature = [0u8; SIGNATURE_LENGTH];
    signature[..32].copy_from_slice(&big_r);
    signature[32..].copy_from_slice(&s);
    signature
}

/// Verifies that `signature` is a valid Ed25519 signature over
/// `message` for `public`. Rejects non-canonical `S` values and
/// malformed or non-curve public keys.
pub fn verify(
    signature: &[u8; SIGNATURE_LENGTH],
    message: &[u8],
    public: &[u8; PUBLIC_KEY_LENGTH],
) -> bool {
    let mut big_r = [0u8; 32];
    big_r.copy_from_slice(&signature[..32]);
    let mut s = [0u8; 32];
    s.copy_from_slice(&signature[32..]);

    if !scalar::is_canonical(&s) {
        return false;
    }

    let neg_a = match Point::decompress_negated(public) {
        Some(p) => p,
        None => return false,
    };

    let k_hash = {
        let mut buf = Vec::with_capacity(64 + message.len());
        buf.extend_from_slice(&big_r);
        buf.extend_from_slice(public);
        buf.extend_from_slice(message);
        sha512(&buf)
    };
    let k = scalar::reduce(&k_hash);

    let check = Point::add(&Point::scalar_base_mult(&s), &Point::scalar_mult(&neg_a, &k));
    check.pack().ct_eq(&big_r).into()
}
