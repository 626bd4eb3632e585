//! Scalar reduction modulo the group order
//! `L = 2^252 + 27742317777372353535851937790883648493`.

/// `L`'s little-endian bytes, widened to `i64` for the reduction loop.
const L: [i64; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

/// Reduces a 512-bit little-endian scalar (as used for `SHA-512`
/// outputs) modulo `L`, writing the 32-byte little-endian result.
fn reduce_wide(x: &mut [i64; 64]) -> [u8; 32] {
    for i in (32..64).rev() {
        let mut carry = 0i64;
        for j in (i - 32)..(i - 12) {
            x[j] += carry - 16 * x[i] * L[j - (i - 32)];
            carry = (x[j] + 128) >> 8;
            x[j] -= carry << 8;
        }
        let j = i - 12;
        x[j] += carry;
        x[i] = 0;
    }

    let mut carry = 0i64;
    for j in 0..32 {
        x[j] += carry - (x[31] >> 4) * L[j];
        carry = x[j] >> 8;
        x[j] &= 255;
    }
    for j in 0..32 {
        x[j] -= carry * L[j];
    }
    for i in 0..32 {
        x[i + 1] += x[i] >> 8;
    }

    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = (x[i] & 255) as u8;
    }
    out
}

/// Reduces a 64-byte little-endian integer modulo `L`.
pub fn reduce(input: &[u8; 64]) -> [u8; 32] {
    let mut x = [0i64; 64];
    for i in 0..64 {
        x[i] = i64::from(input[i]);
    }
    reduce_wide(&mut x)
}

/// Whether `s` is already the canonical (fully reduced) representative
/// of its residue class, i.e. `s < L`. Rejects the signature
/// malleability RFC 8032 §5.1.7 warns about.
pub fn is_canonical(s: &[u8; 32]) -> bool {
    let mut borrow = 0i32;
    for i in 0..32 {
        let diff = i32::from(s[i]) - (L[i] as i32) - borrow;
        borrow = (diff < 0) as i32;
    }
    borrow == 1
}

/// Computes `(a + h * b) mod L` for 32-byte little-endian scalars
/// `a`, `h`, `b` — the `S = r + H(R,A,M) * a` step of Ed25519 signing.
pub fn mul_add(a: &[u8; 32], h: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut x = [0i64; 64];
    for i in 0..32 {
        x[i] = i64::from(a[i]);
    }
    for i in 0..32 {
        for j in 0..32 {
            x[i + j] += i64::from(h[i]) * i64::from(b[j]);
        }
    }
    reduce_wide(&mut x)
}
