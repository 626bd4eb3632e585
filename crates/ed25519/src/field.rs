//! 𝔽₂₅₅₋₁₉ field arithmetic on a 16-limb representation.
//!
//! Each limb holds roughly 16 bits of the value in an `i64`, so every
//! multiply-accumulate in [`Fe::mul`] fits comfortably inside an `i64`
//! without overflow. Limbs are not normalized between operations;
//! [`Fe::carry`] is the only place range is restored, and callers call
//! it exactly as often as the reference algorithm does.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// An element of 𝔽₂₅₅₋₁₉, 16 limbs of ~16 bits each, little-endian.
#[derive(Clone, Copy, Debug)]
pub struct Fe(pub [i64; 16]);

impl Fe {
    pub const ZERO: Fe = Fe([0; 16]);
    pub const ONE: Fe = Fe([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// The curve constant `-121665/121666`.
    pub fn d() -> Fe {
        const D: [i64; 16] = [
            0x78a3, 0x1359, 0x4dca, 0x75eb, 0xd8ab, 0x4141, 0x0a4d, 0x0070, 0xe898, 0x7779,
            0x4079, 0x8cc7, 0xfe73, 0x2b6f, 0x6cee, 0x5203,
        ];
        Fe(D)
    }

    /// `2 * d`.
    pub fn d2() -> Fe {
        const D2: [i64; 16] = [
            0xf159, 0x26b2, 0x9b94, 0xebd6, 0xb156, 0x8283, 0x149a, 0x00e0, 0xd130, 0xeef3,
            0x80f2, 0x198e, 0xfce7, 0x56df, 0xd9dc, 0x2406,
        ];
        Fe(D2)
    }

    /// `sqrt(-1) mod p`.
    pub fn sqrt_m1() -> Fe {
        const I: [i64; 16] = [
            0xa0b0, 0x4a0e, 0x1b27, 0xc4ee, 0xe478, 0xad2f, 0x1806, 0x2f43, 0xd7a7, 0x3dfb,
            0x0099, 0x2b4d, 0xdf0b, 0x4fc1, 0x2480, 0x2b83,
        ];
        Fe(I)
    }

    /// Base point `x`-coordinate.
    pub fn base_x() -> Fe {
        const X: [i64; 16] = [
            0xd51a, 0x8f25, 0x2d60, 0xc956, 0xa7b2, 0x9525, 0xc760, 0x692c, 0xdc5c, 0xfdd6,
            0xe231, 0xc0a4, 0x53fe, 0xcd6e, 0x36d3, 0x2169,
        ];
        Fe(X)
    }

    /// Base point `y`-coordinate, `4/5 mod p`.
    pub fn base_y() -> Fe {
        const Y: [i64; 16] = [
            0x6658, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666,
            0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666,
        ];
        Fe(Y)
    }

    pub fn add(a: &Fe, b: &Fe) -> Fe {
        let mut o = [0i64; 16];
        for i in 0..16 {
            o[i] = a.0[i] + b.0[i];
        }
        Fe(o)
    }

    pub fn sub(a: &Fe, b: &Fe) -> Fe {
        let mut o = [0i64; 16];
        for i in 0..16 {
            o[i] = a.0[i] - b.0[i];
        }
        Fe(o)
    }

    pub fn mul(a: &Fe, b: &Fe) -> Fe {
        let mut t = [0i64; 31];
        for i in 0..16 {
            for j in 0..16 {
                t[i + j] += a.0[i] * b.0[j];
            }
        }
        for i in 0..15 {
            t[i] += 38 * t[i + 16];
        }
        let mut o = [0i64; 16];
        o.copy_from_slice(&t[..16]);
        let mut fe = Fe(o);
        fe.carry();
        fe.carry();
        fe
    }

    pub fn square(a: &Fe) -> Fe {
        Fe::mul(a, a)
    }

    /// Normalizes limbs back into their ~16-bit range, propagating the
    /// reduction `mod 2^255 - 19` on overflow out of limb 15.
    fn carry(&mut self) {
        for i in 0..16 {
            self.0[i] += 1 << 16;
            let c = self.0[i] >> 16;
            let idx = (i + 1) * usize::from(i < 15);
            self.0[idx] += c - 1 + 37 * (c - 1) * i64::from(i == 15);
            self.0[i] -= c << 16;
        }
    }

    /// Fermat inverse `a^(p-2) mod p` via the fixed addition chain: 254
    /// squarings, with a multiply by `a` after every squaring except at
    /// positions 2 and 4.
    pub fn invert(a: &Fe) -> Fe {
        let mut c = *a;
        for i in (0..=253).rev() {
            c = Fe::square(&c);
            if i != 2 && i != 4 {
                c = Fe::mul(&c, a);
            }
        }
        c
    }

    /// `a^((p-5)/8) mod p`, used by point decompression's square root.
    pub fn pow2523(a: &Fe) -> Fe {
        let mut c = *a;
        for i in (0..=250).rev() {
            c = Fe::square(&c);
            if i != 1 {
                c = Fe::mul(&c, a);
            }
        }
        c
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> Fe {
        let mut o = [0i64; 16];
        for i in 0..16 {
            o[i] = i64::from(bytes[2 * i]) + (i64::from(bytes[2 * i + 1]) << 8);
        }
        o[15] &= 0x7fff;
        Fe(o)
    }

    /// Canonical little-endian byte encoding (full reduction mod `p`).
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut t = *self;
        t.carry();
        t.carry();
        t.carry();
        for _ in 0..2 {
            let mut m = [0i64; 16];
            m[0] = t.0[0] - 0xffed;
            for i in 1..15 {
                m[i] = t.0[i] - 0xffff - ((m[i - 1] >> 16) & 1);
                m[i - 1] &= 0xffff;
            }
            m[15] = t.0[15] - 0x7fff - ((m[14] >> 16) & 1);
            let b = (m[15] >> 16) & 1;
            m[14] &= 0xffff;
            Fe::conditional_assign_swapped(&mut t, &Fe(m), 1 - b);
        }
        let mut out = [0u8; 32];
        for i in 0..16 {
            out[2 * i] = (t.0[i] & 0xff) as u8;
            out[2 * i + 1] = (t.0[i] >> 8) as u8;
        }
        out
    }

    /// `sel25519`: select `m` into `t` when `take_m == 1`, constant-time.
    fn conditional_assign_swapped(t: &mut Fe, m: &Fe, take_m: i64) {
        let choice = Choice::from(take_m as u8);
        for i in 0..16 {
            t.0[i] = i64::conditional_select(&t.0[i], &m.0[i], choice);
        }
    }

    /// The low bit of the canonical encoding — the curve's sign bit.
    pub fn parity(&self) -> u8 {
        self.to_bytes()[0] & 1
    }
}

impl ConditionallySelectable for Fe {
    fn conditional_select(a: &Fe, b: &Fe, choice: Choice) -> Fe {
        let mut o = [0i64; 16];
        for i in 0..16 {
            o[i] = i64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Fe(o)
    }
}

impl ConstantTimeEq for Fe {
    /// Constant-time equality via the canonical encodings: an `OR` of
    /// byte-wise `XOR`s reduced to a single branch-free `Choice`.
    fn ct_eq(&self, other: &Fe) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl Zeroize for Fe {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Default for Fe {
    fn default() -> Self {
        Fe::ZERO
    }
}
