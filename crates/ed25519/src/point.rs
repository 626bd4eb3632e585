//! Extended-coordinate Edwards curve arithmetic on top of [`Fe`].
//!
//! Point addition is complete (works for any pair of curve points,
//! including the identity) so the double-and-add ladder in
//! [`Point::scalar_mult`] never needs a special case. `cswap` is a
//! constant-time conditional select per scalar bit of the 256-bit
//! ladder.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

use crate::field::Fe;

/// A point in extended Edwards coordinates `(X:Y:Z:T)`, representing
/// the affine point `(X/Z, Y/Z)` with the extra invariant `X*Y = Z*T`.
#[derive(Clone, Copy)]
pub struct Point {
    pub x: Fe,
    pub y: Fe,
    pub z: Fe,
    pub t: Fe,
}

impl Point {
    pub fn identity() -> Point {
        Point {
            x: Fe::ZERO,
            y: Fe::ONE,
            z: Fe::ONE,
            t: Fe::ZERO,
        }
    }

    pub fn base() -> Point {
        Point {
            x: Fe::base_x(),
            y: Fe::base_y(),
            z: Fe::ONE,
            t: Fe::mul(&Fe::base_x(), &Fe::base_y()),
        }
    }

    /// Unified extended-coordinate point addition (Hisil–Wong–Carter–Dawson).
    pub fn add(p: &Point, q: &Point) -> Point {
        let a = Fe::mul(&Fe::sub(&p.y, &p.x), &Fe::sub(&q.y, &q.x));
        let b = Fe::mul(&Fe::add(&p.y, &p.x), &Fe::add(&q.y, &q.x));
        let c = Fe::mul(&Fe::mul(&p.t, &q.t), &Fe::d2());
        let d = {
            let dd = Fe::mul(&p.z, &q.z);
            Fe::add(&dd, &dd)
        };
        let e = Fe::sub(&b, &a);
        let f = Fe::sub(&d, &c);
        let g = Fe::add(&d, &c);
        let h = Fe::add(&b, &a);

        Point {
            x: Fe::mul(&e, &f),
            y: Fe::mul(&h, &g),
            z: Fe::mul(&g, &f),
            t: Fe::mul(&e, &h),
        }
    }

    fn cswap(choice: Choice, p: &mut Point, q: &mut Point) {
        Fe::conditional_swap(&mut p.x, &mut q.x, choice);
        Fe::conditional_swap(&mut p.y, &mut q.y, choice);
        Fe::conditional_swap(&mut p.z, &mut q.z, choice);
        Fe::conditional_swap(&mut p.t, &mut q.t, choice);
    }

    /// Variable-base scalar multiplication via a constant-time
    /// double-and-add ladder, most significant bit first.
    pub fn scalar_mult(point: &Point, scalar: &[u8; 32]) -> Point {
        let mut p = Point::identity();
        let mut q = *point;

        for i in (0..=255).rev() {
            let bit = (scalar[i / 8] >> (i % 8)) & 1;
            let choice = Choice::from(bit);
            Point::cswap(choice, &mut p, &mut q);
            q = Point::add(&q, &p);
            p = Point::add(&p, &p);
            Point::cswap(choice, &mut p, &mut q);
        }
        p
    }

    pub fn scalar_base_mult(scalar: &[u8; 32]) -> Point {
        Point::scalar_mult(&Point::base(), scalar)
    }

    /// Compresses to the 32-byte little-endian `y`, with the sign of
    /// `x` folded into the unused top bit.
    pub fn pack(&self) -> [u8; 32] {
        let zi = Fe::invert(&self.z);
        let tx = Fe::mul(&self.x, &zi);
        let ty = Fe::mul(&self.y, &zi);
        let mut out = ty.to_bytes();
        out[31] ^= tx.parity() << 7;
        out
    }

    /// Decompresses `bytes` and negates the resulting `x` coordinate —
    /// this is the form verification needs (`-A`), not the public key
    /// itself. Validates that the recovered `x` satisfies the curve
    /// equation and that its sign matches the encoded high bit;
    /// returns `None` on any malformed input.
    pub fn decompress_negated(bytes: &[u8; 32]) -> Option<Point> {
        let y = Fe::from_bytes(bytes);
        let z = Fe::ONE;

        let num = Fe::sub(&Fe::square(&y), &z);
        let den = Fe::add(&z, &Fe::mul(&Fe::square(&y), &Fe::d()));

        let den2 = Fe::square(&den);
        let den4 = Fe::square(&den2);
        let den6 = Fe::mul(&den4, &den2);
        let mut t = Fe::mul(&Fe::mul(&den6, &num), &den);

        t = Fe::pow2523(&t);
        t = Fe::mul(&t, &num);
        t = Fe::mul(&t, &den);
        t = Fe::mul(&t, &den);
        let mut x = Fe::mul(&t, &den);

        let check_sqrt = |x: &Fe| -> Fe { Fe::mul(&Fe::square(x), &den) };

        if !bool::from(check_sqrt(&x).ct_eq(&num)) {
            x = Fe::mul(&x, &Fe::sqrt_m1());
        }

        if !bool::from(check_sqrt(&x).ct_eq(&num)) {
            return None;
        }

        if x.parity() == (bytes[31] >> 7) {
            x = Fe::sub(&Fe::ZERO, &x);
        }

        let t = Fe::mul(&x, &y);
        Some(Point { x, y, z, t })
    }
}

impl Zeroize for Point {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.z.zeroize();
        self.t.zeroize();
    }
}
