//! Inline two-limb signed integer storage.
//!
//! A `StaticInt` holds the magnitude of a number in two little-endian limbs
//! of `BITS` effective bits each, stored in `u64` words, together with a
//! signed size field whose absolute value is the number of nonzero limbs and
//! whose sign is the sign of the number. All arithmetic runs in `u128`
//! double-width intermediates so that carries and the final high bit can be
//! inspected; any result that would not fit `2 * BITS` bits reports
//! [`Overflow`] to the caller instead of being written.
//!
//! Invariants, maintained by every method:
//! - `size ∈ {-2, -1, 0, 1, 2}` and `|size|` equals the number of nonzero
//!   trailing limbs,
//! - bits above position `BITS` of each limb are zero,
//! - zero is represented canonically as `size == 0` with both limbs zero.

use std::cmp::Ordering;

use dashu::integer::IBig;

use volans_core::bits::{bit_length, join_wide, split_wide};

/// Internal signal: a result exceeded the two-limb envelope. The public
/// integer type reacts by promoting to the heap representation.
#[derive(Debug)]
pub(crate) struct Overflow;

/// Two limbs of `BITS` effective bits plus a signed limb count.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct StaticInt<const BITS: u32> {
    limbs: [u64; 2],
    size: i8,
}

impl<const BITS: u32> Default for StaticInt<BITS> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const BITS: u32> StaticInt<BITS> {
    const WIDTH_OK: () = assert!(
        BITS == 8 || BITS == 16 || BITS == 32 || BITS == 64,
        "limb width must be 8, 16, 32 or 64 bits",
    );

    /// Mask selecting the `BITS` effective bits of a limb.
    const MASK: u64 = if BITS == 64 {
        u64::MAX
    } else {
        (1u64 << BITS) - 1
    };

    pub(crate) const fn zero() -> Self {
        let () = Self::WIDTH_OK;
        Self {
            limbs: [0; 2],
            size: 0,
        }
    }

    /// Builds a non-negative value from a double-width magnitude, failing if
    /// it does not fit `2 * BITS` bits.
    pub(crate) fn try_from_magnitude(mag: u128) -> Result<Self, Overflow> {
        let () = Self::WIDTH_OK;
        if bit_length(mag) > 2 * BITS {
            return Err(Overflow);
        }
        let (lo, hi) = split_wide(mag, BITS);
        let limbs = [lo, hi];
        Ok(Self {
            limbs,
            size: Self::count_limbs(limbs),
        })
    }

    fn count_limbs(limbs: [u64; 2]) -> i8 {
        if limbs[1] != 0 {
            2
        } else {
            i8::from(limbs[0] != 0)
        }
    }

    /// The magnitude as a double-width value.
    pub(crate) fn magnitude(&self) -> u128 {
        join_wide(self.limbs[0], self.limbs[1], BITS)
    }

    pub(crate) fn abs_size(&self) -> i8 {
        self.size.abs()
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.size == 0
    }

    pub(crate) fn is_one(&self) -> bool {
        self.size == 1 && self.limbs[0] == 1
    }

    pub(crate) fn is_negative(&self) -> bool {
        self.size < 0
    }

    pub(crate) fn sign(&self) -> i8 {
        self.size.signum()
    }

    pub(crate) fn negate(&mut self) {
        self.size = -self.size;
    }

    /// Masks away storage bits above the effective limb width.
    ///
    /// Wrap-around arithmetic on the `u64` storage can leave bits past
    /// position `BITS` set when `BITS < 64`; every such site normalises
    /// through here.
    pub(crate) fn clear_extra_bits(&mut self) {
        self.limbs[0] &= Self::MASK;
        self.limbs[1] &= Self::MASK;
    }

    /// Sets bit `idx` of the magnitude, growing the size field as needed.
    pub(crate) fn set_bit(&mut self, idx: u32) {
        debug_assert!(idx < 2 * BITS);
        let limb = (idx / BITS) as usize;
        let bit = idx % BITS;
        self.limbs[limb] |= 1u64 << bit;
        let new_size = limb as i8 + 1;
        if self.size < 0 {
            if -new_size < self.size {
                self.size = -new_size;
            }
        } else if new_size > self.size {
            self.size = new_size;
        }
    }

    /// Tests bit `idx` of the magnitude.
    pub(crate) fn test_bit(&self, idx: u32) -> bool {
        debug_assert!(idx < 2 * BITS);
        let limb = (idx / BITS) as usize;
        let bit = idx % BITS;
        self.limbs[limb] & (1u64 << bit) != 0
    }

    /// Number of bits used by the magnitude; zero for zero.
    pub(crate) fn bits_size(&self) -> u32 {
        bit_length(self.magnitude())
    }

    /// Compares magnitudes.
    fn compare_abs(x: &Self, y: &Self) -> Ordering {
        x.magnitude().cmp(&y.magnitude())
    }

    /// Adds magnitudes, failing if the sum exceeds two limbs. The result is
    /// non-negative; sign fixup is the caller's business.
    fn raw_add(x: &Self, y: &Self) -> Result<Self, Overflow> {
        let (lo, carry) = split_wide(u128::from(x.limbs[0]) + u128::from(y.limbs[0]), BITS);
        let (hi, excess) = split_wide(
            u128::from(x.limbs[1]) + u128::from(y.limbs[1]) + u128::from(carry),
            BITS,
        );
        if excess != 0 {
            return Err(Overflow);
        }
        let limbs = [lo, hi];
        Ok(Self {
            limbs,
            size: Self::count_limbs(limbs),
        })
    }

    /// Subtracts magnitudes; requires `|x| >= |y|`. The result is
    /// non-negative.
    fn raw_sub(x: &Self, y: &Self) -> Self {
        debug_assert!(Self::compare_abs(x, y) != Ordering::Less);
        let (lo, hi) = split_wide(x.magnitude() - y.magnitude(), BITS);
        let limbs = [lo, hi];
        Self {
            limbs,
            size: Self::count_limbs(limbs),
        }
    }

    /// Sign-aware addition or subtraction, dispatching into a raw add of
    /// equally-signed magnitudes or a raw sub of the smaller magnitude from
    /// the larger, followed by sign fixup.
    fn add_or_sub(x: &Self, y: &Self, subtract: bool) -> Result<Self, Overflow> {
        let sign_x = x.size >= 0;
        let sign_y = if subtract { y.size <= 0 } else { y.size >= 0 };
        let (ax, ay) = (x.abs_size(), y.abs_size());
        let mut res = if sign_x == sign_y {
            let mut r = Self::raw_add(x, y)?;
            if !sign_x {
                r.negate();
            }
            r
        } else if ax > ay || (ax == ay && Self::compare_abs(x, y) != Ordering::Less) {
            let mut r = Self::raw_sub(x, y);
            if !sign_x {
                r.negate();
            }
            r
        } else {
            let mut r = Self::raw_sub(y, x);
            if !sign_y {
                r.negate();
            }
            r
        };
        res.clear_extra_bits();
        Ok(res)
    }

    pub(crate) fn checked_add(x: &Self, y: &Self) -> Result<Self, Overflow> {
        Self::add_or_sub(x, y, false)
    }

    pub(crate) fn checked_sub(x: &Self, y: &Self) -> Result<Self, Overflow> {
        Self::add_or_sub(x, y, true)
    }

    /// Multiplies single-limb magnitudes into a (possibly two-limb) result.
    fn raw_mul(x: &Self, y: &Self) -> Self {
        debug_assert!(x.abs_size() == 1 && y.abs_size() == 1);
        let (lo, hi) = split_wide(u128::from(x.limbs[0]) * u128::from(y.limbs[0]), BITS);
        let limbs = [lo, hi];
        let size = 2 - i8::from(limbs[1] == 0);
        debug_assert!(size > 0);
        Self { limbs, size }
    }

    /// Signed multiplication. Any operand wider than one limb would by
    /// construction overflow two limbs, so only the 1x1 case computes.
    pub(crate) fn checked_mul(x: &Self, y: &Self) -> Result<Self, Overflow> {
        let (ax, ay) = (x.abs_size(), y.abs_size());
        if ax == 0 || ay == 0 {
            return Ok(Self::zero());
        }
        if ax > 1 || ay > 1 {
            return Err(Overflow);
        }
        let mut res = Self::raw_mul(x, y);
        if (x.size < 0) != (y.size < 0) {
            res.negate();
        }
        Ok(res)
    }

    /// In-place fused multiply-add: `self += b * c`. On [`Overflow`] `self`
    /// is left untouched.
    pub(crate) fn checked_add_mul(&mut self, b: &Self, c: &Self) -> Result<(), Overflow> {
        let (ab, ac) = (b.abs_size(), c.abs_size());
        if ab > 1 || ac > 1 {
            return Err(Overflow);
        }
        if ab == 0 || ac == 0 {
            return Ok(());
        }
        let mut tmp = Self::raw_mul(b, c);
        if (b.size < 0) != (c.size < 0) {
            tmp.negate();
        }
        *self = Self::checked_add(self, &tmp)?;
        Ok(())
    }

    /// Truncating division; `b` must be nonzero. Returns `(quotient,
    /// remainder)` with the quotient sign the xor of the operand signs and
    /// the remainder sign that of the dividend. Never overflows.
    pub(crate) fn div_rem(a: &Self, b: &Self) -> (Self, Self) {
        debug_assert!(!b.is_zero());
        let (ad, bd) = (a.magnitude(), b.magnitude());
        let (sign_a, sign_b) = (a.size >= 0, b.size >= 0);
        let mut q = Self::try_from_magnitude(ad / bd)
            .unwrap_or_else(|_| unreachable!("quotient magnitude bounded by dividend"));
        let mut r = Self::try_from_magnitude(ad % bd)
            .unwrap_or_else(|_| unreachable!("remainder magnitude bounded by divisor"));
        if !sign_a {
            r.negate();
        }
        if sign_a != sign_b {
            q.negate();
        }
        (q, r)
    }

    /// Converts to the heap backend representation.
    pub(crate) fn to_ibig(&self) -> IBig {
        let mut n = IBig::from(self.magnitude());
        if self.size < 0 {
            n = -n;
        }
        n
    }

    /// Structural consistency check, used by debug assertions and tests.
    #[cfg(test)]
    pub(crate) fn invariants_hold(&self) -> bool {
        (-2..=2).contains(&self.size)
            && self.limbs[0] & !Self::MASK == 0
            && self.limbs[1] & !Self::MASK == 0
            && Self::count_limbs(self.limbs) == self.abs_size()
    }
}

impl<const BITS: u32> PartialOrd for StaticInt<BITS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const BITS: u32> Ord for StaticInt<BITS> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.size.cmp(&other.size) {
            Ordering::Equal => {
                let mag = Self::compare_abs(self, other);
                if self.size >= 0 {
                    mag
                } else {
                    mag.reverse()
                }
            }
            ord => ord,
        }
    }
}
