//! Arbitrary precision signed integers with an inline fast path.
//!
//! [`SmallInt`] keeps values in two machine limbs on the stack and promotes
//! transparently to a heap-allocated [`dashu`] big integer when an operation
//! overflows the inline envelope. Promotion is one-way: a value never demotes
//! automatically after it has gone to the heap (an explicit round-trip
//! through [`SmallInt::to_ibig`] can shrink it again if a caller cares).
//!
//! The limb width is a compile-time parameter; `BITS` may be 8, 16, 32 or
//! 64. The default of 64 is the widest width supported, since the 128-bit
//! intermediate type it requires is always available in Rust.

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use std::str::FromStr;

use dashu::base::{BitTest, Sign};
use dashu::integer::IBig;
use num_traits::{One, Zero};

use volans_core::{Error, Result};

use crate::static_int::StaticInt;

/// The default integer type of the kernel: 64-bit inline limbs.
pub type Integer = SmallInt<64>;

#[derive(Clone)]
enum Repr<const BITS: u32> {
    Inline(StaticInt<BITS>),
    Heap(IBig),
}

impl<const BITS: u32> Default for Repr<BITS> {
    fn default() -> Self {
        Repr::Inline(StaticInt::zero())
    }
}

/// A signed integer of arbitrary size with small-value optimisation.
///
/// Values whose magnitude fits `2 * BITS` bits live entirely on the stack;
/// anything larger is carried by a heap big integer. Every arithmetic
/// operation first attempts the inline representation and falls back to the
/// heap on overflow, so callers never observe the switch except through
/// [`SmallInt::is_static`].
#[derive(Clone, Default)]
pub struct SmallInt<const BITS: u32 = 64> {
    repr: Repr<BITS>,
}

impl<const BITS: u32> SmallInt<BITS> {
    /// Creates the integer zero, inline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repr: Repr::Inline(StaticInt::zero()),
        }
    }

    fn from_magnitude(mag: u128, negative: bool) -> Self {
        match StaticInt::try_from_magnitude(mag) {
            Ok(mut st) => {
                if negative {
                    st.negate();
                }
                Self {
                    repr: Repr::Inline(st),
                }
            }
            Err(_) => {
                let mut n = IBig::from(mag);
                if negative {
                    n = -n;
                }
                Self { repr: Repr::Heap(n) }
            }
        }
    }

    /// Builds from a backend integer, choosing the inline representation
    /// when the magnitude fits two limbs.
    #[must_use]
    pub fn from_ibig(n: IBig) -> Self {
        let (sign, mag) = n.into_parts();
        if mag.bit_len() <= 2 * BITS as usize {
            let mut st = StaticInt::<BITS>::zero();
            for i in 0..mag.bit_len() {
                if mag.bit(i) {
                    st.set_bit(i as u32);
                }
            }
            if sign == Sign::Negative {
                st.negate();
            }
            Self {
                repr: Repr::Inline(st),
            }
        } else {
            Self {
                repr: Repr::Heap(IBig::from_parts(sign, mag)),
            }
        }
    }

    /// Converts to the backend big-integer representation, regardless of the
    /// current storage mode. This is the interop seam for code that needs to
    /// hand values to the backend directly.
    #[must_use]
    pub fn to_ibig(&self) -> IBig {
        match &self.repr {
            Repr::Inline(st) => st.to_ibig(),
            Repr::Heap(n) => n.clone(),
        }
    }

    fn take_ibig(&mut self) -> IBig {
        match mem::take(&mut self.repr) {
            Repr::Inline(st) => st.to_ibig(),
            Repr::Heap(n) => n,
        }
    }

    /// Constructs from a finite floating-point value, truncating toward
    /// zero.
    ///
    /// The magnitude is decomposed radix-chunk by radix-chunk into a scratch
    /// big integer; the result is stored inline when it fits two limbs.
    /// Subnormal and fractional inputs truncate to zero.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `x` is NaN or infinite.
    pub fn from_f64(x: f64) -> Result<Self> {
        if !x.is_finite() {
            return Err(Error::InvalidArgument(
                "cannot construct an integer from a non-finite floating-point value",
            ));
        }
        let mut m = x.abs().trunc();
        if m == 0.0 {
            return Ok(Self::new());
        }
        // 2^32: `m % CHUNK` and `(m / CHUNK).trunc()` are exact on
        // integer-valued doubles.
        const CHUNK: f64 = 4_294_967_296.0;
        let mut mag = IBig::ZERO;
        let mut shift = 0usize;
        while m > 0.0 {
            let digit = (m % CHUNK) as u64;
            mag += IBig::from(digit) << shift;
            m = (m / CHUNK).trunc();
            shift += 32;
        }
        if x.is_sign_negative() {
            mag = -mag;
        }
        Ok(Self::from_ibig(mag))
    }

    /// Single-precision variant of [`SmallInt::from_f64`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `x` is NaN or infinite.
    pub fn from_f32(x: f32) -> Result<Self> {
        Self::from_f64(f64::from(x))
    }

    /// Converts to `f64` by radix decomposition of the magnitude. Values
    /// beyond the `f64` range come back as ±infinity.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match &self.repr {
            Repr::Inline(st) => {
                let v = st.magnitude() as f64;
                if st.is_negative() {
                    -v
                } else {
                    v
                }
            }
            Repr::Heap(n) => {
                let (sign, mag) = n.clone().into_parts();
                let mut acc = 0.0f64;
                for i in (0..mag.bit_len()).rev() {
                    acc = acc * 2.0 + f64::from(u8::from(mag.bit(i)));
                }
                if sign == Sign::Negative {
                    -acc
                } else {
                    acc
                }
            }
        }
    }

    /// Converts to `f32`; values beyond the `f32` range come back as
    /// ±infinity.
    #[must_use]
    pub fn to_f32(&self) -> f32 {
        match &self.repr {
            Repr::Inline(st) => {
                let v = st.magnitude() as f32;
                if st.is_negative() {
                    -v
                } else {
                    v
                }
            }
            Repr::Heap(_) => self.to_f64() as f32,
        }
    }

    /// Magnitude and sign as a double-width native pair.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if the magnitude exceeds 128 bits.
    fn magnitude_u128(&self) -> Result<(u128, bool)> {
        match &self.repr {
            Repr::Inline(st) => Ok((st.magnitude(), st.is_negative())),
            Repr::Heap(n) => {
                let (sign, mag) = n.clone().into_parts();
                if mag.bit_len() > 128 {
                    return Err(Error::Overflow(
                        "value does not fit in a native integer type",
                    ));
                }
                let mut out = 0u128;
                for i in 0..mag.bit_len() {
                    if mag.bit(i) {
                        out |= 1u128 << i;
                    }
                }
                Ok((out, sign == Sign::Negative))
            }
        }
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match &self.repr {
            Repr::Inline(st) => st.is_zero(),
            Repr::Heap(n) => *n == IBig::ZERO,
        }
    }

    /// Returns true while the value is held in the inline representation.
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self.repr, Repr::Inline(_))
    }

    /// Forces the value onto the heap representation.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the value is already on the heap.
    pub fn promote(&mut self) -> Result<()> {
        match &self.repr {
            Repr::Heap(_) => Err(Error::InvalidArgument(
                "cannot promote a non-static integer",
            )),
            Repr::Inline(st) => {
                self.repr = Repr::Heap(st.to_ibig());
                Ok(())
            }
        }
    }

    /// The sign of the value: -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        match &self.repr {
            Repr::Inline(st) => st.sign(),
            Repr::Heap(n) => {
                if *n > IBig::ZERO {
                    1
                } else if *n < IBig::ZERO {
                    -1
                } else {
                    0
                }
            }
        }
    }

    /// Negates in place.
    pub fn negate(&mut self) {
        self.repr = match mem::take(&mut self.repr) {
            Repr::Inline(mut st) => {
                st.negate();
                Repr::Inline(st)
            }
            Repr::Heap(n) => Repr::Heap(-n),
        };
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        let mut r = self.clone();
        if r.signum() < 0 {
            r.negate();
        }
        r
    }

    fn add_assign_impl(&mut self, rhs: &Self) {
        if let (Repr::Inline(a), Repr::Inline(b)) = (&self.repr, &rhs.repr) {
            if let Ok(sum) = StaticInt::checked_add(a, b) {
                self.repr = Repr::Inline(sum);
                return;
            }
        }
        let lhs = self.take_ibig();
        let r = match &rhs.repr {
            Repr::Inline(st) => lhs + st.to_ibig(),
            Repr::Heap(n) => lhs + n,
        };
        self.repr = Repr::Heap(r);
    }

    fn sub_assign_impl(&mut self, rhs: &Self) {
        if let (Repr::Inline(a), Repr::Inline(b)) = (&self.repr, &rhs.repr) {
            if let Ok(diff) = StaticInt::checked_sub(a, b) {
                self.repr = Repr::Inline(diff);
                return;
            }
        }
        let lhs = self.take_ibig();
        let r = match &rhs.repr {
            Repr::Inline(st) => lhs - st.to_ibig(),
            Repr::Heap(n) => lhs - n,
        };
        self.repr = Repr::Heap(r);
    }

    fn mul_assign_impl(&mut self, rhs: &Self) {
        if let (Repr::Inline(a), Repr::Inline(b)) = (&self.repr, &rhs.repr) {
            if let Ok(prod) = StaticInt::checked_mul(a, b) {
                self.repr = Repr::Inline(prod);
                return;
            }
        }
        let lhs = self.take_ibig();
        let r = match &rhs.repr {
            Repr::Inline(st) => lhs * st.to_ibig(),
            Repr::Heap(n) => lhs * n,
        };
        self.repr = Repr::Heap(r);
    }

    /// Truncating division with remainder.
    ///
    /// The quotient sign is the xor of the operand signs; the remainder sign
    /// matches the dividend sign.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroDivision`] if `rhs` is zero.
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self)> {
        if rhs.is_zero() {
            return Err(Error::ZeroDivision("integer division by zero"));
        }
        match (&self.repr, &rhs.repr) {
            (Repr::Inline(a), Repr::Inline(b)) => {
                let (q, r) = StaticInt::div_rem(a, b);
                Ok((
                    Self {
                        repr: Repr::Inline(q),
                    },
                    Self {
                        repr: Repr::Inline(r),
                    },
                ))
            }
            _ => {
                let a = self.to_ibig();
                let b = rhs.to_ibig();
                Ok((
                    Self {
                        repr: Repr::Heap(&a / &b),
                    },
                    Self {
                        repr: Repr::Heap(&a % &b),
                    },
                ))
            }
        }
    }

    /// Truncating quotient.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroDivision`] if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self.div_rem(rhs)?.0)
    }

    /// Remainder of truncating division.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroDivision`] if `rhs` is zero.
    pub fn checked_rem(&self, rhs: &Self) -> Result<Self> {
        Ok(self.div_rem(rhs)?.1)
    }

    /// In-place fused multiply-add: `self += y * z`.
    ///
    /// The inline fast path attempts a two-limb multiply of `y` and `z` and
    /// folds it into `self`; on overflow the operation restarts on the heap
    /// with only the operands that need conversion converted. The target is
    /// never left in an intermediate state.
    pub fn multiply_accumulate(&mut self, y: &Self, z: &Self) {
        if let (Repr::Inline(a), Repr::Inline(b), Repr::Inline(c)) =
            (&self.repr, &y.repr, &z.repr)
        {
            let mut tmp = *a;
            if tmp.checked_add_mul(b, c).is_ok() {
                self.repr = Repr::Inline(tmp);
                return;
            }
        }
        let acc = self.take_ibig();
        let prod = match (&y.repr, &z.repr) {
            (Repr::Inline(b), Repr::Inline(c)) => b.to_ibig() * c.to_ibig(),
            (Repr::Inline(b), Repr::Heap(nc)) => b.to_ibig() * nc,
            (Repr::Heap(nb), Repr::Inline(c)) => c.to_ibig() * nb,
            (Repr::Heap(nb), Repr::Heap(nc)) => nb * nc,
        };
        self.repr = Repr::Heap(acc + prod);
    }
}

// === Construction from native integers ===

macro_rules! impl_from_signed {
    ($($t:ty),* $(,)?) => {$(
        impl<const BITS: u32> From<$t> for SmallInt<BITS> {
            fn from(n: $t) -> Self {
                Self::from_magnitude(n.unsigned_abs() as u128, n < 0)
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),* $(,)?) => {$(
        impl<const BITS: u32> From<$t> for SmallInt<BITS> {
            fn from(n: $t) -> Self {
                Self::from_magnitude(n as u128, false)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, i128, isize);
impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl<const BITS: u32> TryFrom<f64> for SmallInt<BITS> {
    type Error = Error;

    fn try_from(x: f64) -> Result<Self> {
        Self::from_f64(x)
    }
}

impl<const BITS: u32> TryFrom<f32> for SmallInt<BITS> {
    type Error = Error;

    fn try_from(x: f32) -> Result<Self> {
        Self::from_f32(x)
    }
}

// === Conversion back to native integers ===

macro_rules! impl_try_into_signed {
    ($($t:ty),* $(,)?) => {$(
        impl<const BITS: u32> TryFrom<&SmallInt<BITS>> for $t {
            type Error = Error;

            fn try_from(n: &SmallInt<BITS>) -> Result<$t> {
                const MSG: &str = concat!("value out of range for ", stringify!($t));
                let (mag, negative) = n.magnitude_u128()?;
                if negative {
                    let min_mag = <$t>::MIN.unsigned_abs() as u128;
                    match mag.cmp(&min_mag) {
                        Ordering::Greater => Err(Error::Overflow(MSG)),
                        Ordering::Equal => Ok(<$t>::MIN),
                        Ordering::Less => Ok(-(mag as $t)),
                    }
                } else if mag > <$t>::MAX as u128 {
                    Err(Error::Overflow(MSG))
                } else {
                    Ok(mag as $t)
                }
            }
        }
    )*};
}

macro_rules! impl_try_into_unsigned {
    ($($t:ty),* $(,)?) => {$(
        impl<const BITS: u32> TryFrom<&SmallInt<BITS>> for $t {
            type Error = Error;

            fn try_from(n: &SmallInt<BITS>) -> Result<$t> {
                const MSG: &str = concat!("value out of range for ", stringify!($t));
                let (mag, negative) = n.magnitude_u128()?;
                if negative || mag > <$t>::MAX as u128 {
                    Err(Error::Overflow(MSG))
                } else {
                    Ok(mag as $t)
                }
            }
        }
    )*};
}

impl_try_into_signed!(i8, i16, i32, i64, i128, isize);
impl_try_into_unsigned!(u8, u16, u32, u64, u128, usize);

// === Decimal I/O ===

fn validate_decimal(s: &str) -> Result<()> {
    const MSG: &str = "invalid decimal string for integer type";
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(Error::InvalidArgument(MSG));
    }
    let has_minus = bytes[0] == b'-';
    let digits = &bytes[usize::from(has_minus)..];
    if digits.is_empty() {
        return Err(Error::InvalidArgument(MSG));
    }
    // A numeral starting with zero cannot be multi-digit and "-0" is not a
    // valid spelling of zero.
    if digits[0] == b'0' && (digits.len() > 1 || has_minus) {
        return Err(Error::InvalidArgument(MSG));
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::InvalidArgument(MSG));
    }
    Ok(())
}

impl<const BITS: u32> FromStr for SmallInt<BITS> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        validate_decimal(s)?;
        let n = IBig::from_str_radix(s, 10)
            .map_err(|_| Error::InvalidArgument("invalid decimal string for integer type"))?;
        Ok(Self::from_ibig(n))
    }
}

impl<const BITS: u32> fmt::Display for SmallInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Inline(st) => {
                if st.is_negative() {
                    write!(f, "-")?;
                }
                write!(f, "{}", st.magnitude())
            }
            Repr::Heap(n) => write!(f, "{n}"),
        }
    }
}

impl<const BITS: u32> fmt::Debug for SmallInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SmallInt({self})")
    }
}

// === Comparison ===

impl<const BITS: u32> PartialEq for SmallInt<BITS> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Inline(a), Repr::Inline(b)) => a == b,
            (Repr::Heap(a), Repr::Heap(b)) => a == b,
            (Repr::Inline(a), Repr::Heap(b)) => a.to_ibig() == *b,
            (Repr::Heap(a), Repr::Inline(b)) => *a == b.to_ibig(),
        }
    }
}

impl<const BITS: u32> Eq for SmallInt<BITS> {}

impl<const BITS: u32> PartialOrd for SmallInt<BITS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const BITS: u32> Ord for SmallInt<BITS> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.repr, &other.repr) {
            (Repr::Inline(a), Repr::Inline(b)) => a.cmp(b),
            (Repr::Heap(a), Repr::Heap(b)) => a.cmp(b),
            (Repr::Inline(a), Repr::Heap(b)) => a.to_ibig().cmp(b),
            (Repr::Heap(a), Repr::Inline(b)) => a.cmp(&b.to_ibig()),
        }
    }
}

// === Arithmetic operators ===

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $impl_fn:ident) => {
        impl<const BITS: u32> $assign_trait<&SmallInt<BITS>> for SmallInt<BITS> {
            fn $assign_method(&mut self, rhs: &Self) {
                self.$impl_fn(rhs);
            }
        }

        impl<const BITS: u32> $assign_trait for SmallInt<BITS> {
            fn $assign_method(&mut self, rhs: Self) {
                self.$impl_fn(&rhs);
            }
        }

        impl<const BITS: u32> $trait for SmallInt<BITS> {
            type Output = Self;

            fn $method(mut self, rhs: Self) -> Self {
                self.$impl_fn(&rhs);
                self
            }
        }

        impl<const BITS: u32> $trait<&SmallInt<BITS>> for SmallInt<BITS> {
            type Output = Self;

            fn $method(mut self, rhs: &Self) -> Self {
                self.$impl_fn(rhs);
                self
            }
        }

        impl<const BITS: u32> $trait for &SmallInt<BITS> {
            type Output = SmallInt<BITS>;

            fn $method(self, rhs: Self) -> SmallInt<BITS> {
                let mut r = self.clone();
                r.$impl_fn(rhs);
                r
            }
        }
    };
}

impl_binop!(Add, add, AddAssign, add_assign, add_assign_impl);
impl_binop!(Sub, sub, SubAssign, sub_assign, sub_assign_impl);
impl_binop!(Mul, mul, MulAssign, mul_assign, mul_assign_impl);

macro_rules! impl_divop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $checked:ident) => {
        impl<const BITS: u32> $trait for SmallInt<BITS> {
            type Output = Self;

            /// # Panics
            ///
            /// Panics if `rhs` is zero; use the checked methods to handle
            /// that case as an error.
            fn $method(self, rhs: Self) -> Self {
                self.$checked(&rhs).expect("division by zero")
            }
        }

        impl<const BITS: u32> $trait<&SmallInt<BITS>> for SmallInt<BITS> {
            type Output = Self;

            /// # Panics
            ///
            /// Panics if `rhs` is zero.
            fn $method(self, rhs: &Self) -> Self {
                self.$checked(rhs).expect("division by zero")
            }
        }

        impl<const BITS: u32> $trait for &SmallInt<BITS> {
            type Output = SmallInt<BITS>;

            /// # Panics
            ///
            /// Panics if `rhs` is zero.
            fn $method(self, rhs: Self) -> SmallInt<BITS> {
                self.$checked(rhs).expect("division by zero")
            }
        }

        impl<const BITS: u32> $assign_trait<&SmallInt<BITS>> for SmallInt<BITS> {
            fn $assign_method(&mut self, rhs: &Self) {
                *self = self.$checked(rhs).expect("division by zero");
            }
        }

        impl<const BITS: u32> $assign_trait for SmallInt<BITS> {
            fn $assign_method(&mut self, rhs: Self) {
                *self = self.$checked(&rhs).expect("division by zero");
            }
        }
    };
}

impl_divop!(Div, div, DivAssign, div_assign, checked_div);
impl_divop!(Rem, rem, RemAssign, rem_assign, checked_rem);

impl<const BITS: u32> Neg for SmallInt<BITS> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

impl<const BITS: u32> Neg for &SmallInt<BITS> {
    type Output = SmallInt<BITS>;

    fn neg(self) -> SmallInt<BITS> {
        let mut r = self.clone();
        r.negate();
        r
    }
}

// === num-traits integration ===

impl<const BITS: u32> Zero for SmallInt<BITS> {
    fn zero() -> Self {
        Self::new()
    }

    fn is_zero(&self) -> bool {
        SmallInt::is_zero(self)
    }
}

impl<const BITS: u32> One for SmallInt<BITS> {
    fn one() -> Self {
        Self::from(1i32)
    }

    fn is_one(&self) -> bool {
        match &self.repr {
            Repr::Inline(st) => st.is_one(),
            Repr::Heap(n) => *n == IBig::ONE,
        }
    }
}
