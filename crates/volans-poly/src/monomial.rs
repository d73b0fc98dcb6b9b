//! Monomials as explicit exponent vectors.
//!
//! Unlike packed representations, an explicit vector supports any number of
//! variables; the small-vector inline capacity keeps the common low-arity
//! case allocation-free. All binary operations insist that both operands
//! were built over the same symbol set, surfacing a mismatch as an error
//! rather than silently misaligning exponents.

use std::fmt;

use smallvec::SmallVec;

use volans_core::{Error, Result};

/// Inline capacity of the exponent vector.
const INLINE_VARS: usize = 8;

/// A monomial: one exponent per variable of the ambient symbol set.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Monomial {
    exps: SmallVec<[u32; INLINE_VARS]>,
}

impl Monomial {
    /// The monomial 1 over `num_vars` variables (all exponents zero).
    #[must_use]
    pub fn one(num_vars: usize) -> Self {
        Self {
            exps: SmallVec::from_elem(0, num_vars),
        }
    }

    /// The monomial `x_i` over `num_vars` variables.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_vars`.
    #[must_use]
    pub fn var(i: usize, num_vars: usize) -> Self {
        assert!(i < num_vars);
        let mut m = Self::one(num_vars);
        m.exps[i] = 1;
        m
    }

    /// Builds a monomial from explicit exponents.
    #[must_use]
    pub fn from_exponents(exps: &[u32]) -> Self {
        Self {
            exps: SmallVec::from_slice(exps),
        }
    }

    /// Number of variables of the symbol set this monomial was built over.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.exps.len()
    }

    /// The exponent of variable `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn exponent(&self, i: usize) -> u32 {
        self.exps[i]
    }

    /// Sum of all exponents.
    #[must_use]
    pub fn total_degree(&self) -> u64 {
        self.exps.iter().map(|&e| u64::from(e)).sum()
    }

    /// True if every exponent is zero.
    #[must_use]
    pub fn is_unitary(&self) -> bool {
        self.exps.iter().all(|&e| e == 0)
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.exps.len() == other.exps.len() {
            Ok(())
        } else {
            Err(Error::InvalidArgument("mismatched symbol set sizes"))
        }
    }

    /// Multiplies two monomials by adding exponents.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the symbol set sizes differ,
    /// [`Error::Overflow`] if an exponent sum exceeds the exponent type.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let mut exps = SmallVec::with_capacity(self.exps.len());
        for (&a, &b) in self.exps.iter().zip(&other.exps) {
            exps.push(
                a.checked_add(b)
                    .ok_or(Error::Overflow("monomial exponent overflow"))?,
            );
        }
        Ok(Self { exps })
    }

    /// Divides by `other` if every exponent allows it, returning `None`
    /// when the division is not exact.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the symbol set sizes differ.
    pub fn try_div(&self, other: &Self) -> Result<Option<Self>> {
        self.check_compatible(other)?;
        let mut exps = SmallVec::with_capacity(self.exps.len());
        for (&a, &b) in self.exps.iter().zip(&other.exps) {
            match a.checked_sub(b) {
                Some(e) => exps.push(e),
                None => return Ok(None),
            }
        }
        Ok(Some(Self { exps }))
    }

    /// True if `other` divides `self`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the symbol set sizes differ.
    pub fn divisible_by(&self, other: &Self) -> Result<bool> {
        self.check_compatible(other)?;
        Ok(self.exps.iter().zip(&other.exps).all(|(&a, &b)| a >= b))
    }

    /// The exponents as a slice.
    #[must_use]
    pub fn exponents(&self) -> &[u32] {
        &self.exps
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [char; 6] = ['x', 'y', 'z', 'w', 'u', 'v'];
        let mut first = true;
        for (i, &e) in self.exps.iter().enumerate() {
            if e == 0 {
                continue;
            }
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if i < NAMES.len() {
                write!(f, "{}", NAMES[i])?;
            } else {
                write!(f, "x{i}")?;
            }
            if e > 1 {
                write!(f, "^{e}")?;
            }
        }
        if first {
            write!(f, "1")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let x = Monomial::var(0, 3);
        let y = Monomial::var(1, 3);
        assert_eq!(x.exponent(0), 1);
        assert_eq!(x.exponent(1), 0);
        assert_eq!(y.exponent(1), 1);
        assert_eq!(x.num_vars(), 3);
        assert!(Monomial::one(3).is_unitary());
    }

    #[test]
    fn test_mul_adds_exponents() {
        let x = Monomial::var(0, 2);
        let y = Monomial::var(1, 2);
        let xy = x.try_mul(&y).unwrap();
        assert_eq!(xy.exponents(), &[1, 1]);
        let x2y = x.try_mul(&xy).unwrap();
        assert_eq!(x2y.exponents(), &[2, 1]);
        assert_eq!(x2y.total_degree(), 3);
    }

    #[test]
    fn test_mismatched_symbol_sets() {
        let a = Monomial::one(2);
        let b = Monomial::one(3);
        assert_eq!(
            a.try_mul(&b),
            Err(Error::InvalidArgument("mismatched symbol set sizes"))
        );
        assert!(a.try_div(&b).is_err());
        assert!(a.divisible_by(&b).is_err());
    }

    #[test]
    fn test_division() {
        let x2y = Monomial::from_exponents(&[2, 1]);
        let xy = Monomial::from_exponents(&[1, 1]);
        assert_eq!(
            x2y.try_div(&xy).unwrap(),
            Some(Monomial::from_exponents(&[1, 0]))
        );
        assert_eq!(xy.try_div(&x2y).unwrap(), None);
        assert!(x2y.divisible_by(&xy).unwrap());
        assert!(!xy.divisible_by(&x2y).unwrap());
    }

    #[test]
    fn test_exponent_overflow() {
        let big = Monomial::from_exponents(&[u32::MAX]);
        let x = Monomial::var(0, 1);
        assert_eq!(
            big.try_mul(&x),
            Err(Error::Overflow("monomial exponent overflow"))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Monomial::one(3).to_string(), "1");
        assert_eq!(Monomial::from_exponents(&[2, 0, 1]).to_string(), "x^2*z");
    }
}
