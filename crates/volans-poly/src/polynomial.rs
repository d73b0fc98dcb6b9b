//! Sparse polynomials as hopscotch tables of terms.
//!
//! A polynomial is a set of unique terms keyed by monomial; the coefficient
//! rides along and is folded in place when equal monomials meet. This is the
//! representation the two kernel cores exist for: lookups during term
//! accumulation hit the table's virtual-bucket fast path, and coefficient
//! updates stay on the integer's inline fast path until they genuinely
//! outgrow it.

use std::fmt;

use num_traits::One;

use volans_core::{Error, Result};
use volans_integers::Integer;
use volans_table::HopTable;

use crate::monomial::Monomial;

/// One term of a polynomial.
///
/// Identity (equality and hashing) is the monomial alone: a polynomial never
/// holds two terms with the same monomial, and coefficient updates must not
/// move a term between buckets.
#[derive(Clone, Debug)]
pub struct Term {
    /// The monomial key.
    pub monomial: Monomial,
    /// The coefficient carried by this monomial.
    pub coefficient: Integer,
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.monomial == other.monomial
    }
}

impl Eq for Term {}

impl std::hash::Hash for Term {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.monomial.hash(state);
    }
}

/// A sparse multivariate polynomial with integer coefficients.
#[derive(Clone, Debug)]
pub struct Polynomial {
    terms: HopTable<Term>,
    num_vars: usize,
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.num_vars == other.num_vars
            && self.terms.len() == other.terms.len()
            && self
                .terms
                .iter()
                .all(|t| other.coefficient(&t.monomial) == Some(&t.coefficient))
    }
}

impl Eq for Polynomial {}

impl Polynomial {
    /// The zero polynomial over `num_vars` variables.
    #[must_use]
    pub fn zero(num_vars: usize) -> Self {
        Self {
            terms: HopTable::new(),
            num_vars,
        }
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(c: Integer, num_vars: usize) -> Self {
        let mut p = Self::zero(num_vars);
        if !c.is_zero() {
            p.add_term(Monomial::one(num_vars), c)
                .unwrap_or_else(|_| unreachable!("fresh table cannot exhaust the ladder"));
        }
        p
    }

    /// The polynomial `x_i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_vars`.
    #[must_use]
    pub fn var(i: usize, num_vars: usize) -> Self {
        let mut p = Self::zero(num_vars);
        p.add_term(Monomial::var(i, num_vars), Integer::one())
            .unwrap_or_else(|_| unreachable!("fresh table cannot exhaust the ladder"));
        p
    }

    /// Number of variables of the ambient symbol set.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if this is the zero polynomial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The coefficient of `monomial`, if that term is present.
    #[must_use]
    pub fn coefficient(&self, monomial: &Monomial) -> Option<&Integer> {
        let probe = Term {
            monomial: monomial.clone(),
            coefficient: Integer::new(),
        };
        self.terms.find(&probe).map(|t| &t.coefficient)
    }

    /// Iterates over the terms in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    /// Largest total degree among the terms; zero for the zero polynomial.
    #[must_use]
    pub fn total_degree(&self) -> u64 {
        self.terms
            .iter()
            .map(|t| t.monomial.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Adds `coefficient * monomial`, folding into an existing term with the
    /// same monomial and dropping the term if the fold cancels to zero.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the monomial was built over a different
    /// symbol set; [`Error::AllocationFailure`] if the term table cannot
    /// grow.
    pub fn add_term(&mut self, monomial: Monomial, coefficient: Integer) -> Result<()> {
        if monomial.num_vars() != self.num_vars {
            return Err(Error::InvalidArgument("mismatched symbol set sizes"));
        }
        if coefficient.is_zero() {
            return Ok(());
        }
        let probe = Term {
            monomial,
            coefficient: Integer::new(),
        };
        match self.terms.remove(&probe) {
            Some(mut term) => {
                term.coefficient += coefficient;
                if !term.coefficient.is_zero() {
                    self.terms.insert(term)?;
                }
            }
            None => {
                self.terms.insert(Term {
                    monomial: probe.monomial,
                    coefficient,
                })?;
            }
        }
        Ok(())
    }

    /// Adds `y * z * monomial` through the integer fused multiply-add.
    fn accumulate_product(&mut self, monomial: Monomial, y: &Integer, z: &Integer) -> Result<()> {
        let probe = Term {
            monomial,
            coefficient: Integer::new(),
        };
        let mut term = self.terms.remove(&probe).unwrap_or(probe);
        term.coefficient.multiply_accumulate(y, z);
        if !term.coefficient.is_zero() {
            self.terms.insert(term)?;
        }
        Ok(())
    }

    /// Adds two polynomials.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] on mismatched symbol sets;
    /// [`Error::AllocationFailure`] if the term table cannot grow.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        if self.num_vars != other.num_vars {
            return Err(Error::InvalidArgument("mismatched symbol set sizes"));
        }
        let mut out = self.clone();
        for t in other.terms.iter() {
            out.add_term(t.monomial.clone(), t.coefficient.clone())?;
        }
        Ok(out)
    }

    /// Subtracts `other` from `self`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Polynomial::try_add`].
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.try_add(&other.neg())
    }

    /// Returns the negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        let mut out = Self::zero(self.num_vars);
        for t in self.terms.iter() {
            let mut c = t.coefficient.clone();
            c.negate();
            out.add_term(t.monomial.clone(), c)
                .unwrap_or_else(|_| unreachable!("negation cannot outgrow the source table"));
        }
        out
    }

    /// Multiplies two polynomials term by term, folding products of equal
    /// monomials with the fused multiply-add.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] on mismatched symbol sets;
    /// [`Error::Overflow`] on exponent overflow;
    /// [`Error::AllocationFailure`] if the term table cannot grow.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        if self.num_vars != other.num_vars {
            return Err(Error::InvalidArgument("mismatched symbol set sizes"));
        }
        let mut out = Self::zero(self.num_vars);
        for t1 in self.terms.iter() {
            for t2 in other.terms.iter() {
                let m = t1.monomial.try_mul(&t2.monomial)?;
                out.accumulate_product(m, &t1.coefficient, &t2.coefficient)?;
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut terms: Vec<&Term> = self.terms.iter().collect();
        terms.sort_by(|a, b| {
            b.monomial
                .total_degree()
                .cmp(&a.monomial.total_degree())
                .then_with(|| b.monomial.exponents().cmp(a.monomial.exponents()))
        });
        let rendered: Vec<String> = terms
            .iter()
            .map(|t| {
                if t.monomial.is_unitary() {
                    t.coefficient.to_string()
                } else if t.coefficient.is_one() {
                    t.monomial.to_string()
                } else {
                    format!("{}*{}", t.coefficient, t.monomial)
                }
            })
            .collect();
        write!(f, "{}", rendered.join(" + "))
    }
}
