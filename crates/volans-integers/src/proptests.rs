//! Property-based tests for the small-value-optimised integers.
//!
//! Arithmetic is checked against `i128` as the reference model, on both the
//! default 64-bit limb configuration and the 8-bit configuration, where two
//! limbs hold only 16 bits and nearly every operation crosses the promotion
//! boundary.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::static_int::StaticInt;
    use crate::{Integer, SmallInt};

    fn int_value() -> impl Strategy<Value = i64> {
        prop_oneof![-1000i64..1000i64, any::<i64>()]
    }

    fn non_zero() -> impl Strategy<Value = i64> {
        int_value().prop_filter("nonzero", |n| *n != 0)
    }

    proptest! {
        // Decimal I/O

        #[test]
        fn decimal_round_trip(a in int_value()) {
            let v = Integer::from(a);
            let s = v.to_string();
            prop_assert_eq!(s.parse::<Integer>().unwrap(), v);
        }

        #[test]
        fn decimal_round_trip_wide(a in any::<i128>(), b in any::<i64>()) {
            // Products of wide operands exceed the inline envelope often.
            let v = Integer::from(a) * Integer::from(b);
            let s = v.to_string();
            prop_assert_eq!(s.parse::<Integer>().unwrap(), v);
        }

        #[test]
        fn decimal_round_trip_narrow_limbs(a in any::<i64>()) {
            let v = SmallInt::<8>::from(a);
            prop_assert_eq!(v.to_string(), a.to_string());
            prop_assert_eq!(v.to_string().parse::<SmallInt<8>>().unwrap(), v);
        }

        // Ring identities

        #[test]
        fn add_sub_cancels(a in int_value(), b in int_value()) {
            let va = Integer::from(a);
            let r = (va.clone() + Integer::from(b)) - Integer::from(b);
            prop_assert_eq!(r, va);
        }

        #[test]
        fn add_sub_cancels_narrow_limbs(a in int_value(), b in int_value()) {
            let va = SmallInt::<8>::from(a);
            let r = (va.clone() + SmallInt::<8>::from(b)) - SmallInt::<8>::from(b);
            prop_assert_eq!(r, va);
        }

        #[test]
        fn mul_div_cancels(a in int_value(), b in non_zero()) {
            let va = Integer::from(a);
            let r = (va.clone() * Integer::from(b))
                .checked_div(&Integer::from(b))
                .unwrap();
            prop_assert_eq!(r, va);
        }

        #[test]
        fn neg_add_is_zero(a in int_value()) {
            let va = Integer::from(a);
            prop_assert!((-va.clone() + va).is_zero());
        }

        #[test]
        fn product_magnitude_grows(a in int_value(), b in non_zero()) {
            let prod = (Integer::from(a) * Integer::from(b)).abs();
            prop_assert!(prod >= Integer::from(a).abs());
        }

        // Reference model

        #[test]
        fn matches_i128_reference(a in any::<i64>(), b in any::<i64>()) {
            let (wa, wb) = (i128::from(a), i128::from(b));
            let (va, vb) = (SmallInt::<8>::from(a), SmallInt::<8>::from(b));
            prop_assert_eq!(va.clone() + &vb, SmallInt::<8>::from(wa + wb));
            prop_assert_eq!(va.clone() - &vb, SmallInt::<8>::from(wa - wb));
            prop_assert_eq!(va.clone() * &vb, SmallInt::<8>::from(wa * wb));
            if b != 0 {
                let (q, r) = va.div_rem(&vb).unwrap();
                prop_assert_eq!(q, SmallInt::<8>::from(wa / wb));
                prop_assert_eq!(r, SmallInt::<8>::from(wa % wb));
            }
        }

        #[test]
        fn fused_multiply_add_matches(a in int_value(), y in int_value(), z in int_value()) {
            let mut v = SmallInt::<16>::from(a);
            v.multiply_accumulate(&SmallInt::<16>::from(y), &SmallInt::<16>::from(z));
            let expected = i128::from(a) + i128::from(y) * i128::from(z);
            prop_assert_eq!(v, SmallInt::<16>::from(expected));
        }

        // Conversions

        #[test]
        fn native_round_trip(a in any::<i64>()) {
            prop_assert_eq!(i64::try_from(&Integer::from(a)), Ok(a));
            prop_assert_eq!(i64::try_from(&SmallInt::<8>::from(a)), Ok(a));
        }

        #[test]
        fn native_round_trip_unsigned(a in any::<u64>()) {
            prop_assert_eq!(u64::try_from(&Integer::from(a)), Ok(a));
        }

        #[test]
        fn float_agrees_with_native(a in -(1i64 << 53)..(1i64 << 53)) {
            // Exactly representable range of f64.
            let v = Integer::from_f64(a as f64).unwrap();
            prop_assert_eq!(v, Integer::from(a));
            prop_assert_eq!(Integer::from(a).to_f64(), a as f64);
        }

        // Ordering

        #[test]
        fn ordering_matches_native(a in int_value(), b in int_value()) {
            prop_assert_eq!(Integer::from(a).cmp(&Integer::from(b)), a.cmp(&b));
            let mut pa = Integer::from(a);
            pa.promote().unwrap();
            prop_assert_eq!(pa.cmp(&Integer::from(b)), a.cmp(&b));
        }

        // Inline bit surface

        #[test]
        fn bit_surface_matches_magnitude(mag in 0u128..=u16::MAX as u128) {
            let st = StaticInt::<8>::try_from_magnitude(mag).ok().unwrap();
            prop_assert!(st.invariants_hold());
            for i in 0..16u32 {
                prop_assert_eq!(st.test_bit(i), mag & (1 << i) != 0);
            }
            prop_assert_eq!(st.bits_size(), 128 - mag.leading_zeros());

            let mut rebuilt = StaticInt::<8>::zero();
            for i in 0..16u32 {
                if mag & (1 << i) != 0 {
                    rebuilt.set_bit(i);
                }
            }
            prop_assert_eq!(rebuilt, st);
            rebuilt.clear_extra_bits();
            prop_assert_eq!(rebuilt, st);
        }
    }
}
