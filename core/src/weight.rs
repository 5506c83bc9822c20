use std::fmt::Debug;

/// Edge weight: a totally ordered number with a saturating infinity sentinel.
///
/// `INFINITY` doubles as "unreachable" in the distance matrix, so
/// `saturating_add` must return it whenever either operand is infinite
/// instead of wrapping or overflowing into a finite value.
pub trait Weight: Copy + Ord + Debug + Send + Sync + 'static {
    const ZERO: Self;
    const INFINITY: Self;

    fn saturating_add(self, other: Self) -> Self;

    fn is_infinite(self) -> bool {
        self == Self::INFINITY
    }
}

macro_rules! impl_weight {
    ($($t:ty),* $(,)?) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0;
                const INFINITY: Self = <$t>::MAX;

                #[inline]
                fn saturating_add(self, other: Self) -> Self {
                    if self == Self::INFINITY || other == Self::INFINITY {
                        return Self::INFINITY;
                    }
                    <$t>::saturating_add(self, other)
                }
            }
        )*
    };
}

impl_weight!(i32, i64, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinity_absorbs() {
        assert_eq!(Weight::saturating_add(<i32 as Weight>::INFINITY, 5), i32::MAX);
        assert_eq!(Weight::saturating_add(5u64, <u64 as Weight>::INFINITY), u64::MAX);
    }

    #[test]
    fn test_finite_sum_saturates() {
        assert_eq!(Weight::saturating_add(i32::MAX - 1, 10), i32::MAX);
        assert_eq!(Weight::saturating_add(2i64, 3), 5);
    }

    #[test]
    fn test_negative_infinity_operand_is_finite() {
        // Only MAX is the sentinel; MIN is an ordinary (if extreme) value.
        assert_eq!(Weight::saturating_add(i32::MIN, 1), i32::MIN + 1);
        assert!(!Weight::is_infinite(i32::MIN));
    }
}
