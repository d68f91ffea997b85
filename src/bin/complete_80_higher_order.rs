use std::iter::Sum;

// =============================================================================
// Milestone 1: A function that takes a function
// =============================================================================

/// Applies `f` to every value and returns the sum of the results.
pub fn add<T, R, F>(f: F, values: impl IntoIterator<Item = T>) -> R
where
    F: Fn(T) -> R,
    R: Sum<R>,
{
    values.into_iter().map(f).sum()
}

/// Variadic call shape: `add!(f, a, b, c)`.
macro_rules! add {
    ($f:expr $(, $value:expr)* $(,)?) => {
        add($f, [$($value),*])
    };
}

fn main() {
    println!("{}", add!(i64::abs, 10, -20, 30, -40));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_abs() {
        assert_eq!(add(i64::abs, [10, -20, 30, -40]), 100);
        assert_eq!(add!(i64::abs, 10, -20, 30, -40), 100);
    }

    #[test]
    fn test_add_with_closure() {
        assert_eq!(add!(|x: i32| x * 2, 1, 2, 3), 12);
    }

    #[test]
    fn test_add_changes_type() {
        let total: f64 = add(|s: &str| s.len() as f64 / 2.0, ["ab", "abcd"]);
        assert_eq!(total, 3.0);
    }

    #[test]
    fn test_add_nothing_is_zero() {
        let total: i64 = add(i64::abs, Vec::<i64>::new());
        assert_eq!(total, 0);
    }

    proptest! {
        #[test]
        fn prop_order_does_not_matter(
            (values, shuffled) in prop::collection::vec(-1000i64..1000, 0..32)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            prop_assert_eq!(
                add(i64::abs, values.iter().copied()),
                add(i64::abs, shuffled.iter().copied())
            );
        }
    }
}
