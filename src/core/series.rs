//! Three ways of summing the integers `1..=n`.

use thiserror::Error;

/// Deepest recursion `sum_recursive` will attempt.
pub const MAX_RECURSION_DEPTH: u64 = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Sum of 1..={n} overflows a 64-bit integer")]
    Overflow { n: u64 },

    #[error("n = {n} exceeds the recursion limit of {limit}")]
    TooDeep { n: u64, limit: u64 },
}

/// Iterative sum.
pub fn sum_loop(n: u64) -> Result<u64, SeriesError> {
    let mut sum: u64 = 0;
    for i in 1..=n {
        sum = sum.checked_add(i).ok_or(SeriesError::Overflow { n })?;
    }
    Ok(sum)
}

/// Closed form `n(n+1)/2`, halving whichever factor is even first.
pub fn sum_formula(n: u64) -> Result<u64, SeriesError> {
    let (a, b) = if n % 2 == 0 {
        (n / 2, n.checked_add(1))
    } else {
        (n, n.checked_add(1).map(|m| m / 2))
    };
    b.and_then(|b| a.checked_mul(b))
        .ok_or(SeriesError::Overflow { n })
}

/// Recursive sum, limited to [`MAX_RECURSION_DEPTH`] frames.
pub fn sum_recursive(n: u64) -> Result<u64, SeriesError> {
    if n > MAX_RECURSION_DEPTH {
        return Err(SeriesError::TooDeep {
            n,
            limit: MAX_RECURSION_DEPTH,
        });
    }
    recurse(n).ok_or(SeriesError::Overflow { n })
}

fn recurse(n: u64) -> Option<u64> {
    if n == 0 {
        return Some(0);
    }
    recurse(n - 1)?.checked_add(n)
}

/// Results of all three strategies for one `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesReport {
    pub n: u64,
    pub looped: Result<u64, SeriesError>,
    pub formula: Result<u64, SeriesError>,
    pub recursive: Result<u64, SeriesError>,
}

impl SeriesReport {
    pub fn compute(n: u64) -> Self {
        Self {
            n,
            looped: sum_loop(n),
            formula: sum_formula(n),
            recursive: sum_recursive(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_strategies_agree() {
        for n in [0, 1, 2, 5, 100, 9_999] {
            let expected = n * (n + 1) / 2;
            let report = SeriesReport::compute(n);
            assert_eq!(report.looped, Ok(expected), "loop n={n}");
            assert_eq!(report.formula, Ok(expected), "formula n={n}");
            assert_eq!(report.recursive, Ok(expected), "recursive n={n}");
        }
        assert_eq!(sum_formula(100), Ok(5050));
    }

    #[test]
    fn test_formula_overflow() {
        assert_eq!(sum_formula(u64::MAX), Err(SeriesError::Overflow { n: u64::MAX }));
        // Largest n whose sum still fits.
        assert!(sum_formula(6_074_000_999).is_ok());
        assert!(sum_formula(6_074_001_000).is_err());
    }

    #[test]
    fn test_recursion_limit() {
        assert!(sum_recursive(MAX_RECURSION_DEPTH).is_ok());
        assert_eq!(
            sum_recursive(MAX_RECURSION_DEPTH + 1),
            Err(SeriesError::TooDeep {
                n: MAX_RECURSION_DEPTH + 1,
                limit: MAX_RECURSION_DEPTH
            })
        );
    }
}
