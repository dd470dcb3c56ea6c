use std::fmt;

/// Why one evaluation of an assertion predicate did not hold.
///
/// `expected` and `observed` are kept as rendered text so the mismatch can
/// be reported verbatim after the last retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionMismatch {
    pub description: String,
    pub expected: String,
    pub observed: String,
}

impl AssertionMismatch {
    pub fn new(
        description: impl Into<String>,
        expected: impl fmt::Display,
        observed: impl fmt::Display,
    ) -> Self {
        Self {
            description: description.into(),
            expected: expected.to_string(),
            observed: observed.to_string(),
        }
    }
}

impl fmt::Display for AssertionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected={}, observed={}",
            self.description, self.expected, self.observed
        )
    }
}

/// Predicate result for `observed == expected`
pub fn expect_eq<T>(description: &str, expected: T, observed: T) -> Result<(), AssertionMismatch>
where
    T: PartialEq + fmt::Display,
{
    if observed == expected {
        Ok(())
    } else {
        Err(AssertionMismatch::new(description, expected, observed))
    }
}
