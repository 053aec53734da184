use crate::utils::error::{BundlerError, DomainError, Result};

/// Success value or failure cause, carried across the bundling layers.
///
/// Business-rule failures and data-access failures both travel as
/// [`BundlerError`]; use [`BundlerError::category`] to tell them apart.
#[derive(Debug)]
pub enum Outcome<T> {
    Value(T),
    Error(BundlerError),
}

impl<T> Outcome<T> {
    pub fn from_value(value: T) -> Self {
        Self::Value(value)
    }

    pub fn from_error(error: impl Into<BundlerError>) -> Self {
        Self::Error(error.into())
    }

    pub fn has_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn has_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&BundlerError> {
        match self {
            Self::Value(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    /// # Panics
    ///
    /// Panics with the stored error when the outcome is a failure.
    pub fn value(&self) -> &T {
        match self {
            Self::Value(value) => value,
            Self::Error(error) => panic!("{}", error),
        }
    }

    /// # Panics
    ///
    /// Panics with the stored error when the outcome is a failure.
    pub fn into_value(self) -> T {
        match self {
            Self::Value(value) => value,
            Self::Error(error) => panic!("{}", error),
        }
    }

    /// # Panics
    ///
    /// Panics when the outcome holds a value.
    pub fn error(&self) -> &BundlerError {
        match self {
            Self::Value(_) => panic!("The result contains no errors."),
            Self::Error(error) => error,
        }
    }

    /// # Panics
    ///
    /// Panics when the outcome holds a value.
    pub fn into_error(self) -> BundlerError {
        match self {
            Self::Value(_) => panic!("The result contains no errors."),
            Self::Error(error) => error,
        }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(error) => Err(error),
        }
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::Error(BundlerError::EmptyOutcome)
    }
}

impl<T: PartialEq> PartialEq for Outcome<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Error(error),
        }
    }
}

impl<T> From<BundlerError> for Outcome<T> {
    fn from(error: BundlerError) -> Self {
        Self::Error(error)
    }
}

impl<T> From<DomainError> for Outcome<T> {
    fn from(error: DomainError) -> Self {
        Self::Error(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        let outcome = Outcome::from_value("Test Value".to_string());

        assert!(outcome.has_value());
        assert!(!outcome.has_error());
        assert_eq!(outcome.value(), "Test Value");
        assert_eq!(outcome.as_error(), None);
    }

    #[test]
    fn test_from_error() {
        let outcome: Outcome<String> = Outcome::from_error(BundlerError::repository("Test Error"));

        assert!(!outcome.has_value());
        assert!(outcome.has_error());
        assert_eq!(outcome.error(), &BundlerError::repository("Test Error"));
        assert!(outcome.as_value().is_none());
    }

    #[test]
    fn test_default_is_empty_result_error() {
        let outcome: Outcome<u32> = Outcome::default();

        assert!(outcome.has_error());
        assert_eq!(outcome.error().to_string(), "Empty result");
    }

    #[test]
    #[should_panic(expected = "Test Error")]
    fn test_value_panics_with_stored_error() {
        let outcome: Outcome<String> = BundlerError::repository("Test Error").into();
        outcome.into_value();
    }

    #[test]
    #[should_panic(expected = "The result contains no errors.")]
    fn test_error_panics_when_value_present() {
        let outcome = Outcome::from_value(1);
        outcome.error();
    }

    #[test]
    fn test_equality() {
        assert_eq!(Outcome::from_value("a"), Outcome::from_value("a"));
        assert_ne!(Outcome::from_value("a"), Outcome::from_value("b"));

        let err_a: Outcome<&str> = DomainError::NoTopics.into();
        let err_b: Outcome<&str> = DomainError::NoTopics.into();
        assert_eq!(err_a, err_b);

        let mixed: Outcome<&str> = DomainError::NoTopicsMatched.into();
        assert_ne!(Outcome::from_value("a"), mixed);
    }

    #[test]
    fn test_into_result_roundtrip() {
        let ok: Outcome<i32> = Ok(7).into();
        assert_eq!(ok.into_result().ok(), Some(7));

        let failed: Outcome<i32> = Err(BundlerError::Cancelled).into();
        assert!(matches!(failed.into_result(), Err(BundlerError::Cancelled)));
    }
}
