//! Errors raised while *building* an operator chain.
//!
//! These never travel through [`Observer::error`](crate::observer::Observer):
//! stream errors are the observable's own `Err` type and are delivered to the
//! observer, while an `RxError` is returned to whoever called the builder,
//! before anything has been subscribed.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RxError {
  /// An operator argument is outside its valid range.
  #[error("argument `{name}` is out of range: {value}")]
  ArgumentOutOfRange { name: &'static str, value: i64 },
}

/// Converts a signed count into `usize`, rejecting negatives.
pub(crate) fn non_negative(name: &'static str, value: i64) -> Result<usize, RxError> {
  usize::try_from(value).map_err(|_| RxError::ArgumentOutOfRange { name, value })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_zero_and_positive() {
    assert_eq!(non_negative("count", 0), Ok(0));
    assert_eq!(non_negative("count", 42), Ok(42));
  }

  #[test]
  fn rejects_negative() {
    let err = non_negative("count", -1).unwrap_err();
    assert_eq!(err, RxError::ArgumentOutOfRange { name: "count", value: -1 });
    assert_eq!(err.to_string(), "argument `count` is out of range: -1");
  }
}
