use thiserror::Error;

/// Fatal input error: no result is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },
    #[error("flour weight cannot be 0")]
    ZeroFlour,
    #[error("flour weight cannot be negative (got {0} g)")]
    NegativeFlour(f64),
    #[error("whole grain weight cannot be negative (got {0} g)")]
    NegativeWholeGrain(f64),
    #[error("calculation produced a non-finite {quantity}; check the recipe values")]
    NonFinite { quantity: &'static str },
}

pub type Result<T> = std::result::Result<T, InputError>;

/// Reject a non-finite intermediate instead of letting it flow downstream.
pub(crate) fn ensure_finite(quantity: &'static str, v: f64) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(InputError::NonFinite { quantity })
    }
}
