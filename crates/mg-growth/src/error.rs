use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrowthError {
    /// `growth_factor` was asked to measure distance from a zero optimum.
    #[error("growth factor optimum is zero (value {value})")]
    DivideByZero { value: f64 },

    /// A supply-limited model was given a demand or reference mass it cannot
    /// divide by.
    #[error("{crop}: {what} must be positive, got {value}")]
    NonPositive { crop: String, what: &'static str, value: f64 },

    /// A growth step produced NaN or an infinity.
    #[error("{quantity} became non-finite ({value})")]
    NumericOverflow { quantity: &'static str, value: f64 },
}

pub type GrowthResult<T> = Result<T, GrowthError>;
