//! Error types surfaced by domain services.

/// Input rejected before anything reaches the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Category and amount are required")]
    MissingCategoryOrAmount,
    #[error("Amount is required")]
    MissingAmount,
    #[error("Amount must be a number")]
    AmountNotANumber,
    #[error("Amount must be greater than zero")]
    AmountNotPositive,
    #[error("Amount can have at most two decimal places")]
    AmountPrecisionTooHigh,
    #[error("Amount must be less than {0}")]
    AmountTooLarge(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("All fields are required")]
    MissingRegistrationFields,
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("{0} is not a valid month")]
    InvalidPeriod(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User with this email already exists")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthorized,
    #[error("persistence failure: {0:#}")]
    Persistence(#[from] anyhow::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
