use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewardsError {
    #[error("Data source unavailable: {0}")]
    DataUnavailable(#[from] std::io::Error),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Customer with ID {customer_id} not found")]
    CustomerNotFound { customer_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RewardsResult<T> = Result<T, RewardsError>;
