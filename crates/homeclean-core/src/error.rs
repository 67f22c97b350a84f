use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown service category: {0}")]
    UnknownCategory(String),
    #[error("Service not found: {0}")]
    ServiceNotFound(String),
    #[error("Option not found: {0}")]
    OptionNotFound(String),
    #[error("Frequency not found: {0}")]
    FrequencyNotFound(String),
    #[error("Time slot not offered: {0}")]
    TimeSlotNotFound(String),
    #[error("Address not found: {0}")]
    AddressNotFound(String),
    #[error("Payment method not found: {0}")]
    PaymentMethodNotFound(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
