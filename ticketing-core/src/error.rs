use crate::form::Field;

/// Failures of the requests the panel makes against the backend.
/// None of them are fatal, every one of them leaves the panel usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketingError {
    #[error("Failed to save configuration: {0}")]
    Submit(String),
    #[error("Failed to start simulation: {0}")]
    StartRequest(String),
    #[error("Event stream error: {0}")]
    StreamTransport(String),
    #[error("Failed to stop simulation: {0}")]
    StopRequest(String),
}

/// Reasons a configuration form can't be turned into a [`crate::configuration::Configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(Field),
    #[error("{0} must be a whole number")]
    NotANumber(Field),
    #[error("{0} must be greater than zero")]
    NotPositive(Field),
}

impl FormError {
    pub fn field(&self) -> Field {
        match self {
            FormError::Missing(field)
            | FormError::NotANumber(field)
            | FormError::NotPositive(field) => *field,
        }
    }
}
