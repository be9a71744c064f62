use thiserror::Error;

use crate::validation::ValidationReport;

#[derive(Debug, Error)]
pub enum InquiryError {
    #[error("booking inquiry rejected: {0}")]
    Invalid(ValidationReport),
}

impl InquiryError {
    pub fn report(&self) -> &ValidationReport {
        match self {
            Self::Invalid(report) => report,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("whatsapp number must be 10-15 digits without '+', got {0:?}")]
    InvalidWhatsAppNumber(String),
    #[error("unknown route field layout {0:?}, expected `split` or `combined`")]
    UnknownRouteFields(String),
}
