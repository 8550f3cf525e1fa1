use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Storage,
    Config,
    Platform,
    InvalidSelector,
}

#[derive(Debug, Error)]
pub enum FxError {
    #[error("preference storage failed: {0}")]
    Storage(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("platform call failed: {0}")]
    Platform(String),
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

impl FxError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FxError::Storage(_) => ErrorCode::Storage,
            FxError::Config(_) => ErrorCode::Config,
            FxError::Platform(_) => ErrorCode::Platform,
            FxError::InvalidSelector { .. } => ErrorCode::InvalidSelector,
        }
    }

    pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}
