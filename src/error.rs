//! Crate-level error type for the tool host
//!
//! Wraps configuration and tool errors and maps them to the stable error
//! codes printed in the JSON error envelope.

use crate::config::ConfigError;
use crate::tools::ToolError;
use serde::Serialize;
use thiserror::Error;

/// Stable error codes reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidInput,
    UpstreamError,
    MalformedUpstreamData,
    TransportError,
    UnknownTool,
    ConfigError,
    InternalError,
}

/// `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
}

/// Main error type for host operations
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::InvalidInput { .. } => ErrorCode::InvalidInput,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Tool(e) => match e {
                ToolError::Validation { .. } => ErrorCode::InvalidInput,
                ToolError::Upstream { .. } => ErrorCode::UpstreamError,
                ToolError::MalformedUpstreamData { .. } => ErrorCode::MalformedUpstreamData,
                ToolError::Transport(_) => ErrorCode::TransportError,
                ToolError::UnknownTool(_) => ErrorCode::UnknownTool,
                ToolError::UnknownImplementation(_) | ToolError::InitializationError(_) => {
                    ErrorCode::ConfigError
                }
                ToolError::NotInitialized(_)
                | ToolError::SchemaError(_)
                | ToolError::ExecutionError(_) => ErrorCode::InternalError,
            },
        }
    }

    /// Convert to the JSON error envelope; tool errors keep their own message
    pub fn to_error_envelope(&self) -> ErrorEnvelope {
        let message = match self {
            AppError::Tool(e) => e.to_string(),
            AppError::Config(e) => e.to_string(),
            AppError::InvalidInput { message } | AppError::Internal { message } => {
                message.clone()
            }
        };

        ErrorEnvelope {
            error: ErrorDetails {
                code: self.code(),
                message,
            },
        }
    }
}

/// Result type for host operations
pub type AppResult<T> = Result<T, AppError>;
