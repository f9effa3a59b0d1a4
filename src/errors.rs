use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Configuration(String),

    #[error("Failed to generate quiz. Please try again.")]
    UpstreamCall(String),

    #[error("Unable to search for learning resources. Please try again.")]
    ToolNotInvoked,

    #[error("{0}")]
    ResponseParse(String),

    #[error("No valid learning resources found. Please try again.")]
    NoValidResources,
}

impl AppError {
    pub fn missing_fields() -> Self {
        AppError::InvalidInput("Missing required fields".to_string())
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::UpstreamCall(_) => "UPSTREAM_ERROR",
            AppError::ToolNotInvoked => "TOOL_NOT_INVOKED",
            AppError::ResponseParse(_) => "PARSE_ERROR",
            AppError::NoValidResources => "NO_VALID_RESOURCES",
        }
    }

    /// Underlying upstream error text, surfaced to callers as `details`.
    pub fn details(&self) -> Option<&str> {
        match self {
            AppError::UpstreamCall(details) if !details.is_empty() => Some(details),
            _ => None,
        }
    }

    /// Whether the model had already performed its web search when the error occurred.
    pub fn search_performed(&self) -> bool {
        matches!(
            self,
            AppError::ResponseParse(_) | AppError::NoValidResources
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Configuration(_)
            | AppError::UpstreamCall(_)
            | AppError::ToolNotInvoked
            | AppError::ResponseParse(_)
            | AppError::NoValidResources => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::debug!("Responding with {} ({})", self.error_code(), self.status_code());
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            details: self.details().map(str::to_string),
        })
    }
}

/// Error body of the learn-more endpoint: `{success, error, searchPerformed}`.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct LearnMoreError(pub AppError);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnMoreErrorResponse {
    pub success: bool,
    pub error: String,
    pub search_performed: bool,
}

impl LearnMoreError {
    fn public_message(&self) -> String {
        match &self.0 {
            AppError::UpstreamCall(_) => {
                "Failed to generate learning resources. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<AppError> for LearnMoreError {
    fn from(err: AppError) -> Self {
        LearnMoreError(err)
    }
}

impl ResponseError for LearnMoreError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.0, AppError::MethodNotAllowed) {
            return self.0.error_response();
        }
        HttpResponse::build(self.status_code()).json(LearnMoreErrorResponse {
            success: false,
            error: self.public_message(),
            search_performed: self.0.search_performed(),
        })
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::UpstreamCall(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
