use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::telemetry::TelemetryError;
use crate::tools::ToolError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Dataset(DatasetError),
    Tool(ToolError),
    NotFound(String),
    /// Missing page that still renders a document title.
    PageNotFound { what: String, title: &'static str },
    BadRequest(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn page_not_found(what: impl Into<String>, title: &'static str) -> Self {
        Self::PageNotFound {
            what: what.into(),
            title,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_)
            | AppError::PageNotFound { .. }
            | AppError::Tool(ToolError::UnknownNode(_)) => StatusCode::NOT_FOUND,
            AppError::Tool(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Dataset(err) => write!(f, "dataset error: {}", err),
            AppError::Tool(err) => write!(f, "{}", err),
            AppError::NotFound(what) | AppError::PageNotFound { what, .. } => {
                write!(f, "{} not found", what)
            }
            AppError::BadRequest(message) => write!(f, "invalid request: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Dataset(err) => Some(err),
            AppError::Tool(err) => Some(err),
            AppError::NotFound(_) | AppError::PageNotFound { .. } | AppError::BadRequest(_) => {
                None
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::PageNotFound { title, .. } => {
                json!({ "error": self.to_string(), "title": title })
            }
            _ => json!({ "error": self.to_string() }),
        };
        let body = Json(body);
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<DatasetError> for AppError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

impl From<ToolError> for AppError {
    fn from(value: ToolError) -> Self {
        Self::Tool(value)
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            AppError::not_found("provider 'ghost'").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ToolError::AumOutOfRange(5)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ToolError::UnknownNode("nowhere".to_string())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(DatasetError::DuplicateSlug("dup".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::BadRequest("bad aum".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::page_not_found("guide 'x'", "Guide Not Found").status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn response_carries_json_error_body() {
        let response = AppError::not_found("guide 'missing'").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::not_found("guide 'missing'").to_string(),
            "guide 'missing' not found"
        );
    }
}
