use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolboxError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Query failed: {0}")]
    QueryFailure(String),
}

impl ToolboxError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolboxError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ToolboxError::MissingParameter(_) => "MissingParameter",
            ToolboxError::InvalidArgument { .. } => "InvalidArgument",
            ToolboxError::UnknownOperation(_) => "UnknownOperation",
            ToolboxError::StoreUnavailable(_) => "StoreUnavailable",
            ToolboxError::QueryFailure(_) => "QueryFailure",
        }
    }
}

impl From<neo4rs::Error> for ToolboxError {
    fn from(e: neo4rs::Error) -> Self {
        match &e {
            neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError => {
                ToolboxError::StoreUnavailable(e.to_string())
            }
            _ => ToolboxError::QueryFailure(e.to_string()),
        }
    }
}

impl From<neo4rs::DeError> for ToolboxError {
    fn from(e: neo4rs::DeError) -> Self {
        ToolboxError::QueryFailure(format!("unexpected row shape: {}", e))
    }
}

impl ResponseError for ToolboxError {
    fn status_code(&self) -> StatusCode {
        match self {
            ToolboxError::MissingParameter(_) | ToolboxError::InvalidArgument { .. } => {
                StatusCode::BAD_REQUEST
            }
            ToolboxError::UnknownOperation(_) => StatusCode::NOT_FOUND,
            ToolboxError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ToolboxError::QueryFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "{}", self);
        } else {
            tracing::warn!(kind = self.kind(), "{}", self);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }))
    }
}

pub type ToolboxResult<T> = Result<T, ToolboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ToolboxError::MissingParameter("id".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ToolboxError::invalid("date", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ToolboxError::UnknownOperation("drop_all".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ToolboxError::StoreUnavailable("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ToolboxError::QueryFailure("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_connection_errors_are_unavailable() {
        let err: ToolboxError = neo4rs::Error::ConnectionError.into();
        assert!(matches!(err, ToolboxError::StoreUnavailable(_)));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ToolboxError::MissingParameter("search".into()).to_string(),
            "Missing required parameter: search"
        );
        assert_eq!(
            ToolboxError::invalid("date", "expected yyyy-mm-dd").to_string(),
            "Invalid argument `date`: expected yyyy-mm-dd"
        );
    }
}
