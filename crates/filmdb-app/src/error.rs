use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use tracing::{debug, error};

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(#[source] filmdb_dal::Error),
}

impl From<filmdb_dal::Error> for ApiError {
    fn from(value: filmdb_dal::Error) -> Self {
        match value {
            filmdb_dal::Error::RecordNotFound(what) => ApiError::ResourceNotFound(what),
            filmdb_dal::Error::DatabaseError(filmdb_dal::SqlxError::RowNotFound) => {
                ApiError::ResourceNotFound("Record".to_string())
            }
            filmdb_dal::Error::InvalidRecord(report) => ApiError::InvalidRequest(report.to_string()),
            e => ApiError::DatabaseError(e),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("Request failed: {self}");
            "Internal server error".to_string()
        } else {
            debug!("Request rejected: {self}");
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
