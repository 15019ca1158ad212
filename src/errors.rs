use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("could not reach the tracker sheet: {0}")]
    Connection(String),

    #[error("worksheet '{0}' not found in the tracker sheet")]
    MissingWorksheet(String),

    #[error("tracker sheet is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("expected {expected} month rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("could not save the tracker sheet: {0}")]
    Persistence(String),

    #[error("row {0} is out of range (0-11)")]
    RowOutOfRange(usize),
}

impl TrackerError {
    /// Errors caused by the sheet not having the expected shape.
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            TrackerError::MissingWorksheet(_)
                | TrackerError::MissingColumns(_)
                | TrackerError::RowCount { .. }
        )
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        let status = match &err {
            TrackerError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            TrackerError::Persistence(_) => StatusCode::BAD_GATEWAY,
            TrackerError::RowOutOfRange(_) => StatusCode::BAD_REQUEST,
            // schema errors: the sheet itself needs fixing
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
