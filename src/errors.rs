use crate::mailer::MailError;
use crate::submission::SubmissionOutcome;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error(transparent)]
    ConfigurationError(#[from] ConfigurationError),
    #[error("socket address parsing error: {0}")]
    SocketAddressParsingError(#[from] std::net::AddrParseError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    AppErrors(#[from] AppErrors),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unknown mail transport kind")]
    UnknownMailerType,
    #[error("smtp host and port are required for the smtp transport")]
    MissingSmtpSettings,
    #[error("smtp username and password must be supplied together")]
    IncompleteCredentials,
    #[error("static assets directory not found")]
    StaticDirNotFound,
}

#[derive(Error, Debug)]
pub enum AppErrors {
    #[error("invalid submission: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
    #[error("malformed submission payload: {0}")]
    MalformedSubmission(String),
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error(transparent)]
    MailError(#[from] MailError),
    #[error(transparent)]
    ConfigurationError(#[from] ConfigurationError),
}

// The caller only ever learns a success flag; details stay in the server log.
impl IntoResponse for AppErrors {
    fn into_response(self) -> Response {
        let status = match &self {
            AppErrors::ValidationError(_) | AppErrors::MalformedSubmission(_) => {
                StatusCode::BAD_REQUEST
            }
            AppErrors::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppErrors::MailError(_) | AppErrors::ConfigurationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        (status, Json(SubmissionOutcome { success: false })).into_response()
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("failed to reach the relay: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("the relay rejected the submission")]
    Rejected,
}
