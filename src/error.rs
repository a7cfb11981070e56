use std::io;
use std::path::PathBuf;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Request-scoped failures surfaced to the caller of the trigger endpoint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriggerError {
    #[error("no params for test provided")]
    NoParams,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    ConstructionFailure(String),
}

impl TriggerError {
    pub fn missing_url() -> Self {
        TriggerError::InvalidRequest("no \"url\" provided in request".to_string())
    }
}

impl ResponseError for TriggerError {
    fn status_code(&self) -> StatusCode {
        match self {
            TriggerError::NoParams | TriggerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            TriggerError::ConstructionFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config key \"http_path\" must not be empty")]
    EmptyPath,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} overflows")]
    Overflow(String),
}
