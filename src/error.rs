use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{fetch, registry::UnknownLocation};
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    UnknownLocation(UnknownLocation),
    Fetch(fetch::Error),
}

impl From<UnknownLocation> for Error {
    fn from(e: UnknownLocation) -> Self {
        Error::UnknownLocation(e)
    }
}

impl From<fetch::Error> for Error {
    fn from(e: fetch::Error) -> Self {
        Error::Fetch(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownLocation(e) => write!(f, "{e}"),
            Error::Fetch(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnknownLocation(e) => Some(e),
            Error::Fetch(e) => Some(e),
        }
    }
}

// every failure is a 500 with a plain text message, unknown halls included
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error fetching the menu: {self}"),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
