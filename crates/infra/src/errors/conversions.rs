//! Conversions from external infrastructure errors into domain errors.

use abacus_domain::AbacusError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AbacusError);

impl From<InfraError> for AbacusError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AbacusError> for InfraError {
    fn from(value: AbacusError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAbacusError {
    fn into_abacus(self) -> AbacusError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AbacusError */
/* -------------------------------------------------------------------------- */

impl IntoAbacusError for HttpError {
    fn into_abacus(self) -> AbacusError {
        if self.is_timeout() {
            return AbacusError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return AbacusError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return status_to_error(status.as_u16(), None);
        }

        if self.is_decode() {
            return AbacusError::Remote(format!("unreadable response body: {self}"));
        }

        AbacusError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_abacus())
    }
}

/// Map an HTTP status (and optional server message) onto the domain error.
pub(crate) fn status_to_error(code: u16, message: Option<&str>) -> AbacusError {
    let reason = reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown status");
    let message = match message {
        Some(detail) => format!("HTTP {code} {reason}: {detail}"),
        None => format!("HTTP {code} {reason}"),
    };

    match code {
        404 => AbacusError::NotFound(message),
        400..=499 => AbacusError::InvalidInput(message),
        500..=599 => AbacusError::Remote(message),
        _ => AbacusError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AbacusError */
/* -------------------------------------------------------------------------- */

impl IntoAbacusError for JsonError {
    fn into_abacus(self) -> AbacusError {
        AbacusError::Remote(format!("invalid JSON from API: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_abacus())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → AbacusError */
/* -------------------------------------------------------------------------- */

impl IntoAbacusError for UrlError {
    fn into_abacus(self) -> AbacusError {
        AbacusError::Config(format!("invalid API base URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_abacus())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
