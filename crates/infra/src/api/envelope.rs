//! Response envelope handling shared by the API clients
//!
//! Every endpoint answers `{ success, data, message, pagination }`. Error
//! bodies may carry only a `message`.

use abacus_domain::ApiResponse;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::errors::ApiError;

/// Body of a non-2xx answer. Only the message is of interest.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Server messages that are empty or whitespace carry nothing to show.
pub(crate) fn non_blank(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Read a response, turning non-2xx statuses and `success: false` into
/// [`ApiError`]s.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(|err| ApiError::from_reqwest(&err))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body).unwrap_or_default().message;
        return Err(ApiError::Status { status: status.as_u16(), message: non_blank(message) });
    }

    let envelope: ApiResponse<T> =
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Rejected(non_blank(envelope.message)));
    }
    Ok(envelope)
}
