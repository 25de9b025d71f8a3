use hai_mcp_core::error::{Error, ProviderError};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

const MAX_ERROR_BODY: usize = 512;

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

pub(crate) fn map_request_error(action: &str, request_error: reqwest::Error) -> Error {
    ProviderError::Transport {
        action: action.to_string(),
        reason: request_error.to_string(),
    }
    .into()
}

fn malformed(action: &str, reason: impl ToString) -> Error {
    ProviderError::MalformedResponse {
        action: action.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn http_error(status: u16, body: &str) -> Error {
    let body = match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    };
    ProviderError::Http { status, body }.into()
}

/// Unwraps the `{"Response": {...}}` envelope. An embedded `Error` object is
/// surfaced verbatim as [`ProviderError::Api`]; anything else is decoded
/// into the typed response for `action`.
pub(crate) fn decode_response<R: DeserializeOwned>(
    action: &str,
    status: u16,
    body: &str,
) -> Result<R, Error> {
    let success = (200..300).contains(&status);
    let response = match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => envelope.response,
        Err(_) if !success => return Err(http_error(status, body)),
        Err(error) => return Err(malformed(action, error)),
    };

    if let Some(error) = response.get("Error") {
        let error: ApiErrorBody =
            serde_json::from_value(error.clone()).map_err(|error| malformed(action, error))?;
        let request_id = response
            .get("RequestId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(ProviderError::Api {
            code: error.code,
            message: error.message,
            request_id,
        }
        .into());
    }

    if !success {
        return Err(http_error(status, body));
    }

    serde_json::from_value(response).map_err(|error| malformed(action, error))
}
