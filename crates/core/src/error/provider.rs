use thiserror::Error;

/// Failures reported by, or while talking to, the HAI API.
///
/// API errors are carried verbatim; nothing here classifies them into
/// recoverable and fatal kinds.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{code}: {message} (request id {request_id})")]
    Api {
        code: String,
        message: String,
        request_id: String,
    },

    #[error("http {status} from provider: {body}")]
    Http { status: u16, body: String },

    #[error("transport error during {action}: {reason}")]
    Transport { action: String, reason: String },

    #[error("malformed {action} response: {reason}")]
    MalformedResponse { action: String, reason: String },
}
