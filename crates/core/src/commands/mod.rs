pub mod applications;
pub mod list;
pub mod locate;
pub mod login;
pub mod network;
pub mod power;
pub mod regions;
pub mod spawn;
pub mod terminate;

use serde::Serialize;

/// Renders a provider response the way status messages embed it.
pub(crate) fn raw_response<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|error| format!("<unprintable: {error}>"))
}
