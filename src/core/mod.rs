pub mod middleware;

use serde::Deserialize;

/// Error body returned by the Realtime Database REST API,
/// e.g. `{ "error" : "Permission denied" }`.
#[derive(Debug, Deserialize)]
pub struct DatabaseErrorResponse {
    pub error: String,
}

impl DatabaseErrorResponse {
    pub fn display_message(&self) -> String {
        self.error.clone()
    }
}

/// Reads the body of a failed response and extracts the server's error message.
///
/// Falls back to `"{default_msg}: {status}"` when the body is not the usual error shape.
pub async fn parse_error_response(response: reqwest::Response, default_msg: &str) -> String {
    let status = response.status();
    match response.json::<DatabaseErrorResponse>().await {
        Ok(error_resp) => error_resp.display_message(),
        Err(_) => format!("{}: {}", default_msg, status),
    }
}
