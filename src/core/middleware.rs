use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use std::time::Instant;

/// Emits a `tracing` event for every request sent and every response received.
///
/// Transport failures are logged and passed through unchanged.
#[derive(Clone, Debug, Default)]
pub struct TracingMiddleware;

impl TracingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Middleware for TracingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        // Query strings may carry `auth=` credentials.
        let mut url = req.url().clone();
        url.set_query(None);

        tracing::debug!(%method, %url, "sending database request");
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => {
                tracing::debug!(
                    %method,
                    %url,
                    status = response.status().as_u16(),
                    elapsed_ms,
                    "database response received"
                );
            }
            Err(e) => {
                tracing::warn!(%method, %url, elapsed_ms, error = %e, "database request failed");
            }
        }

        result
    }
}
