use std::time::Duration;

use poem::{http::StatusCode, Endpoint, IntoResponse, Middleware, Request, Response};

use crate::types::dto::common::ErrorResponse;

/// Middleware that aborts requests exceeding a fixed processing deadline
///
/// Timed-out requests receive a 503 with the standard JSON error body. The
/// inner endpoint's future is dropped, so work in progress is cancelled.
pub struct RequestTimeout {
    timeout: Duration,
}

impl RequestTimeout {
    /// Create a timeout middleware with the given deadline
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl<E: Endpoint> Middleware<E> for RequestTimeout {
    type Output = RequestTimeoutEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        RequestTimeoutEndpoint {
            inner: ep,
            timeout: self.timeout,
        }
    }
}

/// Endpoint wrapper produced by [`RequestTimeout`]
pub struct RequestTimeoutEndpoint<E> {
    inner: E,
    timeout: Duration,
}

impl<E: Endpoint> Endpoint for RequestTimeoutEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        match tokio::time::timeout(self.timeout, self.inner.call(req)).await {
            Ok(result) => result.map(IntoResponse::into_response),
            Err(_) => {
                tracing::warn!(
                    method = %method,
                    path = %path,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Request timed out"
                );
                Ok(timeout_response())
            }
        }
    }
}

fn timeout_response() -> Response {
    let body = ErrorResponse {
        error: "request_timeout".to_string(),
        message: "Request processing exceeded the configured time limit".to_string(),
        status_code: 503,
    };

    let payload = serde_json::to_string(&body)
        .unwrap_or_else(|_| r#"{"error":"request_timeout"}"#.to_string());

    Response::builder()
        .status(StatusCode::SERVICE_UNAVAILABLE)
        .content_type("application/json")
        .body(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poem::{get, handler, test::TestClient, EndpointExt, Route};

    #[handler]
    async fn slow_handler() -> &'static str {
        tokio::time::sleep(Duration::from_millis(200)).await;
        "finished"
    }

    #[handler]
    fn fast_handler() -> &'static str {
        "finished"
    }

    #[tokio::test]
    async fn test_request_exceeding_deadline_gets_503() {
        let app = Route::new()
            .at("/slow", get(slow_handler))
            .with(RequestTimeout::new(Duration::from_millis(50)));
        let cli = TestClient::new(app);

        let resp = cli.get("/slow").send().await;

        resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body = resp.json().await;
        body.value()
            .object()
            .get("error")
            .assert_string("request_timeout");
    }

    #[tokio::test]
    async fn test_request_within_deadline_passes_through() {
        let app = Route::new()
            .at("/fast", get(fast_handler))
            .with(RequestTimeout::new(Duration::from_secs(5)));
        let cli = TestClient::new(app);

        let resp = cli.get("/fast").send().await;

        resp.assert_status_is_ok();
        resp.assert_text("finished").await;
    }
}
