//! Middleware for logging requests and responses.

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

use crate::response;

/// The maximum number of body characters included in request/response logs.
const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than `LOG_BODY_LENGTH_LIMIT` characters, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Bodies must be buffered to be logged. If a body cannot be read, the
/// request is rejected rather than forwarded without its body.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = match read_body_text(body).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::error!("Could not read the request body: {error}");
            return response::error(
                StatusCode::BAD_REQUEST,
                "the request body could not be read",
            );
        }
    };

    log_body(
        &format!("Received request: {} {}", parts.method, parts.uri),
        &body_text,
    );

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match read_body_text(body).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::error!("Could not read the response body: {error}");
            return response::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "an unexpected error occurred, check the server logs for more details",
            );
        }
    };

    log_body(&format!("Sending response: {}", parts.status), &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn read_body_text(body: axum::body::Body) -> Result<String, axum::Error> {
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok(String::from_utf8_lossy(&body_bytes).to_string())
}

fn log_body(summary: &str, body: &str) {
    if body.chars().count() > LOG_BODY_LENGTH_LIMIT {
        let truncated: String = body.chars().take(LOG_BODY_LENGTH_LIMIT).collect();
        tracing::info!("{summary}\nbody: {truncated}...");
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{summary}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware, routing::post};
    use axum_test::TestServer;

    use super::{LOG_BODY_LENGTH_LIMIT, logging_middleware};

    fn get_test_server() -> TestServer {
        let router = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));

        TestServer::new(router)
    }

    #[tokio::test]
    async fn short_bodies_pass_through_unchanged() {
        let server = get_test_server();

        let response = server.post("/echo").text("hello").await;

        response.assert_status_ok();
        response.assert_text("hello");
    }

    #[tokio::test]
    async fn bodies_longer_than_the_log_limit_pass_through_unchanged() {
        let server = get_test_server();
        let long_body = "x".repeat(LOG_BODY_LENGTH_LIMIT * 3);

        let response = server.post("/echo").text(&long_body).await;

        response.assert_status_ok();
        response.assert_text(&long_body);
    }

    #[tokio::test]
    async fn multi_byte_bodies_pass_through_unchanged() {
        let server = get_test_server();
        let long_body = "é".repeat(LOG_BODY_LENGTH_LIMIT + 1);

        let response = server.post("/echo").text(&long_body).await;

        response.assert_status_ok();
        response.assert_text(&long_body);
    }
}
