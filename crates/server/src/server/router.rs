//! Axum router construction.

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{
    handlers,
    middleware::{self, RouterOptions},
    state::AppState,
};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState, options: RouterOptions) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health));
    if options.debug_routes {
        router = router.route("/debug/token", get(handlers::debug_token));
    }
    router
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http().make_span_with(middleware::request_span))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::handlers::tests::test_state;
    use axum::{body::Body, http::Request};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Shared in-memory sink for captured log lines.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(test_state(), RouterOptions::default());
        let resp = app.oneshot(get_req("/unknown")).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn health_route_exists() {
        let app = build(test_state(), RouterOptions::default());
        let resp = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn debug_route_hidden_in_production() {
        let app = build(test_state(), RouterOptions::default());
        let resp = app.oneshot(get_req("/debug/token?q=abc")).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn debug_route_mounted_outside_production() {
        let options = RouterOptions {
            debug_routes: true,
            ..RouterOptions::default()
        };
        let app = build(test_state(), options);
        let resp = app.oneshot(get_req("/debug/token?q=abc")).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn request_logs_omit_query_string() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let options = RouterOptions {
            debug_routes: true,
            ..RouterOptions::default()
        };
        let app = build(test_state(), options);
        let resp = app
            .oneshot(get_req("/debug/token?q=PLAINTEXT_ID&key=OVERRIDE_SECRET"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let captured = logs.contents();
        assert!(captured.contains("/debug/token"), "request span not logged: {captured}");
        assert!(!captured.contains("PLAINTEXT_ID"), "plaintext leaked: {captured}");
        assert!(!captured.contains("OVERRIDE_SECRET"), "secret leaked: {captured}");
    }
}
