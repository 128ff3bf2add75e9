//! Route modules organized by bounded context.

pub mod health;
pub mod params;
pub mod reservations;
pub mod venues;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;
    use venues_core::geolocation::GeolocationService;
    use venues_test_support::{FixedClock, InMemoryStore, StubGeolocation};

    use crate::state::AppState;

    /// Fixed "now" shared by the route tests.
    pub(crate) fn clock() -> FixedClock {
        FixedClock::at(2026, 9, 4, 19, 20)
    }

    pub(crate) fn state_with(store: Arc<InMemoryStore>) -> AppState {
        state_with_geolocation(store, Arc::new(StubGeolocation::new("Zagreb", None)))
    }

    pub(crate) fn state_with_geolocation(
        store: Arc<InMemoryStore>,
        geolocation: Arc<dyn GeolocationService>,
    ) -> AppState {
        AppState::new(store, Arc::new(clock()), geolocation)
    }

    /// Sends a request and returns the status with the JSON body, or
    /// `Value::Null` when the body is not JSON.
    pub(crate) async fn send(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}
