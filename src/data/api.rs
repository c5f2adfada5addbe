use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;

use super::shared_booking::{BookingRequest, TimeSlot};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bookings API answered with status {0}")]
    Status(StatusCode),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status(status) => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::Decode(_) => None,
        }
    }

    /// The API uses 400 for "this slot is already taken"; no other status is
    /// told apart from a generic failure.
    pub fn is_slot_conflict(&self) -> bool {
        self.status() == Some(StatusCode::BAD_REQUEST)
    }
}

/// The two calls the form makes against the remote bookings service.
#[allow(async_fn_in_trait)]
pub trait BookingApi {
    async fn fetch_availability(&self) -> Result<Vec<TimeSlot>, ApiError>;

    /// Returns whatever JSON the service echoes back on success.
    async fn create_booking(&self, request: &BookingRequest) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    client: Client,
    base_url: String,
}

impl HttpBookingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status))
    }
}

impl BookingApi for HttpBookingApi {
    async fn fetch_availability(&self) -> Result<Vec<TimeSlot>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/api/availability"))
            .send()
            .await?;
        let body = check_status(response)?.text().await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/bookings"))
            .json(request)
            .send()
            .await?;
        let body = check_status(response)?.text().await?;

        // a success body is only echoed back to the user, so non-JSON text is kept verbatim
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::{get, post}, Json, Router};
    use chrono::NaiveDate;
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}/")
    }

    fn request() -> BookingRequest {
        BookingRequest {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            time: TimeSlot::from("19:00"),
            guests: 2,
            name: "Ana".into(),
            contact: "555-1234".into(),
        }
    }

    #[tokio::test]
    async fn availability_is_returned_in_server_order() {
        let base = serve(Router::new().route(
            "/api/availability",
            get(|| async { Json(json!(["19:00", "18:00", "19:00"])) }),
        ))
        .await;

        let slots = HttpBookingApi::new(base).fetch_availability().await.expect("slots");
        let ids: Vec<_> = slots.iter().map(TimeSlot::as_str).collect();
        assert_eq!(ids, ["19:00", "18:00", "19:00"]);
    }

    #[tokio::test]
    async fn malformed_availability_is_a_decode_error() {
        let base = serve(Router::new().route(
            "/api/availability",
            get(|| async { Json(json!({"slots": 3})) }),
        ))
        .await;

        let err = HttpBookingApi::new(base).fetch_availability().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn booking_posts_the_full_draft_and_echoes_payload() {
        let base = serve(Router::new().route(
            "/api/bookings",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["date"], "2024-05-01");
                assert_eq!(body["guests"], 2);
                (AxumStatus::CREATED, Json(json!({"id": 42})))
            }),
        ))
        .await;

        let payload = HttpBookingApi::new(base).create_booking(&request()).await.expect("payload");
        assert_eq!(payload, json!({"id": 42}));
    }

    #[tokio::test]
    async fn bad_request_is_a_slot_conflict() {
        let base = serve(Router::new().route(
            "/api/bookings",
            post(|| async { AxumStatus::BAD_REQUEST }),
        ))
        .await;

        let err = HttpBookingApi::new(base).create_booking(&request()).await.unwrap_err();
        assert!(err.is_slot_conflict());
    }

    #[tokio::test]
    async fn other_statuses_are_not_slot_conflicts() {
        let base = serve(Router::new().route(
            "/api/bookings",
            post(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        ))
        .await;

        let err = HttpBookingApi::new(base).create_booking(&request()).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!err.is_slot_conflict());
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpBookingApi::new(format!("http://{addr}"))
            .fetch_availability()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(!err.is_slot_conflict());
    }
}
