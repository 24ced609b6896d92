use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use locate::{
    AddressSource, Coordinates, GoogleGeocoder, LocationError, LocationSink, MapsConfig,
    PositionOptions, PositionSource, ReverseGeocoder, locate,
};
use serde_json::json;
use tokio::net::TcpListener;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn geocode(
    State(stub): State<Stub>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    stub.seen.lock().unwrap().push(params);
    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body.clone(),
    )
}

/// Serves `body` with `status` on an ephemeral port and returns the geocode
/// URL plus the query strings the stub received.
async fn spawn_stub(
    status: StatusCode,
    body: impl Into<String>,
) -> (String, Arc<Mutex<Vec<HashMap<String, String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        body: body.into(),
        seen: Arc::clone(&seen),
    };
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route(GEOCODE_PATH, get(geocode))
        .with_state(stub);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}{GEOCODE_PATH}"), seen)
}

fn geocoder_for(url: String) -> GoogleGeocoder {
    GoogleGeocoder::new(MapsConfig::new("test-key").with_geocode_url(url))
}

fn bengaluru() -> Coordinates {
    Coordinates::new(12.971_598_7, 77.594_562_7).unwrap()
}

#[tokio::test]
async fn test_sends_latlng_and_key() {
    let (url, seen) = spawn_stub(
        StatusCode::OK,
        json!({ "status": "ZERO_RESULTS", "results": [] }).to_string(),
    )
    .await;

    geocoder_for(url).lookup(bengaluru()).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("latlng").map(String::as_str), Some("12.9715987,77.5945627"));
    assert_eq!(seen[0].get("key").map(String::as_str), Some("test-key"));
}

#[tokio::test]
async fn test_decodes_ok_response() {
    let (url, _) = spawn_stub(
        StatusCode::OK,
        json!({
            "status": "OK",
            "results": [
                { "formatted_address": "Vidhana Soudha, Bengaluru, Karnataka 560001, India", "place_id": "ChIJ" },
                { "formatted_address": "Bengaluru, Karnataka, India" }
            ],
            "plus_code": { "global_code": "7J4VXHCV+M9" }
        })
        .to_string(),
    )
    .await;

    let response = geocoder_for(url).reverse_geocode(bengaluru()).await.unwrap();

    assert_eq!(
        response.first_address(),
        Some("Vidhana Soudha, Bengaluru, Karnataka 560001, India")
    );
}

#[tokio::test]
async fn test_error_status_with_json_body_is_not_a_lookup_failure() {
    let (url, _) = spawn_stub(
        StatusCode::BAD_REQUEST,
        json!({
            "status": "REQUEST_DENIED",
            "results": [],
            "error_message": "The provided API key is invalid."
        })
        .to_string(),
    )
    .await;

    let response = geocoder_for(url).lookup(bengaluru()).await.unwrap();

    assert_eq!(response.status, "REQUEST_DENIED");
    assert_eq!(response.first_address(), None);
}

#[tokio::test]
async fn test_unparseable_body_is_a_lookup_failure() {
    let (url, _) = spawn_stub(StatusCode::BAD_GATEWAY, "<html>upstream error</html>").await;

    let result = geocoder_for(url).lookup(bengaluru()).await;

    assert_matches!(result, Err(LocationError::Lookup(Some(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_lookup_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = geocoder_for(format!("http://{addr}{GEOCODE_PATH}"))
        .lookup(bengaluru())
        .await;

    assert_matches!(result, Err(LocationError::Lookup(Some(_))));
}

#[tokio::test]
async fn test_transport_error_does_not_reveal_api_key() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = geocoder_for(format!("http://{addr}{GEOCODE_PATH}"))
        .lookup(bengaluru())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(!message.contains("test-key"), "{message}");
    assert!(!message.contains(GEOCODE_PATH), "{message}");
}

#[tokio::test]
async fn test_decode_error_does_not_reveal_api_key() {
    let (url, _) = spawn_stub(StatusCode::OK, "not json").await;

    let err = geocoder_for(url).lookup(bengaluru()).await.unwrap_err();

    assert!(!err.to_string().contains("test-key"), "{err}");
}

// === Full flow against the stub ===

struct FixedPosition(Coordinates);

impl PositionSource for FixedPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

#[derive(Debug, PartialEq)]
enum Event {
    Coordinates(Option<f64>, Option<f64>),
    Address(String),
}

#[derive(Default)]
struct RecordingSink(Mutex<Vec<Event>>);

impl LocationSink for RecordingSink {
    fn address_changed(&self, address: String) {
        self.0.lock().unwrap().push(Event::Address(address));
    }

    fn coordinates_changed(&self, latitude: Option<f64>, longitude: Option<f64>) {
        self.0
            .lock()
            .unwrap()
            .push(Event::Coordinates(latitude, longitude));
    }
}

#[tokio::test]
async fn test_locate_reports_coordinates_then_address() {
    let (url, _) = spawn_stub(
        StatusCode::OK,
        json!({
            "status": "OK",
            "results": [{ "formatted_address": "Vidhana Soudha, Bengaluru" }]
        })
        .to_string(),
    )
    .await;
    let sink = RecordingSink::default();

    let resolution = locate(&FixedPosition(bengaluru()), &geocoder_for(url), &sink)
        .await
        .unwrap();

    assert_eq!(resolution.source, AddressSource::Geocoded);
    assert_eq!(
        *sink.0.lock().unwrap(),
        vec![
            Event::Coordinates(Some(12.971_598_7), Some(77.594_562_7)),
            Event::Address("Vidhana Soudha, Bengaluru".to_owned()),
        ]
    );
}

#[tokio::test]
async fn test_locate_falls_back_to_coordinates_text() {
    let (url, _) = spawn_stub(
        StatusCode::OK,
        json!({ "status": "ZERO_RESULTS", "results": [] }).to_string(),
    )
    .await;
    let sink = RecordingSink::default();
    let fix = Coordinates::new(12.345_678_9, 77.654_321_1).unwrap();

    locate(&FixedPosition(fix), &geocoder_for(url), &sink)
        .await
        .unwrap();

    assert_eq!(
        sink.0.lock().unwrap().last(),
        Some(&Event::Address("12.345679, 77.654321".to_owned()))
    );
}
