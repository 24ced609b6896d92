//! Server functions used by the location field.
//!
//! Reverse geocoding runs on the server so the Geocoding API key stays in the
//! server's configuration. The browser calls [`reverse_geocode`] and gets the
//! provider's response back unchanged; deciding between the formatted address
//! and the coordinate fallback happens client-side in `locate`.

#![allow(deprecated)]

use leptos::prelude::{ServerFnError, server};
use locate::GeocodeResponse;

#[cfg(feature = "ssr")]
use leptos::server_fn::error::NoCustomError;

/// Looks up the address for a latitude/longitude pair.
///
/// Coordinates outside the geographic ranges are rejected before any request
/// is made. Transport and decode failures are returned as server errors
/// carrying the underlying message; non-OK provider statuses are not errors.
///
/// No retries are attempted; the user re-triggers the lookup.
#[server(endpoint = "/reverse_geocode")]
pub async fn reverse_geocode(
    latitude: f64,
    longitude: f64,
) -> Result<GeocodeResponse, ServerFnError> {
    use crate::types::AppState;
    use leptos::prelude::expect_context;
    use locate::Coordinates;

    let AppState { geocoder, .. } = expect_context::<AppState>();

    let coordinates = Coordinates::new(latitude, longitude)
        .map_err(|e| ServerFnError::<NoCustomError>::ServerError(e.to_string()))?;

    match geocoder.lookup(coordinates).await {
        Ok(response) => {
            tracing::debug!(status = %response.status, "Reverse geocoding finished");
            Ok(response)
        }
        Err(lookup_err) => {
            tracing::error!("Reverse geocoding failed: {lookup_err}");
            Err(ServerFnError::<NoCustomError>::ServerError(
                lookup_err.to_string(),
            ))
        }
    }
}
