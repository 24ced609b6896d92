//! The location request state machine and the flow that drives it.
//!
//! A request moves `Idle -> Requesting -> {Resolved | Failed}`. `Resolved` and
//! `Failed` are at-rest states: like `Idle` they allow a new request to begin,
//! and only `Requesting` counts as busy. `Failed` keeps its error until the
//! next `begin`, which is what the location field shows under the input.

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    AddressSource, LocationError, PositionOptions, PositionSource, Resolution, ReverseGeocoder,
};

/// Receives the values a location request produces.
///
/// The location field forwards these to its parent's callbacks.
#[cfg_attr(test, mockall::automock)]
pub trait LocationSink {
    fn address_changed(&self, address: String);
    fn coordinates_changed(&self, latitude: Option<f64>, longitude: Option<f64>);
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LocationState {
    #[default]
    Idle,
    Requesting,
    Resolved(Resolution),
    Failed(LocationError),
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("a location request is already in flight")]
pub struct RequestInFlight;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationRequest {
    state: LocationState,
}

impl LocationRequest {
    #[must_use]
    pub const fn state(&self) -> &LocationState {
        &self.state
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, LocationState::Requesting)
    }

    #[must_use]
    pub const fn error(&self) -> Option<&LocationError> {
        match &self.state {
            LocationState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Starts a request, clearing any previous outcome.
    pub fn begin(&mut self) -> Result<(), RequestInFlight> {
        if self.is_busy() {
            return Err(RequestInFlight);
        }
        self.state = LocationState::Requesting;
        Ok(())
    }

    /// Records the outcome of the in-flight request. Outcomes arriving while
    /// no request is in flight are dropped.
    pub fn finish(&mut self, outcome: Result<Resolution, LocationError>) {
        if !self.is_busy() {
            warn!("Dropping location outcome with no request in flight");
            return;
        }
        self.state = match outcome {
            Ok(resolution) => LocationState::Resolved(resolution),
            Err(err) => {
                error!(error = %err, "Location error");
                LocationState::Failed(err)
            }
        };
    }
}

/// Runs one location request: a fresh sensor fix, then a reverse lookup.
///
/// Coordinates reach the sink as soon as the sensor answers, before the
/// lookup starts, so a failed lookup still leaves the parent with them.
pub async fn locate<P, G, S>(
    source: &P,
    geocoder: &G,
    sink: &S,
) -> Result<Resolution, LocationError>
where
    P: PositionSource,
    G: ReverseGeocoder,
    S: LocationSink,
{
    let coordinates = source
        .current_position(&PositionOptions::default())
        .await?;
    debug!(%coordinates, "Received position fix");
    sink.coordinates_changed(Some(coordinates.latitude()), Some(coordinates.longitude()));

    let response = geocoder.reverse_geocode(coordinates).await?;
    let resolution = Resolution::from_response(coordinates, &response);
    if resolution.source == AddressSource::CoordinateFallback {
        warn!(
            status = %response.status,
            error_message = ?response.error_message,
            "Reverse geocoding failed; using coordinates as the address"
        );
    }
    sink.address_changed(resolution.address.clone());

    Ok(resolution)
}
