//! Reverse-geocoding response model and the lookup capability.
//!
//! Only the parts of the Google Geocoding API response that the location
//! field consumes are modelled; unknown fields are ignored on decode.

use serde::{Deserialize, Serialize};

use crate::{Coordinates, LocationError};

/// The status the geocoding API reports for a successful lookup.
pub const STATUS_OK: &str = "OK";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// The address of the best match, if the lookup succeeded and that match
    /// carries one.
    #[must_use]
    pub fn first_address(&self) -> Option<&str> {
        if self.status != STATUS_OK {
            return None;
        }
        self.results
            .first()
            .map(|result| result.formatted_address.as_str())
            .filter(|address| !address.is_empty())
    }
}

/// A lookup translating coordinates into a human-readable address.
///
/// Transport and decode failures are errors; a decoded response with a
/// non-OK status is not.
#[allow(async_fn_in_trait)]
pub trait ReverseGeocoder {
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<GeocodeResponse, LocationError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressSource {
    Geocoded,
    CoordinateFallback,
}

/// The outcome of a successful location request.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub coordinates: Coordinates,
    pub address: String,
    pub source: AddressSource,
}

impl Resolution {
    #[must_use]
    pub fn from_response(coordinates: Coordinates, response: &GeocodeResponse) -> Self {
        match response.first_address() {
            Some(address) => Self {
                coordinates,
                address: address.to_owned(),
                source: AddressSource::Geocoded,
            },
            None => Self {
                coordinates,
                address: coordinates.to_string(),
                source: AddressSource::CoordinateFallback,
            },
        }
    }
}
