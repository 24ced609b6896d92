use reqwest::Client;
use tracing::{debug, warn};

use crate::{Coordinates, GeocodeResponse, LocationError, MapsConfig, ReverseGeocoder};

/// Reverse geocoding against the Google Geocoding API.
#[derive(Clone, Debug)]
pub struct GoogleGeocoder {
    client: Client,
    config: MapsConfig,
}

impl GoogleGeocoder {
    #[must_use]
    pub fn new(config: MapsConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub const fn with_client(client: Client, config: MapsConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub const fn config(&self) -> &MapsConfig {
        &self.config
    }

    /// Issues `GET <geocode_url>?latlng=<lat>,<lng>&key=<key>` and decodes the
    /// body whatever the HTTP status is; the API reports failures in `status`.
    pub async fn lookup(&self, coordinates: Coordinates) -> Result<GeocodeResponse, LocationError> {
        debug!(latlng = %coordinates.latlng(), "Reverse geocoding");
        let response = self
            .client
            .get(&self.config.geocode_url)
            .query(&[
                ("latlng", coordinates.latlng()),
                ("key", self.config.api_key.clone()),
            ])
            .send()
            .await
            .map_err(lookup_error)?;
        response
            .json::<GeocodeResponse>()
            .await
            .map_err(lookup_error)
    }
}

/// The request URL carries the API key; it never leaves the server.
fn lookup_error(err: reqwest::Error) -> LocationError {
    let err = err.without_url();
    warn!(error = %err, "Geocoding request failed");
    LocationError::lookup(err)
}

impl ReverseGeocoder for GoogleGeocoder {
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<GeocodeResponse, LocationError> {
        self.lookup(coordinates).await
    }
}
