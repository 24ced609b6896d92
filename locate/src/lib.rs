//! Location acquisition for report forms.
//!
//! This crate holds everything about "where is the user" that does not touch
//! the DOM: validated coordinates, the user-facing error taxonomy, the
//! capability traits the browser (or a test) implements, the request state
//! machine that keeps a single lookup in flight, and the reverse-geocoding
//! response model. With the `http` feature it also provides the `reqwest`
//! client that talks to the Google Geocoding API.

mod config;
mod coordinates;
mod error;
mod geocode;
#[cfg(feature = "http")]
mod google;
mod place;
mod position;
mod request;

pub use config::{ConfigError, MapsConfig};
pub use coordinates::{Coordinates, CoordinatesError};
pub use error::LocationError;
pub use geocode::{AddressSource, GeocodeResponse, GeocodeResult, Resolution, ReverseGeocoder};
#[cfg(feature = "http")]
pub use google::GoogleGeocoder;
pub use place::{PlaceSelection, apply_place_selection};
pub use position::{PositionOptions, PositionSource};
pub use request::{LocationRequest, LocationSink, LocationState, RequestInFlight, locate};

#[cfg(test)]
pub use request::MockLocationSink;
