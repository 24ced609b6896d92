//! Browser-backed capabilities for the location field.
//!
//! These adapters are only exercised in the browser after hydration; on the
//! server they compile but are never called.

use std::rc::Rc;
use std::time::Duration;

use js_sys::{Array, Function, Object, Promise, Reflect};
use leptos::prelude::ServerFnError;
use locate::{
    Coordinates, GeocodeResponse, LocationError, PlaceSelection, PositionOptions,
    PositionSource, ReverseGeocoder,
};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue, prelude::*};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Geolocation, GeolocationPosition, HtmlInputElement};

use crate::api::reverse_geocode;

/// `navigator.geolocation.getCurrentPosition`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPositionSource;

impl PositionSource for BrowserPositionSource {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        let geolocation =
            supported(web_sys::window().and_then(|window| geolocation(&window.navigator())))?;

        let js_options = web_sys::PositionOptions::new();
        js_options.set_enable_high_accuracy(options.high_accuracy);
        js_options.set_timeout(millis(options.timeout));
        js_options.set_maximum_age(millis(options.maximum_age));

        let promise = Promise::new(&mut |resolve, reject| {
            if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &js_options,
            ) {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });

        let position = JsFuture::from(promise).await.map_err(|err| position_error(&err))?;
        let coords = position.unchecked_into::<GeolocationPosition>().coords();

        Coordinates::new(coords.latitude(), coords.longitude())
            .map_err(|_| LocationError::PositionUnavailable)
    }
}

fn supported<T>(capability: Option<T>) -> Result<T, LocationError> {
    capability.ok_or(LocationError::Unsupported)
}

/// The `navigator.geolocation` getter does not check its result, so an
/// absent capability would surface as `Ok(undefined)`.
fn geolocation(navigator: &JsValue) -> Option<Geolocation> {
    property(navigator, "geolocation").map(JsCast::unchecked_into)
}

/// Older engines reject with a `PositionError` rather than a
/// `GeolocationPositionError`, so the code is read structurally.
fn position_error(err: &JsValue) -> LocationError {
    property(err, "code")
        .and_then(|code| code.as_f64())
        .map_or(LocationError::Unknown, |code| {
            LocationError::from_position_error_code(code as u16)
        })
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Reverse geocoding through the [`reverse_geocode`] server function.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerGeocoder;

impl ReverseGeocoder for ServerGeocoder {
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<GeocodeResponse, LocationError> {
        reverse_geocode(coordinates.latitude(), coordinates.longitude())
            .await
            .map_err(lookup_error)
    }
}

#[allow(deprecated)]
fn lookup_error(err: ServerFnError) -> LocationError {
    match err {
        ServerFnError::ServerError(message) => LocationError::lookup(message),
        other => LocationError::lookup(other),
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlaceSearchError {
    #[error("place search is unavailable: {0}")]
    Unavailable(String),
}

/// An address-autocomplete widget that can be attached to a text input.
pub trait PlaceSearchProvider {
    fn attach(
        &self,
        input: &HtmlInputElement,
        on_select: Box<dyn Fn(PlaceSelection)>,
    ) -> Result<(), PlaceSearchError>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps", "places"])]
    type Autocomplete;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps", "places"])]
    fn new(input: &HtmlInputElement, options: &JsValue) -> Result<Autocomplete, JsValue>;

    #[wasm_bindgen(method, js_name = addListener)]
    fn add_listener(this: &Autocomplete, event: &str, handler: &Function) -> JsValue;

    #[wasm_bindgen(method, js_name = getPlace)]
    fn get_place(this: &Autocomplete) -> JsValue;
}

/// `google.maps.places.Autocomplete`, restricted to geocoded addresses.
///
/// Needs the Maps JavaScript API with the Places library loaded on the page;
/// the shell adds the loader when a maps configuration is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct GooglePlaces;

impl PlaceSearchProvider for GooglePlaces {
    fn attach(
        &self,
        input: &HtmlInputElement,
        on_select: Box<dyn Fn(PlaceSelection)>,
    ) -> Result<(), PlaceSearchError> {
        let options = Object::new();
        set(&options, "types", &Array::of1(&"geocode".into()))?;
        set(
            &options,
            "fields",
            &Array::of2(&"formatted_address".into(), &"geometry.location".into()),
        )?;

        let autocomplete = Rc::new(Autocomplete::new(input, &options).map_err(unavailable)?);
        let widget = Rc::clone(&autocomplete);
        let handler = Closure::<dyn Fn()>::new(move || {
            on_select(read_place(&widget.get_place()));
        });
        autocomplete.add_listener("place_changed", handler.as_ref().unchecked_ref());
        // The widget lives as long as the page; so does its listener.
        handler.forget();
        Ok(())
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), PlaceSearchError> {
    Reflect::set(target, &key.into(), value)
        .map(|_| ())
        .map_err(unavailable)
}

fn unavailable(err: JsValue) -> PlaceSearchError {
    PlaceSearchError::Unavailable(format!("{err:?}"))
}

fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    if !target.is_object() {
        return None;
    }
    Reflect::get(target, &key.into())
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Reads a `PlaceResult`; `geometry.location` is a `LatLng` whose
/// coordinates are accessor methods.
fn read_place(place: &JsValue) -> PlaceSelection {
    let formatted_address = property(place, "formatted_address").and_then(|v| v.as_string());
    let location = property(place, "geometry").and_then(|geometry| property(&geometry, "location"));
    let coordinate = |accessor: &str| {
        let location = location.as_ref()?;
        property(location, accessor)?
            .dyn_into::<Function>()
            .ok()?
            .call0(location)
            .ok()?
            .as_f64()
    };

    PlaceSelection {
        formatted_address,
        latitude: coordinate("lat"),
        longitude: coordinate("lng"),
    }
}
