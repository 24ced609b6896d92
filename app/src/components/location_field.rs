//! This module defines the `location_field` component, a text input for a
//! report's location.
//!
//! The input is backed by an address-autocomplete widget, and a pin button
//! next to it fills the field from the device's position. The parent owns the
//! address; the field only reports new values through its callbacks.

use leptos::{html::Input, prelude::*, task::spawn_local};
use locate::{
    LocationRequest, LocationSink, PlaceSelection, PositionSource, ReverseGeocoder,
    apply_place_selection, locate,
};

use crate::browser::{
    BrowserPositionSource, GooglePlaces, PlaceSearchProvider, ServerGeocoder,
};

/// Coordinates as reported to the parent. `(None, None)` means "no position".
pub type CoordinatePair = (Option<f64>, Option<f64>);

/// Forwards location results to the parent's callbacks.
#[derive(Clone, Copy)]
struct CallbackSink {
    on_change: Callback<String>,
    on_coordinates_change: Option<Callback<CoordinatePair>>,
}

impl LocationSink for CallbackSink {
    fn address_changed(&self, address: String) {
        self.on_change.run(address);
    }

    fn coordinates_changed(&self, latitude: Option<f64>, longitude: Option<f64>) {
        if let Some(on_coordinates_change) = self.on_coordinates_change {
            on_coordinates_change.run((latitude, longitude));
        }
    }
}

/// Renders the location field with the browser's geolocation, the reverse
/// geocoding server function and Google Places autocomplete.
///
/// # Arguments
///
/// * `value` - The current address text, owned by the parent.
/// * `on_change` - Receives a new address from a place selection or from
///   reverse geocoding the device's position.
/// * `on_coordinates_change` - Receives the coordinates behind a new address,
///   as soon as they are known.
pub fn component(
    value: Signal<String>,
    on_change: Callback<String>,
    on_coordinates_change: Option<Callback<CoordinatePair>>,
) -> impl IntoView {
    with_providers(
        value,
        on_change,
        on_coordinates_change,
        BrowserPositionSource,
        ServerGeocoder,
        GooglePlaces,
    )
}

/// Renders the location field over the given capabilities.
///
/// Only one location request runs at a time: the pin button is disabled while
/// a request is in flight, and [`LocationRequest::begin`] refuses a second one.
pub fn with_providers<P, G, W>(
    value: Signal<String>,
    on_change: Callback<String>,
    on_coordinates_change: Option<Callback<CoordinatePair>>,
    position_source: P,
    geocoder: G,
    places: W,
) -> impl IntoView
where
    P: PositionSource + Clone + Send + Sync + 'static,
    G: ReverseGeocoder + Clone + Send + Sync + 'static,
    W: PlaceSearchProvider + 'static,
{
    let sink = CallbackSink {
        on_change,
        on_coordinates_change,
    };
    field(
        value,
        sink,
        RwSignal::new(LocationRequest::default()),
        position_source,
        geocoder,
        places,
    )
}

/// Moves the request to busy. `false` when one is already in flight.
fn start_request(request: RwSignal<LocationRequest>) -> bool {
    matches!(request.try_update(LocationRequest::begin), Some(Ok(())))
}

fn field<P, G, W>(
    value: Signal<String>,
    sink: CallbackSink,
    request: RwSignal<LocationRequest>,
    position_source: P,
    geocoder: G,
    places: W,
) -> impl IntoView
where
    P: PositionSource + Clone + Send + Sync + 'static,
    G: ReverseGeocoder + Clone + Send + Sync + 'static,
    W: PlaceSearchProvider + 'static,
{
    let busy = Memo::new(move |_| request.with(LocationRequest::is_busy));
    let error = Memo::new(move |_| request.with(|r| r.error().map(ToString::to_string)));
    let input_ref = NodeRef::<Input>::new();

    // Attach the autocomplete widget once the input is in the DOM.
    Effect::new(move |_| {
        let Some(input) = input_ref.get() else {
            return;
        };
        let on_select = Box::new(move |selection: PlaceSelection| {
            apply_place_selection(&selection, &sink);
        });
        if let Err(err) = places.attach(&input, on_select) {
            leptos::logging::warn!("Address autocomplete disabled: {err}");
        }
    });

    let use_my_location = move |_| {
        if !start_request(request) {
            return;
        }
        let position_source = position_source.clone();
        let geocoder = geocoder.clone();
        spawn_local(async move {
            let outcome = locate(&position_source, &geocoder, &sink).await;
            request.update(|r| r.finish(outcome));
        });
    };

    view! {
        <div class="space-y-2">
            <label for="location" class="block text-sm font-medium text-zinc-400">"Location"</label>
            <div class="relative">
                <input
                    id="location"
                    name="location"
                    type="text"
                    autocomplete="off"
                    placeholder="Enter location or use pin"
                    node_ref=input_ref
                    prop:value=move || value.get()
                    class="py-3.5 pr-12 pl-4 w-full text-white rounded-xl border transition-colors duration-200 focus:ring-2 focus:outline-none bg-zinc-900/50 border-zinc-800 focus:ring-sky-500/40"
                />
                <button
                    type="button"
                    title="Get current location"
                    disabled=move || busy.get()
                    on:click=use_my_location
                    class="absolute right-3 top-1/2 p-1.5 rounded-lg transition-colors duration-200 -translate-y-1/2 disabled:opacity-50 disabled:cursor-not-allowed bg-sky-500/10 text-sky-400 hover:bg-sky-500/20"
                >
                    <Show when=move || busy.get() fallback=pin_icon>
                        {spinner_icon()}
                    </Show>
                </button>
            </div>
            <Show when=move || error.get().is_some()>
                <p class="flex gap-2 items-center text-sm text-red-400">
                    {move || error.get().unwrap_or_default()}
                </p>
            </Show>
        </div>
    }
}

fn pin_icon() -> impl IntoView {
    view! {
        <svg class="w-5 h-5" fill="none" viewBox="0 0 24 24" stroke="currentColor">
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M17.657 16.657L13.414 20.9a1.998 1.998 0 01-2.827 0l-4.244-4.243a8 8 0 1111.314 0z"/>
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M15 11a3 3 0 11-6 0 3 3 0 016 0z"/>
        </svg>
    }
}

fn spinner_icon() -> impl IntoView {
    view! {
        <svg class="w-5 h-5 animate-spin" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
            <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"/>
            <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"/>
        </svg>
    }
}
