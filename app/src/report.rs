//! The report page: hosts the location field and shows what it produced.

use leptos::prelude::*;
use locate::Coordinates;

use crate::components::location_field::{self, CoordinatePair};

/// Turns the field's coordinate report into the page's selection. A partial
/// or out-of-range pair clears it.
fn selected_coordinates((latitude, longitude): CoordinatePair) -> Option<Coordinates> {
    let (latitude, longitude) = latitude.zip(longitude)?;
    Coordinates::new(latitude, longitude).ok()
}

fn coordinates_label(coordinates: Option<Coordinates>) -> String {
    coordinates.map_or_else(|| "No coordinates selected".to_owned(), |c| c.to_string())
}

pub fn component() -> impl IntoView {
    let address = RwSignal::new(String::new());
    let coordinates = RwSignal::new(None::<Coordinates>);

    let on_change = Callback::new(move |next: String| address.set(next));
    let on_coordinates_change =
        Callback::new(move |pair: CoordinatePair| coordinates.set(selected_coordinates(pair)));

    view! {
        <section class="px-4 pt-12 pb-24 sm:px-6 lg:px-8">
            <div class="mx-auto space-y-6 max-w-3xl">
                <h1 class="text-4xl font-extrabold text-white">"New report"</h1>
                {location_field::component(address.into(), on_change, Some(on_coordinates_change))}
                <p class="text-sm text-zinc-400">{move || coordinates_label(coordinates.get())}</p>
            </div>
        </section>
    }
}
