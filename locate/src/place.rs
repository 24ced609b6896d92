use serde::{Deserialize, Serialize};

use crate::{Coordinates, LocationSink};

/// What the autocomplete widget reports when the user picks a suggestion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceSelection {
    pub formatted_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PlaceSelection {
    /// The selected place's position, when the widget resolved one that is
    /// usable as coordinates.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        let (latitude, longitude) = self.latitude.zip(self.longitude)?;
        Coordinates::new(latitude, longitude).ok()
    }
}

/// Forwards a place selection to the sink.
///
/// A selection without a resolvable position still updates the address; its
/// coordinates are silently left alone.
pub fn apply_place_selection<S: LocationSink>(selection: &PlaceSelection, sink: &S) {
    if let Some(address) = selection
        .formatted_address
        .as_deref()
        .filter(|address| !address.is_empty())
    {
        sink.address_changed(address.to_owned());
    }
    if let Some(coordinates) = selection.coordinates() {
        sink.coordinates_changed(Some(coordinates.latitude()), Some(coordinates.longitude()));
    }
}
