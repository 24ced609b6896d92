#[cfg(feature = "ssr")]
use axum::extract::FromRef;
#[cfg(feature = "ssr")]
use leptos::config::LeptosOptions;
#[cfg(feature = "ssr")]
use locate::{GoogleGeocoder, MapsConfig};

/// Server-side state shared with route handlers and server functions.
#[cfg(feature = "ssr")]
#[derive(FromRef, Debug, Clone)]
pub struct AppState {
    pub geocoder: std::sync::Arc<GoogleGeocoder>,
    pub leptos_options: std::sync::Arc<LeptosOptions>,
}

#[cfg(feature = "ssr")]
impl AppState {
    #[must_use]
    pub fn new(maps: MapsConfig, leptos_options: LeptosOptions) -> Self {
        Self {
            geocoder: std::sync::Arc::new(GoogleGeocoder::new(maps)),
            leptos_options: std::sync::Arc::new(leptos_options),
        }
    }

    #[must_use]
    pub fn maps(&self) -> &MapsConfig {
        self.geocoder.config()
    }
}

#[cfg(feature = "ssr")]
impl FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.as_ref().clone()
    }
}
