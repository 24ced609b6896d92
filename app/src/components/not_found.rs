//! This module defines the `not_found` component, the page rendered for any
//! path the router does not know.
//!
//! It includes an `AppError` enum carrying the HTTP status for the page, which
//! is set on the response during server-side rendering.

use http::status::StatusCode;
use leptos::{
    html::{button, div, h2},
    prelude::*,
    svg::{path, svg},
};
use leptos_router::components::{A, AProps};
use thiserror::Error;

/// Where "Go Home" leads, whatever the history holds.
pub const HOME_PATH: &str = "/";

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Page Not Found")]
    NotFound,
}

impl AppError {
    /// Returns the HTTP status code associated with the error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Renders the not-found page: a warning icon, a heading and a link back to
/// the application root.
pub fn component() -> impl IntoView {
    let error = AppError::NotFound;

    // On the server, answer with 404 rather than 200.
    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let Some(response) = use_context::<ResponseOptions>() {
            response.set_status(error.status_code());
        }
    }

    div()
        .class("flex overflow-y-hidden flex-col justify-center items-center space-y-6 h-screen text-white")
        .child((
            svg()
                .attr("class", "w-24 h-24 text-red-500")
                .attr("fill", "none")
                .attr("viewBox", "0 0 24 24")
                .attr("stroke", "currentColor")
                .child(
                    path()
                        .attr("stroke-linecap", "round")
                        .attr("stroke-linejoin", "round")
                        .attr("stroke-width", "2")
                        .attr("d", "M12 9v3m0 3h.01M12 4a8 8 0 100 16 8 8 0 000-16z"),
                ),
            h2().class("text-3xl").child(error.to_string()),
            A(AProps::builder()
                .href(HOME_PATH)
                .children(ToChildren::to_children(move || {
                    button()
                        .class("py-4 px-6 mt-4 text-white bg-blue-500 rounded transition duration-200 hover:bg-blue-600")
                        .child("Go Home")
                }))
                .build()),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound.status_code().as_u16(), 404);
    }

    #[test]
    fn test_not_found_heading() {
        assert_eq!(AppError::NotFound.to_string(), "Page Not Found");
    }

    #[test]
    fn test_renders_heading_and_home_link() {
        use leptos::tachys::view::RenderHtml as _;
        use leptos_router::{components::Router, location::RequestUrl};

        let owner = Owner::new();
        owner.with(|| {
            provide_context(RequestUrl::new("/no/such/page"));
            let html = view! { <Router>{component()}</Router> }.to_html();

            assert!(html.contains("Page Not Found"));
            assert!(html.contains("href=\"/\""), "{html}");
            assert!(html.contains("Go Home"));
        });
    }
}
