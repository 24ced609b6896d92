// Core application modules and components
use crate::components::not_found;
use leptos::{
    html::{body, head, html, meta, script},
    prelude::*,
};
use leptos_meta::{MetaTags, Stylesheet, StylesheetProps, Title, TitleProps, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{FlatRoutes, Route, Router},
};

pub mod api;
pub mod browser;
pub mod components;
mod report;
pub mod types;

/// The Maps JavaScript loader for the autocomplete widget, when the server
/// has a maps configuration in context.
fn places_script_src() -> Option<String> {
    #[cfg(feature = "ssr")]
    {
        use_context::<types::AppState>().map(|state| state.maps().places_script_src())
    }
    #[cfg(not(feature = "ssr"))]
    {
        None
    }
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let html_comp = html().lang("en").child((
        head().child((
            meta().charset("utf-8"),
            meta()
                .name("viewport")
                .content("width=device-width, initial-scale=1"),
            // Must execute before hydration attaches the autocomplete widget.
            places_script_src().map(|src| script().src(src).defer("")),
            HydrationScripts(HydrationScriptsProps::builder().options(options).build()),
            MetaTags(),
            Stylesheet(
                StylesheetProps::builder()
                    .id("leptos")
                    .href("/pkg/report.css")
                    .build(),
            ),
            Title(TitleProps::builder().text("Report an issue").build()),
        )),
        body().class("bg-zinc-950").child(self::component),
    ));

    view! {
        <!DOCTYPE html>
        {html_comp}
    }
}

#[must_use]
pub fn component() -> impl IntoView {
    view! {
        <Router>
            <div class="overflow-auto text-white font-poppins">
                <main class="container flex flex-col gap-8 px-4 pt-10 pb-14 mx-auto max-w-4xl md:px-0">
                    <FlatRoutes fallback=not_found::component>
                        <Route path=StaticSegment("") view=report::component/>
                    </FlatRoutes>
                </main>
            </div>
        </Router>
    }
}
