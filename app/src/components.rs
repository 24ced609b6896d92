//! This module serves as a container for the reusable UI components of the
//! application.
//!
//! Each sub-module within `components` defines a specific UI element: the
//! location input used on report forms and the not-found page.

pub mod location_field;
pub mod not_found;
