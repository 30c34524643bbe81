// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Asynchronous submission of "add to favorites" forms.
//!
//! Favorite forms are rendered by [component::FavoriteForm]. Submitting one posts its fields in the background and
//! reports progress on the form's button instead of navigating away.

pub mod browser;
pub mod component;
pub mod controller;

/// Marker class identifying favorite forms.
pub const FAVORITE_FORM_CLASS: &str = "favorite-form";
/// Class of the submit button inside a favorite form, which also shows submission progress.
pub const FAVORITE_BUTTON_CLASS: &str = "favorite-btn";
/// Attribute holding the identifier of the book a favorite form is for.
pub const RECORD_ID_ATTRIBUTE: &str = "data-book-id";
