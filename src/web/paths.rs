// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub const SEARCH_PAGE_PATH: &str = "/search";
pub const FAVORITES_PAGE_PATH: &str = "/favorites";
pub const SAVE_FAVORITE_PATH: &str = "/save-favorite";
pub const DELETE_FAVORITE_PATH: &str = "/delete-favorite";
pub const CLEAR_FAVORITES_PATH: &str = "/clear-favorites";
