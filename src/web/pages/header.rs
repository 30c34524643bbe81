// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::web::paths::{FAVORITES_PAGE_PATH, SEARCH_PAGE_PATH};
use leptos::prelude::*;

#[component]
pub fn PageHeader() -> impl IntoView {
	view! {
		<header id="header">
			<a id="header_title" href="/">
				<h1>"Literature Finder"</h1>
			</a>
			<nav id="header_nav">
				<a href=SEARCH_PAGE_PATH>"Search"</a>
				<a href=FAVORITES_PAGE_PATH>"Favorites"</a>
			</nav>
		</header>
	}
}
