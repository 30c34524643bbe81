// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::errors::not_found::NotFound;
use super::favorites::FavoritesPage;
use super::header::PageHeader;
use super::search::SearchPage;
use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Stylesheet href="/pkg/literature-finder.css" />
		<Title text="Literature Finder" />

		<Router>
			<PageHeader />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=SearchPage />
					<Route path=path!("/search") view=SearchPage />
					<Route path=path!("/favorites") view=FavoritesPage />
				</Routes>
			</main>
		</Router>
	}
}
