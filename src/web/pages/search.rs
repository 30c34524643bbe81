// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::book_card::BookCard;
use super::utils::{SearchQuery, search_literature};
use crate::favorite_form::component::FavoriteForm;
use crate::web::paths::SEARCH_PAGE_PATH;
use leptos::prelude::*;
use leptos_router::hooks::use_query;

#[component]
pub fn SearchPage() -> impl IntoView {
	let query = use_query::<SearchQuery>();
	let search_text = move || {
		query
			.read()
			.as_ref()
			.ok()
			.and_then(|query| query.q.clone())
			.unwrap_or_default()
	};

	let results = Resource::new(search_text, search_literature);

	view! {
		<form class="search_form" method="get" action=SEARCH_PAGE_PATH>
			<input
				type="search"
				name="q"
				class="search_form_input"
				placeholder="Title, author or keyword"
				value=search_text
			/>
			<button type="submit">"Search"</button>
		</form>
		<Transition fallback=|| view! { <div class="search_loading">"Searching..."</div> }>
			{
				move || {
					if search_text().trim().is_empty() {
						return view! {
							<p class="search_intro">"Search Google Books and OpenLibrary, then save what you find to your favorites."</p>
						}.into_any();
					}
					match results.get() {
						Some(Ok(books)) if !books.is_empty() => view! {
							<ul class="book_list">
								{
									books.into_iter().map(|book| {
										let card_book = book.clone();
										view! {
											<li>
												<BookCard book=card_book>
													<FavoriteForm book />
												</BookCard>
											</li>
										}
									}).collect_view()
								}
							</ul>
						}.into_any(),
						Some(Ok(_)) => view! {
							<div class="search_none">"Nothing was found."</div>
						}.into_any(),
						Some(Err(_)) => view! {
							<div class="search_error">"The search could not be completed. Try again later."</div>
						}.into_any(),
						None => ().into_any(),
					}
				}
			}
		</Transition>
	}
}
