// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::book_card::BookCard;
use super::utils::get_favorites;
use crate::web::paths::{CLEAR_FAVORITES_PATH, DELETE_FAVORITE_PATH};
use leptos::prelude::*;

#[component]
pub fn FavoritesPage() -> impl IntoView {
	let favorites = Resource::new(|| (), |_| get_favorites());

	view! {
		<h2>"Favorites"</h2>
		<Transition fallback=|| view! { <div class="favorites_loading">"Loading your library..."</div> }>
			{
				move || match favorites.get() {
					Some(Ok(books)) if !books.is_empty() => view! {
						<ul class="book_list">
							{
								books.into_iter().map(|book| {
									let book_id = book.id.clone();
									view! {
										<li>
											<BookCard book>
												<form class="delete_favorite_form" method="post" action=DELETE_FAVORITE_PATH>
													<input type="hidden" name="book_id" value=book_id />
													<button type="submit">"Remove"</button>
												</form>
											</BookCard>
										</li>
									}
								}).collect_view()
							}
						</ul>
						<form class="clear_favorites_form" method="post" action=CLEAR_FAVORITES_PATH>
							<button type="submit">"Remove all favorites"</button>
						</form>
					}.into_any(),
					Some(Ok(_)) => view! {
						<div class="favorites_none">"You haven't saved any books yet."</div>
					}.into_any(),
					Some(Err(_)) => view! {
						<div class="favorites_error">"Your library could not be loaded."</div>
					}.into_any(),
					None => ().into_any(),
				}
			}
		</Transition>
	}
}
