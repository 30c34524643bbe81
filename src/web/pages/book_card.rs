// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::literature::Literature;
use leptos::prelude::*;

/// Cover, title and details of a book.
#[component]
pub fn BookCard(book: Literature, children: Children) -> impl IntoView {
	let authors = book.authors_display();
	let authors = (!authors.is_empty()).then(|| view! { <p class="book_card_authors">{authors}</p> });
	let year = (!book.year.is_empty()).then(|| view! { <p class="book_card_year">{book.year.clone()}</p> });

	view! {
		<article class="book_card">
			<img class="book_card_cover" src=book.thumbnail.clone() alt="Cover" loading="lazy" />
			<div class="book_card_details">
				<h3 class="book_card_title">{book.title.clone()}</h3>
				{authors}
				{year}
				<a class="book_card_link" href=book.link.clone() target="_blank" rel="noopener">
					"More information"
				</a>
				<div class="book_card_actions">
					{children()}
				</div>
			</div>
		</article>
	}
}
