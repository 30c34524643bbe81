// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::browser::{FetchTransport, TimerDelay, WindowNotifier, intercept_submission};
use super::controller::FavoriteFormController;
use super::{FAVORITE_BUTTON_CLASS, FAVORITE_FORM_CLASS};
use crate::literature::Literature;
use crate::web::paths::SAVE_FAVORITE_PATH;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const ADD_FAVORITE_LABEL: &str = "☆ Add to favorites";

/// Form adding a book to the reader's favorites.
///
/// Without scripting this is a plain form post. Once hydrated, submissions go through [FavoriteFormController].
#[component]
pub fn FavoriteForm(book: Literature) -> impl IntoView {
	let form_submit = move |event: SubmitEvent| {
		// A form that fails the favorite form checks keeps its regular post.
		let Some(surface) = intercept_submission(&event) else {
			return;
		};

		spawn_local(async move {
			let controller = FavoriteFormController::new(FetchTransport, WindowNotifier, TimerDelay);
			controller.handle_submission(&surface).await;
		});
	};

	let authors = book.authors_field();

	view! {
		<form
			class=FAVORITE_FORM_CLASS
			method="post"
			action=SAVE_FAVORITE_PATH
			data-book-id=book.id.clone()
			on:submit=form_submit
		>
			<input type="hidden" name="book_id" value=book.id.clone() />
			<input type="hidden" name="title" value=book.title.clone() />
			<input type="hidden" name="authors" value=authors />
			<input type="hidden" name="thumbnail" value=book.thumbnail.clone() />
			<input type="hidden" name="link" value=book.link.clone() />
			<input type="hidden" name="year" value=book.year.clone() />
			<button type="submit" class=FAVORITE_BUTTON_CLASS>
				{ADD_FAVORITE_LABEL}
			</button>
		</form>
	}
}
