// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::literature::Literature;
use leptos::prelude::*;
use leptos_router::params::Params;

#[derive(Clone, Debug, Params, PartialEq)]
pub struct SearchQuery {
	pub q: Option<String>,
}

#[server]
pub async fn search_literature(query: String) -> Result<Vec<Literature>, ServerFnError> {
	use crate::web::state::AppState;

	let query = query.trim();
	if query.is_empty() {
		return Ok(Vec::new());
	}

	let state: AppState = expect_context();
	let books = state.search.search(query).await;
	tracing::info!(query, found = books.len(), "Searched for literature");
	Ok(books)
}

#[server]
pub async fn get_favorites() -> Result<Vec<Literature>, ServerFnError> {
	use super::server_utils::get_reader_id_from_request;
	use crate::model::BookStatus;
	use crate::web::state::AppState;

	let Some(reader_id) = get_reader_id_from_request().await? else {
		return Ok(Vec::new());
	};

	let state: AppState = expect_context();
	let books = state.favorites.books_for_reader(&reader_id, BookStatus::Favorite).await;
	match books {
		Ok(books) => Ok(books),
		Err(error) => {
			tracing::error!(source = ?error, reader_id, "Failed to load favorites");
			Err(ServerFnError::ServerError(String::from("Could not load your library")))
		}
	}
}
