// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::identity::ReaderId;
use super::paths::FAVORITES_PAGE_PATH;
use crate::library::FavoriteStore;
use crate::literature::{Literature, split_authors};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SAVED_MESSAGE: &str = "Book added to favorites";

#[derive(Debug, Deserialize)]
pub struct SaveFavoriteForm {
	#[serde(default)]
	book_id: String,
	#[serde(default)]
	title: String,
	#[serde(default)]
	authors: String,
	#[serde(default)]
	thumbnail: String,
	#[serde(default)]
	link: String,
	#[serde(default)]
	year: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SavedResponse {
	pub message: String,
	pub status: String,
}

/// Route function saving a book to the reader's favorites. Responds with JSON on success and a plain text reason
/// otherwise.
pub async fn save_favorite_route(
	State(favorites): State<Arc<dyn FavoriteStore>>,
	Extension(reader): Extension<ReaderId>,
	Form(form): Form<SaveFavoriteForm>,
) -> Response {
	let book = Literature {
		id: String::from(form.book_id.trim()),
		title: String::from(form.title.trim()),
		authors: split_authors(&form.authors),
		year: form.year,
		thumbnail: form.thumbnail,
		link: form.link,
	};

	if book.id.is_empty() || book.title.is_empty() {
		tracing::info!(reader_id = %reader.0, "Tried to save a book without an ID or title");
		return (StatusCode::BAD_REQUEST, "Missing required book data").into_response();
	}

	if let Err(error) = favorites.save_book(&reader.0, &book).await {
		tracing::error!(source = ?error, book_id = %book.id, "Failed to save favorite book");
		return (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response();
	}

	let response = SavedResponse {
		message: String::from(SAVED_MESSAGE),
		status: String::from("success"),
	};
	(StatusCode::CREATED, Json(response)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct DeleteFavoriteForm {
	#[serde(default)]
	book_id: String,
}

/// Route function removing a book from the reader's favorites, then returning to the favorites page.
pub async fn delete_favorite_route(
	State(favorites): State<Arc<dyn FavoriteStore>>,
	Extension(reader): Extension<ReaderId>,
	Form(form): Form<DeleteFavoriteForm>,
) -> Response {
	let book_id = form.book_id.trim();
	if book_id.is_empty() {
		return (StatusCode::BAD_REQUEST, "Missing book ID").into_response();
	}

	if let Err(error) = favorites.delete_book(&reader.0, book_id).await {
		tracing::error!(source = ?error, book_id, "Failed to delete favorite book");
		return (StatusCode::INTERNAL_SERVER_ERROR, "Could not delete the book").into_response();
	}

	Redirect::to(FAVORITES_PAGE_PATH).into_response()
}

/// Route function removing every book from the reader's favorites, then returning to the favorites page.
pub async fn clear_favorites_route(
	State(favorites): State<Arc<dyn FavoriteStore>>,
	Extension(reader): Extension<ReaderId>,
) -> Response {
	if let Err(error) = favorites.clear_favorites(&reader.0).await {
		tracing::error!(source = ?error, reader_id = %reader.0, "Failed to clear favorites");
		return (StatusCode::INTERNAL_SERVER_ERROR, "Could not clear favorites").into_response();
	}

	Redirect::to(FAVORITES_PAGE_PATH).into_response()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::library::memory::MemoryFavoriteStore;
	use crate::model::BookStatus;
	use crate::web::identity::reader_identity_layer;
	use crate::web::paths::{CLEAR_FAVORITES_PATH, DELETE_FAVORITE_PATH, SAVE_FAVORITE_PATH};
	use axum::Router;
	use axum::body::{Body, to_bytes};
	use axum::extract::Request;
	use axum::http::header::{CONTENT_TYPE, LOCATION};
	use axum::middleware::from_fn;
	use axum::routing::post;
	use tower::ServiceExt;
	use tower_sessions::{MemoryStore, SessionManagerLayer};

	const READER: &str = "reader-under-test";

	/// Stands in for the identity layer so stored books can be looked up by a known reader.
	async fn fixed_reader(mut request: Request, next: axum::middleware::Next) -> Response {
		request.extensions_mut().insert(ReaderId(String::from(READER)));
		next.run(request).await
	}

	fn app(store: Arc<dyn FavoriteStore>) -> Router {
		Router::new()
			.route(SAVE_FAVORITE_PATH, post(save_favorite_route))
			.route(DELETE_FAVORITE_PATH, post(delete_favorite_route))
			.route(CLEAR_FAVORITES_PATH, post(clear_favorites_route))
			.layer(from_fn(fixed_reader))
			.with_state(store)
	}

	fn form_post(path: &str, body: &str) -> Request {
		Request::builder()
			.method("POST")
			.uri(path)
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(Body::from(String::from(body)))
			.unwrap()
	}

	async fn body_text(response: Response) -> String {
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		String::from_utf8(bytes.to_vec()).unwrap()
	}

	const ROADSIDE_PICNIC: &str = "book_id=%2Fworks%2FOL27448W&title=Roadside+Picnic&authors=Arkady+Strugatsky%3B+Boris+Strugatsky&thumbnail=%2Fimages%2Fno-cover.svg&link=https%3A%2F%2Fopenlibrary.org%2Fworks%2FOL27448W&year=1972";

	#[tokio::test]
	async fn save_responds_created_with_message() {
		let store = Arc::new(MemoryFavoriteStore::default());
		let response = app(store.clone())
			.oneshot(form_post(SAVE_FAVORITE_PATH, ROADSIDE_PICNIC))
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::CREATED);
		let body: SavedResponse = serde_json::from_str(&body_text(response).await).unwrap();
		assert_eq!(body.message, SAVED_MESSAGE);
		assert_eq!(body.status, "success");

		let saved = store.books_for_reader(READER, BookStatus::Favorite).await.unwrap();
		assert_eq!(saved.len(), 1);
		assert_eq!(saved[0].id, "/works/OL27448W");
		assert_eq!(saved[0].title, "Roadside Picnic");
		assert_eq!(saved[0].authors, vec!["Arkady Strugatsky", "Boris Strugatsky"]);
		assert_eq!(saved[0].year, "1972");
	}

	#[tokio::test]
	async fn saving_twice_keeps_one_entry() {
		let store = Arc::new(MemoryFavoriteStore::default());
		let app = app(store.clone());
		for _ in 0..2 {
			let response = app
				.clone()
				.oneshot(form_post(SAVE_FAVORITE_PATH, ROADSIDE_PICNIC))
				.await
				.unwrap();
			assert_eq!(response.status(), StatusCode::CREATED);
		}

		let saved = store.books_for_reader(READER, BookStatus::Favorite).await.unwrap();
		assert_eq!(saved.len(), 1);
	}

	#[tokio::test]
	async fn save_without_title_is_rejected_with_text() {
		let store = Arc::new(MemoryFavoriteStore::default());
		let response = app(store.clone())
			.oneshot(form_post(SAVE_FAVORITE_PATH, "book_id=abc&title=++"))
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		assert_eq!(body_text(response).await, "Missing required book data");
		assert!(store.books_for_reader(READER, BookStatus::Favorite).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn save_without_id_is_rejected() {
		let response = app(Arc::new(MemoryFavoriteStore::default()))
			.oneshot(form_post(SAVE_FAVORITE_PATH, "title=Roadside+Picnic"))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn store_failure_is_internal_error() {
		let response = app(Arc::new(MemoryFavoriteStore::failing()))
			.oneshot(form_post(SAVE_FAVORITE_PATH, ROADSIDE_PICNIC))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body_text(response).await, "Internal database error");
	}

	#[tokio::test]
	async fn save_requires_post() {
		let response = app(Arc::new(MemoryFavoriteStore::default()))
			.oneshot(Request::builder().uri(SAVE_FAVORITE_PATH).body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
	}

	#[tokio::test]
	async fn delete_removes_book_and_redirects() {
		let store = Arc::new(MemoryFavoriteStore::default());
		let app = app(store.clone());
		app.clone()
			.oneshot(form_post(SAVE_FAVORITE_PATH, ROADSIDE_PICNIC))
			.await
			.unwrap();

		let response = app
			.oneshot(form_post(DELETE_FAVORITE_PATH, "book_id=%2Fworks%2FOL27448W"))
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::SEE_OTHER);
		assert_eq!(response.headers()[LOCATION], FAVORITES_PAGE_PATH);
		assert!(store.books_for_reader(READER, BookStatus::Favorite).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn delete_without_id_is_rejected() {
		let response = app(Arc::new(MemoryFavoriteStore::default()))
			.oneshot(form_post(DELETE_FAVORITE_PATH, "book_id="))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		assert_eq!(body_text(response).await, "Missing book ID");
	}

	#[tokio::test]
	async fn clear_empties_library_and_redirects() {
		let store = Arc::new(MemoryFavoriteStore::default());
		let app = app(store.clone());
		app.clone()
			.oneshot(form_post(SAVE_FAVORITE_PATH, ROADSIDE_PICNIC))
			.await
			.unwrap();
		app.clone()
			.oneshot(form_post(SAVE_FAVORITE_PATH, "book_id=zyTCAlFPjgYC&title=The+Google+Story"))
			.await
			.unwrap();

		let response = app.oneshot(form_post(CLEAR_FAVORITES_PATH, "")).await.unwrap();

		assert_eq!(response.status(), StatusCode::SEE_OTHER);
		assert_eq!(response.headers()[LOCATION], FAVORITES_PAGE_PATH);
		assert!(store.books_for_reader(READER, BookStatus::Favorite).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn readers_get_separate_libraries() {
		let store = Arc::new(MemoryFavoriteStore::default());
		let app = Router::new()
			.route(SAVE_FAVORITE_PATH, post(save_favorite_route))
			.layer(from_fn(reader_identity_layer))
			.layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
			.with_state(store.clone() as Arc<dyn FavoriteStore>);

		// Neither request carries a session cookie, so each is a new reader.
		for body in [ROADSIDE_PICNIC, "book_id=zyTCAlFPjgYC&title=The+Google+Story"] {
			let response = app.clone().oneshot(form_post(SAVE_FAVORITE_PATH, body)).await.unwrap();
			assert_eq!(response.status(), StatusCode::CREATED);
		}

		let readers = store.reader_ids();
		assert_eq!(readers.len(), 2);
		assert_ne!(readers[0], readers[1]);
		assert!(!readers.iter().any(|reader| reader == READER));

		let first = store.books_for_reader(&readers[0], BookStatus::Favorite).await.unwrap();
		let second = store.books_for_reader(&readers[1], BookStatus::Favorite).await.unwrap();
		assert_eq!(first.len(), 1);
		assert_eq!(first[0].id, "/works/OL27448W");
		assert_eq!(second.len(), 1);
		assert_eq!(second[0].id, "zyTCAlFPjgYC");
	}
}
