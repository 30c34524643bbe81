// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::favorites::{clear_favorites_route, delete_favorite_route, save_favorite_route};
use super::identity::reader_identity_layer;
use super::pages::app::App;
use super::pages::shell::shell;
use super::paths::{CLEAR_FAVORITES_PATH, DELETE_FAVORITE_PATH, SAVE_FAVORITE_PATH};
use super::session::DatabaseStore;
use super::state::AppState;
use crate::config::ConfigData;
use crate::database::DbPool;
use crate::library::PgFavoriteStore;
use crate::search::google_books::GoogleBooksSource;
use crate::search::open_library::OpenLibrarySource;
use crate::search::{LiteratureSource, MultiSource};
use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use leptos::logging::log;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list, render_app_to_stream};
use miette::IntoDiagnostic;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;
use tower_sessions::cookie::SameSite;
use tower_sessions::service::SessionManagerLayer;
use tower_sessions::{Expiry, SessionStore};

/// Readers keep their library as long as they visit at least this often.
const SESSION_INACTIVITY_DAYS: i64 = 365;

pub async fn run_server(config: Arc<ConfigData>, db_connection_pool: DbPool) -> miette::Result<()> {
	let web_config = get_configuration(None).into_diagnostic()?;
	let site_addr = &config.web.bind_addr;
	let leptos_options = web_config.leptos_options;
	let routes = generate_route_list(App);

	let session_store = DatabaseStore::new(db_connection_pool.clone());
	let session_layer = SessionManagerLayer::new(session_store)
		.with_same_site(SameSite::Lax)
		.with_secure(config.web.secure_cookies)
		.with_expiry(Expiry::OnInactivity(time::Duration::days(SESSION_INACTIVITY_DAYS)));

	let http_client = reqwest::Client::builder().build().into_diagnostic()?;
	let sources: Vec<Arc<dyn LiteratureSource>> = vec![
		Arc::new(GoogleBooksSource::new(
			http_client.clone(),
			config.google_books.api_key.clone(),
		)),
		Arc::new(OpenLibrarySource::new(http_client)),
	];

	let app_state = AppState {
		leptos_options,
		config: Arc::clone(&config),
		favorites: Arc::new(PgFavoriteStore::new(db_connection_pool)),
		search: Arc::new(MultiSource::new(sources)),
	};

	let app = Router::new()
		.leptos_routes_with_context(
			&app_state,
			routes,
			{
				let app_state = app_state.clone();
				move || provide_context(app_state.clone())
			},
			{
				let leptos_options = app_state.leptos_options.clone();
				move || shell(leptos_options.clone())
			},
		)
		.route(SAVE_FAVORITE_PATH, post(save_favorite_route))
		.route(DELETE_FAVORITE_PATH, post(delete_favorite_route))
		.route(CLEAR_FAVORITES_PATH, post(clear_favorites_route))
		.fallback(file_and_error_handler);
	let app = with_reader_identity(app, session_layer).with_state(app_state);

	log!("Listening on http://{}", &site_addr);
	let listener = TcpListener::bind(&site_addr).await.into_diagnostic()?;
	axum::serve(listener, app.into_make_service()).await.into_diagnostic()?;

	Ok(())
}

/// Gives every matched route a reader identity. Requests falling through to static files get no session.
fn with_reader_identity<S, Store>(router: Router<S>, session_layer: SessionManagerLayer<Store>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	Store: SessionStore + Clone,
{
	router
		.route_layer(from_fn(reader_identity_layer))
		.layer(session_layer)
}

async fn file_and_error_handler(uri: Uri, State(state): State<AppState>, request: Request) -> Response {
	let site_root_dir = state.leptos_options.site_root.clone();
	let response = get_static_file(uri.clone(), &site_root_dir).await;
	let response = match response {
		Ok(response) => response,
		Err(error) => return error.into_response(),
	};

	if response.status() == StatusCode::OK {
		response.into_response()
	} else {
		let handler = render_app_to_stream(App);
		handler(request).await.into_response()
	}
}

async fn get_static_file(uri: Uri, root: &str) -> Result<Response, StatusCode> {
	let Ok(request) = Request::builder().uri(uri.clone()).body(Body::empty()) else {
		return Err(StatusCode::INTERNAL_SERVER_ERROR);
	};

	match ServeDir::new(root).oneshot(request).await {
		Ok(response) => Ok(response.into_response()),
		Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::web::identity::ReaderId;
	use axum::Extension;
	use axum::body::to_bytes;
	use axum::http::header::SET_COOKIE;
	use axum::routing::get;
	use tower_sessions::MemoryStore;

	async fn whoami(Extension(reader): Extension<ReaderId>) -> String {
		reader.0
	}

	async fn stylesheet() -> &'static str {
		"body {}"
	}

	fn app() -> Router {
		let router = Router::new().route("/favorites", get(whoami)).fallback(stylesheet);
		with_reader_identity(router, SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
	}

	fn get_request(path: &str) -> Request {
		Request::builder().uri(path).body(Body::empty()).unwrap()
	}

	#[tokio::test]
	async fn pages_get_a_reader() {
		let response = app().oneshot(get_request("/favorites")).await.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		assert!(response.headers().get(SET_COOKIE).is_some());
		let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		assert!(!body.is_empty());
	}

	#[tokio::test]
	async fn static_files_get_no_session() {
		let response = app().oneshot(get_request("/pkg/literature-finder.css")).await.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		assert!(response.headers().get(SET_COOKIE).is_none());
	}
}
