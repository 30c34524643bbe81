// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::web::session_key::READER_ID;
use crate::web::state::AppState;
use leptos::prelude::*;
use leptos_axum::extract_with_state;
use tower_sessions::session::Session;

/// Gets the reader ID for a request.
/// Must be used from a server function; relies on extracting request data.
pub async fn get_reader_id_from_request() -> Result<Option<String>, ServerFnError> {
	let state: AppState = expect_context();
	let session: Session = extract_with_state(&state).await?;
	let reader_id: Option<String> = session.get(READER_ID).await?;
	Ok(reader_id)
}
