// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::session_key::READER_ID;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_sessions::Session;

/// The anonymous reader a request is made on behalf of.
#[derive(Clone, Debug, PartialEq)]
pub struct ReaderId(pub String);

/// Axum layer function giving every session a reader identity. Readers without one get a fresh ID stored in their
/// session, and the ID is made available to handlers as a [ReaderId] extension.
pub async fn reader_identity_layer(session: Session, mut request: Request, next: Next) -> Response {
	let reader_id: Option<String> = match session.get(READER_ID).await {
		Ok(id) => id,
		Err(error) => {
			tracing::error!(source = ?error, "Failed to retrieve reader ID from session");
			return StatusCode::INTERNAL_SERVER_ERROR.into_response();
		}
	};

	let reader_id = match reader_id {
		Some(id) => id,
		None => {
			let new_id = cuid2::create_id();
			if let Err(error) = session.insert(READER_ID, &new_id).await {
				tracing::error!(source = ?error, "Failed to store new reader ID to session");
				return StatusCode::INTERNAL_SERVER_ERROR.into_response();
			}
			tracing::debug!(reader_id = %new_id, "Assigned new reader ID");
			new_id
		}
	};

	request.extensions_mut().insert(ReaderId(reader_id));
	next.run(request).await
}
