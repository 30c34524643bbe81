// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use leptos::logging::{error, log};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const SAVING_LABEL: &str = "...Saving";
pub const SAVED_LABEL: &str = "✅ Favorited";
pub const ERROR_LABEL: &str = "❌ Error";
pub const NETWORK_ERROR_LABEL: &str = "❌ Network error";

pub const REJECTED_ALERT_PREFIX: &str = "Could not add to favorites: ";
pub const NETWORK_ERROR_ALERT: &str = "A network error occurred.";

/// Class added to the button once the book is saved.
pub const BUTTON_SAVED_CLASS: &str = "saved";
/// Class added to the form once the book is saved. Its presence keeps the success label after the restore delay.
pub const FORM_SAVED_CLASS: &str = "is-saved";

/// How long after the response the button becomes interactive again.
pub const RESTORE_DELAY: Duration = Duration::from_millis(1500);

/// Form fields in document order, as sent in the request body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormPayload {
	fields: Vec<(String, String)>,
}

impl FormPayload {
	pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.fields.push((name.into(), value.into()));
	}

	/// Gets the first value submitted under `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.fields
			.iter()
			.find(|(field_name, _)| field_name == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Encodes the fields as an `application/x-www-form-urlencoded` body.
	pub fn encode(&self) -> String {
		self.fields
			.iter()
			.map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
			.collect::<Vec<_>>()
			.join("&")
	}
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FormPayload {
	fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
		let fields = iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect();
		Self { fields }
	}
}

/// Status and body text of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpReply {
	pub status: u16,
	pub body: String,
}

impl HttpReply {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Which branch a submission ended in.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionOutcome {
	/// The server accepted the favorite. The message is only logged, and may be missing.
	Saved { message: Option<String> },
	/// The server answered outside 2xx; `reason` is the raw body shown to the user.
	Rejected { status: u16, reason: String },
	/// The request or reading its response failed.
	NetworkFailure { detail: String },
}

#[derive(Deserialize)]
struct SavedResponse {
	#[serde(default)]
	message: Option<String>,
}

/// A favorite form together with its submit button.
pub trait FavoriteSurface {
	/// The URL the form submits to.
	fn action(&self) -> String;
	/// Current field values of the form.
	fn payload(&self) -> FormPayload;
	fn button_label(&self) -> String;
	fn set_button_label(&self, label: &str);
	fn set_button_disabled(&self, disabled: bool);
	fn add_button_class(&self, class: &str);
	fn add_form_class(&self, class: &str);
	fn form_has_class(&self, class: &str) -> bool;
}

/// Sends the form to the server.
///
/// An `Err` covers everything that keeps a status and body from arriving: connection problems and failure to read
/// the body.
#[allow(async_fn_in_trait)]
pub trait FavoriteTransport {
	async fn post_form(&self, action: &str, payload: &FormPayload) -> Result<HttpReply, TransportError>;
}

/// Blocking user notification.
pub trait Notifier {
	fn alert(&self, message: &str);
}

#[allow(async_fn_in_trait)]
pub trait Delay {
	async fn wait(&self, duration: Duration);
}

/// Drives a favorite form through one submission.
///
/// Submissions of different forms share nothing but the controller's collaborators, none of which hold per-form
/// state. A second submission of the same form while one is in flight is not prevented beyond disabling the button.
pub struct FavoriteFormController<T, N, D> {
	transport: T,
	notifier: N,
	delay: D,
}

impl<T: FavoriteTransport, N: Notifier, D: Delay> FavoriteFormController<T, N, D> {
	pub fn new(transport: T, notifier: N, delay: D) -> Self {
		Self {
			transport,
			notifier,
			delay,
		}
	}

	/// Submits the form and updates its button as the request progresses.
	///
	/// Default navigation must already have been suppressed by the caller. Returns once the button is interactive
	/// again, after [RESTORE_DELAY].
	pub async fn handle_submission<S: FavoriteSurface>(&self, surface: &S) -> SubmissionOutcome {
		let original_label = surface.button_label();
		let payload = surface.payload();

		surface.set_button_disabled(true);
		surface.set_button_label(SAVING_LABEL);

		let action = surface.action();
		let outcome = match self.transport.post_form(&action, &payload).await {
			Ok(reply) if reply.is_success() => match serde_json::from_str::<SavedResponse>(&reply.body) {
				Ok(response) => SubmissionOutcome::Saved {
					message: response.message,
				},
				Err(parse_error) => SubmissionOutcome::NetworkFailure {
					detail: format!("Unreadable success response: {}", parse_error),
				},
			},
			Ok(reply) => SubmissionOutcome::Rejected {
				status: reply.status,
				reason: reply.body,
			},
			Err(transport_error) => SubmissionOutcome::NetworkFailure {
				detail: transport_error.to_string(),
			},
		};

		match &outcome {
			SubmissionOutcome::Saved { message } => {
				log!("Favorite saved: {}", message.as_deref().unwrap_or("(no message)"));
				surface.set_button_label(SAVED_LABEL);
				surface.add_button_class(BUTTON_SAVED_CLASS);
				surface.add_form_class(FORM_SAVED_CLASS);
			}
			SubmissionOutcome::Rejected { status, reason } => {
				error!("Favorite rejected with status {}: {}", status, reason);
				surface.set_button_label(ERROR_LABEL);
				self.notifier.alert(&format!("{}{}", REJECTED_ALERT_PREFIX, reason));
			}
			SubmissionOutcome::NetworkFailure { detail } => {
				error!("Network error saving favorite: {}", detail);
				surface.set_button_label(NETWORK_ERROR_LABEL);
				self.notifier.alert(NETWORK_ERROR_ALERT);
			}
		}

		self.delay.wait(RESTORE_DELAY).await;

		surface.set_button_disabled(false);
		if !surface.form_has_class(FORM_SAVED_CLASS) {
			surface.set_button_label(&original_label);
		}

		outcome
	}
}
