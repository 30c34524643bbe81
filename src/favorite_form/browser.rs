// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::controller::{Delay, FavoriteSurface, FavoriteTransport, FormPayload, HttpReply, Notifier, TransportError};
use super::{FAVORITE_BUTTON_CLASS, FAVORITE_FORM_CLASS, RECORD_ID_ATTRIBUTE};
use gloo_net::http::Request;
use leptos::logging::error;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::{Event, FormData, HtmlButtonElement, HtmlFormElement};

/// Takes over a submit event if it came from a favorite form, suppressing the browser's own navigation.
///
/// Any other form is left alone and submits normally, so a form missing its markers degrades to a full-page post.
pub fn intercept_submission(event: &Event) -> Option<DomFavoriteForm> {
	let surface = event
		.target()
		.and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
		.and_then(DomFavoriteForm::from_form)?;
	event.prevent_default();
	Some(surface)
}

/// A favorite form in the live document.
pub struct DomFavoriteForm {
	form: HtmlFormElement,
	button: HtmlButtonElement,
}

impl DomFavoriteForm {
	/// Wraps a form element if it is a favorite form: it carries the marker class and the record ID attribute and
	/// contains the favorite button.
	pub fn from_form(form: HtmlFormElement) -> Option<Self> {
		if !form.class_list().contains(FAVORITE_FORM_CLASS) || !form.has_attribute(RECORD_ID_ATTRIBUTE) {
			return None;
		}
		let button = form
			.query_selector(&format!("button.{}", FAVORITE_BUTTON_CLASS))
			.ok()
			.flatten()?
			.dyn_into::<HtmlButtonElement>()
			.ok()?;
		Some(Self { form, button })
	}
}

impl FavoriteSurface for DomFavoriteForm {
	fn action(&self) -> String {
		self.form.action()
	}

	fn payload(&self) -> FormPayload {
		let mut payload = FormPayload::default();
		let form_data = match FormData::new_with_form(&self.form) {
			Ok(data) => data,
			Err(read_error) => {
				error!("Couldn't read favorite form fields: {:?}", read_error);
				return payload;
			}
		};
		let entries = match js_sys::try_iter(&form_data) {
			Ok(Some(entries)) => entries,
			_ => return payload,
		};
		for entry in entries.flatten() {
			let entry: js_sys::Array = entry.unchecked_into();
			let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) else {
				// File inputs yield non-string values; favorite forms don't have any.
				continue;
			};
			payload.push(name, value);
		}
		payload
	}

	fn button_label(&self) -> String {
		self.button.text_content().unwrap_or_default()
	}

	fn set_button_label(&self, label: &str) {
		self.button.set_text_content(Some(label));
	}

	fn set_button_disabled(&self, disabled: bool) {
		self.button.set_disabled(disabled);
	}

	fn add_button_class(&self, class: &str) {
		if let Err(class_error) = self.button.class_list().add_1(class) {
			error!("Couldn't add class {} to favorite button: {:?}", class, class_error);
		}
	}

	fn add_form_class(&self, class: &str) {
		if let Err(class_error) = self.form.class_list().add_1(class) {
			error!("Couldn't add class {} to favorite form: {:?}", class, class_error);
		}
	}

	fn form_has_class(&self, class: &str) -> bool {
		self.form.class_list().contains(class)
	}
}

/// Posts forms with the Fetch API.
pub struct FetchTransport;

impl FavoriteTransport for FetchTransport {
	async fn post_form(&self, action: &str, payload: &FormPayload) -> Result<HttpReply, TransportError> {
		let response = Request::post(action)
			.header("Content-Type", "application/x-www-form-urlencoded")
			.body(payload.encode())
			.map_err(|request_error| TransportError(request_error.to_string()))?
			.send()
			.await
			.map_err(|send_error| TransportError(send_error.to_string()))?;

		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|read_error| TransportError(read_error.to_string()))?;

		Ok(HttpReply { status, body })
	}
}

/// Notifies through `window.alert`.
pub struct WindowNotifier;

impl Notifier for WindowNotifier {
	fn alert(&self, message: &str) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Err(alert_error) = window.alert_with_message(message) {
			error!("Couldn't show alert: {:?}", alert_error);
		}
	}
}

/// Waits on a browser timer.
pub struct TimerDelay;

impl Delay for TimerDelay {
	async fn wait(&self, duration: Duration) {
		gloo_timers::future::sleep(duration).await;
	}
}
