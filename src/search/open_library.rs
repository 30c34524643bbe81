// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{LiteratureSource, SearchError};
use crate::literature::{Literature, PLACEHOLDER_THUMBNAIL};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const SOURCE_NAME: &str = "OpenLibrary";
const SEARCH_URL: &str = "https://openlibrary.org/search.json";
const SITE_URL: &str = "https://openlibrary.org";

#[derive(Debug)]
pub struct OpenLibrarySource {
	client: Client,
}

impl OpenLibrarySource {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl LiteratureSource for OpenLibrarySource {
	fn name(&self) -> &'static str {
		SOURCE_NAME
	}

	async fn search(&self, query: &str) -> Result<Vec<Literature>, SearchError> {
		let request_error = |error| SearchError::Request {
			source_name: SOURCE_NAME,
			error,
		};

		let response = self
			.client
			.get(SEARCH_URL)
			.query(&[("q", query), ("lang", "ru")])
			.send()
			.await
			.map_err(request_error)?;
		if !response.status().is_success() {
			return Err(SearchError::Status {
				source_name: SOURCE_NAME,
				status: response.status().as_u16(),
			});
		}

		let search_response: SearchResponse = response.json().await.map_err(request_error)?;
		Ok(search_response.into_literature())
	}
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
	#[serde(default)]
	docs: Vec<Document>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
	key: String,
	title: String,
	author_name: Vec<String>,
	first_publish_year: Option<i32>,
	cover_i: Option<i64>,
}

impl SearchResponse {
	fn into_literature(self) -> Vec<Literature> {
		self.docs
			.into_iter()
			.map(|document| {
				let thumbnail = match document.cover_i {
					Some(cover_id) if cover_id != 0 => format!("https://covers.openlibrary.org/b/id/{}-M.jpg", cover_id),
					_ => String::from(PLACEHOLDER_THUMBNAIL),
				};
				let year = document.first_publish_year.map(|year| year.to_string()).unwrap_or_default();
				Literature {
					link: format!("{}{}", SITE_URL, document.key),
					id: document.key,
					title: document.title,
					authors: document.author_name,
					year,
					thumbnail,
				}
			})
			.collect()
	}
}
