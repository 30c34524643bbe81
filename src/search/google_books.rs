// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{LiteratureSource, SearchError};
use crate::literature::{Literature, PLACEHOLDER_THUMBNAIL};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const SOURCE_NAME: &str = "Google Books";
const VOLUMES_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const RESPONSE_FIELDS: &str = "items(id,volumeInfo/title,volumeInfo/authors,volumeInfo/publishedDate,volumeInfo/description,volumeInfo/infoLink,volumeInfo/imageLinks/thumbnail)";
const MAX_RESULTS: &str = "40";

#[derive(Debug)]
pub struct GoogleBooksSource {
	client: Client,
	api_key: Option<String>,
}

impl GoogleBooksSource {
	pub fn new(client: Client, api_key: Option<String>) -> Self {
		Self { client, api_key }
	}
}

#[async_trait]
impl LiteratureSource for GoogleBooksSource {
	fn name(&self) -> &'static str {
		SOURCE_NAME
	}

	async fn search(&self, query: &str) -> Result<Vec<Literature>, SearchError> {
		let request_error = |error| SearchError::Request {
			source_name: SOURCE_NAME,
			error,
		};

		let mut parameters = vec![
			("q", query),
			("maxResults", MAX_RESULTS),
			("projection", "full"),
			("printType", "books"),
			("fields", RESPONSE_FIELDS),
		];
		if let Some(api_key) = &self.api_key {
			parameters.push(("key", api_key.as_str()));
		}

		let response = self
			.client
			.get(VOLUMES_URL)
			.query(&parameters)
			.send()
			.await
			.map_err(request_error)?;
		if response.status() != StatusCode::OK {
			return Err(SearchError::Status {
				source_name: SOURCE_NAME,
				status: response.status().as_u16(),
			});
		}

		let volumes: VolumesResponse = response.json().await.map_err(request_error)?;
		Ok(volumes.into_literature())
	}
}

#[derive(Debug, Default, Deserialize)]
struct VolumesResponse {
	#[serde(default)]
	items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
	id: String,
	#[serde(rename = "volumeInfo", default)]
	volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
	title: String,
	authors: Vec<String>,
	published_date: String,
	image_links: ImageLinks,
	info_link: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageLinks {
	thumbnail: Option<String>,
}

impl VolumesResponse {
	fn into_literature(self) -> Vec<Literature> {
		self.items
			.into_iter()
			.map(|volume| {
				let info = volume.volume_info;
				let thumbnail = info
					.image_links
					.thumbnail
					.filter(|thumbnail| !thumbnail.is_empty())
					.unwrap_or_else(|| String::from(PLACEHOLDER_THUMBNAIL));
				tracing::debug!(id = %volume.id, title = %info.title, "Mapped Google Books volume");
				Literature {
					id: volume.id,
					title: info.title,
					authors: info.authors,
					year: info.published_date,
					thumbnail,
					link: info.info_link,
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn volumes_map_to_literature() {
		let response: VolumesResponse = serde_json::from_str(
			r#"{
				"items": [
					{
						"id": "zyTCAlFPjgYC",
						"volumeInfo": {
							"title": "The Google Story",
							"authors": ["David A. Vise", "Mark Malseed"],
							"publishedDate": "2005-11-15",
							"infoLink": "https://books.google.com/books?id=zyTCAlFPjgYC",
							"imageLinks": { "thumbnail": "https://books.google.com/thumb.jpg" }
						}
					}
				]
			}"#,
		)
		.unwrap();

		let books = response.into_literature();
		assert_eq!(
			books,
			vec![Literature {
				id: String::from("zyTCAlFPjgYC"),
				title: String::from("The Google Story"),
				authors: vec![String::from("David A. Vise"), String::from("Mark Malseed")],
				year: String::from("2005-11-15"),
				thumbnail: String::from("https://books.google.com/thumb.jpg"),
				link: String::from("https://books.google.com/books?id=zyTCAlFPjgYC"),
			}]
		);
	}

	#[test]
	fn missing_cover_uses_placeholder() {
		let response: VolumesResponse =
			serde_json::from_str(r#"{"items": [{"id": "abc", "volumeInfo": {"title": "Untitled"}}]}"#).unwrap();

		let books = response.into_literature();
		assert_eq!(books[0].thumbnail, PLACEHOLDER_THUMBNAIL);
		assert!(books[0].authors.is_empty());
		assert_eq!(books[0].year, "");
	}

	#[test]
	fn empty_response_has_no_items() {
		let response: VolumesResponse = serde_json::from_str("{}").unwrap();
		assert!(response.into_literature().is_empty());
	}
}
