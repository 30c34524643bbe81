// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Book search across online catalogs.

use crate::literature::Literature;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

pub mod google_books;
pub mod open_library;

#[derive(Debug, Error)]
pub enum SearchError {
	#[error("request to {source_name} failed: {error}")]
	Request {
		source_name: &'static str,
		#[source]
		error: reqwest::Error,
	},
	#[error("{source_name} responded with status {status}")]
	Status { source_name: &'static str, status: u16 },
}

/// A catalog books can be searched in.
#[async_trait]
pub trait LiteratureSource: fmt::Debug + Send + Sync {
	/// Name used when logging problems with this source.
	fn name(&self) -> &'static str;

	async fn search(&self, query: &str) -> Result<Vec<Literature>, SearchError>;
}

/// Searches several catalogs at once.
#[derive(Clone, Debug)]
pub struct MultiSource {
	sources: Vec<Arc<dyn LiteratureSource>>,
}

impl MultiSource {
	pub fn new(sources: Vec<Arc<dyn LiteratureSource>>) -> Self {
		Self { sources }
	}

	/// Runs the query against every source concurrently.
	///
	/// Results are grouped by source in the order the sources were given. A source that fails is logged and left out.
	pub async fn search(&self, query: &str) -> Vec<Literature> {
		let mut searches = JoinSet::new();
		for (index, source) in self.sources.iter().enumerate() {
			let source = Arc::clone(source);
			let query = String::from(query);
			searches.spawn(async move { (index, source.name(), source.search(&query).await) });
		}

		let mut found: Vec<(usize, Vec<Literature>)> = Vec::with_capacity(self.sources.len());
		while let Some(joined) = searches.join_next().await {
			match joined {
				Ok((index, _, Ok(books))) => found.push((index, books)),
				Ok((_, source_name, Err(error))) => {
					tracing::warn!(source = ?error, source_name, query, "Search source failed");
				}
				Err(error) => tracing::error!(source = ?error, query, "Search task failed to complete"),
			}
		}

		found.sort_by_key(|(index, _)| *index);
		found.into_iter().flat_map(|(_, books)| books).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[derive(Debug)]
	struct FixedSource {
		name: &'static str,
		titles: Vec<&'static str>,
		latency: Duration,
	}

	#[async_trait]
	impl LiteratureSource for FixedSource {
		fn name(&self) -> &'static str {
			self.name
		}

		async fn search(&self, query: &str) -> Result<Vec<Literature>, SearchError> {
			tokio::time::sleep(self.latency).await;
			Ok(self
				.titles
				.iter()
				.map(|title| Literature {
					id: format!("{}:{}", self.name, title),
					title: format!("{} ({})", title, query),
					..Default::default()
				})
				.collect())
		}
	}

	#[derive(Debug)]
	struct BrokenSource;

	#[async_trait]
	impl LiteratureSource for BrokenSource {
		fn name(&self) -> &'static str {
			"broken"
		}

		async fn search(&self, _query: &str) -> Result<Vec<Literature>, SearchError> {
			Err(SearchError::Status {
				source_name: "broken",
				status: 403,
			})
		}
	}

	#[tokio::test(start_paused = true)]
	async fn results_keep_source_order() {
		let slow = FixedSource {
			name: "slow",
			titles: vec!["Solaris", "Eden"],
			latency: Duration::from_millis(200),
		};
		let fast = FixedSource {
			name: "fast",
			titles: vec!["Fiasco"],
			latency: Duration::from_millis(10),
		};
		let search = MultiSource::new(vec![Arc::new(slow), Arc::new(fast)]);

		let results = search.search("lem").await;

		let ids: Vec<&str> = results.iter().map(|book| book.id.as_str()).collect();
		assert_eq!(ids, vec!["slow:Solaris", "slow:Eden", "fast:Fiasco"]);
		assert_eq!(results[0].title, "Solaris (lem)");
	}

	#[tokio::test]
	async fn failing_source_is_skipped() {
		let working = FixedSource {
			name: "working",
			titles: vec!["Roadside Picnic"],
			latency: Duration::ZERO,
		};
		let search = MultiSource::new(vec![Arc::new(BrokenSource), Arc::new(working)]);

		let results = search.search("strugatsky").await;

		assert_eq!(results.len(), 1);
		assert_eq!(results[0].id, "working:Roadside Picnic");
	}

	#[tokio::test]
	async fn no_sources_finds_nothing() {
		let search = MultiSource::new(Vec::new());
		assert!(search.search("anything").await.is_empty());
	}
}
