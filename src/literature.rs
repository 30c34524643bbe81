// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// Separator used when a list of authors travels as a single form field or database column.
pub const AUTHOR_SEPARATOR: &str = "; ";

/// Image shown for books the catalog has no cover for.
pub const PLACEHOLDER_THUMBNAIL: &str = "/images/no-cover.svg";

/// A book as found by search or saved to a reader's favorites.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Literature {
	/// The catalog's identifier for the book.
	///
	/// Google Books volume IDs and OpenLibrary work keys (`/works/...`) share this field.
	pub id: String,
	pub title: String,
	pub authors: Vec<String>,
	pub year: String,
	pub thumbnail: String,
	pub link: String,
}

impl Literature {
	/// Gets the authors joined into the single-field representation.
	pub fn authors_field(&self) -> String {
		self.authors.join(AUTHOR_SEPARATOR)
	}

	/// Gets the authors for display.
	pub fn authors_display(&self) -> String {
		self.authors.join(", ")
	}
}

/// Splits the single-field author representation back into a list.
pub fn split_authors(authors: &str) -> Vec<String> {
	authors
		.split(AUTHOR_SEPARATOR)
		.map(str::trim)
		.filter(|author| !author.is_empty())
		.map(String::from)
		.collect()
}
