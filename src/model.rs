// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::literature::{Literature, split_authors};
use crate::schema::{sessions, user_books};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;

/// What a reader has done with a book they saved.
#[derive(Clone, Copy, DbEnum, Debug, Eq, PartialEq)]
#[ExistingTypePath = "crate::schema::sql_types::BookStatus"]
pub enum BookStatus {
	Favorite,
}

/// A book saved by a reader.
#[derive(Insertable, Queryable, Selectable)]
#[diesel(table_name = user_books)]
pub struct UserBook {
	/// Row ID, generated when the book is saved.
	pub id: String,
	/// The anonymous reader the book belongs to.
	pub reader_id: String,
	/// The catalog's identifier for the book.
	pub book_id: String,
	pub title: String,
	/// Authors joined with [crate::literature::AUTHOR_SEPARATOR].
	pub authors: String,
	pub thumbnail: String,
	pub link: String,
	pub status: BookStatus,
	pub year: String,
	pub created_at: DateTime<Utc>,
}

impl UserBook {
	pub fn new(reader_id: &str, book: &Literature, status: BookStatus) -> Self {
		Self {
			id: cuid2::create_id(),
			reader_id: String::from(reader_id),
			book_id: book.id.clone(),
			title: book.title.clone(),
			authors: book.authors_field(),
			thumbnail: book.thumbnail.clone(),
			link: book.link.clone(),
			status,
			year: book.year.clone(),
			created_at: Utc::now(),
		}
	}
}

impl From<UserBook> for Literature {
	fn from(book: UserBook) -> Self {
		Self {
			id: book.book_id,
			title: book.title,
			authors: split_authors(&book.authors),
			year: book.year,
			thumbnail: book.thumbnail,
			link: book.link,
		}
	}
}

#[derive(Insertable, Queryable)]
pub struct Session {
	pub session_id: BigDecimal,
	pub data: String,
	pub expires: DateTime<Utc>,
}
