// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::database::DbPool;
use crate::literature::Literature;
use crate::model::{BookStatus, UserBook};
use crate::schema::user_books;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::PoolError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
	#[error("couldn't get database connection: {0}")]
	Pool(#[from] PoolError),
	#[error("database query failed: {0}")]
	Query(#[from] diesel::result::Error),
}

/// Storage of the books readers have saved.
#[async_trait]
pub trait FavoriteStore: fmt::Debug + Send + Sync {
	/// Saves a book as a favorite of the reader. Saving a book that's already a favorite does nothing.
	async fn save_book(&self, reader_id: &str, book: &Literature) -> Result<(), LibraryError>;

	/// Gets the reader's books with the given status, most recently saved first.
	async fn books_for_reader(&self, reader_id: &str, status: BookStatus) -> Result<Vec<Literature>, LibraryError>;

	/// Removes a book from the reader's library. Returns whether the reader had the book.
	async fn delete_book(&self, reader_id: &str, book_id: &str) -> Result<bool, LibraryError>;

	/// Removes every book from the reader's library.
	async fn clear_favorites(&self, reader_id: &str) -> Result<(), LibraryError>;
}

#[derive(Clone, Debug)]
pub struct PgFavoriteStore {
	db_connection_pool: DbPool,
}

impl PgFavoriteStore {
	pub fn new(db_connection_pool: DbPool) -> Self {
		Self { db_connection_pool }
	}
}

#[async_trait]
impl FavoriteStore for PgFavoriteStore {
	async fn save_book(&self, reader_id: &str, book: &Literature) -> Result<(), LibraryError> {
		let mut db_connection = self.db_connection_pool.get()?;
		let new_book = UserBook::new(reader_id, book, BookStatus::Favorite);
		diesel::insert_into(user_books::table)
			.values(new_book)
			.on_conflict((user_books::reader_id, user_books::book_id, user_books::status))
			.do_nothing()
			.execute(&mut db_connection)?;
		Ok(())
	}

	async fn books_for_reader(&self, reader_id: &str, status: BookStatus) -> Result<Vec<Literature>, LibraryError> {
		let mut db_connection = self.db_connection_pool.get()?;
		let books: Vec<UserBook> = user_books::table
			.filter(user_books::reader_id.eq(reader_id))
			.filter(user_books::status.eq(status))
			.order(user_books::created_at.desc())
			.select(UserBook::as_select())
			.load(&mut db_connection)?;
		Ok(books.into_iter().map(Literature::from).collect())
	}

	async fn delete_book(&self, reader_id: &str, book_id: &str) -> Result<bool, LibraryError> {
		let mut db_connection = self.db_connection_pool.get()?;
		let deleted = diesel::delete(user_books::table)
			.filter(user_books::reader_id.eq(reader_id))
			.filter(user_books::book_id.eq(book_id))
			.execute(&mut db_connection)?;
		if deleted == 0 {
			tracing::info!(reader_id, book_id, "Tried to delete a book the reader hasn't saved");
		} else {
			tracing::info!(reader_id, book_id, "Deleted book from reader's library");
		}
		Ok(deleted > 0)
	}

	async fn clear_favorites(&self, reader_id: &str) -> Result<(), LibraryError> {
		let mut db_connection = self.db_connection_pool.get()?;
		diesel::delete(user_books::table)
			.filter(user_books::reader_id.eq(reader_id))
			.execute(&mut db_connection)?;
		tracing::info!(reader_id, "Cleared reader's library");
		Ok(())
	}
}
