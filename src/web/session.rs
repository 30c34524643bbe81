// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::database::DbPool;
use crate::model::Session;
use crate::schema::sessions;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::{SessionStore, session_store};

/// Session storage in the `sessions` table. Expired sessions are purged whenever a session is loaded.
#[derive(Clone, Debug)]
pub struct DatabaseStore {
	db_connection_pool: DbPool,
}

impl DatabaseStore {
	pub fn new(db_connection_pool: DbPool) -> Self {
		Self { db_connection_pool }
	}

	fn connection(&self) -> session_store::Result<PooledConnection<ConnectionManager<PgConnection>>> {
		self.db_connection_pool
			.get()
			.map_err(|error| session_store::Error::Backend(format!("Couldn't get database connection: {}", error)))
	}
}

fn backend_error(context: &str) -> impl FnOnce(diesel::result::Error) -> session_store::Error + '_ {
	move |error| session_store::Error::Backend(format!("{}: {}", context, error))
}

fn record_to_row(record: &Record) -> session_store::Result<Session> {
	let data = serde_json::to_string(&record.data).map_err(|error| session_store::Error::Encode(format!("{:?}", error)))?;
	let expires = i64::try_from(record.expiry_date.unix_timestamp_nanos())
		.map_err(|error| session_store::Error::Backend(format!("Timestamp out of bounds: {}", error)))?;

	Ok(Session {
		session_id: record.id.0.into(),
		data,
		expires: DateTime::from_timestamp_nanos(expires),
	})
}

fn row_to_record(id: Id, session: Session) -> session_store::Result<Record> {
	let data =
		serde_json::from_str(&session.data).map_err(|error| session_store::Error::Decode(format!("{:?}", error)))?;
	let expiry_nanos = session
		.expires
		.timestamp_nanos_opt()
		.ok_or_else(|| session_store::Error::Backend(String::from("Out of range expiration timestamp")))?;
	let expiry_date = OffsetDateTime::from_unix_timestamp_nanos(expiry_nanos.into())
		.map_err(|error| session_store::Error::Backend(format!("Timestamp conversion error: {}", error)))?;

	Ok(Record {
		id,
		data,
		expiry_date,
	})
}

#[async_trait]
impl SessionStore for DatabaseStore {
	async fn create(&self, record: &mut Record) -> session_store::Result<()> {
		let mut db_connection = self.connection()?;
		let new_session = record_to_row(record)?;
		diesel::insert_into(sessions::table)
			.values(new_session)
			.execute(&mut db_connection)
			.map_err(backend_error("Failed to create new session"))?;
		Ok(())
	}

	async fn save(&self, record: &Record) -> session_store::Result<()> {
		let mut db_connection = self.connection()?;
		let session = record_to_row(record)?;
		diesel::insert_into(sessions::table)
			.values(&session)
			.on_conflict(sessions::session_id)
			.do_update()
			.set((sessions::data.eq(&session.data), sessions::expires.eq(session.expires)))
			.execute(&mut db_connection)
			.map_err(backend_error("Failed to update session"))?;
		Ok(())
	}

	async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
		let mut db_connection = self.connection()?;

		diesel::delete(sessions::table)
			.filter(sessions::expires.le(Utc::now()))
			.execute(&mut db_connection)
			.map_err(backend_error("Failed to expire old sessions"))?;

		let db_session_id: BigDecimal = session_id.0.into();
		let session: Option<Session> = sessions::table
			.find(db_session_id)
			.first(&mut db_connection)
			.optional()
			.map_err(backend_error("Couldn't retrieve session from database"))?;

		session.map(|session| row_to_record(*session_id, session)).transpose()
	}

	async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
		let mut db_connection = self.connection()?;
		let db_session_id: BigDecimal = session_id.0.into();
		diesel::delete(sessions::table)
			.filter(sessions::session_id.eq(db_session_id))
			.execute(&mut db_connection)
			.map_err(backend_error("Failed to delete session"))?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::collections::HashMap;

	#[test]
	fn records_survive_the_row_representation() {
		let mut data = HashMap::new();
		data.insert(String::from("reader_id"), json!("ck0reader"));
		let record = Record {
			id: Id(987_654_321),
			data,
			expiry_date: OffsetDateTime::from_unix_timestamp(1_900_000_000).unwrap(),
		};

		let row = record_to_row(&record).unwrap();
		assert_eq!(row.session_id, BigDecimal::from(987_654_321));
		assert_eq!(row.expires.timestamp(), 1_900_000_000);

		let restored = row_to_record(record.id, row).unwrap();
		assert_eq!(restored.id, record.id);
		assert_eq!(restored.data, record.data);
		assert_eq!(restored.expiry_date, record.expiry_date);
	}
}
