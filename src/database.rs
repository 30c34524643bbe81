// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::DatabaseConfig;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use miette::{Diagnostic, IntoDiagnostic};
use std::error::Error;
use std::fmt;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

// To get boxed errors (as returned by the migration runner) into miette, we need a wrapper type for them.
#[derive(Debug, Diagnostic)]
#[diagnostic(code(literature_finder::migrations))]
pub struct MigrationError(pub Box<dyn Error + Send + Sync>);

impl fmt::Display for MigrationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Failed to run database migrations: {}", self.0)
	}
}

impl Error for MigrationError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		self.0.source()
	}
}

pub fn connect_db(config: &DatabaseConfig) -> miette::Result<DbPool> {
	let manager: ConnectionManager<PgConnection> = ConnectionManager::new(db_url(config));
	Pool::builder().test_on_check_out(true).build(manager).into_diagnostic()
}

fn db_url(config: &DatabaseConfig) -> String {
	match config.port {
		Some(port) => format!(
			"postgres://{}:{}@{}:{}/{}",
			config.username, config.password, config.host, port, config.database
		),
		None => format!(
			"postgres://{}:{}@{}/{}",
			config.username, config.password, config.host, config.database
		),
	}
}

pub fn run_embedded_migrations(db_connection_pool: &DbPool) -> Result<(), MigrationError> {
	let mut db_connection = db_connection_pool
		.get()
		.map_err(|error| MigrationError(Box::new(error)))?;
	let applied = db_connection.run_pending_migrations(MIGRATIONS).map_err(MigrationError)?;
	for migration in applied {
		tracing::info!(%migration, "Applied database migration");
	}
	Ok(())
}
