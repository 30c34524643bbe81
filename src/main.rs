// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> miette::Result<()> {
	use literature_finder::config::parse_config;
	use literature_finder::database::{connect_db, run_embedded_migrations};
	use literature_finder::web::server::run_server;
	use std::sync::Arc;

	tracing_subscriber::fmt::init();

	let config = Arc::new(parse_config("config.kdl").await?);
	let db_connection_pool = connect_db(&config.database)?;
	run_embedded_migrations(&db_connection_pool)?;

	run_server(config, db_connection_pool).await
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
	// The client is started through `hydrate` in the library.
}
