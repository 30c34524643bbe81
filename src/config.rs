// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kdl::{KdlDocument, KdlNode};
use miette::{IntoDiagnostic, miette};
use tokio::fs::read_to_string;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

pub async fn parse_config(config_path: &str) -> miette::Result<ConfigData> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	parse_config_document(&config_file_contents)
}

pub fn parse_config_document(contents: &str) -> miette::Result<ConfigData> {
	let document: KdlDocument = contents.parse()?;

	let web = match document.get("web") {
		Some(node) => WebConfig::from_node(node)?,
		None => WebConfig::default(),
	};
	let database = document
		.get("database")
		.ok_or_else(|| miette!("Config is missing the `database` node"))?;
	let database = DatabaseConfig::from_node(database)?;
	let google_books = match document.get("google_books") {
		Some(node) => GoogleBooksConfig::from_node(node)?,
		None => GoogleBooksConfig::default(),
	};

	if google_books.api_key.is_none() {
		tracing::warn!("No Google Books API key configured; searches may be rate limited");
	}

	Ok(ConfigData {
		web,
		database,
		google_books,
	})
}

#[derive(Debug)]
pub struct ConfigData {
	pub web: WebConfig,
	pub database: DatabaseConfig,
	pub google_books: GoogleBooksConfig,
}

#[derive(Debug)]
pub struct WebConfig {
	/// Address the HTTP server listens on
	pub bind_addr: String,
	/// Whether the session cookie is only sent over HTTPS
	pub secure_cookies: bool,
}

impl Default for WebConfig {
	fn default() -> Self {
		Self {
			bind_addr: String::from(DEFAULT_BIND_ADDR),
			secure_cookies: true,
		}
	}
}

impl WebConfig {
	fn from_node(node: &KdlNode) -> miette::Result<Self> {
		let defaults = Self::default();
		let bind_addr = optional_string(node, "bind_addr")?.unwrap_or(defaults.bind_addr);
		let secure_cookies = match child_value(node, "secure_cookies") {
			Some(value) => value
				.as_bool()
				.ok_or_else(|| miette!("`web.secure_cookies` must be #true or #false"))?,
			None => defaults.secure_cookies,
		};
		Ok(Self {
			bind_addr,
			secure_cookies,
		})
	}
}

#[derive(Debug)]
pub struct DatabaseConfig {
	pub host: String,
	pub port: Option<u16>,
	pub username: String,
	pub password: String,
	pub database: String,
}

impl DatabaseConfig {
	fn from_node(node: &KdlNode) -> miette::Result<Self> {
		let port = match child_value(node, "port") {
			Some(value) => {
				let port = value
					.as_integer()
					.ok_or_else(|| miette!("`database.port` must be a number"))?;
				Some(u16::try_from(port).into_diagnostic()?)
			}
			None => None,
		};
		Ok(Self {
			host: required_string(node, "database", "host")?,
			port,
			username: required_string(node, "database", "username")?,
			password: required_string(node, "database", "password")?,
			database: required_string(node, "database", "database")?,
		})
	}
}

#[derive(Debug, Default)]
pub struct GoogleBooksConfig {
	pub api_key: Option<String>,
}

impl GoogleBooksConfig {
	fn from_node(node: &KdlNode) -> miette::Result<Self> {
		let api_key = optional_string(node, "api_key")?.filter(|key| !key.is_empty());
		Ok(Self { api_key })
	}
}

fn child_value<'a>(node: &'a KdlNode, name: &str) -> Option<&'a kdl::KdlValue> {
	node.children().and_then(|children| children.get_arg(name))
}

fn optional_string(node: &KdlNode, name: &str) -> miette::Result<Option<String>> {
	match child_value(node, name) {
		Some(value) => {
			let value = value.as_string().ok_or_else(|| {
				miette!(
					"`{}.{}` must be a string",
					node.name().value(),
					name
				)
			})?;
			Ok(Some(String::from(value)))
		}
		None => Ok(None),
	}
}

fn required_string(node: &KdlNode, section: &str, name: &str) -> miette::Result<String> {
	optional_string(node, name)?.ok_or_else(|| miette!("Config is missing `{}.{}`", section, name))
}

#[cfg(test)]
mod tests {
	use super::*;

	const FULL_CONFIG: &str = r#"
web {
	bind_addr "127.0.0.1:3000"
	secure_cookies #false
}
database {
	host "db.internal"
	port 5433
	username "literature"
	password "hunter2"
	database "literature_finder"
}
google_books {
	api_key "AIza-test"
}
"#;

	#[test]
	fn full_config_is_read() {
		let config = parse_config_document(FULL_CONFIG).unwrap();
		assert_eq!(config.web.bind_addr, "127.0.0.1:3000");
		assert!(!config.web.secure_cookies);
		assert_eq!(config.database.host, "db.internal");
		assert_eq!(config.database.port, Some(5433));
		assert_eq!(config.database.username, "literature");
		assert_eq!(config.database.password, "hunter2");
		assert_eq!(config.database.database, "literature_finder");
		assert_eq!(config.google_books.api_key.as_deref(), Some("AIza-test"));
	}

	#[test]
	fn optional_nodes_fall_back_to_defaults() {
		let config = parse_config_document(
			r#"
database {
	host "localhost"
	username "literature"
	password "hunter2"
	database "literature_finder"
}
"#,
		)
		.unwrap();
		assert_eq!(config.web.bind_addr, DEFAULT_BIND_ADDR);
		assert!(config.web.secure_cookies);
		assert_eq!(config.database.port, None);
		assert!(config.google_books.api_key.is_none());
	}

	#[test]
	fn missing_database_is_rejected() {
		assert!(parse_config_document("web { bind_addr \"0.0.0.0:80\"; }").is_err());
	}

	#[test]
	fn missing_database_password_is_rejected() {
		let result = parse_config_document(
			r#"
database {
	host "localhost"
	username "literature"
	database "literature_finder"
}
"#,
		);
		let error = result.unwrap_err();
		assert!(error.to_string().contains("database.password"));
	}
}
