//! Firebase Realtime Database module.
//!
//! This module maps reads and writes onto the Realtime Database REST API. Every node is
//! addressed as `https://{database}.firebaseio.com/{path}.json` and each operation is a
//! single HTTP request:
//!
//! | Operation | Verb |
//! |-----------|------|
//! | `get`     | GET    |
//! | `save`    | PUT    |
//! | `update`  | PATCH  |
//! | `delete`  | DELETE |
//! | `push`    | POST   |
//!
//! # Silent mode
//!
//! When the query parameters contain `print=silent`, the server sends no body and the call
//! returns [`DatabaseResponse::Silent`], which is `true` iff the status was `204 No Content`.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use firebase_rtdb_rest::database::{DatabaseConfig, FirebaseDatabase, QueryParams};
//! # async fn run() -> Result<(), firebase_rtdb_rest::database::DatabaseError> {
//! let db = FirebaseDatabase::new(DatabaseConfig::new().with_database("my-project-default-rtdb"));
//!
//! db.save(None, Some("users/1"), &serde_json::json!({ "name": "A" }), &QueryParams::new()).await?;
//! let user = db.get(None, Some("users/1"), &QueryParams::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod reference;


pub use self::config::DatabaseConfig;
pub use self::models::{DatabaseResponse, PushResponse, QueryParams};
pub use self::reference::DatabaseReference;

use crate::core::middleware::TracingMiddleware;
use crate::core::parse_error_response;
use reqwest::{header, Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Errors that can occur during Realtime Database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// No database was passed to the call and none is bound in the config.
    #[error("no database given and no default database configured")]
    MissingDatabase,
    /// No path was passed to the call and none is bound in the config.
    #[error("no path given and no default path configured")]
    MissingPath,
    /// The database or path produced a URL that could not be parsed.
    #[error("invalid database URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The database or path contains `?` or `#`, which would end the URL path early.
    #[error("invalid database path: {0}")]
    InvalidPath(String),
    /// Wrapper for `reqwest_middleware::Error`.
    #[error("HTTP Request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),
    /// Wrapper for `reqwest::Error`.
    #[error("HTTP Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("API error: {status}: {message}")]
    Api { status: StatusCode, message: String },
    /// Wrapper for `serde_json::Error`.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP verb of a database operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Patch,
    Delete,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Post => "POST",
        })
    }
}

/// Builds the REST URL of a node: `https://{database}.firebaseio.com/{path}.json`.
///
/// Both parts are substituted verbatim.
pub fn database_url(database: &str, path: &str) -> String {
    format!("https://{}.firebaseio.com/{}.json", database, path)
}

/// Client for interacting with the Firebase Realtime Database REST API.
pub struct FirebaseDatabase {
    client: ClientWithMiddleware,
    config: DatabaseConfig,
}

impl FirebaseDatabase {
    /// Creates a new `FirebaseDatabase` with its own HTTP client.
    pub fn new(config: DatabaseConfig) -> Self {
        let client = ClientBuilder::new(Client::new())
            .with(TracingMiddleware::new())
            .build();

        Self { client, config }
    }

    /// Creates a new `FirebaseDatabase` around a caller-built client.
    ///
    /// Timeouts, proxies and extra middleware (for example one adding an `auth` parameter)
    /// are configured on that client.
    pub fn with_client(client: ClientWithMiddleware, config: DatabaseConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Gets a `DatabaseReference` to `path` on the default database.
    ///
    /// An empty `path` falls back to the configured default path, like every other call.
    pub fn reference(&self, path: &str) -> DatabaseReference<'_> {
        DatabaseReference::new(self, None, path.to_string())
    }

    /// Resolves the URL a call with these arguments would hit.
    ///
    /// # Errors
    ///
    /// Returns `MissingDatabase` / `MissingPath` when neither the argument nor the bound
    /// default is set, and `InvalidPath` when either contains `?` or `#`.
    ///
    /// The path is otherwise substituted verbatim and then parsed as a URL, so dot
    /// segments are normalized: `a/../b` addresses `b.json`.
    pub fn url(&self, database: Option<&str>, path: Option<&str>) -> Result<Url, DatabaseError> {
        let database = self.config.resolve_database(database)?;
        let path = self.config.resolve_path(path)?;
        for part in [database, path] {
            if part.contains(['?', '#']) {
                return Err(DatabaseError::InvalidPath(part.to_string()));
            }
        }

        match &self.config.emulator_host {
            Some(host) => {
                let mut url = Url::parse(&format!("http://{}/{}.json", host, path))?;
                url.query_pairs_mut().append_pair("ns", database);
                Ok(url)
            }
            None => Ok(Url::parse(&database_url(database, path))?),
        }
    }

    /// Reads the node at `path`.
    ///
    /// # Arguments
    ///
    /// * `database` - Database to read from, or `None` for the configured default.
    /// * `path` - Node path, or `None` for the configured default.
    /// * `filters` - Query parameters such as `orderBy`, `limitToFirst` or `shallow`.
    pub async fn get(
        &self,
        database: Option<&str>,
        path: Option<&str>,
        filters: &QueryParams,
    ) -> Result<DatabaseResponse, DatabaseError> {
        self.request(Method::Get, database, path, filters, None).await
    }

    /// Reads the node at `path` and deserializes it into `T`.
    ///
    /// A missing node is `null`, so use `Option<T>` when the node may not exist.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        database: Option<&str>,
        path: Option<&str>,
        filters: &QueryParams,
    ) -> Result<T, DatabaseError> {
        let response = self.get(database, path, filters).await?;
        Ok(response.deserialize()?)
    }

    /// Writes `data` at `path`, replacing whatever is there.
    pub async fn save<T: Serialize + ?Sized>(
        &self,
        database: Option<&str>,
        path: Option<&str>,
        data: &T,
        uri_parameters: &QueryParams,
    ) -> Result<DatabaseResponse, DatabaseError> {
        let body = serde_json::to_vec(data)?;
        self.request(Method::Put, database, path, uri_parameters, Some(body))
            .await
    }

    /// Updates the children of `path` named in `data`, leaving the others untouched.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        database: Option<&str>,
        path: Option<&str>,
        data: &T,
        uri_parameters: &QueryParams,
    ) -> Result<DatabaseResponse, DatabaseError> {
        let body = serde_json::to_vec(data)?;
        self.request(Method::Patch, database, path, uri_parameters, Some(body))
            .await
    }

    /// Removes the node at `path`.
    pub async fn delete(
        &self,
        database: Option<&str>,
        path: Option<&str>,
        uri_parameters: &QueryParams,
    ) -> Result<DatabaseResponse, DatabaseError> {
        self.request(Method::Delete, database, path, uri_parameters, None)
            .await
    }

    /// Appends `data` as a new child of `path` under a server-generated key.
    ///
    /// Returns the generated key. In silent mode the server does not report it and the
    /// returned name is empty.
    pub async fn push<T: Serialize + ?Sized>(
        &self,
        database: Option<&str>,
        path: Option<&str>,
        data: &T,
        uri_parameters: &QueryParams,
    ) -> Result<PushResponse, DatabaseError> {
        let body = serde_json::to_vec(data)?;
        match self
            .request(Method::Post, database, path, uri_parameters, Some(body))
            .await?
        {
            DatabaseResponse::Value(value) => Ok(serde_json::from_value(value)?),
            DatabaseResponse::Silent(_) => Ok(PushResponse::default()),
        }
    }

    async fn request(
        &self,
        method: Method,
        database: Option<&str>,
        path: Option<&str>,
        params: &QueryParams,
        body: Option<Vec<u8>>,
    ) -> Result<DatabaseResponse, DatabaseError> {
        let url = self.url(database, path)?;
        let silent = params.is_silent();
        tracing::trace!(%method, %url, silent, "resolved database target");

        let mut req = match method {
            Method::Get => self.client.get(url),
            Method::Put => self.client.put(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
            Method::Post => self.client.post(url),
        };
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.header(header::CONTENT_TYPE, "application/json").body(body);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DatabaseError::Api {
                status,
                message: parse_error_response(response, "Database request failed").await,
            });
        }

        if silent {
            return Ok(DatabaseResponse::Silent(status == StatusCode::NO_CONTENT));
        }

        let bytes = response.bytes().await?;
        Ok(DatabaseResponse::Value(serde_json::from_slice(&bytes)?))
    }
}
