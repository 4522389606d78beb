use super::DatabaseError;
use serde::Deserialize;

/// Defaults bound to a [`FirebaseDatabase`](super::FirebaseDatabase) at construction.
///
/// Every operation takes an optional database and path; when a call omits one, the
/// value stored here is used instead. A config with neither set (the `Default`) gives a
/// client that requires both on every call.
///
/// The struct derives `Deserialize` so it can sit inside an application's own config file:
///
/// ```toml
/// [firebase]
/// database = "my-project-default-rtdb"
/// path = "users"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Database subdomain, e.g. `my-project-default-rtdb` for
    /// `https://my-project-default-rtdb.firebaseio.com`.
    #[serde(default)]
    pub database: Option<String>,
    /// Default node path, without the leading slash or the `.json` suffix.
    #[serde(default)]
    pub path: Option<String>,
    /// `host:port` of a Realtime Database emulator. When set, requests go to
    /// `http://{emulator_host}/{path}.json?ns={database}` instead of `firebaseio.com`.
    #[serde(default)]
    pub emulator_host: Option<String>,
}

impl DatabaseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_emulator_host(mut self, host: impl Into<String>) -> Self {
        self.emulator_host = Some(host.into());
        self
    }

    /// Picks the per-call database if given, otherwise the bound default.
    pub fn resolve_database<'a>(&'a self, database: Option<&'a str>) -> Result<&'a str, DatabaseError> {
        pick(database, self.database.as_deref()).ok_or(DatabaseError::MissingDatabase)
    }

    /// Picks the per-call path if given, otherwise the bound default.
    pub fn resolve_path<'a>(&'a self, path: Option<&'a str>) -> Result<&'a str, DatabaseError> {
        pick(path, self.path.as_deref()).ok_or(DatabaseError::MissingPath)
    }
}

fn pick<'a>(explicit: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    explicit
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.filter(|s| !s.is_empty()))
}
