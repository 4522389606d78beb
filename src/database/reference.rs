use super::models::{DatabaseResponse, PushResponse, QueryParams};
use super::{DatabaseError, FirebaseDatabase};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A handle to one node of the database.
///
/// Obtained from [`FirebaseDatabase::reference`]. Operations behave like the client's own,
/// with the database and path taken from the reference.
#[derive(Clone)]
pub struct DatabaseReference<'a> {
    pub(crate) client: &'a FirebaseDatabase,
    pub(crate) database: Option<String>,
    pub(crate) path: String,
}

impl<'a> DatabaseReference<'a> {
    pub(crate) fn new(client: &'a FirebaseDatabase, database: Option<String>, path: String) -> Self {
        Self {
            client,
            database,
            path,
        }
    }

    /// The node path, as sent in the URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Points this reference at another database instead of the configured default.
    pub fn on_database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    /// Gets a reference to a child node, e.g. `users` -> `users/1`.
    pub fn child(&self, segment: &str) -> DatabaseReference<'a> {
        let segment = segment.trim_matches('/');
        let path = if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", self.path.trim_end_matches('/'), segment)
        };
        DatabaseReference::new(self.client, self.database.clone(), path)
    }

    pub async fn get(&self, filters: &QueryParams) -> Result<DatabaseResponse, DatabaseError> {
        self.client
            .get(self.database.as_deref(), Some(self.path.as_str()), filters)
            .await
    }

    /// Reads the node and deserializes it into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self) -> Result<T, DatabaseError> {
        self.client
            .get_as(self.database.as_deref(), Some(self.path.as_str()), &QueryParams::new())
            .await
    }

    pub async fn set<T: Serialize + ?Sized>(
        &self,
        data: &T,
        uri_parameters: &QueryParams,
    ) -> Result<DatabaseResponse, DatabaseError> {
        self.client
            .save(self.database.as_deref(), Some(self.path.as_str()), data, uri_parameters)
            .await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        data: &T,
        uri_parameters: &QueryParams,
    ) -> Result<DatabaseResponse, DatabaseError> {
        self.client
            .update(self.database.as_deref(), Some(self.path.as_str()), data, uri_parameters)
            .await
    }

    pub async fn remove(&self, uri_parameters: &QueryParams) -> Result<DatabaseResponse, DatabaseError> {
        self.client
            .delete(self.database.as_deref(), Some(self.path.as_str()), uri_parameters)
            .await
    }

    /// Appends `data` under a generated key and returns a reference to the new child.
    pub async fn push<T: Serialize + ?Sized>(
        &self,
        data: &T,
    ) -> Result<DatabaseReference<'a>, DatabaseError> {
        let PushResponse { name } = self
            .client
            .push(self.database.as_deref(), Some(self.path.as_str()), data, &QueryParams::new())
            .await?;
        Ok(self.child(&name))
    }
}
