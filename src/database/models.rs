use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Query key that selects the response format.
pub const PRINT: &str = "print";
/// `print` value that suppresses the response body; the server answers `204 No Content`.
pub const SILENT: &str = "silent";

/// Query-string parameters attached to a request.
///
/// Used both as read filters (`orderBy`, `limitToFirst`, ...) and as URI parameters on
/// writes (`print=silent`). Keys and values are sent verbatim. The typed helpers encode
/// their values the way the REST API expects: `orderBy`, `startAt`, `endAt` and `equalTo`
/// take JSON, so strings end up quoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a raw parameter, replacing any previous value for `key`.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when `print=silent` is set.
    pub fn is_silent(&self) -> bool {
        self.get(PRINT) == Some(SILENT)
    }

    pub fn silent(self) -> Self {
        self.print(SILENT)
    }

    /// `print=pretty` or `print=silent`.
    pub fn print(self, mode: &str) -> Self {
        self.insert(PRINT, mode)
    }

    pub fn order_by_key(self) -> Self {
        self.order_by_child("$key")
    }

    pub fn order_by_value(self) -> Self {
        self.order_by_child("$value")
    }

    pub fn order_by_priority(self) -> Self {
        self.order_by_child("$priority")
    }

    pub fn order_by_child(self, child: &str) -> Self {
        self.insert("orderBy", Value::from(child).to_string())
    }

    pub fn start_at(self, value: impl Into<Value>) -> Self {
        self.insert("startAt", value.into().to_string())
    }

    pub fn end_at(self, value: impl Into<Value>) -> Self {
        self.insert("endAt", value.into().to_string())
    }

    pub fn equal_to(self, value: impl Into<Value>) -> Self {
        self.insert("equalTo", value.into().to_string())
    }

    pub fn limit_to_first(self, limit: u32) -> Self {
        self.insert("limitToFirst", limit.to_string())
    }

    pub fn limit_to_last(self, limit: u32) -> Self {
        self.insert("limitToLast", limit.to_string())
    }

    /// Returns only the keys of the node's children, with their values truncated to `true`.
    pub fn shallow(self, shallow: bool) -> Self {
        self.insert("shallow", shallow.to_string())
    }

    /// Include priority information (`.priority`, `.value`) in the response.
    pub fn format_export(self) -> Self {
        self.insert("format", "export")
    }

    /// Server-side read timeout, e.g. `"10s"` or `"500ms"`.
    pub fn timeout(self, timeout: &str) -> Self {
        self.insert("timeout", timeout)
    }

    /// Size limit for a write, e.g. `"tiny"`, `"small"`, `"medium"`, `"large"` or `"unlimited"`.
    pub fn write_size_limit(self, limit: &str) -> Self {
        self.insert("writeSizeLimit", limit)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Result of a database call.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseResponse {
    /// Decoded JSON body. A missing node decodes to `Value::Null`.
    Value(Value),
    /// Outcome of a `print=silent` call: `true` iff the server answered `204 No Content`.
    Silent(bool),
}

impl DatabaseResponse {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            DatabaseResponse::Value(v) => Some(v),
            DatabaseResponse::Silent(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            DatabaseResponse::Value(v) => Some(v),
            DatabaseResponse::Silent(_) => None,
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, DatabaseResponse::Silent(_))
    }

    /// Deserializes the JSON body into `T`. A silent response deserializes from `null`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.into_value().unwrap_or(Value::Null))
    }
}

/// Body returned by a `POST` (push): the key generated for the new child.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PushResponse {
    pub name: String,
}
