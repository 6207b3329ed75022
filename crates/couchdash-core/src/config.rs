//! Non-secret connection parameters

use std::fmt;

use serde::{Deserialize, Serialize};

/// Connection parameters persisted in the clear as the host's `jsonData`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Cluster address, e.g. `couchbase://db.internal`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Optional target bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    /// Keys this crate does not edit, kept so the host saves them back
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The editable non-secret fields of a `ConnectionConfig`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionField {
    Host,
    Username,
    Bucket,
}

impl ConnectionField {
    pub const ALL: [ConnectionField; 3] = [
        ConnectionField::Host,
        ConnectionField::Username,
        ConnectionField::Bucket,
    ];

    /// Key under `jsonData`
    pub fn key(&self) -> &'static str {
        match self {
            ConnectionField::Host => "host",
            ConnectionField::Username => "username",
            ConnectionField::Bucket => "bucket",
        }
    }
}

impl fmt::Display for ConnectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(self, host: impl Into<String>) -> Self {
        self.with_field(ConnectionField::Host, host)
    }

    pub fn with_username(self, username: impl Into<String>) -> Self {
        self.with_field(ConnectionField::Username, username)
    }

    pub fn with_bucket(self, bucket: impl Into<String>) -> Self {
        self.with_field(ConnectionField::Bucket, bucket)
    }

    /// Copy of this config with one field replaced.
    ///
    /// Any string is accepted, including the empty string; reachability and
    /// credentials are checked by the backend when it connects.
    pub fn with_field(&self, field: ConnectionField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = Some(value.into());
        next
    }

    pub fn field(&self, field: ConnectionField) -> Option<&str> {
        match field {
            ConnectionField::Host => self.host.as_deref(),
            ConnectionField::Username => self.username.as_deref(),
            ConnectionField::Bucket => self.bucket.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: ConnectionField) -> &mut Option<String> {
        match field {
            ConnectionField::Host => &mut self.host,
            ConnectionField::Username => &mut self.username,
            ConnectionField::Bucket => &mut self.bucket,
        }
    }
}
