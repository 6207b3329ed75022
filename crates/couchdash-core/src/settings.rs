//! Data source instance settings as exchanged with the host
//!
//! The host owns this record. It delivers a fresh copy on every render and
//! persists whatever the config editor hands back, so every method here
//! returns a new record.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{ConnectionConfig, ConnectionField, Result, Secret};

/// Which secure fields the host holds a value for
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureJsonFields {
    #[serde(default)]
    pub password: bool,

    /// Flags for secure fields this crate does not model
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Secret values staged by the client, sent on save and never returned
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureJsonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Other staged secure values, carried through password edits
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SecureJsonData {
    fn reset_password() -> Self {
        Self {
            password: Some(String::new()),
            extra: serde_json::Map::new(),
        }
    }
}

impl fmt::Debug for SecureJsonData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureJsonData")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for SecureJsonData {
    fn drop(&mut self) {
        if let Some(password) = self.password.as_mut() {
            password.zeroize();
        }
        for value in self.extra.values_mut() {
            if let serde_json::Value::String(staged) = value {
                staged.zeroize();
            }
        }
    }
}

/// Instance settings for one Couchbase data source
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSettings {
    #[serde(default)]
    pub uid: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub json_data: ConnectionConfig,

    #[serde(default)]
    pub secure_json_fields: SecureJsonFields,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_json_data: Option<SecureJsonData>,

    /// Host fields this crate does not interpret, carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DataSourceSettings {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_connection(mut self, connection: ConnectionConfig) -> Self {
        self.json_data = connection;
        self
    }

    /// Parse the record the host delivers
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        tracing::debug!(
            uid = %settings.uid,
            password_configured = settings.secure_json_fields.password,
            "parsed data source settings"
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.json_data
    }

    /// Client view of the password
    ///
    /// A staged value wins over the host's configured flag, so a reset reads
    /// as a pending clear until the host saves it.
    pub fn password(&self) -> Secret {
        match self
            .secure_json_data
            .as_ref()
            .and_then(|data| data.password.as_deref())
        {
            Some(staged) => Secret::staged(staged),
            None => Secret::from_configured_flag(self.secure_json_fields.password),
        }
    }

    /// Copy with one `jsonData` field replaced
    pub fn with_connection_field(&self, field: ConnectionField, value: impl Into<String>) -> Self {
        Self {
            json_data: self.json_data.with_field(field, value),
            ..self.clone()
        }
    }

    /// Copy with a new password staged in `secureJsonData`
    pub fn with_password(&self, value: impl Into<String>) -> Self {
        let mut secure = self.secure_json_data.clone().unwrap_or_default();
        secure.password = Some(value.into());
        Self {
            secure_json_data: Some(secure),
            ..self.clone()
        }
    }

    /// Copy with the stored password scheduled for removal.
    ///
    /// The whole `secureJsonData` block is replaced: any other staged value
    /// is dropped along with the password.
    pub fn with_password_reset(&self) -> Self {
        Self {
            secure_json_data: Some(SecureJsonData::reset_password()),
            ..self.clone()
        }
    }

    /// Copy carrying the given password state in host layout
    pub fn with_secret(&self, secret: &Secret) -> Self {
        let mut next = self.clone();
        match secret {
            Secret::PendingWrite(value) => {
                let mut secure = next.secure_json_data.take().unwrap_or_default();
                secure.password = Some(value.to_string());
                next.secure_json_data = Some(secure);
            }
            Secret::ConfiguredOpaque | Secret::Unset => {
                next.secure_json_data = None;
                next.secure_json_fields.password = secret.is_configured();
            }
        }
        next
    }

    /// The record as the host hands it back after a successful save:
    /// staged secrets become configured flags and their values are gone.
    pub fn saved(&self) -> Self {
        let committed = self.password().commit();
        tracing::debug!(uid = %self.uid, password = ?committed, "settings saved");
        self.with_secret(&committed)
    }
}
