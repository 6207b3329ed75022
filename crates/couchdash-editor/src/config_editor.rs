//! Data source configuration editor

use std::fmt;

use couchdash_core::{ConnectionField, DataSourceSettings};

use crate::EditorController;

/// User input on the configuration form
#[derive(Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    HostChanged(String),
    UsernameChanged(String),
    BucketChanged(String),
    PasswordChanged(String),
    /// The "reset" button next to a configured password
    PasswordReset,
}

impl fmt::Debug for ConfigEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigEvent::HostChanged(v) => f.debug_tuple("HostChanged").field(v).finish(),
            ConfigEvent::UsernameChanged(v) => f.debug_tuple("UsernameChanged").field(v).finish(),
            ConfigEvent::BucketChanged(v) => f.debug_tuple("BucketChanged").field(v).finish(),
            ConfigEvent::PasswordChanged(_) => f.write_str("PasswordChanged(<redacted>)"),
            ConfigEvent::PasswordReset => f.write_str("PasswordReset"),
        }
    }
}

/// A plain text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFieldView {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
}

/// A password input that can only show what this client typed
#[derive(Clone, PartialEq, Eq)]
pub struct SecretFieldView {
    pub label: &'static str,
    pub placeholder: &'static str,
    /// A value is stored server-side; the input shows "configured" and a reset button
    pub is_configured: bool,
    /// Staged value typed in this session, empty otherwise
    pub value: String,
}

impl fmt::Debug for SecretFieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretFieldView")
            .field("label", &self.label)
            .field("is_configured", &self.is_configured)
            .field("value", &if self.value.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigView {
    pub host: TextFieldView,
    pub username: TextFieldView,
    pub bucket: TextFieldView,
    pub password: SecretFieldView,
}

/// Edits `DataSourceSettings`; every event yields a new record
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigEditor;

impl ConfigEditor {
    pub fn new() -> Self {
        Self
    }

    fn text_field(
        settings: &DataSourceSettings,
        field: ConnectionField,
        label: &'static str,
        placeholder: &'static str,
    ) -> TextFieldView {
        TextFieldView {
            label,
            placeholder,
            value: settings.json_data.field(field).unwrap_or_default().to_string(),
        }
    }
}

impl EditorController for ConfigEditor {
    type Model = DataSourceSettings;
    type Event = ConfigEvent;
    type View = ConfigView;

    fn render(&self, settings: &DataSourceSettings) -> ConfigView {
        let password = settings.password();
        ConfigView {
            host: Self::text_field(
                settings,
                ConnectionField::Host,
                "Cluster",
                "Couchbase cluster address",
            ),
            username: Self::text_field(
                settings,
                ConnectionField::Username,
                "Username",
                "Couchbase cluster username",
            ),
            bucket: Self::text_field(
                settings,
                ConnectionField::Bucket,
                "Bucket",
                "Default bucket (optional)",
            ),
            password: SecretFieldView {
                label: "Password",
                placeholder: "Couchbase cluster password",
                is_configured: password.is_configured(),
                value: password.display_value().to_string(),
            },
        }
    }

    fn next_state(
        &self,
        settings: &DataSourceSettings,
        event: ConfigEvent,
    ) -> Option<DataSourceSettings> {
        let (field, value) = match event {
            ConfigEvent::HostChanged(value) => (ConnectionField::Host, value),
            ConfigEvent::UsernameChanged(value) => (ConnectionField::Username, value),
            ConfigEvent::BucketChanged(value) => (ConnectionField::Bucket, value),
            ConfigEvent::PasswordChanged(value) => {
                tracing::debug!(uid = %settings.uid, field = "password", "password staged");
                return Some(settings.with_password(value));
            }
            ConfigEvent::PasswordReset => {
                tracing::debug!(uid = %settings.uid, field = "password", "password reset staged");
                return Some(settings.with_password_reset());
            }
        };
        tracing::debug!(uid = %settings.uid, %field, "connection settings edited");
        Some(settings.with_connection_field(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{RecordingSink, capture_logs};
    use couchdash_core::{ConnectionConfig, Secret};
    use pretty_assertions::assert_eq;

    fn settings() -> DataSourceSettings {
        let mut settings = DataSourceSettings::new("cb-1", "Couchbase").with_connection(
            ConnectionConfig::new()
                .with_host("couchbase://db.internal")
                .with_username("grafana"),
        );
        settings.secure_json_fields.password = true;
        settings
    }

    #[test]
    fn test_render_configured_password() {
        let view = ConfigEditor.render(&settings());

        assert_eq!(view.host.label, "Cluster");
        assert_eq!(view.host.value, "couchbase://db.internal");
        assert_eq!(view.bucket.value, "");
        assert!(view.password.is_configured);
        assert_eq!(view.password.value, "");
    }

    #[test]
    fn test_host_edit_emits_complete_record() {
        let sink = RecordingSink::new();
        let current = settings();

        assert!(ConfigEditor.handle(
            &current,
            ConfigEvent::HostChanged("couchbase://replica".into()),
            &sink
        ));

        let emitted = sink.last().unwrap();
        assert_eq!(emitted.json_data.host.as_deref(), Some("couchbase://replica"));
        assert_eq!(emitted.json_data.username, current.json_data.username);
        assert_eq!(emitted.uid, current.uid);
        assert_eq!(emitted.password(), Secret::ConfiguredOpaque);
        assert_eq!(current.json_data.host.as_deref(), Some("couchbase://db.internal"));
    }

    #[test]
    fn test_bucket_and_username_edits() {
        let next = ConfigEditor
            .next_state(&settings(), ConfigEvent::BucketChanged("beer-sample".into()))
            .unwrap();
        let next = ConfigEditor
            .next_state(&next, ConfigEvent::UsernameChanged("admin".into()))
            .unwrap();

        assert_eq!(next.json_data.bucket.as_deref(), Some("beer-sample"));
        assert_eq!(next.json_data.username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_password_edit_stages_value_only() {
        let current = settings();
        let next = ConfigEditor
            .next_state(&current, ConfigEvent::PasswordChanged("hunter2".into()))
            .unwrap();

        assert_eq!(next.json_data, current.json_data);
        assert_eq!(next.password(), Secret::staged("hunter2"));

        let view = ConfigEditor.render(&next);
        assert!(!view.password.is_configured);
        assert_eq!(view.password.value, "hunter2");
    }

    #[test]
    fn test_reset_then_save_clears_password() {
        let reset = ConfigEditor
            .next_state(&settings(), ConfigEvent::PasswordReset)
            .unwrap();

        assert_eq!(reset.password(), Secret::reset());
        assert!(!ConfigEditor.render(&reset).password.is_configured);
        assert_eq!(reset.saved().password(), Secret::Unset);
    }

    #[test]
    fn test_saved_password_is_never_rendered() {
        let staged = ConfigEditor
            .next_state(&settings(), ConfigEvent::PasswordChanged("hunter2".into()))
            .unwrap();
        let view = ConfigEditor.render(&staged.saved());

        assert!(view.password.is_configured);
        assert_eq!(view.password.value, "");
        assert!(!format!("{view:?}").contains("hunter2"));
    }

    #[test]
    fn test_edits_log_the_field_name() {
        let logs = capture_logs(|| {
            ConfigEditor.next_state(&settings(), ConfigEvent::BucketChanged("beer".into()));
            ConfigEditor.next_state(&settings(), ConfigEvent::PasswordChanged("hunter2".into()));
        });

        assert!(logs.contains("connection settings edited"));
        assert!(logs.contains("field=bucket"));
        assert!(logs.contains("password staged"));
        assert!(!logs.contains("hunter2"));
    }

    #[test]
    fn test_event_debug_hides_password() {
        let rendered = format!("{:?}", ConfigEvent::PasswordChanged("hunter2".into()));
        assert_eq!(rendered, "PasswordChanged(<redacted>)");
    }
}
