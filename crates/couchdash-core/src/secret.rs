//! Write-only credential state
//!
//! Once a password has been saved the host never sends it back; the client
//! only learns that *something* is stored. `Secret` models that with three
//! states instead of a nullable string, so "never set", "stored but hidden"
//! and "about to be overwritten" stay distinguishable.

use std::fmt;

use zeroize::Zeroizing;

/// Credential state as observed by the client
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Secret {
    /// Nothing stored server-side and nothing staged
    #[default]
    Unset,
    /// A value exists server-side but is withheld from the client
    ConfiguredOpaque,
    /// A new plaintext staged for the next save. An empty value clears the
    /// stored secret.
    PendingWrite(Zeroizing<String>),
}

impl Secret {
    /// Build the state the host reports through its `secureJsonFields` map
    pub fn from_configured_flag(configured: bool) -> Self {
        if configured {
            Secret::ConfiguredOpaque
        } else {
            Secret::Unset
        }
    }

    /// Stage a new plaintext value, whatever the prior state was
    pub fn staged(value: impl Into<String>) -> Self {
        Secret::PendingWrite(Zeroizing::new(value.into()))
    }

    /// Stage the empty value that tells the backend to drop the stored secret
    pub fn reset() -> Self {
        Self::staged(String::new())
    }

    /// State after the host has successfully saved this secret
    pub fn commit(&self) -> Self {
        match self {
            Secret::PendingWrite(value) if value.is_empty() => Secret::Unset,
            Secret::PendingWrite(_) => Secret::ConfiguredOpaque,
            other => other.clone(),
        }
    }

    /// Whether the host reports a stored value
    pub fn is_configured(&self) -> bool {
        matches!(self, Secret::ConfiguredOpaque)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Secret::PendingWrite(_))
    }

    /// Whether this is a staged clear of the stored value
    pub fn is_reset(&self) -> bool {
        matches!(self, Secret::PendingWrite(value) if value.is_empty())
    }

    /// The value staged by this client, if any.
    ///
    /// Only a pending write carries plaintext; a committed secret has none to
    /// give back.
    pub fn pending_value(&self) -> Option<&str> {
        match self {
            Secret::PendingWrite(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Text for the password input: the staged value or nothing
    pub fn display_value(&self) -> &str {
        self.pending_value().unwrap_or_default()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Unset => f.write_str("Unset"),
            Secret::ConfiguredOpaque => f.write_str("ConfiguredOpaque"),
            Secret::PendingWrite(value) if value.is_empty() => f.write_str("PendingWrite(<empty>)"),
            Secret::PendingWrite(_) => f.write_str("PendingWrite(<redacted>)"),
        }
    }
}
