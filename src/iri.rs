//! IRI value type used as term and statement identity.
//!
//! Construction is total: any string becomes an [`Iri`]. Grammar
//! validation is a separate, explicit query ([`Iri::is_valid`]) so that
//! malformed identifiers can flow through the registry and only be
//! rejected where a caller actually cares.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An identifier value. Cheap to clone, compared by its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Wrap a string as an identifier. Never fails.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the text matches the grammar of an absolute IRI.
    ///
    /// Never panics; a term constructed from garbage simply reports
    /// `false` here.
    pub fn is_valid(&self) -> bool {
        url::Url::parse(&self.0).is_ok()
    }

    /// Append a local name to this identifier.
    ///
    /// Namespace semantics: plain concatenation, not RFC 3986 reference
    /// resolution. `http://example/ns#` joined with `widget` is
    /// `http://example/ns#widget`.
    pub fn join(&self, suffix: &str) -> Iri {
        Iri(format!("{}{}", self.0, suffix))
    }

    /// The segment after the last `#`, `/`, or `:`, or the whole text
    /// when none occurs. Backs the `label` fallback on terms.
    pub fn local_name(&self) -> &str {
        match self.0.rfind(['#', '/', ':']) {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// The remainder after `base`, when `base` is a string prefix of
    /// this identifier.
    pub fn strip_base(&self, base: &str) -> Option<&str> {
        self.0.strip_prefix(base)
    }

    /// Whether the identifier text is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Iri(value.to_string())
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Iri(value)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
