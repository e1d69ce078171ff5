//! Addressing types for stored credentials.

use std::collections::HashMap;
use std::fmt;

/// Schema under which credentials are filed in the backend.
///
/// A schema is a fixed type name with a single string attribute, `name`,
/// holding the [`CredentialId`]. It is built once at startup and shared by
/// every operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    name: String,
}

impl Schema {
    /// Attribute key that carries the credential identifier.
    pub const NAME_ATTRIBUTE: &'static str = "name";

    /// Attribute key that carries the schema type name.
    pub const SCHEMA_ATTRIBUTE: &'static str = "xdg:schema";

    /// Create a schema with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The schema type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes identifying `id` under this schema.
    ///
    /// Matches the libsecret layout, so entries written by other libsecret
    /// clients of the same schema are found and vice versa.
    pub fn attributes<'a>(&'a self, id: &'a CredentialId) -> HashMap<&'static str, &'a str> {
        HashMap::from([
            (Self::SCHEMA_ATTRIBUTE, self.name.as_str()),
            (Self::NAME_ATTRIBUTE, id.as_str()),
        ])
    }
}

/// Fully-qualified credential identifier (`<prefix>.<short name>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialId(String);

impl CredentialId {
    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps caller-supplied short names onto namespaced credential identifiers.
///
/// The short name is used verbatim: no escaping or sanitization is applied,
/// so a name containing `.` can address the same identifier as a different
/// prefix/name split. Every caller using the same short name shares the same
/// entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameResolver {
    prefix: String,
}

impl NameResolver {
    /// Create a resolver for the given namespace prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolve a short name to its credential identifier.
    pub fn resolve(&self, short_name: &str) -> CredentialId {
        CredentialId(format!("{}.{}", self.prefix, short_name))
    }
}
