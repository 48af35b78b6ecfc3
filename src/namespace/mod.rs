//! Namespace store interface: parsed per-namespace docs, types and dependencies.

pub mod store;

use crate::model::DocMaps;
use crate::types::TypeTable;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A namespace name plus version, e.g. `Gtk-3.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespaceKey {
    pub name: String,
    pub version: String,
}

impl NamespaceKey {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for NamespaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

impl FromStr for NamespaceKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once('-') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => {
                Ok(NamespaceKey::new(name, version))
            }
            _ => Err(anyhow!("expected <Name>-<version>, got: {}", s)),
        }
    }
}

/// One loaded namespace.
pub trait Namespace {
    fn parse_docs(&self) -> DocMaps;
    /// Qualified names that are not part of the public API.
    fn parse_private(&self) -> HashSet<String>;
    /// Direct dependencies.
    fn get_dependencies(&self) -> Vec<NamespaceKey>;
    /// Types defined by this namespace only.
    fn get_types(&self) -> TypeTable;
}

/// Loads namespaces by key.
pub trait NamespaceLoader {
    fn get_namespace(&self, key: &NamespaceKey) -> Result<Box<dyn Namespace>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_roundtrip() {
        let key: NamespaceKey = "GdkPixbuf-2.0".parse().unwrap();
        assert_eq!(key, NamespaceKey::new("GdkPixbuf", "2.0"));
        assert_eq!(key.to_string(), "GdkPixbuf-2.0");
    }

    #[test]
    fn key_needs_version() {
        assert!("Gtk".parse::<NamespaceKey>().is_err());
        assert!("Gtk-".parse::<NamespaceKey>().is_err());
    }
}
