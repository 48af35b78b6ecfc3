//! Directory-backed namespace store: one `<Name>-<version>.json` per namespace.

use super::{Namespace, NamespaceKey, NamespaceLoader};
use crate::model::DocMaps;
use crate::types::TypeTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parsed namespace metadata as written by the GIR extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceDump {
    pub docs: DocMaps,
    pub private: Vec<String>,
    pub dependencies: Vec<NamespaceKey>,
    pub types: TypeTable,
}

impl Namespace for NamespaceDump {
    fn parse_docs(&self) -> DocMaps {
        self.docs.clone()
    }

    fn parse_private(&self) -> HashSet<String> {
        self.private.iter().cloned().collect()
    }

    fn get_dependencies(&self) -> Vec<NamespaceKey> {
        self.dependencies.clone()
    }

    fn get_types(&self) -> TypeTable {
        self.types.clone()
    }
}

pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &NamespaceKey) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Keys of every namespace dump in the store, sorted.
    pub fn available(&self) -> Result<Vec<NamespaceKey>> {
        let pattern = self.root.join("*-*.json");
        let pattern = pattern.to_string_lossy();
        let mut keys: Vec<NamespaceKey> = glob::glob(&pattern)
            .with_context(|| format!("invalid store path: {}", self.root.display()))?
            .filter_map(|r| r.ok())
            .filter_map(|p| {
                p.file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.parse().ok())
            })
            .collect();
        keys.sort();
        Ok(keys)
    }
}

impl NamespaceLoader for DirStore {
    fn get_namespace(&self, key: &NamespaceKey) -> Result<Box<dyn Namespace>> {
        let path = self.path_for(key);
        debug!(namespace = %key, path = %path.display(), "loading namespace");
        Ok(Box::new(load_dump(&path)?))
    }
}

fn load_dump(path: &Path) -> Result<NamespaceDump> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read namespace {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid namespace dump {}", path.display()))
}
