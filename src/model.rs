//! Data model for resolved documentation: renderer-agnostic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw doc text plus the namespace release it was added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    pub text: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl DocEntry {
    pub fn new(text: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            text: text.into(),
            version: version.map(str::to_string),
        }
    }
}

/// Qualified name → doc entry.
pub type DocMap = HashMap<String, DocEntry>;

/// The five doc maps a namespace provides, all keyed by dotted names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocMaps {
    /// `Gtk.Widget`, `Gtk.Widget.show`, `Gtk.main` → docs
    pub all: DocMap,
    /// `Gtk.Widget.set_name.name` → docs
    pub parameters: DocMap,
    /// `Gtk.Widget.get_name` → docs for the return value
    pub returns: DocMap,
    /// `Gtk.Widget.size-allocate` → docs
    pub signals: DocMap,
    /// `Gtk.Widget.has-focus` → docs
    pub properties: DocMap,
}

/// Last segment of a dotted name: `Gtk.Widget.show` → `show`.
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// A documented property of a class, for per-class summary tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub attr_name: String,
    pub type_desc: String,
    pub readable: bool,
    pub writable: bool,
    pub construct: bool,
    pub short_desc: String,
    pub desc: String,
}

impl Property {
    /// Present flags joined in the fixed order r, w, c: `"r/w"`, `"r/c"`, ...
    pub fn flags_string(&self) -> String {
        let mut flags = Vec::new();
        if self.readable {
            flags.push("r");
        }
        if self.writable {
            flags.push("w");
        }
        if self.construct {
            flags.push("c");
        }
        flags.join("/")
    }
}

/// A documented signal of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub name: String,
    /// Rendered parameter types, comma separated
    pub params: String,
    pub ret: String,
    pub desc: String,
    /// First sentence of `desc`
    pub short_desc: String,
}

/// How documentation is attached to an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum DocAttachment {
    /// Plain alias; the renderer falls back to whatever it finds on the origin.
    None,
    /// Doc block placed right after the alias.
    Block(String),
    /// Doc assigned to the alias' own doc attribute (module-level callables).
    Attribute(String),
}

impl DocAttachment {
    pub fn text(&self) -> Option<&str> {
        match self {
            DocAttachment::None => None,
            DocAttachment::Block(text) | DocAttachment::Attribute(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// Static or class-level callable
    Static,
}

/// `name = origin` with attached documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasDecl {
    pub name: String,
    pub origin: String,
    pub doc: DocAttachment,
    pub version: Option<String>,
    pub marker: Option<Marker>,
}

impl AliasDecl {
    pub fn bare(name: &str, origin: &str) -> Self {
        Self {
            name: name.to_string(),
            origin: origin.to_string(),
            doc: DocAttachment::None,
            version: None,
            marker: None,
        }
    }
}

/// A class re-exposing the live class' constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDecl {
    pub name: String,
    pub origin: String,
    pub bases: Vec<String>,
    pub doc: String,
    pub version: Option<String>,
    /// Method aliases nested in the class body
    pub methods: Vec<AliasDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
    pub doc: String,
}

/// Late `member = shadow` rebinding applied after all members are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rebind {
    pub member: String,
    pub shadow: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub base: String,
    pub doc: String,
    pub version: Option<String>,
    /// Sorted by value
    pub members: Vec<EnumMember>,
    pub rebinds: Vec<Rebind>,
}

/// One emitted declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Alias(AliasDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Alias(a) => &a.name,
            Declaration::Class(c) => &c.name,
            Declaration::Enum(e) => &e.name,
        }
    }
}

/// Property and signal tables for one class.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassSummary {
    pub name: String,
    pub properties: Vec<Property>,
    pub signals: Vec<Signal>,
}

/// Everything generated for one namespace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleDoc {
    pub namespace: String,
    pub version: String,
    /// Namespaces referenced by the declarations, sorted
    pub imports: Vec<String>,
    pub declarations: Vec<Declaration>,
    pub classes: Vec<ClassSummary>,
}
