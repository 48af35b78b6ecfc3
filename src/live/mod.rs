//! Live introspection surface.
//!
//! The resolver never probes live objects ad hoc; everything it needs from the
//! runtime object graph goes through [`Introspector`], implemented once per
//! back-end. [`dump::LiveDump`] is the JSON-backed one.

pub mod dump;

use serde::{Deserialize, Serialize};
use std::fmt;

/// GObject param flag bits.
pub mod param_flags {
    pub const READABLE: u32 = 1 << 0;
    pub const WRITABLE: u32 = 1 << 1;
    pub const CONSTRUCT: u32 = 1 << 2;
    pub const CONSTRUCT_ONLY: u32 = 1 << 3;
}

/// A live class identified by its module and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassRef {
    pub module: String,
    pub name: String,
}

impl ClassRef {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// `module.name`
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    pub fn is_object_root(&self) -> bool {
        self.module == "builtins" && self.name == "object"
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// A GType together with the Python-side type it maps to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GType {
    pub name: String,
    #[serde(default)]
    pub pytype: Option<ClassRef>,
}

/// A property spec as exposed on a class' `props`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Attribute name on `props` (underscored)
    pub attr_name: String,
    /// Canonical property name (dashed)
    pub name: String,
    pub value_type: GType,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub blurb: Option<String>,
    /// Class that installed the property
    pub owner: ClassRef,
}

impl ParamSpec {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSpec {
    pub name: String,
    #[serde(default)]
    pub param_types: Vec<GType>,
    pub return_type: GType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallableKind {
    #[default]
    Function,
    Method,
    StaticMethod,
    ClassMethod,
}

/// A live callable and its embedded docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callable {
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub kind: CallableKind,
}

impl Callable {
    pub fn new(doc: Option<&str>, kind: CallableKind) -> Self {
        Self {
            doc: doc.map(str::to_string),
            kind,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self.kind, CallableKind::StaticMethod | CallableKind::ClassMethod)
    }
}

/// Result of looking up a member on a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Found(Callable),
    Absent,
    /// The binding knows the member but cannot provide it.
    Unsupported,
}

/// A public attribute of an enum/flags type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumAttr {
    pub name: String,
    pub value: EnumValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumValue {
    /// An instance of the enum type itself, as an integer
    Instance(i64),
    /// Anything else living on the type
    Foreign,
}

/// Capabilities the resolver needs from the live object graph.
pub trait Introspector {
    /// Flattened, override-aware base chain of `class`.
    fn merged_bases(&self, class: &ClassRef) -> Vec<ClassRef>;
    /// Method resolution order of `class`, excluding `class` itself.
    fn ancestors(&self, class: &ClassRef) -> Vec<ClassRef>;
    fn member(&self, class: &ClassRef, name: &str) -> Member;
    /// Every property visible on `class`, inherited ones included.
    fn properties(&self, class: &ClassRef) -> Vec<ParamSpec>;
    fn signals(&self, class: &ClassRef) -> Vec<SignalSpec>;
    /// First direct base of an enum/flags type.
    fn enum_base(&self, class: &ClassRef) -> Option<ClassRef>;
    /// Attributes of an enum/flags type, shadow names included.
    fn enum_attrs(&self, class: &ClassRef) -> Vec<EnumAttr>;
}
