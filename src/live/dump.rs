//! JSON dump of a live object graph.
//!
//! Produced once by the binding-side exporter, then read back here so the
//! resolver can run without the runtime loaded.

use super::*;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Object,
    Interface,
    Struct,
    Enum,
    Flags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodDump {
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub kind: CallableKind,
    /// Accessing the member raises "not implemented" in the binding.
    #[serde(default)]
    pub unsupported: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumAttrDump {
    pub name: String,
    /// Integer value when the attribute is an instance of the type
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDump {
    pub module: String,
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    /// MRO without the class itself
    #[serde(default)]
    pub mro: Vec<ClassRef>,
    /// Flattened bases with overrides merged in
    #[serde(default)]
    pub bases: Vec<ClassRef>,
    /// Members defined on this class
    #[serde(default)]
    pub methods: BTreeMap<String, MethodDump>,
    #[serde(default)]
    pub properties: Vec<ParamSpec>,
    #[serde(default)]
    pub signals: Vec<SignalSpec>,
    #[serde(default)]
    pub attributes: Vec<EnumAttrDump>,
}

impl ClassDump {
    pub fn class_ref(&self) -> ClassRef {
        ClassRef::new(&self.module, &self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveDump {
    pub namespace: String,
    /// Qualified constant names
    pub constants: Vec<String>,
    /// Qualified module-level function name → callable
    pub functions: BTreeMap<String, Callable>,
    pub classes: Vec<ClassDump>,
    #[serde(skip)]
    index: HashMap<ClassRef, usize>,
}

impl LiveDump {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read live dump {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("invalid live dump {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut dump: LiveDump = serde_json::from_str(content)?;
        dump.reindex();
        Ok(dump)
    }

    pub fn new(namespace: &str, classes: Vec<ClassDump>) -> Self {
        let mut dump = LiveDump {
            namespace: namespace.to_string(),
            classes,
            ..Default::default()
        };
        dump.reindex();
        dump
    }

    fn reindex(&mut self) {
        self.index = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.class_ref(), i))
            .collect();
    }

    pub fn class(&self, class: &ClassRef) -> Option<&ClassDump> {
        self.index.get(class).map(|&i| &self.classes[i])
    }
}

impl Introspector for LiveDump {
    fn merged_bases(&self, class: &ClassRef) -> Vec<ClassRef> {
        self.class(class).map(|c| c.bases.clone()).unwrap_or_default()
    }

    fn ancestors(&self, class: &ClassRef) -> Vec<ClassRef> {
        self.class(class).map(|c| c.mro.clone()).unwrap_or_default()
    }

    fn member(&self, class: &ClassRef, name: &str) -> Member {
        let Some(method) = self.class(class).and_then(|c| c.methods.get(name)) else {
            return Member::Absent;
        };
        if method.unsupported {
            return Member::Unsupported;
        }
        Member::Found(Callable {
            doc: method.doc.clone(),
            kind: method.kind,
        })
    }

    fn properties(&self, class: &ClassRef) -> Vec<ParamSpec> {
        // Walk the MRO so inherited specs show up too, like `props` does.
        let mut specs: Vec<ParamSpec> = Vec::new();
        let chain = std::iter::once(class.clone()).chain(self.ancestors(class));
        for c in chain {
            if let Some(dump) = self.class(&c) {
                for spec in &dump.properties {
                    if !specs.iter().any(|s| s.attr_name == spec.attr_name) {
                        specs.push(spec.clone());
                    }
                }
            }
        }
        specs.sort_by(|a, b| a.attr_name.cmp(&b.attr_name));
        specs
    }

    fn signals(&self, class: &ClassRef) -> Vec<SignalSpec> {
        let mut signals = self.class(class).map(|c| c.signals.clone()).unwrap_or_default();
        signals.retain(|s| !s.name.starts_with('_'));
        signals.sort_by(|a, b| a.name.cmp(&b.name));
        signals
    }

    fn enum_base(&self, class: &ClassRef) -> Option<ClassRef> {
        self.class(class).and_then(|c| c.bases.first().cloned())
    }

    fn enum_attrs(&self, class: &ClassRef) -> Vec<EnumAttr> {
        let Some(dump) = self.class(class) else {
            return Vec::new();
        };
        dump.attributes
            .iter()
            .map(|a| EnumAttr {
                name: a.name.clone(),
                value: match a.value {
                    Some(v) => EnumValue::Instance(v),
                    None => EnumValue::Foreign,
                },
            })
            .collect()
    }
}
