//! Repository: merged doc/type lookup for one namespace and its dependencies.
//!
//! Built once; every emitter below only reads from it.

mod class;
mod constant;
mod enums;
mod function;
mod members;

use crate::model::{DocEntry, DocMap, DocMaps};
use crate::namespace::{Namespace, NamespaceKey, NamespaceLoader};
use crate::rewrite::{DocRewriter, GtkDocRewriter};
use crate::types::TypeTable;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::debug;

/// Sentence boundary for short signal docs: a period followed by whitespace.
static RE_SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\s").unwrap());

pub struct Repository {
    pub namespace: String,
    pub version: String,
    docs: DocMaps,
    private: HashSet<String>,
    dependencies: Vec<NamespaceKey>,
    loaded: Vec<NamespaceKey>,
    types: TypeTable,
    rewriter: Box<dyn DocRewriter>,
}

impl Repository {
    /// Load `namespace`-`version` and its transitive dependencies.
    pub fn new(namespace: &str, version: &str, loader: &dyn NamespaceLoader) -> Result<Self> {
        Self::with_rewriter(namespace, version, loader, Box::new(GtkDocRewriter))
    }

    pub fn with_rewriter(
        namespace: &str,
        version: &str,
        loader: &dyn NamespaceLoader,
        rewriter: Box<dyn DocRewriter>,
    ) -> Result<Self> {
        let key = NamespaceKey::new(namespace, version);
        let ns = loader
            .get_namespace(&key)
            .with_context(|| format!("failed to load namespace {}", key))?;

        let docs = ns.parse_docs();
        let private = ns.parse_private();
        let dependencies = ns.get_dependencies();

        // Work list: each distinct key is loaded once, however many
        // namespaces depend on it.
        let mut loaded: HashMap<NamespaceKey, Box<dyn Namespace>> = HashMap::new();
        let mut to_load = dependencies.clone();
        while let Some(dep) = to_load.pop() {
            if loaded.contains_key(&dep) {
                continue;
            }
            let sub_ns = loader
                .get_namespace(&dep)
                .with_context(|| format!("failed to load dependency {} of {}", dep, key))?;
            to_load.extend(sub_ns.get_dependencies());
            loaded.insert(dep, sub_ns);
        }
        debug!(namespace = %key, dependencies = loaded.len(), "resolved dependencies");

        // Root entries go in last so they win over same-named dependency types.
        let mut types = TypeTable::new();
        for sub_ns in loaded.values() {
            types.extend(sub_ns.get_types());
        }
        types.extend(ns.get_types());

        let mut loaded: Vec<NamespaceKey> = loaded.into_keys().collect();
        loaded.sort();

        Ok(Repository {
            namespace: namespace.to_string(),
            version: version.to_string(),
            docs,
            private,
            dependencies,
            loaded,
            types,
            rewriter,
        })
    }

    /// Direct dependencies of the root namespace.
    pub fn get_dependencies(&self) -> &[NamespaceKey] {
        &self.dependencies
    }

    /// Every namespace pulled in transitively, sorted.
    pub fn loaded_dependencies(&self) -> &[NamespaceKey] {
        &self.loaded
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// `is_private("Gtk.ViewportPrivate")`
    pub fn is_private(&self, name: &str) -> bool {
        assert!(name.contains('.'), "expected a qualified name: {}", name);
        self.private.contains(name)
    }

    /// Docs for a namespace attribute, e.g. `GObject.Value`.
    pub fn lookup_attr_docs(&self, name: &str, current: Option<&str>) -> String {
        self.lookup(&self.docs.all, name, current)
    }

    /// Docs for the return value of a function, e.g. `GObject.Value.set_char`.
    pub fn lookup_return_docs(&self, name: &str, current: Option<&str>) -> String {
        self.lookup(&self.docs.returns, name, current)
    }

    /// Docs for a parameter, e.g. `GObject.Value.set_char.v_char`.
    pub fn lookup_parameter_docs(&self, name: &str, current: Option<&str>) -> String {
        self.lookup(&self.docs.parameters, name, current)
    }

    pub fn lookup_prop_docs(&self, name: &str, current: Option<&str>) -> String {
        self.lookup(&self.docs.properties, name, current)
    }

    /// Signal docs; with `short` only the first sentence, without the
    /// version note. Text without a sentence boundary is returned in full.
    pub fn lookup_signal_docs(&self, name: &str, short: bool, current: Option<&str>) -> String {
        let Some(entry) = self.docs.signals.get(name) else {
            return String::new();
        };
        if short {
            if let Some(m) = RE_SENTENCE_END.find(&entry.text) {
                let first = &entry.text[..m.start() + 1];
                return self.fix_docs(first, None, current);
            }
        }
        self.fix_docs(&entry.text, entry.version.as_deref(), current)
    }

    /// Version tag recorded for an attribute, if any.
    pub fn attr_version(&self, name: &str) -> Option<&str> {
        self.docs.all.get(name).and_then(|e| e.version.as_deref())
    }

    pub fn has_attr_docs(&self, name: &str) -> bool {
        self.docs.all.contains_key(name)
    }

    fn lookup(&self, map: &DocMap, name: &str, current: Option<&str>) -> String {
        match map.get(name) {
            Some(DocEntry { text, version }) => self.fix_docs(text, version.as_deref(), current),
            None => String::new(),
        }
    }

    pub(crate) fn fix_docs(&self, text: &str, version: Option<&str>, current: Option<&str>) -> String {
        let mut rest = self.rewriter.rewrite(&self.types, current, text);
        if let Some(version) = version.filter(|v| !v.is_empty()) {
            rest.push_str(&format!("\n\n.. versionadded:: {}\n", version));
        }
        rest
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::types::{TypeKind, TypeRef};

    #[test]
    fn missing_docs_are_empty() {
        let repo = gtk_repo(DocMaps::default());
        assert_eq!(repo.lookup_attr_docs("Gtk.Nope", None), "");
        assert_eq!(repo.lookup_return_docs("Gtk.Nope", None), "");
        assert_eq!(repo.lookup_parameter_docs("Gtk.nope.arg", None), "");
        assert_eq!(repo.lookup_prop_docs("Gtk.Widget.nope", None), "");
        assert_eq!(repo.lookup_signal_docs("Gtk.Widget.nope", true, None), "");
        assert_eq!(repo.lookup_signal_docs("Gtk.Widget.nope", false, None), "");
    }

    #[test]
    fn version_note_is_appended() {
        let mut docs = DocMaps::default();
        docs.all.insert("Gtk.Grid".into(), entry("A #GtkWidget grid", Some("3.0")));
        docs.all.insert("Gtk.Box".into(), entry("A box", None));
        let repo = gtk_repo(docs);
        assert_eq!(
            repo.lookup_attr_docs("Gtk.Grid", None),
            "A :class:`Gtk.Widget` grid\n\n.. versionadded:: 3.0\n"
        );
        assert_eq!(repo.lookup_attr_docs("Gtk.Box", None), "A box");
        assert_eq!(repo.attr_version("Gtk.Grid"), Some("3.0"));
    }

    #[test]
    fn current_context_reaches_rewriter() {
        let mut docs = DocMaps::default();
        docs.all.insert("Gtk.Widget".into(), entry("Base of every #GtkWidget", None));
        let repo = gtk_repo(docs);
        assert_eq!(
            repo.lookup_attr_docs("Gtk.Widget", Some("Gtk.Widget")),
            "Base of every ``Gtk.Widget``"
        );
    }

    #[test]
    fn short_signal_docs_take_first_sentence() {
        let mut docs = DocMaps::default();
        docs.signals.insert(
            "Gtk.Button.clicked".into(),
            entry("Emitted when clicked. Never twice.", Some("3.2")),
        );
        docs.signals.insert("Gtk.Button.pressed".into(), entry("Emitted on press", Some("3.4")));
        let repo = gtk_repo(docs);

        let full = repo.lookup_signal_docs("Gtk.Button.clicked", false, None);
        let short = repo.lookup_signal_docs("Gtk.Button.clicked", true, None);
        assert_eq!(short, "Emitted when clicked.");
        assert!(full.starts_with(&short));
        assert!(full.ends_with(".. versionadded:: 3.2\n"));

        assert_eq!(
            repo.lookup_signal_docs("Gtk.Button.pressed", true, None),
            repo.lookup_signal_docs("Gtk.Button.pressed", false, None)
        );
    }

    #[test]
    fn short_signal_docs_split_on_newline_too() {
        let mut docs = DocMaps::default();
        docs.signals.insert("Gtk.Widget.draw".into(), entry("Draws.\nThen more", None));
        docs.signals.insert("Gtk.Widget.map".into(), entry("Version 1.2 maps", None));
        let repo = gtk_repo(docs);
        assert_eq!(repo.lookup_signal_docs("Gtk.Widget.draw", true, None), "Draws.");
        assert_eq!(repo.lookup_signal_docs("Gtk.Widget.map", true, None), "Version 1.2 maps");
    }

    #[test]
    fn diamond_dependencies_load_once() {
        let mut loader = FakeLoader::default();
        let key = |s: &str| -> NamespaceKey { s.parse().unwrap() };
        loader.add(
            "Gtk-3.0",
            FakeNamespace {
                deps: vec![key("Gdk-3.0"), key("Pango-1.0"), key("GObject-2.0")],
                ..Default::default()
            },
        );
        loader.add(
            "Gdk-3.0",
            FakeNamespace {
                deps: vec![key("Pango-1.0"), key("GObject-2.0"), key("GObject-2.0")],
                ..Default::default()
            },
        );
        loader.add(
            "Pango-1.0",
            FakeNamespace {
                deps: vec![key("GObject-2.0")],
                ..Default::default()
            },
        );
        loader.add(
            "GObject-2.0",
            FakeNamespace {
                deps: vec![key("GLib-2.0")],
                ..Default::default()
            },
        );
        loader.add("GLib-2.0", FakeNamespace::default());

        let repo = Repository::new("Gtk", "3.0", &loader).unwrap();
        assert_eq!(repo.loaded_dependencies().len(), 4);
        assert_eq!(repo.get_dependencies().len(), 3);
        for (k, count) in loader.loads.borrow().iter() {
            assert_eq!(*count, 1, "{} loaded {} times", k, count);
        }
    }

    #[test]
    fn root_types_win() {
        let mut loader = FakeLoader::default();
        let mut root_types = TypeTable::new();
        root_types.insert("GtkThing".into(), TypeRef::new("Gtk.Thing", TypeKind::Class));
        loader.add(
            "Gtk-3.0",
            FakeNamespace {
                deps: vec!["Gdk-3.0".parse().unwrap(), "Atk-1.0".parse().unwrap()],
                types: root_types,
                ..Default::default()
            },
        );
        for dep in ["Gdk-3.0", "Atk-1.0"] {
            let mut types = TypeTable::new();
            types.insert("GtkThing".into(), TypeRef::new("Other.Thing", TypeKind::Struct));
            types.insert(format!("{}Only", dep), TypeRef::new("Dep.Only", TypeKind::Class));
            loader.add(dep, FakeNamespace { types, ..Default::default() });
        }

        let repo = Repository::new("Gtk", "3.0", &loader).unwrap();
        assert_eq!(repo.types()["GtkThing"].target, "Gtk.Thing");
        assert!(repo.types().contains_key("Gdk-3.0Only"));
        assert!(repo.types().contains_key("Atk-1.0Only"));
    }

    #[test]
    fn missing_dependency_fails_construction() {
        let mut loader = FakeLoader::default();
        loader.add(
            "Gtk-3.0",
            FakeNamespace {
                deps: vec!["Gone-1.0".parse().unwrap()],
                ..Default::default()
            },
        );
        let err = Repository::new("Gtk", "3.0", &loader).err().unwrap();
        assert!(format!("{:#}", err).contains("Gone-1.0"));
    }

    #[test]
    fn private_names() {
        let repo = gtk_repo(DocMaps::default());
        assert!(repo.is_private("Gtk.WidgetPrivate"));
        assert!(!repo.is_private("Gtk.Widget"));
    }

    #[test]
    #[should_panic(expected = "qualified name")]
    fn private_needs_qualified_name() {
        let repo = gtk_repo(DocMaps::default());
        repo.is_private("Widget");
    }
}
