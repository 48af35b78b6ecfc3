//! Python stub renderer.
//!
//! Emits a module of aliases to the live objects with their docs attached as
//! raw string literals, which autodoc-style tools pick up as attribute docs.

use crate::model::*;
use crate::render::Renderer;
use anyhow::Result;

pub struct PythonStubRenderer;

impl Renderer for PythonStubRenderer {
    fn render(&self, module: &ModuleDoc) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!(
            "# Documentation stubs for {} {}\n\n",
            module.namespace, module.version
        ));
        for import in &module.imports {
            out.push_str(&format!("from gi.repository import {}\n", import));
        }

        for decl in &module.declarations {
            out.push_str(&render_declaration(decl));
        }
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "py"
    }
}

pub fn render_declaration(decl: &Declaration) -> String {
    match decl {
        Declaration::Alias(alias) => render_alias(alias, ""),
        Declaration::Class(class) => render_class(class),
        Declaration::Enum(e) => render_enum(e),
    }
}

fn render_alias(alias: &AliasDecl, prefix: &str) -> String {
    let origin = match alias.marker {
        Some(Marker::Static) => format!("staticmethod({})", alias.origin),
        None => alias.origin.clone(),
    };

    match &alias.doc {
        DocAttachment::None => format!("{}{} = {}\n", prefix, alias.name, origin),
        DocAttachment::Block(docs) => format!(
            "\n{p}{} = {}\n{p}r'''\n{}\n'''\n",
            alias.name,
            origin,
            block_text(docs),
            p = prefix
        ),
        DocAttachment::Attribute(docs) => format!(
            "\n{p}{n} = {}\n{p}{n}.__doc__ = r'''\n{}\n'''\n",
            origin,
            raw(docs),
            n = alias.name,
            p = prefix
        ),
    }
}

fn render_class(class: &ClassDecl) -> String {
    let mut out = format!(
        "\nclass {}({}):\n    r'''\n{}\n    '''\n\n    __init__ = {}.__init__\n",
        class.name,
        class.bases.join(", "),
        raw(&class.doc),
        class.origin
    );
    for method in &class.methods {
        out.push_str(&render_alias(method, "    "));
    }
    out.push('\n');
    out
}

fn render_enum(e: &EnumDecl) -> String {
    let mut out = format!(
        "\nclass {}({}):\n    r'''\n{}\n    '''\n",
        e.name,
        e.base,
        raw(&e.doc)
    );
    for member in &e.members {
        out.push_str(&format!("    {} = {}\n", member.name, member.value));
        out.push_str(&format!("    r'''\n{}\n'''\n", raw(&member.doc)));
    }
    for rebind in &e.rebinds {
        out.push_str(&format!(
            "setattr({n}, '{}', {n}.{})\n",
            rebind.member,
            rebind.shadow,
            n = e.name
        ));
    }
    out
}

/// Doc block text; a leading comment keeps empty or blank-led blocks from
/// being dropped downstream.
fn block_text(docs: &str) -> String {
    if docs.trim().is_empty() || docs.starts_with('\n') {
        format!(".. fake comment to help sphinx\n\n{}", raw(docs))
    } else {
        raw(docs)
    }
}

/// Make text safe inside a `r'''...'''` literal.
fn raw(text: &str) -> String {
    text.replace("'''", "\"\"\"")
}
