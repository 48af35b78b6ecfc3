//! Cross-reference type table and type rendering.

use crate::live::GType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Flags,
    Callback,
    Function,
    Method,
    Constant,
}

/// Where a C-level name points in the introspected API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Dotted target, e.g. `Gtk.Widget` or `Gtk.Widget.show`
    pub target: String,
    pub kind: TypeKind,
}

impl TypeRef {
    pub fn new(target: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            target: target.into(),
            kind,
        }
    }

    /// reST role used to link to this target.
    pub fn role(&self) -> &'static str {
        match self.kind {
            TypeKind::Class
            | TypeKind::Interface
            | TypeKind::Struct
            | TypeKind::Enum
            | TypeKind::Flags => "class",
            TypeKind::Callback | TypeKind::Function => "func",
            TypeKind::Method => "meth",
            TypeKind::Constant => "data",
        }
    }

    /// `:role:`target``
    pub fn to_rest(&self) -> String {
        format!(":{}:`{}`", self.role(), self.target)
    }
}

/// C name (`GtkWidget`, `gtk_widget_show`, `GTK_STOCK_ABOUT`) → reference.
pub type TypeTable = HashMap<String, TypeRef>;

/// Python builtins that render with the `:obj:` role.
const BUILTIN_TYPES: &[&str] = &[
    "int", "float", "str", "bool", "bytes", "object", "None", "list", "dict", "tuple",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Render a live GType through its Python-side type. Empty when it has none.
pub fn gtype_to_rest(gtype: &GType) -> String {
    match &gtype.pytype {
        None => String::new(),
        Some(class) if class.module == "builtins" => format!(":obj:`{}`", class.name),
        Some(class) => format!(":class:`{}`", class.qualified()),
    }
}

/// Render a type expression from a docstring signature
/// (`int`, `Gtk.Widget`, `[str]`, `{str: int}`, `Gdk.Rectangle or None`).
pub fn type_expr_to_rest(expr: &str) -> String {
    let mut out = String::new();
    let mut word = String::new();
    for c in expr.chars() {
        if c.is_alphanumeric() || c == '_' || c == '.' {
            word.push(c);
            continue;
        }
        flush_type_word(&mut out, &mut word);
        out.push(c);
    }
    flush_type_word(&mut out, &mut word);
    out
}

fn flush_type_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    if word == "or" {
        out.push_str("or");
    } else if is_builtin(word) {
        out.push_str(&format!(":obj:`{}`", word));
    } else {
        out.push_str(&format!(":class:`{}`", word));
    }
    word.clear();
}
