//! Cross-reference rewriting of raw gtk-doc text into reST.
//!
//! Rewrites are token-local: a reference never spans a sentence boundary, so
//! rewriting a prefix of a text yields a prefix of the rewritten text.

use crate::types::{TypeKind, TypeTable};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Turns raw doc text into renderer-ready text.
pub trait DocRewriter: Send + Sync {
    /// `current` is the dotted name of the entity being documented, if any.
    fn rewrite(&self, types: &TypeTable, current: Option<&str>, text: &str) -> String;
}

// Alternatives are tried left to right, so the longer `#Type::signal` and
// `#Type:prop` forms must come before the bare `#Type`.
static RE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<sig>#(?P<sig_type>\w+)::(?P<sig_name>[\w-]+))",
        r"|(?P<prop>#(?P<prop_type>\w+):(?P<prop_name>[\w-]+))",
        r"|(?P<ty>#(?P<ty_name>\w+))",
        r"|(?P<cst>%(?P<cst_name>\w+))",
        r"|(?P<func>\b(?P<func_name>[a-z_]\w*)\(\))",
        r"|(?P<param>@(?P<param_name>\w+))",
    ))
    .unwrap()
});

/// gtk-doc markup rewriter backed by the merged type table.
#[derive(Debug, Default)]
pub struct GtkDocRewriter;

impl DocRewriter for GtkDocRewriter {
    fn rewrite(&self, types: &TypeTable, current: Option<&str>, text: &str) -> String {
        let linker = Linker { types, current };
        RE_REFERENCE
            .replace_all(text, |caps: &Captures| linker.replace(caps))
            .into_owned()
    }
}

struct Linker<'a> {
    types: &'a TypeTable,
    current: Option<&'a str>,
}

impl Linker<'_> {
    fn replace(&self, caps: &Captures) -> String {
        if caps.name("sig").is_some() {
            return self.member_ref(&caps["sig_type"], "signals", &caps["sig_name"], "::");
        }
        if caps.name("prop").is_some() {
            return self.member_ref(&caps["prop_type"], "props", &caps["prop_name"], ":");
        }
        if caps.name("ty").is_some() {
            let name = &caps["ty_name"];
            return match self.types.get(name) {
                Some(r) if self.is_current(&r.target) => literal(&r.target),
                Some(r) => r.to_rest(),
                None => literal(name),
            };
        }
        if caps.name("cst").is_some() {
            return self.constant(&caps["cst_name"]);
        }
        if caps.name("func").is_some() {
            let name = &caps["func_name"];
            return match self.types.get(name) {
                Some(r) if self.is_current(&r.target) => literal(&format!("{}()", r.target)),
                Some(r) if matches!(r.kind, TypeKind::Function | TypeKind::Method) => r.to_rest(),
                _ => caps[0].to_string(),
            };
        }
        literal(&caps["param_name"])
    }

    fn is_current(&self, target: &str) -> bool {
        self.current == Some(target)
    }

    fn member_ref(&self, ctype: &str, group: &str, member: &str, sep: &str) -> String {
        match self.types.get(ctype) {
            Some(r) => format!(":ref:`{}.{}.{}`", r.target, group, member),
            None => literal(&format!("{}{}{}", ctype, sep, member)),
        }
    }

    fn constant(&self, name: &str) -> String {
        match name {
            "TRUE" => ":obj:`True`".to_string(),
            "FALSE" => ":obj:`False`".to_string(),
            "NULL" => ":obj:`None`".to_string(),
            _ => match self.types.get(name) {
                Some(r) => r.to_rest(),
                None => literal(name),
            },
        }
    }
}

fn literal(text: &str) -> String {
    format!("``{}``", text)
}
