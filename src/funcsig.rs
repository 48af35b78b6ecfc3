//! Machine signatures embedded as the first docstring line of live callables:
//!
//! ```text
//! set_label(label: str) -> None
//! get_size() -> (width: int, height: int)
//! get_child(index: int) -> Gtk.Widget or None
//! ```

use crate::repo::Repository;
use crate::types::type_expr_to_rest;
use crate::util::indent;
use regex::Regex;
use std::sync::LazyLock;

static RE_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\((.*)\)\s*->\s*(.+?)\s*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncSignature {
    pub name: String,
    /// `(name, type)` pairs
    pub args: Vec<(String, String)>,
    /// Unnamed for a plain return value, named for out arguments
    pub results: Vec<(Option<String>, String)>,
}

impl FuncSignature {
    /// Parse `line` as a signature of `name`; `None` when it isn't one.
    pub fn from_string(name: &str, line: &str) -> Option<FuncSignature> {
        let caps = RE_SIGNATURE.captures(line)?;
        if &caps[1] != name {
            return None;
        }

        let mut args = Vec::new();
        for arg in split_top_level(&caps[2]) {
            let (arg_name, ty) = match arg.split_once(':') {
                Some((n, t)) => (n.trim(), t.trim()),
                None => (arg, ""),
            };
            if arg_name.is_empty() {
                return None;
            }
            args.push((arg_name.to_string(), ty.to_string()));
        }

        let ret = caps[3].trim();
        let results = if ret == "None" {
            Vec::new()
        } else if let Some(inner) = ret.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            split_top_level(inner)
                .into_iter()
                .map(|item| match item.split_once(':') {
                    Some((n, t)) => (Some(n.trim().to_string()), t.trim().to_string()),
                    None => (None, item.to_string()),
                })
                .collect()
        } else {
            vec![(None, ret.to_string())]
        };

        Some(FuncSignature {
            name: name.to_string(),
            args,
            results,
        })
    }

    /// reST field list for the arguments and results; descriptions come from
    /// the repository docs of `func_name` (fully qualified).
    pub fn to_rest_listing(&self, repo: &Repository, func_name: &str, current: Option<&str>) -> String {
        let mut lines: Vec<String> = Vec::new();

        for (arg, ty) in &self.args {
            let key = format!("{}.{}", func_name, arg);
            let docs = repo.lookup_parameter_docs(&key, current);
            lines.push(field(&format!("param {}", arg), &docs));
            if !ty.is_empty() {
                lines.push(format!(":type {}: {}", arg, type_expr_to_rest(ty)));
            }
        }

        match self.results.as_slice() {
            [] => {}
            [(None, ty)] => {
                let docs = repo.lookup_return_docs(func_name, current);
                lines.push(field("returns", &docs));
                lines.push(format!(":rtype: {}", type_expr_to_rest(ty)));
            }
            results => {
                let mut items = Vec::new();
                let mut types = Vec::new();
                for (name, ty) in results {
                    let label = name.as_deref().unwrap_or("result");
                    let docs = if label == "result" {
                        repo.lookup_return_docs(func_name, current)
                    } else {
                        repo.lookup_parameter_docs(&format!("{}.{}", func_name, label), current)
                    };
                    items.push(field_item(label, &docs));
                    types.push(format!("**{}**: {}", label, type_expr_to_rest(ty)));
                }
                lines.push(":returns:".to_string());
                lines.extend(items);
                lines.push(format!(":rtype: ({})", types.join(", ")));
            }
        }

        lines.join("\n")
    }
}

fn field(name: &str, docs: &str) -> String {
    if docs.is_empty() {
        format!(":{}:", name)
    } else if !docs.contains('\n') {
        format!(":{}: {}", name, docs)
    } else {
        format!(":{}:\n{}", name, indent(docs, "    "))
    }
}

fn field_item(name: &str, docs: &str) -> String {
    if docs.is_empty() {
        format!("    :{}:", name)
    } else {
        format!("    :{}:\n{}", name, indent(docs, "        "))
    }
}

/// Split on commas outside of brackets; empty input yields nothing.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = s[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}
