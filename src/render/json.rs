//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the whole ModuleDoc, including the per-class property and
//! signal tables the stub output leaves out.

use crate::model::*;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, module: &ModuleDoc) -> Result<String> {
        let mut out = serde_json::to_string_pretty(module)
            .with_context(|| format!("failed to serialize {}", module.namespace))?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tagged_declarations() {
        let module = ModuleDoc {
            namespace: "Gtk".into(),
            version: "3.0".into(),
            imports: vec!["Gtk".into()],
            declarations: vec![Declaration::Alias(AliasDecl::bare("main", "Gtk.main"))],
            classes: vec![ClassSummary {
                name: "Gtk.Button".into(),
                ..Default::default()
            }],
        };
        let out = JsonRenderer.render(&module).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["declarations"][0]["kind"], "alias");
        assert_eq!(value["declarations"][0]["doc"]["style"], "none");
        assert_eq!(value["classes"][0]["name"], "Gtk.Button");
    }
}
