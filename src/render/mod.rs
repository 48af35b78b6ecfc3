//! Renderer module: trait-based output format dispatch.

pub mod json;
pub mod python;

use crate::model::ModuleDoc;
use anyhow::{anyhow, Result};

/// Trait for serializing a generated module into a specific output format.
pub trait Renderer {
    fn render(&self, module: &ModuleDoc) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "python" | "py" => Ok(Box::new(python::PythonStubRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use python or json", format)),
    }
}
