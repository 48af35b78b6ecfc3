use super::Repository;
use crate::model::{short_name, AliasDecl, Declaration, DocAttachment};
use crate::stock::{parse_stock_icon, STOCK_PREFIX};
use tracing::debug;

impl Repository {
    /// Alias for a module-level constant; `None` when the name can't be
    /// declared (it starts with a digit).
    pub fn parse_constant(&self, name: &str) -> Option<Declaration> {
        let short = short_name(name);
        if short.starts_with(|c: char| c.is_ascii_digit()) {
            debug!(name, "skipping constant with digit-leading name");
            return None;
        }

        let mut docs = self.lookup_attr_docs(name, None);
        if name.starts_with(STOCK_PREFIX) {
            docs.push_str(&parse_stock_icon(name));
        }

        Some(Declaration::Alias(AliasDecl {
            name: short.to_string(),
            origin: name.to_string(),
            doc: DocAttachment::Block(docs),
            version: self.attr_version(name).map(str::to_string),
            marker: None,
        }))
    }
}
