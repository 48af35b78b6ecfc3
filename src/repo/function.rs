use super::Repository;
use crate::funcsig::FuncSignature;
use crate::live::{Callable, ClassRef, Introspector, Member};
use crate::model::{short_name, AliasDecl, DocAttachment, Marker};
use crate::util::{docstring_body, first_line, unindent};
use tracing::debug;

impl Repository {
    /// Alias for a function (`owner` is `None`) or method.
    ///
    /// The documented signature comes from the first docstring line of the
    /// callable, or of the first ancestor providing one; the prose comes from
    /// the docstring body, else from the GIR docs. `None` for names with an
    /// empty final segment.
    pub fn parse_function(
        &self,
        name: &str,
        owner: Option<&ClassRef>,
        callable: &Callable,
        live: &dyn Introspector,
    ) -> Option<AliasDecl> {
        let func_name = short_name(name);
        if func_name.is_empty() {
            debug!(name, "skipping callable with empty name");
            return None;
        }

        let is_method = owner.is_some();
        let current = owner.map(ClassRef::qualified);
        let current = current.as_deref();

        let get_sig =
            |doc: Option<&str>| FuncSignature::from_string(func_name, first_line(doc.unwrap_or("")));

        let own_doc = callable.doc.as_deref().filter(|d| !d.is_empty());
        let mut sig = get_sig(own_doc);

        // A docstring that isn't a signature: new function or an override
        // carrying its own docs.
        if sig.is_none() && own_doc.is_some() {
            return Some(AliasDecl::bare(func_name, name));
        }

        if sig.is_none() {
            if let Some(owner) = owner {
                for base in live.ancestors(owner) {
                    match live.member(&base, func_name) {
                        Member::Found(base_obj) => {
                            sig = get_sig(base_obj.doc.as_deref());
                            if sig.is_some() {
                                break;
                            }
                        }
                        Member::Absent => {}
                        Member::Unsupported => {
                            debug!(class = %base, member = func_name, "member not supported by binding");
                        }
                    }
                }
            }
        }

        let version = self.attr_version(name).map(str::to_string);

        let Some(sig) = sig else {
            let docs = self.lookup_attr_docs(name, current);
            if docs.is_empty() {
                return Some(AliasDecl::bare(func_name, name));
            }
            // Module-level docstrings are ignored downstream, so free
            // functions get their doc attribute replaced instead.
            let doc = if is_method {
                DocAttachment::Block(docs)
            } else {
                DocAttachment::Attribute(docs)
            };
            return Some(AliasDecl {
                name: func_name.to_string(),
                origin: name.to_string(),
                doc,
                version,
                marker: None,
            });
        };

        let mut docs: Vec<String> = sig
            .to_rest_listing(self, name, current)
            .lines()
            .map(str::to_string)
            .collect();

        let user_docstring = docstring_body(own_doc.unwrap_or(""));
        if !user_docstring.is_empty() {
            docs.push(String::new());
            docs.push(unindent(&user_docstring));
        } else {
            let gir_docs = self.lookup_attr_docs(name, current);
            if !gir_docs.is_empty() {
                docs.push(String::new());
                docs.push(gir_docs);
            }
        }
        let docs = docs.join("\n");

        let (doc, marker) = if is_method {
            let marker = callable.is_static().then_some(Marker::Static);
            (DocAttachment::Block(docs), marker)
        } else {
            (DocAttachment::Attribute(docs), None)
        };

        Some(AliasDecl {
            name: func_name.to_string(),
            origin: name.to_string(),
            doc,
            version,
            marker,
        })
    }
}
