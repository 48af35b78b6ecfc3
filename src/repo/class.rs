use super::Repository;
use crate::live::{ClassRef, Introspector};
use crate::model::{short_name, ClassDecl, Declaration};

impl Repository {
    /// Class re-exposing the live class' constructor, documented with the
    /// class docs. With `add_bases` the override-aware base chain is listed,
    /// qualified with the module for classes outside this namespace.
    pub fn parse_class(
        &self,
        name: &str,
        class: &ClassRef,
        live: &dyn Introspector,
        add_bases: bool,
    ) -> Declaration {
        let current = class.qualified();

        let mut bases: Vec<String> = Vec::new();
        if add_bases {
            for base in live.merged_bases(class) {
                if base.module != self.namespace && !base.is_object_root() {
                    bases.push(base.qualified());
                } else {
                    bases.push(base.name);
                }
            }
        }
        if bases.is_empty() {
            bases.push("object".to_string());
        }

        Declaration::Class(ClassDecl {
            name: short_name(name).to_string(),
            origin: name.to_string(),
            bases,
            doc: self.lookup_attr_docs(name, Some(&current)),
            version: self.attr_version(name).map(str::to_string),
            methods: Vec::new(),
        })
    }
}
