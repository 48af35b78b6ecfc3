use super::Repository;
use crate::live::{param_flags, ClassRef, Introspector};
use crate::model::{Property, Signal};
use crate::types::gtype_to_rest;

impl Repository {
    /// Signals declared by `class`.
    pub fn parse_signals(&self, class: &ClassRef, live: &dyn Introspector) -> Vec<Signal> {
        let current = class.qualified();

        live.signals(class)
            .into_iter()
            .map(|sig| {
                let doc_key = format!("{}.{}", current, sig.name);
                let desc = self.lookup_signal_docs(&doc_key, false, Some(&current));
                let short_desc = self.lookup_signal_docs(&doc_key, true, Some(&current));
                let params = sig
                    .param_types
                    .iter()
                    .map(gtype_to_rest)
                    .collect::<Vec<_>>()
                    .join(", ");
                Signal {
                    ret: gtype_to_rest(&sig.return_type),
                    name: sig.name,
                    params,
                    desc,
                    short_desc,
                }
            })
            .collect()
    }

    /// Properties installed by `class` itself; inherited ones are documented
    /// on their owner.
    pub fn parse_properties(&self, class: &ClassRef, live: &dyn Introspector) -> Vec<Property> {
        let current = class.qualified();

        live.properties(class)
            .into_iter()
            .filter(|spec| &spec.owner == class)
            .map(|spec| {
                let short_desc = match &spec.blurb {
                    Some(blurb) => self.fix_docs(blurb, None, Some(&current)),
                    None => String::new(),
                };
                let doc_name = format!("{}.{}", current, spec.name);
                let mut desc = self.lookup_prop_docs(&doc_name, Some(&current));
                if desc.is_empty() {
                    desc = short_desc.clone();
                }
                Property {
                    type_desc: gtype_to_rest(&spec.value_type),
                    readable: spec.has_flag(param_flags::READABLE),
                    writable: spec.has_flag(param_flags::WRITABLE),
                    construct: spec.has_flag(param_flags::CONSTRUCT),
                    name: spec.name,
                    attr_name: spec.attr_name,
                    short_desc,
                    desc,
                }
            })
            .collect()
    }
}
