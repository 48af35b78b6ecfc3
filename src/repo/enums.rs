use super::Repository;
use crate::live::{ClassRef, EnumValue, Introspector};
use crate::model::{AliasDecl, Declaration, EnumDecl, EnumMember, Rebind};
use std::collections::HashSet;

/// The GObject base types every enum/flags type derives from.
const BASE_TYPES: &[&str] = &["GEnum", "GFlags"];

impl Repository {
    /// Enum or flags type with its members in ascending value order.
    ///
    /// A member that also exists under a `_NAME` shadow attribute is not
    /// emitted with its natural value; it is rebound to the shadow after all
    /// members are in place.
    pub fn parse_flags(&self, name: &str, class: &ClassRef, live: &dyn Introspector) -> Declaration {
        if class.module == "GObject" && BASE_TYPES.contains(&class.name.as_str()) {
            return Declaration::Alias(AliasDecl::bare(&class.name, &class.qualified()));
        }

        let base = live
            .enum_base(class)
            .map(|b| b.qualified())
            .unwrap_or_else(|| "object".to_string());

        let attrs = live.enum_attrs(class);
        let names: HashSet<&str> = attrs.iter().map(|a| a.name.as_str()).collect();

        let mut escaped: Vec<String> = Vec::new();
        let mut values: Vec<(i64, &str)> = Vec::new();
        for attr in &attrs {
            if attr.name.to_uppercase() != attr.name {
                continue;
            }
            if names.contains(format!("_{}", attr.name).as_str()) {
                escaped.push(attr.name.clone());
                continue;
            }
            if let EnumValue::Instance(value) = attr.value {
                values.push((value, attr.name.as_str()));
            }
        }
        values.sort();

        let members = values
            .into_iter()
            .map(|(value, member)| EnumMember {
                name: member.to_string(),
                value,
                doc: self.lookup_attr_docs(&format!("{}.{}", name, member.to_lowercase()), None),
            })
            .collect();

        let rebinds = escaped
            .into_iter()
            .map(|member| Rebind {
                shadow: format!("_{}", member),
                member,
            })
            .collect();

        Declaration::Enum(EnumDecl {
            name: class.name.clone(),
            base,
            doc: self.lookup_attr_docs(name, None),
            version: self.attr_version(name).map(str::to_string),
            members,
            rebinds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use crate::live::*;
    use crate::model::*;

    fn attr(name: &str, value: Option<i64>) -> EnumAttr {
        EnumAttr {
            name: name.to_string(),
            value: match value {
                Some(v) => EnumValue::Instance(v),
                None => EnumValue::Foreign,
            },
        }
    }

    fn live_for(class: &ClassRef, attrs: Vec<EnumAttr>) -> FakeLive {
        let mut live = FakeLive::default();
        live.enum_bases.insert(class.clone(), ClassRef::new("GObject", "GFlags"));
        live.enum_attrs.insert(class.clone(), attrs);
        live
    }

    fn parse(repo_docs: DocMaps, class: &ClassRef, attrs: Vec<EnumAttr>) -> EnumDecl {
        let repo = gtk_repo(repo_docs);
        let live = live_for(class, attrs);
        match repo.parse_flags(&class.qualified(), class, &live) {
            Declaration::Enum(e) => e,
            other => panic!("expected enum, got {:?}", other),
        }
    }

    #[test]
    fn base_types_alias_canonical() {
        let repo = gtk_repo(DocMaps::default());
        for name in ["GEnum", "GFlags"] {
            let class = ClassRef::new("GObject", name);
            let decl = repo.parse_flags(&class.qualified(), &class, &FakeLive::default());
            assert_eq!(
                decl,
                Declaration::Alias(AliasDecl::bare(name, &format!("GObject.{}", name)))
            );
        }
    }

    #[test]
    fn members_sorted_by_value_with_docs() {
        let class = ClassRef::new("Gtk", "AttachOptions");
        let mut docs = DocMaps::default();
        docs.all.insert("Gtk.AttachOptions.shrink".into(), entry("Shrinks", None));
        let e = parse(
            docs,
            &class,
            vec![
                attr("FILL", Some(4)),
                attr("EXPAND", Some(1)),
                attr("SHRINK", Some(2)),
                attr("MAX", None),
                attr("from_string", Some(9)),
            ],
        );
        let names: Vec<(&str, i64)> = e.members.iter().map(|m| (m.name.as_str(), m.value)).collect();
        assert_eq!(names, vec![("EXPAND", 1), ("SHRINK", 2), ("FILL", 4)]);
        assert_eq!(e.members[1].doc, "Shrinks");
        assert_eq!(e.base, "GObject.GFlags");
        assert_eq!(e.name, "AttachOptions");
        assert!(e.rebinds.is_empty());
    }

    #[test]
    fn escaped_member_rebound_after_emission() {
        // A's natural value is 1, its real value lives in _A (2).
        let class = ClassRef::new("Gtk", "Thing");
        let e = parse(
            DocMaps::default(),
            &class,
            vec![attr("A", Some(1)), attr("_A", Some(2)), attr("B", Some(2))],
        );
        let names: Vec<(&str, i64)> = e.members.iter().map(|m| (m.name.as_str(), m.value)).collect();
        assert_eq!(names, vec![("B", 2), ("_A", 2)]);
        assert!(!e.members.iter().any(|m| m.name == "A"));
        assert_eq!(
            e.rebinds,
            vec![Rebind {
                member: "A".into(),
                shadow: "_A".into()
            }]
        );
    }
}
