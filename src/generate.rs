//! Module generation: walk a live dump and emit every entity of the namespace.

use crate::live::dump::{ClassDump, ClassKind, LiveDump};
use crate::live::Callable;
use crate::model::*;
use crate::repo::Repository;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// List override-aware base chains on classes
    pub add_bases: bool,
    /// Emit entities the namespace marks as private
    pub include_private: bool,
}

/// Emit constants, enums/flags, classes (with their own methods and
/// property/signal tables) and module functions, in that order.
pub fn generate_module(repo: &Repository, live: &LiveDump, options: &GenerateOptions) -> ModuleDoc {
    let visible = |name: &str| {
        if !name.contains('.') {
            warn!(name, "skipping entity without a namespace prefix");
            return false;
        }
        let private = repo.is_private(name);
        if private && !options.include_private {
            debug!(name, "skipping private entity");
        }
        options.include_private || !private
    };

    let mut declarations: Vec<Declaration> = Vec::new();
    let mut classes: Vec<ClassSummary> = Vec::new();

    for name in live.constants.iter().filter(|n| visible(n.as_str())) {
        declarations.extend(repo.parse_constant(name));
    }

    let own_classes = live
        .classes
        .iter()
        .filter(|c| c.module == repo.namespace)
        .filter(|c| visible(c.class_ref().qualified().as_str()));

    let (enums, objects): (Vec<&ClassDump>, Vec<&ClassDump>) = own_classes
        .partition(|c| matches!(c.kind, ClassKind::Enum | ClassKind::Flags));

    for dump in enums {
        let class = dump.class_ref();
        declarations.push(repo.parse_flags(&class.qualified(), &class, live));
    }

    for dump in objects {
        let (decl, summary) = generate_class(repo, live, dump, options);
        declarations.push(decl);
        if !summary.properties.is_empty() || !summary.signals.is_empty() {
            classes.push(summary);
        }
    }

    for (name, callable) in live.functions.iter().filter(|(n, _)| visible(n.as_str())) {
        if let Some(alias) = repo.parse_function(name, None, callable, live) {
            declarations.push(Declaration::Alias(alias));
        }
    }

    let mut imports: Vec<String> = std::iter::once(repo.namespace.clone())
        .chain(repo.loaded_dependencies().iter().map(|k| k.name.clone()))
        .collect();
    imports.sort();
    imports.dedup();

    ModuleDoc {
        namespace: repo.namespace.clone(),
        version: repo.version.clone(),
        imports,
        declarations,
        classes,
    }
}

fn generate_class(
    repo: &Repository,
    live: &LiveDump,
    dump: &ClassDump,
    options: &GenerateOptions,
) -> (Declaration, ClassSummary) {
    let class = dump.class_ref();
    let name = class.qualified();

    let mut decl = repo.parse_class(&name, &class, live, options.add_bases);
    if let Declaration::Class(ref mut class_decl) = decl {
        for (method_name, method) in &dump.methods {
            if method.unsupported {
                debug!(class = %class, method = %method_name, "skipping unsupported method");
                continue;
            }
            let callable = Callable {
                doc: method.doc.clone(),
                kind: method.kind,
            };
            let full_name = format!("{}.{}", name, method_name);
            class_decl
                .methods
                .extend(repo.parse_function(&full_name, Some(&class), &callable, live));
        }
    }

    let summary = ClassSummary {
        properties: repo.parse_properties(&class, live),
        signals: repo.parse_signals(&class, live),
        name,
    };
    (decl, summary)
}
