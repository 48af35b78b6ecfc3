//! gidoc: generate documented stubs for a GObject-introspection namespace.
//!
//! `gidoc -s dumps/ -l live/Gtk.json -o docs/stubs Gtk-3.0`

use anyhow::{bail, Context, Result};
use clap::Parser;
use gidoc::live::dump::LiveDump;
use gidoc::namespace::store::DirStore;
use gidoc::namespace::NamespaceKey;
use gidoc::{generate_module, render, GenerateOptions, Repository};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gidoc",
    about = "Generate documented stubs from GObject-introspection namespace dumps"
)]
struct Cli {
    /// Namespace to document, as <Name>-<version> (e.g. Gtk-3.0)
    namespace: NamespaceKey,

    /// Directory containing <Name>-<version>.json namespace dumps
    #[arg(short = 's', long)]
    store: PathBuf,

    /// Dump of the live object graph for the namespace
    #[arg(short = 'l', long)]
    live: PathBuf,

    /// Output directory; writes to stdout when omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: python (default), json
    #[arg(short = 'f', long, default_value = "python")]
    format: String,

    /// List override-aware base classes on class stubs
    #[arg(long)]
    bases: bool,

    /// Include entities the namespace marks as private
    #[arg(long)]
    include_private: bool,

    /// Log debug details to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let renderer = render::create_renderer(&cli.format)?;
    let store = DirStore::new(&cli.store);

    if !store.path_for(&cli.namespace).is_file() {
        let available = store.available()?;
        if available.is_empty() {
            bail!("no namespace dumps found in {}", cli.store.display());
        }
        let names: Vec<String> = available.iter().map(|k| k.to_string()).collect();
        bail!(
            "namespace {} not found in {} (available: {})",
            cli.namespace,
            cli.store.display(),
            names.join(", ")
        );
    }

    let repo = Repository::new(&cli.namespace.name, &cli.namespace.version, &store)?;
    let live = LiveDump::load(&cli.live)?;
    if live.namespace != cli.namespace.name {
        warn!(
            expected = %cli.namespace.name,
            found = %live.namespace,
            "live dump is for a different namespace"
        );
    }

    let options = GenerateOptions {
        add_bases: cli.bases,
        include_private: cli.include_private,
    };
    let module = generate_module(&repo, &live, &options);
    let output = renderer.render(&module)?;

    match cli.output {
        Some(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
            let path = dir.join(format!("{}.{}", cli.namespace.name, renderer.file_extension()));
            fs::write(&path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                declarations = module.declarations.len(),
                "wrote stubs"
            );
        }
        None => print!("{}", output),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
