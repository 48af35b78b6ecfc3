//! gidoc: resolve GObject-introspection documentation across a namespace's
//! dependency graph and emit documented stub declarations.
//!
//! - [`repo::Repository`] merges parsed namespace docs and type tables and
//!   answers doc lookups.
//! - Its `parse_*` methods turn live objects (seen through
//!   [`live::Introspector`]) into [`model::Declaration`]s.
//! - [`render`] serializes the result.

pub mod funcsig;
pub mod generate;
pub mod live;
pub mod model;
pub mod namespace;
pub mod render;
pub mod repo;
pub mod rewrite;
pub mod stock;
pub mod types;
pub mod util;

pub use generate::{generate_module, GenerateOptions};
pub use repo::Repository;
