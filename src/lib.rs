//! phpreflect — PHP source reflection exporter.
//!
//! Walks a PHP source tree, parses each file into a structured
//! reflection model (functions, classes, methods, properties, constants,
//! includes, docblocks, and WordPress-style hook dispatch sites), and
//! serializes the result as JSON records for downstream documentation
//! generators.
//!
//! ## Module structure
//!
//! - [`discovery`]: recursive directory walk with regex filtering
//! - [`reflection`]: PHP parsing and AST extraction (mago_syntax)
//! - [`docblock`]: documentation-comment parsing
//! - [`export`]: normalization into the serializable wire records
//! - [`types`]: the reflection model shared between the layers
//! - [`util`]: offset/line conversion and path helpers

pub mod discovery;
pub mod docblock;
pub mod export;
pub mod reflection;
pub mod types;
pub mod util;

pub use discovery::{DiscoveryError, compile_patterns, discover};
pub use export::{Exporter, FileRecord, export_files};
pub use reflection::{ReflectError, reflect_file, reflect_source};
