//! Export: the normalization layer.
//!
//! Takes reflected files and produces the stable, serializable records
//! in [`records`].  The per-file pipeline runs Discovered → Reflected →
//! PathNormalized → Assembled: reflect the file, compute its
//! root-relative forward-slash path (optionally splitting off a leading
//! version segment), then assemble the [`FileRecord`] by invoking the
//! docblock, usage, hook, and declaration exporters over every
//! declaration the reflection reports.
//!
//! Sub-modules:
//! - [`records`]: the serializable wire records
//! - [`docblock`]: docblock and tag normalization
//! - [`usage`]: call-site export and deprecation enrichment
//! - [`hooks`]: hook dispatch export
//! - [`declarations`]: argument/property/method/function/class export

mod declarations;
mod docblock;
mod hooks;
mod records;
mod usage;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::reflection::{self, ReflectError};
use crate::types::FileReflection;
use crate::util::to_forward_slashes;

pub use docblock::export_docblock;
pub use hooks::export_hooks;
pub use records::*;
pub use usage::export_usage;

use declarations::{FileContext, export_class, export_function};

/// The injected description formatter: a pure `string -> string`
/// rendering step (e.g. Markdown) applied to every description field
/// before whitespace collapsing.
pub type Formatter = fn(&str) -> String;

/// The default formatter: leaves descriptions untouched.
pub fn identity(text: &str) -> String {
    text.to_string()
}

/// Exports reflected files into [`FileRecord`]s.
pub struct Exporter {
    root: PathBuf,
    use_versions: bool,
    format: Formatter,
}

impl Exporter {
    pub fn new(root: impl Into<PathBuf>, use_versions: bool) -> Self {
        Exporter {
            root: root.into(),
            use_versions,
            format: identity,
        }
    }

    /// Replace the description formatter.
    pub fn with_formatter(self, format: Formatter) -> Self {
        Exporter { format, ..self }
    }

    /// Export every file in discovery order.
    ///
    /// A file that cannot be reflected is skipped with a warning and the
    /// run continues; one bad file never aborts the whole export.
    pub fn export_files(&self, files: &[PathBuf]) -> Vec<FileRecord> {
        let mut records = Vec::with_capacity(files.len());
        for path in files {
            match self.export_file(path) {
                Ok(record) => {
                    debug!(path = %record.path, "exported");
                    records.push(record);
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping file");
                }
            }
        }
        records
    }

    /// Reflect and export a single file.
    pub fn export_file(&self, path: &Path) -> Result<FileRecord, ReflectError> {
        let reflection = reflection::reflect_file(path)?;
        Ok(self.assemble(&reflection))
    }

    /// Assemble the export record for an already-reflected file.
    pub fn assemble(&self, reflection: &FileReflection) -> FileRecord {
        let relative = reflection
            .path
            .strip_prefix(&self.root)
            .unwrap_or(&reflection.path);
        let mut path = to_forward_slashes(relative);
        let mut root = self.root.to_string_lossy().into_owned();
        let mut version = None;

        if self.use_versions {
            // The leading path segment is the version.  A file directly
            // under the root has no segment to strip; that is a defined
            // non-match, not an error.
            if let Some((segment, rest)) = path.split_once('/') {
                root = format!("{}/{}", root, segment);
                version = Some(segment.to_string());
                path = rest.to_string();
            }
        }

        let file = FileContext {
            namespace: reflection.namespace.as_deref(),
            aliases: &reflection.aliases,
        };

        FileRecord {
            doc: export_docblock(self.format, reflection.doc.as_deref()),
            path,
            root,
            version,
            uses: export_usage(&reflection.uses),
            includes: reflection
                .includes
                .iter()
                .map(|include| IncludeRecord {
                    name: include.name.clone(),
                    line: include.line,
                    kind: include.kind.as_str().to_string(),
                })
                .collect(),
            constants: reflection
                .constants
                .iter()
                .map(|constant| ConstantRecord {
                    name: constant.name.clone(),
                    line: constant.line,
                    value: constant.value.clone(),
                })
                .collect(),
            hooks: export_hooks(self.format, &reflection.uses.hooks),
            functions: reflection
                .functions
                .iter()
                .map(|f| export_function(self.format, &file, f))
                .collect(),
            classes: reflection
                .classes
                .iter()
                .map(|c| export_class(self.format, &file, c))
                .collect(),
        }
    }
}

/// Export `files` against `root` — the public surface of the core.
pub fn export_files(files: &[PathBuf], root: &Path, use_versions: bool) -> Vec<FileRecord> {
    Exporter::new(root, use_versions).export_files(files)
}
