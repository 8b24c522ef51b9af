//! PHP parsing and reflection extraction.
//!
//! This module parses PHP source text with the mago_syntax parser and
//! walks the resulting AST into a [`FileReflection`]: the file docblock,
//! ordered includes, constants, top-level functions, class-likes, and the
//! per-scope call-site usage collected by [`uses`].
//!
//! Sub-modules:
//! - [`classes`]: class, interface, and trait extraction
//! - [`functions`]: standalone functions, includes, and constants
//! - [`uses`]: function/method call-site and hook dispatch collection
//! - [`use_statements`]: `use` imports and namespace extraction

mod classes;
mod functions;
mod use_statements;
mod uses;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use mago_span::{HasSpan, Span};
use mago_syntax::ast::*;

use crate::types::{FileReflection, ScopeUsage};
use crate::util::LineIndex;

/// Failure to reflect one file.
#[derive(Debug)]
pub enum ReflectError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The parser panicked on this file's content.
    ParserPanic { path: PathBuf },
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ReflectError::ParserPanic { path } => {
                write!(f, "parser panicked on {}", path.display())
            }
        }
    }
}

impl std::error::Error for ReflectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReflectError::Io { source, .. } => Some(source),
            ReflectError::ParserPanic { .. } => None,
        }
    }
}

/// Shared context for one file's extraction passes.
///
/// Bundles the program's trivia (comments/whitespace), the raw source
/// text, and the line index so extraction functions can look up the
/// `/** ... */` comment preceding any AST node, slice an expression's
/// source text, and convert spans to line numbers.
pub(crate) struct ReflectCtx<'a> {
    pub trivias: &'a [Trivia<'a>],
    pub content: &'a str,
    pub lines: &'a LineIndex,
}

impl<'a> ReflectCtx<'a> {
    /// The raw docblock text immediately preceding `node`, if any.
    pub fn docblock_for(&self, node: &impl HasSpan) -> Option<&'a str> {
        self.docblock_trivia_for(node).map(|t| crate::util::bytes_to_str(t.value))
    }

    /// The docblock trivia immediately preceding `node`, if any.
    ///
    /// Walks the trivia list backwards from the node start, skipping
    /// whitespace and ordinary comments; anything else between the
    /// docblock and the node disqualifies it.
    pub fn docblock_trivia_for(&self, node: &impl HasSpan) -> Option<&'a Trivia<'a>> {
        let node_start = node.span().start.offset;
        let candidate_idx = self
            .trivias
            .partition_point(|t| t.span.start.offset < node_start);
        if candidate_idx == 0 {
            return None;
        }

        let content_bytes = self.content.as_bytes();
        let mut covered_from = node_start;

        for i in (0..candidate_idx).rev() {
            let t = &self.trivias[i];
            let t_end = t.span.end.offset;

            let gap = content_bytes
                .get(t_end as usize..covered_from as usize)
                .unwrap_or(&[]);
            if !gap.iter().all(u8::is_ascii_whitespace) {
                return None;
            }

            match t.kind {
                TriviaKind::DocBlockComment => return Some(t),
                TriviaKind::WhiteSpace
                | TriviaKind::SingleLineComment
                | TriviaKind::MultiLineComment
                | TriviaKind::HashComment => {
                    covered_from = t.span.start.offset;
                }
            }
        }

        None
    }

    /// The source text covered by `span`.
    pub fn source_of(&self, span: Span) -> &'a str {
        self.content
            .get(span.start.offset as usize..span.end.offset as usize)
            .unwrap_or("")
    }

    /// The 1-based (line, end_line) pair for a node.
    pub fn line_span(&self, node: &impl HasSpan) -> (u32, u32) {
        let span = node.span();
        (
            self.lines.line_of(span.start.offset),
            self.lines.line_of(span.end.offset),
        )
    }
}

/// Read and reflect one file from disk.
pub fn reflect_file(path: &Path) -> Result<FileReflection, ReflectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReflectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    reflect_source(path, &content)
}

/// Reflect PHP source text into a [`FileReflection`].
///
/// The mago parser is error-tolerant and produces a best-effort AST for
/// malformed input; a parser panic is caught and surfaced as
/// [`ReflectError::ParserPanic`] so one bad file cannot take down a run.
pub fn reflect_source(path: &Path, content: &str) -> Result<FileReflection, ReflectError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input.php".to_string());
    let content_owned = content.to_string();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let arena = bumpalo::Bump::new();
        let file_id = mago_database::file::FileId::new(file_name.as_bytes());
        let program =
            mago_syntax::parser::parse_file_content(&arena, file_id, content_owned.as_bytes());

        let lines = LineIndex::new(&content_owned);
        let ctx = ReflectCtx {
            trivias: program.trivia.as_slice(),
            content: &content_owned,
            lines: &lines,
        };

        let doc = file_docblock(&program, &ctx).map(str::to_string);

        let namespace =
            use_statements::extract_namespace_from_statements(program.statements.iter());
        let mut aliases = BTreeMap::new();
        use_statements::extract_use_statements_from_statements(
            program.statements.iter(),
            &mut aliases,
        );

        let mut includes = Vec::new();
        let mut constants = Vec::new();
        functions::extract_includes_and_constants(
            program.statements.iter(),
            &mut includes,
            &mut constants,
            &ctx,
        );

        let mut file_uses = ScopeUsage::default();
        uses::collect_file_usage(program.statements.iter(), &mut file_uses, &ctx);

        let mut function_list = Vec::new();
        functions::extract_functions_from_statements(
            program.statements.iter(),
            &mut function_list,
            &ctx,
        );

        let mut class_list = Vec::new();
        classes::extract_classes_from_statements(program.statements.iter(), &mut class_list, &ctx);

        FileReflection {
            path: path.to_path_buf(),
            doc,
            namespace,
            aliases,
            includes,
            constants,
            uses: file_uses,
            functions: function_list,
            classes: class_list,
        }
    }));

    result.map_err(|_| ReflectError::ParserPanic {
        path: path.to_path_buf(),
    })
}

/// The file-level docblock: the first docblock comment in the file,
/// unless the first declaration claims it as its own.
fn file_docblock<'a>(program: &Program<'a>, ctx: &ReflectCtx<'a>) -> Option<&'a str> {
    let first = ctx
        .trivias
        .iter()
        .find(|t| matches!(t.kind, TriviaKind::DocBlockComment))?;

    let claimed = first_declaration_docblock(program.statements.iter(), ctx);
    if claimed.is_some_and(|t| t.span.start.offset == first.span.start.offset) {
        return None;
    }

    Some(crate::util::bytes_to_str(first.value))
}

/// The docblock trivia attached to the first declaration in the file,
/// recursing through namespace bodies.
fn first_declaration_docblock<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    ctx: &ReflectCtx<'a>,
) -> Option<&'a Trivia<'a>> {
    for statement in statements {
        match statement {
            Statement::Function(_)
            | Statement::Class(_)
            | Statement::Interface(_)
            | Statement::Trait(_)
            | Statement::Enum(_) => {
                return ctx.docblock_trivia_for(statement);
            }
            Statement::Namespace(namespace) => {
                return first_declaration_docblock(namespace.statements().iter(), ctx);
            }
            _ => {}
        }
    }
    None
}
