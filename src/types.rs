//! Data types for the reflection model.
//!
//! This module contains the "model" structs and enums that represent one
//! parsed PHP file: its declarations (functions, classes, methods,
//! properties, constants, includes), the call-sites recorded inside each
//! scope, and the hook dispatch sites.  The [`crate::reflection`] module
//! produces these values from the AST; the [`crate::export`] module
//! consumes them and emits the serializable records.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Visibility of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// The lowercase keyword as it appears in source and in the export.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// The category of a recorded usage site.
///
/// The original heterogeneous string-keyed map ("functions", "methods",
/// "hooks") is modelled as a closed enum so the exporter can match on it
/// totally, with no fallthrough branch absorbing unknown kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Plain function calls.
    Functions,
    /// Instance and static method calls.
    Methods,
    /// Hook dispatch sites.  Reserved: always excluded from usage export
    /// and exported separately as hook records.
    Hooks,
}

impl CallKind {
    /// Every call kind, in the order scopes are exported.
    pub const ALL: [CallKind; 3] = [CallKind::Functions, CallKind::Methods, CallKind::Hooks];
}

/// The subkind of a hook dispatch site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Action,
    ActionReference,
    Filter,
    FilterReference,
}

impl HookKind {
    /// Map a dispatch function name to its hook kind.
    pub fn from_function_name(name: &str) -> Option<HookKind> {
        match name {
            "do_action" => Some(HookKind::Action),
            "do_action_ref_array" => Some(HookKind::ActionReference),
            "apply_filters" => Some(HookKind::Filter),
            "apply_filters_ref_array" => Some(HookKind::FilterReference),
            _ => None,
        }
    }

    /// The export-facing type string.
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::Action => "action",
            HookKind::ActionReference => "action_reference",
            HookKind::Filter => "filter",
            HookKind::FilterReference => "filter_reference",
        }
    }
}

/// The flavour of an include statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    Include,
    IncludeOnce,
    Require,
    RequireOnce,
}

impl IncludeKind {
    /// The keyword as it appears in source and in the export.
    pub fn as_str(self) -> &'static str {
        match self {
            IncludeKind::Include => "include",
            IncludeKind::IncludeOnce => "include_once",
            IncludeKind::Require => "require",
            IncludeKind::RequireOnce => "require_once",
        }
    }
}

/// One argument at a recorded call-site.
#[derive(Debug, Clone)]
pub struct RawArg {
    /// The argument's raw source text, e.g. `__FILE__` or `'2.1.0'`.
    pub source: String,
    /// The unquoted value when the argument is a simple scalar literal.
    pub literal: Option<String>,
}

/// A recorded function or method call-site inside a scope.
#[derive(Debug, Clone)]
pub struct CallSite {
    /// The called name.  For method calls this is the method name only;
    /// the receiver half of the two-part reference lives in `class`.
    pub name: String,
    /// The statically-referenced class or receiver variable of a method
    /// call (`Widget` in `Widget::render()`, `$widget` in
    /// `$widget->render()`).  `None` for plain function calls.
    pub class: Option<String>,
    /// Whether a method call uses `::` rather than `->`.
    pub is_static: bool,
    /// 1-based line of the call expression.
    pub line: u32,
    /// 1-based line on which the call expression ends.
    pub end_line: u32,
    /// The call's arguments, in order.
    pub args: Vec<RawArg>,
}

/// A recorded hook dispatch site.
#[derive(Debug, Clone)]
pub struct HookReflection {
    /// The hook name: the literal value of the first argument, or its
    /// source text reduced to a placeholder form when dynamic.
    pub name: String,
    pub kind: HookKind,
    pub line: u32,
    pub end_line: u32,
    /// Raw source text of every argument after the hook name.
    pub args: Vec<String>,
    /// Raw docblock text attached to the dispatch site, if any.
    pub doc: Option<String>,
}

/// Call-sites recorded inside one scope (a file body, a function body, or
/// a method body), grouped by [`CallKind`].
#[derive(Debug, Clone, Default)]
pub struct ScopeUsage {
    pub functions: Vec<CallSite>,
    pub methods: Vec<CallSite>,
    pub hooks: Vec<HookReflection>,
}

impl ScopeUsage {
    /// Whether the scope recorded any non-hook call-site.
    pub fn has_calls(&self) -> bool {
        !self.functions.is_empty() || !self.methods.is_empty()
    }
}

/// A declared parameter of a function or method.
#[derive(Debug, Clone)]
pub struct ParameterReflection {
    /// The parameter name including the `$` prefix (e.g. `$text`).
    pub name: String,
    /// Raw source text of the default value, if any.
    pub default: Option<String>,
    /// Type hint string (e.g. `string`, `?Foo`, `int|null`), if any.
    pub type_hint: Option<String>,
}

/// A standalone function declaration.
#[derive(Debug, Clone)]
pub struct FunctionReflection {
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    pub arguments: Vec<ParameterReflection>,
    /// Raw docblock text, if any.
    pub doc: Option<String>,
    /// Call-sites recorded inside the function body.
    pub uses: ScopeUsage,
}

/// A method declaration inside a class-like.
#[derive(Debug, Clone)]
pub struct MethodReflection {
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_static: bool,
    pub visibility: Visibility,
    pub arguments: Vec<ParameterReflection>,
    pub doc: Option<String>,
    /// Call-sites recorded inside the method body.  Empty for abstract
    /// and interface methods.
    pub uses: ScopeUsage,
}

/// A property declaration inside a class-like.
#[derive(Debug, Clone)]
pub struct PropertyReflection {
    /// The property name WITHOUT the `$` prefix.
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    /// Raw source text of the default value, if any.
    pub default: Option<String>,
    pub is_static: bool,
    pub visibility: Visibility,
    pub doc: Option<String>,
}

/// A class or interface declaration.
#[derive(Debug, Clone)]
pub struct ClassReflection {
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    pub is_final: bool,
    pub is_abstract: bool,
    /// Parent class name, if the class extends one.
    pub extends: Option<String>,
    /// Implemented interface names, in declaration order.
    pub implements: Vec<String>,
    pub properties: Vec<PropertyReflection>,
    pub methods: Vec<MethodReflection>,
    pub doc: Option<String>,
}

/// A top-level constant declared via `define()` or `const`.
#[derive(Debug, Clone)]
pub struct ConstantReflection {
    pub name: String,
    pub line: u32,
    /// Raw source text of the constant's value, if one could be read.
    pub value: Option<String>,
}

/// An `include`/`require` statement.
#[derive(Debug, Clone)]
pub struct IncludeReflection {
    /// Raw source text of the included-path expression.
    pub name: String,
    pub line: u32,
    pub kind: IncludeKind,
}

/// Everything reflected out of one PHP file, in source order.
#[derive(Debug, Clone)]
pub struct FileReflection {
    /// Absolute path of the reflected file.
    pub path: PathBuf,
    /// Raw file-level docblock text, if any.
    pub doc: Option<String>,
    /// The file's namespace declaration, if any.
    pub namespace: Option<String>,
    /// `use` imports: short (imported) name to fully-qualified name.
    pub aliases: BTreeMap<String, String>,
    pub includes: Vec<IncludeReflection>,
    pub constants: Vec<ConstantReflection>,
    /// Call-sites recorded in the file body, outside any function.
    pub uses: ScopeUsage,
    pub functions: Vec<FunctionReflection>,
    pub classes: Vec<ClassReflection>,
}
