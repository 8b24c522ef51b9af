//! The serializable export records.
//!
//! These structs are the wire contract consumed by downstream
//! documentation generators: field names and shapes are stable, every
//! list preserves source declaration order, and the optional collections
//! (`uses`, `includes`, `constants`, `hooks`) disappear from the JSON
//! entirely when empty.

use std::collections::BTreeMap;

use serde::Serialize;

/// A normalized documentation comment.  All three fields are always
/// emitted, even for undocumented declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocblockRecord {
    pub description: String,
    pub long_description: String,
    pub tags: Vec<TagRecord>,
}

/// A normalized docblock tag.  The facet fields are populated per tag
/// kind; a kind that supports none of them yields only name and content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A recorded plain function call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCallRecord {
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_version: Option<String>,
}

/// A recorded method call.  `class` is the statically-referenced class
/// or receiver; `static` distinguishes `::` from `->` calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodCallRecord {
    pub name: String,
    pub class: String,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub line: u32,
    pub end_line: u32,
}

/// The call-sites recorded in one scope, grouped by call kind.  The
/// reserved hook kind never appears here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageRecord {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionCallRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodCallRecord>,
}

/// A hook dispatch site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookRecord {
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub arguments: Vec<String>,
    pub doc: DocblockRecord,
}

/// A declared function or method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentRecord {
    pub name: String,
    pub default: Option<String>,
    #[serde(rename = "type")]
    pub type_hint: Option<String>,
}

/// A top-level constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantRecord {
    pub name: String,
    pub line: u32,
    pub value: Option<String>,
}

/// An `include`/`require` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeRecord {
    pub name: String,
    pub line: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A class property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRecord {
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    pub default: Option<String>,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub visibility: String,
    pub doc: DocblockRecord,
}

/// A class method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodRecord {
    pub name: String,
    pub namespace: Option<String>,
    pub aliases: BTreeMap<String, String>,
    pub line: u32,
    pub end_line: u32,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub visibility: String,
    pub arguments: Vec<ArgumentRecord>,
    pub doc: DocblockRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<UsageRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<HookRecord>,
}

/// A standalone function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub namespace: Option<String>,
    pub aliases: BTreeMap<String, String>,
    pub line: u32,
    pub end_line: u32,
    pub arguments: Vec<ArgumentRecord>,
    pub doc: DocblockRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<UsageRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<HookRecord>,
}

/// A class, interface, or trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    pub name: String,
    pub namespace: Option<String>,
    pub line: u32,
    pub end_line: u32,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub properties: Vec<PropertyRecord>,
    pub methods: Vec<MethodRecord>,
    pub doc: DocblockRecord,
}

/// The export record for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub doc: DocblockRecord,
    /// Root-relative path with forward-slash separators.
    pub path: String,
    pub root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<UsageRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<IncludeRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<ConstantRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<HookRecord>,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
}
