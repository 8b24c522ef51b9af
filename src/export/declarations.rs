//! Declaration export.
//!
//! Shallow structural mappings from the reflection model to the export
//! records: arguments, properties, methods, functions, and classes.
//! Each composes the docblock, usage, and hook exporters; `uses` and
//! `hooks` are attached only when the reflected scope actually recorded
//! something.

use std::collections::BTreeMap;

use crate::types::{
    ClassReflection, FunctionReflection, MethodReflection, ParameterReflection,
    PropertyReflection,
};

use super::Formatter;
use super::docblock::export_docblock;
use super::hooks::export_hooks;
use super::records::{
    ArgumentRecord, ClassRecord, FunctionRecord, MethodRecord, PropertyRecord,
};
use super::usage::export_usage;

/// Per-file context shared by every declaration in the file.
pub(crate) struct FileContext<'a> {
    pub namespace: Option<&'a str>,
    pub aliases: &'a BTreeMap<String, String>,
}

impl FileContext<'_> {
    fn namespace_owned(&self) -> Option<String> {
        self.namespace.map(str::to_string)
    }
}

pub(crate) fn export_argument(param: &ParameterReflection) -> ArgumentRecord {
    ArgumentRecord {
        name: param.name.clone(),
        default: param.default.clone(),
        type_hint: param.type_hint.clone(),
    }
}

pub(crate) fn export_property(format: Formatter, property: &PropertyReflection) -> PropertyRecord {
    PropertyRecord {
        name: property.name.clone(),
        line: property.line,
        end_line: property.end_line,
        default: property.default.clone(),
        is_static: property.is_static,
        visibility: property.visibility.as_str().to_string(),
        doc: export_docblock(format, property.doc.as_deref()),
    }
}

pub(crate) fn export_method(
    format: Formatter,
    file: &FileContext<'_>,
    method: &MethodReflection,
) -> MethodRecord {
    MethodRecord {
        name: method.name.clone(),
        namespace: file.namespace_owned(),
        aliases: file.aliases.clone(),
        line: method.line,
        end_line: method.end_line,
        is_final: method.is_final,
        is_abstract: method.is_abstract,
        is_static: method.is_static,
        visibility: method.visibility.as_str().to_string(),
        arguments: method.arguments.iter().map(export_argument).collect(),
        doc: export_docblock(format, method.doc.as_deref()),
        uses: export_usage(&method.uses),
        hooks: export_hooks(format, &method.uses.hooks),
    }
}

pub(crate) fn export_function(
    format: Formatter,
    file: &FileContext<'_>,
    function: &FunctionReflection,
) -> FunctionRecord {
    FunctionRecord {
        name: function.name.clone(),
        namespace: file.namespace_owned(),
        aliases: file.aliases.clone(),
        line: function.line,
        end_line: function.end_line,
        arguments: function.arguments.iter().map(export_argument).collect(),
        doc: export_docblock(format, function.doc.as_deref()),
        uses: export_usage(&function.uses),
        hooks: export_hooks(format, &function.uses.hooks),
    }
}

pub(crate) fn export_class(
    format: Formatter,
    file: &FileContext<'_>,
    class: &ClassReflection,
) -> ClassRecord {
    ClassRecord {
        name: class.name.clone(),
        namespace: file.namespace_owned(),
        line: class.line,
        end_line: class.end_line,
        is_final: class.is_final,
        is_abstract: class.is_abstract,
        extends: class.extends.clone(),
        implements: class.implements.clone(),
        properties: class
            .properties
            .iter()
            .map(|p| export_property(format, p))
            .collect(),
        methods: class
            .methods
            .iter()
            .map(|m| export_method(format, file, m))
            .collect(),
        doc: export_docblock(format, class.doc.as_deref()),
    }
}
