//! `use` statement and namespace extraction.
//!
//! Builds the file's alias map: short (imported) class names to their
//! fully-qualified equivalents.  Function and const imports are skipped;
//! only class aliases matter for resolving documented references.

use std::collections::BTreeMap;

use mago_syntax::ast::*;

use crate::util::bytes_to_str;

/// Walk statements and extract `use` statement mappings.
pub(crate) fn extract_use_statements_from_statements<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    use_map: &mut BTreeMap<String, String>,
) {
    for statement in statements {
        match statement {
            Statement::Use(use_stmt) => {
                extract_use_items(&use_stmt.items, use_map);
            }
            Statement::Namespace(namespace) => {
                extract_use_statements_from_statements(namespace.statements().iter(), use_map);
            }
            _ => {}
        }
    }
}

/// Extract individual use items from a `UseItems` node.
///
/// Handles:
///   - Simple use: `use Foo\Bar;`
///   - Aliased use: `use Foo\Bar as Baz;`
///   - Grouped use: `use Foo\{Bar, Baz};`
///   - Mixed grouped use: `use Foo\{Bar, function baz, const QUX};`
fn extract_use_items(items: &UseItems<'_>, use_map: &mut BTreeMap<String, String>) {
    match items {
        UseItems::Sequence(seq) => {
            for item in seq.items.iter() {
                register_use_item(item, None, use_map);
            }
        }
        UseItems::TypedSequence(seq) => {
            if seq.r#type.is_function() || seq.r#type.is_const() {
                return;
            }
            for item in seq.items.iter() {
                register_use_item(item, None, use_map);
            }
        }
        UseItems::TypedList(list) => {
            if list.r#type.is_function() || list.r#type.is_const() {
                return;
            }
            let prefix = bytes_to_str(list.namespace.value());
            for item in list.items.iter() {
                register_use_item(item, Some(prefix), use_map);
            }
        }
        UseItems::MixedList(list) => {
            let prefix = bytes_to_str(list.namespace.value());
            for maybe_typed in list.items.iter() {
                if let Some(ref t) = maybe_typed.r#type
                    && (t.is_function() || t.is_const())
                {
                    continue;
                }
                register_use_item(&maybe_typed.item, Some(prefix), use_map);
            }
        }
    }
}

/// Register a single `UseItem` into the use map.
///
/// If `group_prefix` is `Some`, the item name is relative to that prefix
/// (for `use Foo\{Bar}`, prefix `"Foo"` and item `"Bar"` give the FQN
/// `"Foo\Bar"`).
fn register_use_item(
    item: &UseItem<'_>,
    group_prefix: Option<&str>,
    use_map: &mut BTreeMap<String, String>,
) {
    let item_name = bytes_to_str(item.name.value());

    let fqn = if let Some(prefix) = group_prefix {
        format!("{}\\{}", prefix, item_name)
    } else {
        item_name.to_string()
    };

    let alias_name = if let Some(ref alias) = item.alias {
        bytes_to_str(alias.identifier.value).to_string()
    } else {
        short_name(&fqn).to_string()
    };

    use_map.insert(alias_name, fqn);
}

/// Walk statements and extract the first namespace declaration found.
pub(crate) fn extract_namespace_from_statements<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
) -> Option<String> {
    for statement in statements {
        if let Statement::Namespace(namespace) = statement
            && let Some(ident) = &namespace.name
        {
            let name = bytes_to_str(ident.value());
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}

/// The last segment of a backslash-separated name.
fn short_name(fqn: &str) -> &str {
    fqn.rsplit('\\').next().unwrap_or(fqn)
}
