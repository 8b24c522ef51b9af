//! Docblock export.
//!
//! Normalizes a documentation comment (or its absence) into a
//! [`DocblockRecord`]: collapsed description fields plus one
//! [`TagRecord`] per tag.  Facet fields are populated per tag kind, in
//! the fixed precedence types, link, variable, refers, and finally the
//! version override — which must run after the generic content
//! assignment so it can replace `content` with the raw version string.

use crate::docblock::{self, DocTag};

use super::Formatter;
use super::records::{DocblockRecord, TagRecord};

/// Export a raw docblock (or its absence) into a [`DocblockRecord`].
///
/// An absent docblock yields the fixed empty record: all three fields
/// present, never null.
pub fn export_docblock(format: Formatter, doc: Option<&str>) -> DocblockRecord {
    let Some(raw) = doc else {
        return DocblockRecord::default();
    };

    let parsed = docblock::parse(raw);

    DocblockRecord {
        description: render(format, &parsed.description),
        long_description: render(format, &parsed.long_description),
        tags: parsed.tags.iter().map(|tag| export_tag(format, tag)).collect(),
    }
}

/// Run a description through the injected formatter, then collapse every
/// line-break run into a single space.
fn render(format: Formatter, text: &str) -> String {
    collapse_newlines(&format(text))
}

/// Replace every run of `\n`/`\r` with one space.
fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for ch in text.chars() {
        if ch == '\n' || ch == '\r' {
            in_break = true;
        } else {
            if in_break {
                out.push(' ');
                in_break = false;
            }
            out.push(ch);
        }
    }
    out
}

/// Normalize one tag onto the common record shape.
fn export_tag(format: Formatter, tag: &DocTag) -> TagRecord {
    let mut record = TagRecord {
        name: tag.name().to_string(),
        ..TagRecord::default()
    };

    match tag {
        DocTag::Variable {
            types,
            variable,
            description,
            ..
        } => {
            record.content = render(format, description);
            record.types = Some(types.clone());
            // The variable facet is supported even when the tag omits the
            // variable name, matching the empty-string readout of the
            // original reflection.
            record.variable = Some(variable.clone().unwrap_or_default());
        }
        DocTag::Type {
            types, description, ..
        } => {
            record.content = render(format, description);
            record.types = Some(types.clone());
        }
        DocTag::Link {
            link, description, ..
        } => {
            record.content = render(format, description);
            record.link = Some(link.clone());
        }
        DocTag::Reference {
            refers,
            description,
            ..
        } => {
            record.content = render(format, description);
            record.refers = Some(refers.clone());
        }
        DocTag::Version {
            version,
            description,
            ..
        } => {
            // Evaluated last: a non-empty version replaces the rendered
            // content, and the rendered description moves to its own
            // field when non-empty.
            let rendered = render(format, description);
            record.content = rendered.clone();
            if !version.is_empty() {
                record.content = version.clone();
            }
            if !rendered.is_empty() {
                record.description = Some(rendered);
            }
        }
        DocTag::Other { content, .. } => {
            record.content = render(format, content);
        }
    }

    record
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::identity;
    use super::*;

    #[test]
    fn absent_docblock_yields_empty_record() {
        let record = export_docblock(identity, None);
        assert_eq!(record, DocblockRecord::default());
        assert_eq!(record.description, "");
        assert_eq!(record.long_description, "");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn multiline_description_collapses_to_one_line() {
        let doc = concat!(
            "/**\n",
            " * Loads the plugin\n",
            " * text domain.\n",
            " */",
        );
        let record = export_docblock(identity, Some(doc));
        assert_eq!(record.description, "Loads the plugin text domain.");
    }

    #[test]
    fn version_tag_overrides_content() {
        let record = export_docblock(identity, Some("/** @since 4.9.0 */"));
        assert_eq!(record.tags.len(), 1);
        let tag = &record.tags[0];
        assert_eq!(tag.name, "since");
        assert_eq!(tag.content, "4.9.0");
        assert_eq!(tag.description, None);
    }

    #[test]
    fn version_tag_with_description_keeps_both() {
        let record =
            export_docblock(identity, Some("/** @since 4.9.0 Added the `$id` parameter. */"));
        let tag = &record.tags[0];
        assert_eq!(tag.content, "4.9.0");
        assert_eq!(tag.description.as_deref(), Some("Added the `$id` parameter."));
    }

    #[test]
    fn param_tag_emits_types_and_variable_only() {
        let record = export_docblock(identity, Some("/** @param string $slug The slug. */"));
        let tag = &record.tags[0];
        assert_eq!(tag.types.as_deref(), Some(&["string".to_string()][..]));
        assert_eq!(tag.variable.as_deref(), Some("$slug"));
        assert_eq!(tag.content, "The slug.");
        assert_eq!(tag.link, None);
        assert_eq!(tag.refers, None);
        assert_eq!(tag.description, None);
    }

    #[test]
    fn plain_tag_emits_no_facets() {
        let record = export_docblock(identity, Some("/** @ignore */"));
        let tag = &record.tags[0];
        assert_eq!(tag.name, "ignore");
        assert_eq!(tag.types, None);
        assert_eq!(tag.link, None);
        assert_eq!(tag.variable, None);
        assert_eq!(tag.refers, None);
        assert_eq!(tag.description, None);
    }

    #[test]
    fn formatter_is_applied_before_collapsing() {
        fn shout(text: &str) -> String {
            text.to_uppercase()
        }
        let record = export_docblock(shout, Some("/** Renders the header. */"));
        assert_eq!(record.description, "RENDERS THE HEADER.");
    }

    #[test]
    fn serialized_tag_omits_unsupported_facets() {
        let record = export_docblock(identity, Some("/** @link https://example.com */"));
        let json = serde_json::to_value(&record.tags[0]).expect("tag serializes");
        let object = json.as_object().expect("tag is an object");
        assert!(object.contains_key("link"));
        assert!(!object.contains_key("types"));
        assert!(!object.contains_key("variable"));
        assert!(!object.contains_key("refers"));
    }
}
