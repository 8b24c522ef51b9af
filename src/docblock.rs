//! PHPDoc block parsing.
//!
//! This module splits a `/** ... */` comment into a short description, a
//! long description, and a sequence of typed tags.  Tag kinds form a
//! closed set ([`DocTag`]): each variant carries exactly the facets that
//! kind of tag supports, so the export layer can match on the variant
//! instead of probing capabilities at run time.
//!
//! The grammar is the usual PHPDoc shape:
//! ```text
//! /**
//!  * Short description.
//!  *
//!  * Long description, possibly
//!  * spanning several paragraphs.
//!  *
//!  * @param string $name Description of the parameter.
//!  * @since 2.1.0
//!  */
//! ```

/// A parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocblock {
    /// The first paragraph of the description, raw (line breaks kept).
    pub description: String,
    /// The remaining description paragraphs, raw.
    pub long_description: String,
    /// The tags, in source order.
    pub tags: Vec<DocTag>,
}

/// A single docblock tag.
///
/// Variants group tag names by the facets they support:
/// `@param` / `@property` / `@global` carry types and a bound variable,
/// `@return` / `@var` / `@type` / `@throws` carry types only,
/// `@since` / `@version` / `@deprecated` carry a version string,
/// `@link` carries a URI, `@see` / `@uses` carry a code reference, and
/// anything else is free-form content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTag {
    Variable {
        name: String,
        types: Vec<String>,
        variable: Option<String>,
        description: String,
    },
    Type {
        name: String,
        types: Vec<String>,
        description: String,
    },
    Version {
        name: String,
        version: String,
        description: String,
    },
    Link {
        name: String,
        link: String,
        description: String,
    },
    Reference {
        name: String,
        refers: String,
        description: String,
    },
    Other {
        name: String,
        content: String,
    },
}

impl DocTag {
    /// The tag name without the `@` prefix.
    pub fn name(&self) -> &str {
        match self {
            DocTag::Variable { name, .. }
            | DocTag::Type { name, .. }
            | DocTag::Version { name, .. }
            | DocTag::Link { name, .. }
            | DocTag::Reference { name, .. }
            | DocTag::Other { name, .. } => name,
        }
    }
}

/// Tag names whose first token is a type expression and whose second may
/// be a `$variable`.
const VARIABLE_TAGS: &[&str] = &["param", "property", "property-read", "property-write", "global"];

/// Tag names whose first token is a type expression with no bound variable.
const TYPE_TAGS: &[&str] = &["return", "var", "type", "throws"];

/// Tag names whose first token is a version string.
const VERSION_TAGS: &[&str] = &["since", "version", "deprecated"];

/// Tag names carrying a code reference.
const REFERENCE_TAGS: &[&str] = &["see", "uses"];

/// Parse a raw `/** ... */` docblock.
///
/// Never fails: malformed input degrades to description text or
/// [`DocTag::Other`] entries.
pub fn parse(docblock: &str) -> ParsedDocblock {
    let lines = inner_lines(docblock);

    // Split into the leading description block and the tag block.  A tag
    // starts at a line beginning with `@`; continuation lines (not
    // starting with `@`) belong to the preceding tag.
    let mut description_lines: Vec<&str> = Vec::new();
    let mut raw_tags: Vec<String> = Vec::new();

    for &line in &lines {
        if line.starts_with('@') {
            raw_tags.push(line.to_string());
        } else if let Some(last) = raw_tags.last_mut() {
            if !line.is_empty() {
                last.push('\n');
                last.push_str(line);
            }
        } else {
            description_lines.push(line);
        }
    }

    let (description, long_description) = split_description(&description_lines);

    let tags = raw_tags.iter().map(|raw| parse_tag(raw)).collect();

    ParsedDocblock {
        description,
        long_description,
        tags,
    }
}

/// Strip the `/**` and `*/` delimiters and the per-line ` * ` gutter,
/// returning the trimmed inner lines.
fn inner_lines(docblock: &str) -> Vec<&str> {
    let inner = docblock
        .trim()
        .strip_prefix("/**")
        .unwrap_or(docblock)
        .strip_suffix("*/")
        .unwrap_or(docblock);

    inner
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let trimmed = trimmed.strip_prefix('*').unwrap_or(trimmed);
            // One leading space belongs to the gutter; further indentation
            // is content.
            trimmed.strip_prefix(' ').unwrap_or(trimmed).trim_end()
        })
        .skip_while(|l| l.is_empty())
        .collect()
}

/// Split description lines into the short (first paragraph) and long
/// (remaining paragraphs) descriptions.
fn split_description(lines: &[&str]) -> (String, String) {
    let mut paragraphs: Vec<Vec<&str>> = vec![Vec::new()];
    for &line in lines {
        if line.is_empty() {
            if paragraphs.last().is_some_and(|p| !p.is_empty()) {
                paragraphs.push(Vec::new());
            }
        } else if let Some(paragraph) = paragraphs.last_mut() {
            paragraph.push(line);
        }
    }
    paragraphs.retain(|p| !p.is_empty());

    let mut iter = paragraphs.into_iter();
    let short = iter.next().map(|p| p.join("\n")).unwrap_or_default();
    let long: Vec<String> = iter.map(|p| p.join("\n")).collect();
    (short, long.join("\n\n"))
}

/// Parse one raw tag (starting with `@`, continuation lines joined with
/// `\n`) into a [`DocTag`].
fn parse_tag(raw: &str) -> DocTag {
    let body = raw.strip_prefix('@').unwrap_or(raw);
    let (name, rest) = match body.find(|c: char| c.is_whitespace()) {
        Some(pos) => (&body[..pos], body[pos..].trim_start()),
        None => (body, ""),
    };
    let name = name.to_string();

    if VARIABLE_TAGS.contains(&name.as_str()) {
        let (types, rest) = take_types(rest);
        let (variable, description) = take_variable(rest);
        DocTag::Variable {
            name,
            types,
            variable,
            description,
        }
    } else if TYPE_TAGS.contains(&name.as_str()) {
        let (types, rest) = take_types(rest);
        DocTag::Type {
            name,
            types,
            description: rest.to_string(),
        }
    } else if VERSION_TAGS.contains(&name.as_str()) {
        let (version, rest) = take_token(rest);
        DocTag::Version {
            name,
            version: version.to_string(),
            description: rest.to_string(),
        }
    } else if name == "link" {
        let (link, rest) = take_token(rest);
        DocTag::Link {
            name,
            link: link.to_string(),
            description: rest.to_string(),
        }
    } else if REFERENCE_TAGS.contains(&name.as_str()) {
        let (refers, rest) = take_token(rest);
        DocTag::Reference {
            name,
            refers: refers.to_string(),
            description: rest.to_string(),
        }
    } else {
        DocTag::Other {
            name,
            content: rest.to_string(),
        }
    }
}

/// Split off the first whitespace-delimited token.
fn take_token(s: &str) -> (&str, &str) {
    match s.find(|c: char| c.is_whitespace()) {
        Some(pos) => (&s[..pos], s[pos..].trim_start()),
        None => (s, ""),
    }
}

/// Read a type expression from the front of a tag body.
///
/// The type is the first whitespace-delimited token, split on `|` into
/// individual types.  A token starting with `$` is a variable, not a
/// type, and is left in place.
fn take_types(s: &str) -> (Vec<String>, &str) {
    if s.is_empty() || s.starts_with('$') {
        return (Vec::new(), s);
    }
    let (token, rest) = take_token(s);
    let types = token
        .split('|')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    (types, rest)
}

/// Read an optional `$variable` token from the front of a tag body.
fn take_variable(s: &str) -> (Option<String>, String) {
    if s.starts_with('$') {
        let (token, rest) = take_token(s);
        (Some(token.to_string()), rest.to_string())
    } else {
        (None, s.to_string())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_docblock() {
        let parsed = parse("/** */");
        assert_eq!(parsed, ParsedDocblock::default());
    }

    #[test]
    fn short_description_only() {
        let parsed = parse("/** Checks the thing. */");
        assert_eq!(parsed.description, "Checks the thing.");
        assert_eq!(parsed.long_description, "");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn short_and_long_description() {
        let doc = concat!(
            "/**\n",
            " * Registers the widget.\n",
            " *\n",
            " * The widget is added to the global registry\n",
            " * and rendered on every page load.\n",
            " *\n",
            " * Second paragraph of the long description.\n",
            " */",
        );
        let parsed = parse(doc);
        assert_eq!(parsed.description, "Registers the widget.");
        assert_eq!(
            parsed.long_description,
            "The widget is added to the global registry\nand rendered on every page load.\n\nSecond paragraph of the long description."
        );
    }

    #[test]
    fn param_tag_with_types_variable_and_description() {
        let doc = "/** @param string|int $number The number to format. */";
        let parsed = parse(doc);
        assert_eq!(
            parsed.tags,
            vec![DocTag::Variable {
                name: "param".into(),
                types: vec!["string".into(), "int".into()],
                variable: Some("$number".into()),
                description: "The number to format.".into(),
            }]
        );
    }

    #[test]
    fn param_tag_variable_without_type() {
        let doc = "/** @param $args Optional arguments. */";
        let parsed = parse(doc);
        assert_eq!(
            parsed.tags,
            vec![DocTag::Variable {
                name: "param".into(),
                types: vec![],
                variable: Some("$args".into()),
                description: "Optional arguments.".into(),
            }]
        );
    }

    #[test]
    fn return_tag_has_no_variable_facet() {
        let doc = "/** @return bool Whether the update succeeded. */";
        let parsed = parse(doc);
        assert_eq!(
            parsed.tags,
            vec![DocTag::Type {
                name: "return".into(),
                types: vec!["bool".into()],
                description: "Whether the update succeeded.".into(),
            }]
        );
    }

    #[test]
    fn since_tag_version_and_description() {
        let doc = "/** @since 2.1.0 Added the `$context` parameter. */";
        let parsed = parse(doc);
        assert_eq!(
            parsed.tags,
            vec![DocTag::Version {
                name: "since".into(),
                version: "2.1.0".into(),
                description: "Added the `$context` parameter.".into(),
            }]
        );
    }

    #[test]
    fn since_tag_version_only() {
        let parsed = parse("/** @since 2.0 */");
        assert_eq!(
            parsed.tags,
            vec![DocTag::Version {
                name: "since".into(),
                version: "2.0".into(),
                description: String::new(),
            }]
        );
    }

    #[test]
    fn deprecated_tag_without_version() {
        let parsed = parse("/** @deprecated */");
        assert_eq!(
            parsed.tags,
            vec![DocTag::Version {
                name: "deprecated".into(),
                version: String::new(),
                description: String::new(),
            }]
        );
    }

    #[test]
    fn link_tag() {
        let doc = "/** @link https://example.com/docs The docs. */";
        let parsed = parse(doc);
        assert_eq!(
            parsed.tags,
            vec![DocTag::Link {
                name: "link".into(),
                link: "https://example.com/docs".into(),
                description: "The docs.".into(),
            }]
        );
    }

    #[test]
    fn see_tag() {
        let doc = "/** @see Widget::render() */";
        let parsed = parse(doc);
        assert_eq!(
            parsed.tags,
            vec![DocTag::Reference {
                name: "see".into(),
                refers: "Widget::render()".into(),
                description: String::new(),
            }]
        );
    }

    #[test]
    fn unknown_tag_keeps_raw_content() {
        let doc = "/** @internal Not part of the public API. */";
        let parsed = parse(doc);
        assert_eq!(
            parsed.tags,
            vec![DocTag::Other {
                name: "internal".into(),
                content: "Not part of the public API.".into(),
            }]
        );
    }

    #[test]
    fn tag_continuation_lines_join() {
        let doc = concat!(
            "/**\n",
            " * @param array $args {\n",
            " *     Optional. Array of arguments.\n",
            " * }\n",
            " */",
        );
        let parsed = parse(doc);
        match &parsed.tags[0] {
            DocTag::Variable { description, .. } => {
                assert_eq!(description, "{\n    Optional. Array of arguments.\n}");
            }
            other => panic!("expected a param tag, got {:?}", other),
        }
    }

    #[test]
    fn description_and_tags_together() {
        let doc = concat!(
            "/**\n",
            " * Renders a widget.\n",
            " *\n",
            " * @since 1.5.0\n",
            " * @param string $id Widget id.\n",
            " * @return void\n",
            " */",
        );
        let parsed = parse(doc);
        assert_eq!(parsed.description, "Renders a widget.");
        assert_eq!(parsed.tags.len(), 3);
        assert_eq!(parsed.tags[0].name(), "since");
        assert_eq!(parsed.tags[1].name(), "param");
        assert_eq!(parsed.tags[2].name(), "return");
    }
}
