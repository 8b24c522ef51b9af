//! Hook export.
//!
//! A pure 1:1 mapping from recorded hook dispatch sites to
//! [`HookRecord`]s, in source order.  No filtering and no deduplication:
//! the same hook name fired from several places yields several records.

use crate::types::HookReflection;

use super::Formatter;
use super::docblock::export_docblock;
use super::records::HookRecord;

/// Export an ordered list of hook dispatch sites.
pub fn export_hooks(format: Formatter, hooks: &[HookReflection]) -> Vec<HookRecord> {
    hooks
        .iter()
        .map(|hook| HookRecord {
            name: hook.name.clone(),
            line: hook.line,
            end_line: hook.end_line,
            kind: hook.kind.as_str().to_string(),
            arguments: hook.args.clone(),
            doc: export_docblock(format, hook.doc.as_deref()),
        })
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::identity;
    use super::*;
    use crate::types::HookKind;

    fn hook(name: &str, kind: HookKind, line: u32) -> HookReflection {
        HookReflection {
            name: name.to_string(),
            kind,
            line,
            end_line: line,
            args: vec!["$post_id".to_string()],
            doc: None,
        }
    }

    #[test]
    fn duplicate_hook_names_stay_separate() {
        let hooks = vec![
            hook("save_post", HookKind::Action, 10),
            hook("save_post", HookKind::Action, 42),
        ];
        let records = export_hooks(identity, &hooks);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 10);
        assert_eq!(records[1].line, 42);
    }

    #[test]
    fn hook_kind_maps_to_type_string() {
        let hooks = vec![
            hook("init", HookKind::Action, 1),
            hook("the_title", HookKind::Filter, 2),
            hook("deprecated_action", HookKind::ActionReference, 3),
            hook("deprecated_filter", HookKind::FilterReference, 4),
        ];
        let records = export_hooks(identity, &hooks);
        let kinds: Vec<&str> = records.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["action", "filter", "action_reference", "filter_reference"]
        );
    }

    #[test]
    fn hook_doc_passes_through_docblock_export() {
        let mut with_doc = hook("init", HookKind::Action, 1);
        with_doc.doc = Some("/** Fires on init. */".to_string());
        let records = export_hooks(identity, &[with_doc]);
        assert_eq!(records[0].doc.description, "Fires on init.");
    }
}
