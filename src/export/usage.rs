//! Usage export.
//!
//! Converts a scope's recorded call-sites into a [`UsageRecord`].  The
//! reserved hook call-kind is dropped here — hook dispatches are
//! exported separately as hook records.  Calls to the deprecation
//! reporting functions carry a version literal in their second argument,
//! which is surfaced on the exported functions list.

use tracing::warn;

use crate::types::{CallKind, CallSite, ScopeUsage};

use super::records::{FunctionCallRecord, MethodCallRecord, UsageRecord};

/// The four deprecation-reporting functions whose second argument is the
/// version a call was deprecated in.
const DEPRECATION_FUNCTIONS: [&str; 4] = [
    "_deprecated_file",
    "_deprecated_function",
    "_deprecated_argument",
    "_deprecated_hook",
];

/// Export a scope's call-sites, or `None` when the scope recorded no
/// function or method calls.
pub fn export_usage(usage: &ScopeUsage) -> Option<UsageRecord> {
    if !usage.has_calls() {
        return None;
    }

    let mut record = UsageRecord::default();

    for kind in CallKind::ALL {
        match kind {
            // Reserved: hook dispatches never appear in a usage record.
            CallKind::Hooks => {}
            CallKind::Functions => {
                for call in &usage.functions {
                    record.functions.push(FunctionCallRecord {
                        name: call.name.clone(),
                        line: call.line,
                        end_line: call.end_line,
                        deprecation_version: None,
                    });

                    if DEPRECATION_FUNCTIONS.contains(&call.name.as_str()) {
                        // The version lands on element 0 of the functions
                        // list, not on the matching call-site.  The
                        // original exporter behaves this way and consumers
                        // rely on it; see DESIGN.md.
                        match deprecation_version(call) {
                            Some(version) => {
                                if let Some(first) = record.functions.first_mut() {
                                    first.deprecation_version = Some(version);
                                }
                            }
                            None => {
                                warn!(
                                    call = %call.name,
                                    line = call.line,
                                    "deprecation call without a literal version argument; \
                                     omitting deprecation_version"
                                );
                            }
                        }
                    }
                }
            }
            CallKind::Methods => {
                for call in &usage.methods {
                    record.methods.push(MethodCallRecord {
                        name: call.name.clone(),
                        class: call.class.clone().unwrap_or_default(),
                        is_static: call.is_static,
                        line: call.line,
                        end_line: call.end_line,
                    });
                }
            }
        }
    }

    Some(record)
}

/// The literal value of a deprecation call's second positional argument.
fn deprecation_version(call: &CallSite) -> Option<String> {
    call.args.get(1).and_then(|arg| arg.literal.clone())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
