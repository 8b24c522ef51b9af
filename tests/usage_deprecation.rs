//! Call-site usage export and deprecation-version enrichment.

mod common;

use common::export_source;
use pretty_assertions::assert_eq;

#[test]
fn function_calls_are_recorded_in_source_order() {
    let record = export_source(concat!(
        "<?php\n",
        "function sync() {\n",
        "    $data = fetch_data();\n",
        "    store_data( $data );\n",
        "}\n",
    ));

    let uses = record.functions[0].uses.as_ref().expect("scope has calls");
    let names: Vec<&str> = uses.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["fetch_data", "store_data"]);
    assert_eq!(uses.functions[0].line, 3);
    assert_eq!(uses.functions[1].line, 4);
}

#[test]
fn method_calls_record_receiver_and_staticness() {
    let record = export_source(concat!(
        "<?php\n",
        "function render_all( $widget ) {\n",
        "    $widget->render();\n",
        "    Registry::flush();\n",
        "}\n",
    ));

    let uses = record.functions[0].uses.as_ref().expect("scope has calls");
    assert_eq!(uses.methods.len(), 2);

    assert_eq!(uses.methods[0].class, "$widget");
    assert_eq!(uses.methods[0].name, "render");
    assert!(!uses.methods[0].is_static);

    assert_eq!(uses.methods[1].class, "Registry");
    assert_eq!(uses.methods[1].name, "flush");
    assert!(uses.methods[1].is_static);
}

#[test]
fn calls_nested_in_expressions_are_found() {
    let record = export_source(concat!(
        "<?php\n",
        "function summarize() {\n",
        "    if ( is_admin() ) {\n",
        "        return wp_trim_words( get_content(), 20 );\n",
        "    }\n",
        "    return '';\n",
        "}\n",
    ));

    let uses = record.functions[0].uses.as_ref().expect("scope has calls");
    let names: Vec<&str> = uses.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["is_admin", "wp_trim_words", "get_content"]);
}

#[test]
fn file_scope_excludes_function_bodies() {
    let record = export_source(concat!(
        "<?php\n",
        "bootstrap();\n",
        "\n",
        "function helper() {\n",
        "    inner_call();\n",
        "}\n",
    ));

    let file_uses = record.uses.as_ref().expect("file scope has calls");
    let names: Vec<&str> = file_uses.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["bootstrap"]);

    let function_uses = record.functions[0].uses.as_ref().expect("function has calls");
    assert_eq!(function_uses.functions[0].name, "inner_call");
}

// ── Deprecation enrichment ──────────────────────────────────────

#[test]
fn deprecation_version_attaches_to_element_zero() {
    // The deprecation call is NOT the first recorded call; the version
    // still lands on element 0 of the functions list.
    let record = export_source(concat!(
        "<?php\n",
        "function old_thing() {\n",
        "    do_something();\n",
        "    _deprecated_function( __FUNCTION__, '3.5.0', 'new_thing' );\n",
        "}\n",
    ));

    let uses = record.functions[0].uses.as_ref().expect("scope has calls");
    assert_eq!(uses.functions[0].name, "do_something");
    assert_eq!(
        uses.functions[0].deprecation_version.as_deref(),
        Some("3.5.0")
    );

    let carrying = uses
        .functions
        .iter()
        .filter(|f| f.deprecation_version.is_some())
        .count();
    assert_eq!(carrying, 1, "exactly one entry carries the version");
}

#[test]
fn each_deprecation_reporter_is_recognized() {
    for reporter in [
        "_deprecated_file",
        "_deprecated_function",
        "_deprecated_argument",
        "_deprecated_hook",
    ] {
        let source = format!(
            "<?php\nfunction old_thing() {{\n    {reporter}( 'old_thing', '2.8.0' );\n}}\n"
        );
        let dir = common::create_tree(&[("input.php", &source)]);
        let record = phpreflect::export::Exporter::new(dir.path(), false)
            .export_file(&dir.path().join("input.php"))
            .expect("reflection succeeds");

        let uses = record.functions[0].uses.as_ref().expect("scope has calls");
        assert_eq!(
            uses.functions[0].deprecation_version.as_deref(),
            Some("2.8.0"),
            "{reporter} should carry its version"
        );
    }
}

#[test]
fn non_literal_version_argument_is_omitted() {
    let record = export_source(concat!(
        "<?php\n",
        "function old_thing() {\n",
        "    _deprecated_function( __FUNCTION__, DEMO_VERSION );\n",
        "}\n",
    ));

    let uses = record.functions[0].uses.as_ref().expect("scope has calls");
    assert_eq!(uses.functions[0].name, "_deprecated_function");
    assert_eq!(uses.functions[0].deprecation_version, None);
}

#[test]
fn methods_record_their_own_usage() {
    let record = export_source(concat!(
        "<?php\n",
        "class Loader {\n",
        "    public function boot() {\n",
        "        register_widget( 'demo' );\n",
        "        $this->warm_cache();\n",
        "    }\n",
        "}\n",
    ));

    let method = &record.classes[0].methods[0];
    let uses = method.uses.as_ref().expect("method has calls");
    assert_eq!(uses.functions[0].name, "register_widget");
    assert_eq!(uses.methods[0].class, "$this");
    assert_eq!(uses.methods[0].name, "warm_cache");
}
