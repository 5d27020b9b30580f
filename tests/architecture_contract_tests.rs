//! Layering rules of the settlement engine, checked against the source text.

mod support;

use support::source_tree::{listing, SourceTree};

/// `(layer, needles it must never mention, what the layer is)`.
const FORBIDDEN: &[(&str, &[&str], &str)] = &[
    (
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "diesel::",
            "csv::",
            "tracing::",
        ],
        "domain types",
    ),
    (
        "src/application",
        &["crate::adapter::", "crate::infrastructure::", "diesel::", "csv::"],
        "settlement services",
    ),
    (
        "src/adapter/inbound/cli",
        &["crate::infrastructure"],
        "CLI handlers",
    ),
    (
        "src/port/inbound/operator",
        &["std::path::Path", "PathBuf"],
        "operator ports",
    ),
];

#[test]
fn layers_only_reach_inward() {
    let tree = SourceTree::load();
    for (layer, needles, what) in FORBIDDEN {
        assert!(tree.under(layer).next().is_some(), "{layer} has no sources");
        let offences = tree.mentions(layer, needles);
        assert!(
            offences.is_empty(),
            "{what} reach outside their layer:\n{}",
            listing(&offences)
        );
    }
}

#[test]
fn module_files_only_declare() {
    let offences = SourceTree::load().mod_file_bodies();
    assert!(
        offences.is_empty(),
        "mod.rs files should only declare and re-export:\n{}",
        listing(&offences)
    );
}

#[test]
fn cli_reaches_engine_through_operator_bridge() {
    let tree = SourceTree::load();
    let bridge = tree.file("src/adapter/inbound/cli/operator.rs");
    assert!(bridge.text.contains("pub fn operator() -> &'static dyn OperatorPort"));

    let handlers = tree.mentions("src/adapter/inbound/cli/settle.rs", &["SettlementDriver"]);
    assert!(handlers.is_empty(), "settle handler builds the driver itself:\n{}", listing(&handlers));
}

#[test]
fn result_sources_share_one_capability() {
    let tree = SourceTree::load();
    let source = &tree.file("src/port/outbound/source.rs").text;
    for declaration in [
        "pub trait ResultSource",
        "pub trait MapResultStore: ResultSource",
        "pub trait FlatExtract: ResultSource",
    ] {
        assert!(source.contains(declaration), "missing `{declaration}`");
    }
}

#[test]
fn statistic_tokens_live_only_in_grammar_table() {
    let tree = SourceTree::load();
    let tokens = ["\"dragon\"", "\"baron\"", "\"kill\""];
    assert!(!tree.mentions("src/application/settlement/grammar.rs", &tokens).is_empty());

    let leaked = tree.mentions("src/application/settlement/parser.rs", &tokens);
    assert!(leaked.is_empty(), "parser spells statistic tokens:\n{}", listing(&leaked));
}
