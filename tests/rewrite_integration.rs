//! End-to-end tests of the rewrite over a realistic rule file.

use pretty_assertions::assert_eq;
use rule_reorder::config::{ReorderConfig, UnclassifiedPolicy};
use rule_reorder::rewrite::{scan_headers, DropReason, ScanItem};
use rule_reorder::{Diagnostic, RuleRewriter};

const FIXTURE: &str = include_str!("fixtures/parametric.rs");

fn rewrite_fixture() -> rule_reorder::Rewrite {
    RuleRewriter::from_config(&ReorderConfig::default()).rewrite(FIXTURE)
}

/// Text between headers, in order.
fn gaps(text: &str) -> Vec<&str> {
    let mut gaps = Vec::new();
    let mut pos = 0;
    for item in scan_headers(text) {
        if let ScanItem::Header(header) = item {
            gaps.push(&text[pos..header.span.start]);
            pos = header.span.end;
        }
    }
    gaps.push(&text[pos..]);
    gaps
}

#[test]
fn test_fixture_headers_all_rewritten() {
    let rewrite = rewrite_fixture();
    assert_eq!(rewrite.report.headers_matched, 5);
    assert_eq!(rewrite.report.headers_changed, 5);
    let names: Vec<_> = rewrite.report.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "init_admin",
            "version",
            "commit_upgrade",
            "set_role_address",
            "set_emergency_mode"
        ]
    );
}

#[test]
fn test_text_outside_headers_is_unchanged() {
    let rewrite = rewrite_fixture();
    assert_eq!(gaps(&rewrite.text), gaps(FIXTURE));
    assert!(rewrite.text.starts_with("// Generate parametric rules\n\nuse soroban_sdk"));
    assert!(rewrite.text.ends_with("        }\n    };\n}\n"));
}

#[test]
fn test_commit_upgrade_header() {
    let rewrite = rewrite_fixture();
    let expected = "\
#[rule]
            pub fn [< $f _commit_upgrade >](
                e: Env,
                // ParametricParams variables
                new_wasm_hash: BytesN<32>,
                caller_admin: Address,
                // Initialize ghost storage state from parameters
                upgrade_deadline: u64,
                future_wasm: Option<BytesN<32>>
            ) {";
    assert!(rewrite.text.contains(expected), "{}", rewrite.text);
}

#[test]
fn test_ghost_order_follows_table() {
    let rewrite = rewrite_fixture();
    let expected = "\
                // ParametricParams variables
                role_name: Symbol,
                address: Address,
                // Initialize ghost storage state from parameters
                admin: Option<Address>,
                emergency_admin: Option<Address>,
                emergency_mode: bool
            ) {";
    assert!(rewrite.text.contains(expected), "{}", rewrite.text);
}

#[test]
fn test_env_moved_to_front() {
    let rewrite = rewrite_fixture();
    let expected = "\
            pub fn [< $f _set_emergency_mode >](
                e: Env,
                // ParametricParams variables
                caller_emergency_admin: Address,
                value: bool
            ) {";
    assert!(rewrite.text.contains(expected), "{}", rewrite.text);
}

#[test]
fn test_single_line_header_expanded() {
    let rewrite = rewrite_fixture();
    assert!(rewrite.text.contains(
        "            #[rule]\n            pub fn [< $f _version >](\n                e: Env\n            ) {\n"
    ));
}

#[test]
fn test_unclassified_account_dropped_and_reported() {
    let rewrite = rewrite_fixture();
    assert!(!rewrite.text.contains("account: Address"));
    assert_eq!(
        rewrite.report.diagnostics,
        vec![Diagnostic::DroppedParameter {
            rule: "init_admin".to_string(),
            line: 10,
            parameter: "account: Address".to_string(),
            reason: DropReason::Unclassified,
        }]
    );
}

#[test]
fn test_keep_policy_preserves_account() {
    let mut config = ReorderConfig::default();
    config.policy.unclassified = UnclassifiedPolicy::Keep;
    let rewrite = RuleRewriter::from_config(&config).rewrite(FIXTURE);
    assert!(rewrite.text.contains(
        "                e: Env,\n                // Unclassified parameters\n                account: Address\n            ) {"
    ));
    assert!(rewrite.report.diagnostics.is_empty());
}

#[test]
fn test_rewrite_is_idempotent() {
    let once = rewrite_fixture();
    let twice = RuleRewriter::from_config(&ReorderConfig::default()).rewrite(&once.text);
    assert_eq!(twice.text, once.text);
    assert_eq!(twice.report.headers_matched, 5);
    assert_eq!(twice.report.headers_changed, 0);
}
