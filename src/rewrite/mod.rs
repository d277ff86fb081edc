//! The parameter reorderer.
//!
//! [`RuleRewriter::rewrite`] is pure: it takes the full text of a rule file
//! and returns the rewritten text together with a [`RewriteReport`]. Every
//! byte outside a recognised header is copied through unchanged; malformed
//! headers are reported and copied through as well.
//!
//! ```rust
//! use rule_reorder::config::ReorderConfig;
//! use rule_reorder::rewrite::RuleRewriter;
//!
//! let input = "#[rule]\npub fn [< $f _set >](e: Env, value: bool) {}";
//! let rewrite = RuleRewriter::from_config(&ReorderConfig::default()).rewrite(input);
//! assert!(rewrite.text.contains("// ParametricParams variables"));
//! assert_eq!(rewrite.report.headers_matched, 1);
//! ```

pub mod classify;
pub mod emit;
pub mod params;
pub mod scanner;

pub use classify::{classify, Classified, DropReason, DroppedParameter};
pub use params::{parse_parameter, Parameter};
pub use scanner::{scan_headers, HeaderMatch, MalformedHeader, ScanItem};

use crate::config::{ClassificationTables, LayoutConfig, ReorderConfig, UnclassifiedPolicy};
use serde::Serialize;

/// Conditions worth telling the operator about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The file contained no recognisable rule header
    NoMatches,
    /// Header opening found, but its block or parameters could not be read
    MalformedHeader {
        rule: String,
        line: usize,
        reason: String,
    },
    /// A parameter was left out of the rewritten header
    DroppedParameter {
        rule: String,
        line: usize,
        parameter: String,
        reason: DropReason,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatches => write!(f, "no `#[rule]` headers matched"),
            Self::MalformedHeader { rule, line, reason } => {
                write!(f, "line {}: rule `{}` left unchanged: {}", line, rule, reason)
            }
            Self::DroppedParameter {
                rule,
                line,
                parameter,
                reason,
            } => {
                let why = match reason {
                    DropReason::Unclassified => "matches no classification key",
                    DropReason::DuplicateGhostKey => "duplicates an earlier ghost parameter",
                    DropReason::EnvBindingMode => "replaced by plain `e: Env`",
                };
                write!(f, "line {}: rule `{}` dropped `{}` ({})", line, rule, parameter, why)
            }
        }
    }
}

/// Per-header outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub name: String,
    pub line: usize,
    pub parametric: usize,
    pub ghost: usize,
    pub unclassified: usize,
    pub dropped: usize,
    pub changed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    pub headers_matched: usize,
    pub headers_changed: usize,
    pub rules: Vec<RuleSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RewriteReport {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub report: RewriteReport,
}

impl Rewrite {
    pub fn changed_from(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Rewrites rule headers with a fixed set of tables and layout.
#[derive(Debug, Clone, Default)]
pub struct RuleRewriter {
    tables: ClassificationTables,
    layout: LayoutConfig,
    policy: UnclassifiedPolicy,
}

impl RuleRewriter {
    pub fn new(
        tables: ClassificationTables,
        layout: LayoutConfig,
        policy: UnclassifiedPolicy,
    ) -> Self {
        Self {
            tables,
            layout,
            policy,
        }
    }

    pub fn from_config(config: &ReorderConfig) -> Self {
        Self::new(config.tables(), config.layout, config.policy.unclassified)
    }

    pub fn rewrite(&self, text: &str) -> Rewrite {
        let mut out = String::with_capacity(text.len() + text.len() / 8);
        let mut report = RewriteReport::default();
        let mut copied_to = 0;
        let newline = emit::line_ending(text);

        for item in scan_headers(text) {
            match item {
                ScanItem::Header(header) => {
                    let original = &text[header.span.clone()];
                    out.push_str(&text[copied_to..header.span.start]);
                    match self.rewrite_header(&header, original, newline, &mut report) {
                        Some(replacement) => out.push_str(&replacement),
                        None => out.push_str(original),
                    }
                    copied_to = header.span.end;
                }
                ScanItem::Malformed(malformed) => {
                    out.push_str(&text[copied_to..malformed.span.end]);
                    copied_to = malformed.span.end;
                    tracing::warn!(
                        "Rule `{}` at line {} not rewritten: {}",
                        malformed.name,
                        malformed.line,
                        malformed.reason
                    );
                    report.diagnostics.push(Diagnostic::MalformedHeader {
                        rule: malformed.name,
                        line: malformed.line,
                        reason: malformed.reason,
                    });
                }
            }
        }
        out.push_str(&text[copied_to..]);

        if report.headers_matched == 0 && !report.has_diagnostics() {
            tracing::warn!("No rule headers matched");
            report.diagnostics.push(Diagnostic::NoMatches);
        }

        Rewrite { text: out, report }
    }

    /// Returns `None` when the header must be left as it is.
    fn rewrite_header(
        &self,
        header: &HeaderMatch,
        original: &str,
        newline: &str,
        report: &mut RewriteReport,
    ) -> Option<String> {
        let params = match params::parse_parameters(&header.fragments) {
            Ok(params) => params,
            Err(reason) => {
                tracing::warn!(
                    "Rule `{}` at line {} not rewritten: {}",
                    header.name,
                    header.line,
                    reason
                );
                report.diagnostics.push(Diagnostic::MalformedHeader {
                    rule: header.name.clone(),
                    line: header.line,
                    reason,
                });
                return None;
            }
        };

        report.headers_matched += 1;
        let classified = classify(params, &self.tables, self.policy);
        let replacement = emit::render_header(&header.name, &classified, &self.layout, newline);

        for dropped in &classified.dropped {
            report.diagnostics.push(Diagnostic::DroppedParameter {
                rule: header.name.clone(),
                line: header.line,
                parameter: dropped.parameter.text.clone(),
                reason: dropped.reason,
            });
        }

        let changed = original != replacement;
        if changed {
            report.headers_changed += 1;
        }
        tracing::debug!(rule = %header.name, line = header.line, changed, "Rewrote rule header");
        report.rules.push(RuleSummary {
            name: header.name.clone(),
            line: header.line,
            parametric: classified.parametric.len(),
            ghost: classified.ghost.len(),
            unclassified: classified.unclassified.len(),
            dropped: classified.dropped.len(),
            changed,
        });

        Some(replacement)
    }
}
