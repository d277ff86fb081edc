//! Rendering a classified parameter list back into a rule header.

use super::classify::Classified;
use super::params::env_parameter_text;
use crate::config::LayoutConfig;

pub const PARAMETRIC_COMMENT: &str = "// ParametricParams variables";
pub const GHOST_COMMENT: &str = "// Initialize ghost storage state from parameters";
pub const UNCLASSIFIED_COMMENT: &str = "// Unclassified parameters";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry<'a> {
    Comment(&'static str),
    Param(&'a str),
}

fn entries(classified: &Classified) -> Vec<Entry<'_>> {
    let mut entries = Vec::new();
    for (comment, params) in [
        (PARAMETRIC_COMMENT, &classified.parametric),
        (GHOST_COMMENT, &classified.ghost),
        (UNCLASSIFIED_COMMENT, &classified.unclassified),
    ] {
        if params.is_empty() {
            continue;
        }
        entries.push(Entry::Comment(comment));
        entries.extend(params.iter().map(|p| Entry::Param(p.text.as_str())));
    }
    entries
}

/// Line ending used by `text`: `\r\n` when the file contains any, else `\n`.
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Render the full header, `#[rule]` through the body's opening `{`.
pub fn render_header(
    name: &str,
    classified: &Classified,
    layout: &LayoutConfig,
    newline: &str,
) -> String {
    let header_pad = " ".repeat(layout.header_indent);
    let param_pad = " ".repeat(layout.param_indent);
    let env = env_parameter_text();

    let mut lines = vec![Entry::Param(env.as_str())];
    lines.extend(entries(classified));
    let last_param = lines
        .iter()
        .rposition(|e| matches!(e, Entry::Param(_)))
        .unwrap_or(0);

    let mut out = format!("#[rule]{nl}{}pub fn [< $f _{} >]({nl}", header_pad, name, nl = newline);
    for (i, entry) in lines.iter().enumerate() {
        match entry {
            Entry::Comment(text) => out.push_str(&format!("{}{}{}", param_pad, text, newline)),
            Entry::Param(text) => {
                let comma = if i < last_param { "," } else { "" };
                out.push_str(&format!("{}{}{}{}", param_pad, text, comma, newline));
            }
        }
    }
    out.push_str(&format!("{}) {{", header_pad));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::params::parse_parameter;
    use pretty_assertions::assert_eq;

    fn classified(parametric: &[&str], ghost: &[&str], unclassified: &[&str]) -> Classified {
        let parse = |xs: &[&str]| xs.iter().map(|t| parse_parameter(t).unwrap()).collect();
        Classified {
            parametric: parse(parametric),
            ghost: parse(ghost),
            unclassified: parse(unclassified),
            dropped: Vec::new(),
        }
    }

    #[test]
    fn test_env_only() {
        let out = render_header("version", &Classified::default(), &LayoutConfig::default(), "\n");
        assert_eq!(
            out,
            "#[rule]\n            pub fn [< $f _version >](\n                e: Env\n            ) {"
        );
    }

    #[test]
    fn test_both_sections() {
        let layout = LayoutConfig {
            header_indent: 0,
            param_indent: 4,
        };
        let out = render_header(
            "set_admin",
            &classified(&["address: Address", "value: bool"], &["admin: Option<Address>"], &[]),
            &layout,
            "\n",
        );
        assert_eq!(
            out,
            [
                "#[rule]",
                "pub fn [< $f _set_admin >](",
                "    e: Env,",
                "    // ParametricParams variables",
                "    address: Address,",
                "    value: bool,",
                "    // Initialize ghost storage state from parameters",
                "    admin: Option<Address>",
                ") {",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_parametric_only_last_has_no_comma() {
        let layout = LayoutConfig {
            header_indent: 0,
            param_indent: 0,
        };
        let out = render_header("x", &classified(&["value: bool"], &[], &[]), &layout, "\n");
        assert!(out.contains("e: Env,\n// ParametricParams variables\nvalue: bool\n) {"));
        assert!(!out.contains(GHOST_COMMENT));
    }

    #[test]
    fn test_unclassified_section_last() {
        let layout = LayoutConfig {
            header_indent: 0,
            param_indent: 0,
        };
        let out = render_header(
            "x",
            &classified(&[], &["upgrade_deadline: u64"], &["unused: i32"]),
            &layout,
            "\n",
        );
        assert!(out.ends_with(
            "upgrade_deadline: u64,\n// Unclassified parameters\nunused: i32\n) {"
        ));
        assert!(!out.contains(PARAMETRIC_COMMENT));
    }

    #[test]
    fn test_crlf_layout() {
        let layout = LayoutConfig {
            header_indent: 0,
            param_indent: 2,
        };
        let out = render_header("x", &classified(&["value: bool"], &[], &[]), &layout, "\r\n");
        assert_eq!(
            out,
            "#[rule]\r\npub fn [< $f _x >](\r\n  e: Env,\r\n  // ParametricParams variables\r\n  value: bool\r\n) {"
        );
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    }

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(line_ending("a\r\nb\r\n"), "\r\n");
        assert_eq!(line_ending("a\nb\n"), "\n");
        assert_eq!(line_ending(""), "\n");
    }
}
