use crate::config::RuleConfig;
use crate::rules::{ContentRule, RuleBuildError};
use regex::Regex;
use std::collections::BTreeMap;

/// Inserts a `/* translators: ... */` line above gettext calls whose format
/// string carries printf placeholders.
///
/// The format literal is not always on the line with the call token (a
/// `sprintf(` wrapping commonly splits them), so this rule scans whole-file
/// content: it finds the literal within a few lines below the call, walks
/// back up through continuation lines to the statement start, and inserts the
/// comment there with matching indentation. A `translators:` line already
/// sitting immediately above suppresses the insertion, which is the
/// idempotence guard.
///
/// Comment bodies come from the configured snippet → description table when a
/// snippet matches the literal; otherwise the placeholders themselves are
/// enumerated.
#[derive(Debug)]
pub struct TranslatorCommentRule {
    id: String,
    gettext_call: Regex,
    literal: Regex,
    placeholder: Regex,
    descriptions: Vec<(String, String)>,
}

/// How many lines below the call token to look for the format literal.
const LITERAL_LOOKAHEAD: usize = 3;

impl TranslatorCommentRule {
    pub fn new(config: &RuleConfig) -> Result<Self, RuleBuildError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| RuleBuildError::InvalidRegex(config.id.clone(), e))
        };
        Ok(Self {
            id: config.id.clone(),
            gettext_call: compile(
                r"\b(?:esc_html__|esc_attr__|esc_html_e|esc_attr_e|__|_e)\s*\(",
            )?,
            literal: compile(r#"'[^']*'|"[^"]*""#)?,
            placeholder: compile(r"%(?:\d+\$)?[sd]")?,
            descriptions: config.descriptions.clone(),
        })
    }

    /// First quoted literal at or below the call line, restricted to the
    /// text after the call token on the trigger line itself.
    fn find_format_literal(&self, lines: &[&str], call_line: usize) -> Option<String> {
        let call_end = self.gettext_call.find(lines[call_line])?.end();
        let end = (call_line + 1 + LITERAL_LOOKAHEAD).min(lines.len());
        for (idx, line) in lines[call_line..end].iter().enumerate() {
            let haystack = if idx == 0 { &line[call_end..] } else { *line };
            if let Some(m) = self.literal.find(haystack) {
                return Some(m.as_str().to_string());
            }
        }
        None
    }

    /// Walk up from the call line through continuation lines (`... sprintf(`)
    /// to the first line of the statement.
    fn statement_start(lines: &[&str], call_line: usize) -> usize {
        let mut start = call_line;
        while start > 0 && lines[start - 1].trim_end().ends_with('(') {
            start -= 1;
        }
        start
    }

    fn comment_body(&self, literal: &str) -> String {
        for (snippet, body) in &self.descriptions {
            if literal.contains(snippet.as_str()) {
                return body.clone();
            }
        }

        // fall back to enumerating the placeholder tokens
        let mut tokens: Vec<&str> = Vec::new();
        for m in self.placeholder.find_iter(literal) {
            if !tokens.contains(&m.as_str()) {
                tokens.push(m.as_str());
            }
        }
        tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if t.contains('$') {
                    format!("{}: {}", i + 1, t)
                } else {
                    (*t).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ContentRule for TranslatorCommentRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, content: &str) -> Option<String> {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut insertions: BTreeMap<usize, String> = BTreeMap::new();

        for (i, line) in lines.iter().enumerate() {
            if !self.gettext_call.is_match(line) {
                continue;
            }
            let Some(literal) = self.find_format_literal(&lines, i) else {
                continue;
            };
            if !self.placeholder.is_match(&literal) {
                continue;
            }

            let start = Self::statement_start(&lines, i);
            if start > 0 && lines[start - 1].contains("translators:") {
                continue;
            }
            if insertions.contains_key(&start) {
                continue;
            }

            let indent: String = lines[start]
                .chars()
                .take_while(|c| c.is_whitespace())
                .collect();
            insertions.insert(
                start,
                format!("{}/* translators: {} */", indent, self.comment_body(&literal)),
            );
        }

        if insertions.is_empty() {
            return None;
        }

        let mut out: Vec<&str> = Vec::with_capacity(lines.len() + insertions.len());
        for (i, line) in lines.iter().enumerate() {
            if let Some(comment) = insertions.get(&i) {
                out.push(comment.as_str());
            }
            out.push(line);
        }
        Some(out.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> TranslatorCommentRule {
        TranslatorCommentRule::new(&RuleConfig {
            id: "translator-comment".into(),
            descriptions: vec![
                (
                    "%1$s activated.".to_string(),
                    "1: Agent name, 2: Chat URL".to_string(),
                ),
                ("Delete %s".to_string(), "%s: Agent name".to_string()),
            ],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn inserts_above_single_line_call() {
        let content = "\t\t\techo esc_html__( 'Delete %s', 'agentic' );";
        let fixed = rule().apply(content).unwrap();
        assert_eq!(
            fixed,
            "\t\t\t/* translators: %s: Agent name */\n\t\t\techo esc_html__( 'Delete %s', 'agentic' );"
        );
    }

    #[test]
    fn inserts_above_multi_line_sprintf_statement() {
        let content = "\
\t$message     = sprintf(
\t\t__( '%1$s activated. <a href=\"%2$s\">Open chat</a>.', 'agentic' ),
\t\t$agent_name,
\t\t$chat_url
\t);";
        let fixed = rule().apply(content).unwrap();
        let lines: Vec<&str> = fixed.split('\n').collect();
        assert_eq!(lines[0], "\t/* translators: 1: Agent name, 2: Chat URL */");
        assert_eq!(lines[1], "\t$message     = sprintf(");
    }

    #[test]
    fn existing_comment_suppresses_insertion() {
        let content = "\
\t/* translators: %s: Agent name */
\techo esc_html__( 'Delete %s', 'agentic' );";
        assert_eq!(rule().apply(content), None);
    }

    #[test]
    fn idempotent_after_insertion() {
        let r = rule();
        let content = "echo esc_html__( 'Delete %s', 'agentic' );";
        let fixed = r.apply(content).unwrap();
        assert_eq!(r.apply(&fixed), None);
    }

    #[test]
    fn literal_without_placeholders_is_untouched() {
        assert_eq!(rule().apply("echo esc_html__( 'Settings saved.', 'agentic' );"), None);
        assert_eq!(rule().apply("$label = __( 'Agents', 'agentic' );"), None);
    }

    #[test]
    fn unmapped_literal_enumerates_placeholders() {
        let content = "printf( __( 'Imported %1$s of %2$d items.', 'agentic' ) );";
        let fixed = rule().apply(content).unwrap();
        assert!(fixed.starts_with("/* translators: 1: %1$s, 2: %2$d */\n"));
    }

    #[test]
    fn unnumbered_placeholder_kept_as_token() {
        let content = "echo esc_attr__( 'Remove %s now', 'agentic' );";
        let fixed = rule().apply(content).unwrap();
        assert!(fixed.starts_with("/* translators: %s */\n"));
    }

    #[test]
    fn literal_on_line_below_call_token() {
        let content = "\
\t\techo esc_html__(
\t\t\t'Delete %s',
\t\t\t'agentic'
\t\t);";
        let fixed = rule().apply(content).unwrap();
        assert!(fixed.starts_with("\t\t/* translators: %s: Agent name */\n"));
    }

    #[test]
    fn non_gettext_lines_are_untouched() {
        assert_eq!(rule().apply("$url = add_query_arg( 'page', 'agentic' );"), None);
        assert_eq!(rule().apply("sprintf( '%s items', $count );"), None);
    }
}
