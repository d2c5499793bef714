use crate::config::RuleConfig;
use crate::rules::{LineRule, RuleBuildError};
use regex::Regex;

/// Appends terminal punctuation to inline `//` comments and docblock
/// `@param` lines that end without it.
///
/// Only the line's last non-whitespace character governs the match: lines
/// already ending in `.`, `!` or `?` never match again, which makes the rule
/// naturally idempotent. Bodies with no alphanumeric content (separator bars,
/// stray comment tokens) and bodies ending in a URL are left alone.
#[derive(Debug)]
pub struct CommentPeriodRule {
    id: String,
    inline: Regex,
    docblock_param: Regex,
}

impl CommentPeriodRule {
    pub fn new(config: &RuleConfig) -> Result<Self, RuleBuildError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| RuleBuildError::InvalidRegex(config.id.clone(), e))
        };
        Ok(Self {
            id: config.id.clone(),
            // `//` comment with a non-empty body whose last character is not
            // terminal punctuation or whitespace; `[^/]` keeps `///` out
            inline: compile(r"^\s*//([^/].*[^.!?\s])$")?,
            docblock_param: compile(r"^\s*\*\s*@param\s+(.*[^.!?\s])$")?,
        })
    }

    fn body_is_fixable(body: &str) -> bool {
        if !body.chars().any(|c| c.is_alphanumeric()) {
            return false;
        }
        // a trailing URL ends mid-token as far as punctuation is concerned
        match body.split_whitespace().last() {
            Some(token) => !token.contains("://"),
            None => false,
        }
    }
}

impl LineRule for CommentPeriodRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, line: &str) -> Option<String> {
        let body = self
            .inline
            .captures(line)
            .or_else(|| self.docblock_param.captures(line))
            .and_then(|caps| caps.get(1))?;

        if !Self::body_is_fixable(body.as_str()) {
            return None;
        }

        Some(format!("{}.", line.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> CommentPeriodRule {
        CommentPeriodRule::new(&RuleConfig {
            id: "comment-period".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn appends_period_to_inline_comment() {
        assert_eq!(rule().apply("// done"), Some("// done.".to_string()));
        assert_eq!(
            rule().apply("\t// Load the settings"),
            Some("\t// Load the settings.".to_string())
        );
    }

    #[test]
    fn already_punctuated_is_untouched() {
        assert_eq!(rule().apply("// already done."), None);
        assert_eq!(rule().apply("// really?"), None);
        assert_eq!(rule().apply("// watch out!"), None);
    }

    #[test]
    fn idempotent() {
        let r = rule();
        let fixed = r.apply("// done").unwrap();
        assert_eq!(r.apply(&fixed), None);
    }

    #[test]
    fn url_comment_is_untouched() {
        assert_eq!(rule().apply("// see http://x.com"), None);
        assert_eq!(rule().apply("// docs: https://developer.wordpress.org/apis"), None);
    }

    #[test]
    fn empty_or_punctuation_only_body_is_untouched() {
        assert_eq!(rule().apply("//"), None);
        assert_eq!(rule().apply("// "), None);
        assert_eq!(rule().apply("// ----------"), None);
        assert_eq!(rule().apply("//*"), None);
    }

    #[test]
    fn doc_comment_marker_is_untouched() {
        assert_eq!(rule().apply("/// not an inline comment"), None);
    }

    #[test]
    fn trailing_whitespace_does_not_match() {
        // the last non-whitespace rule is anchored on the raw line
        assert_eq!(rule().apply("// done   "), None);
    }

    #[test]
    fn docblock_param_gets_period() {
        assert_eq!(
            rule().apply("\t * @param string $slug The agent slug"),
            Some("\t * @param string $slug The agent slug.".to_string())
        );
        assert_eq!(rule().apply("\t * @param string $slug The agent slug."), None);
    }

    #[test]
    fn docblock_non_param_lines_untouched() {
        assert_eq!(rule().apply(" * Plain description line"), None);
        assert_eq!(rule().apply(" * @return array The settings"), None);
    }

    #[test]
    fn code_lines_untouched() {
        assert_eq!(rule().apply("$x = 1; // trailing code comment"), None);
        assert_eq!(rule().apply("echo 'hi';"), None);
    }
}
