use crate::config::RuleConfig;
use crate::rules::{LineRule, RuleBuildError};
use regex::Regex;

/// Wraps raw superglobal reads in `wp_unslash()` before sanitization:
/// `sanitize_text_field( $_POST['name'] )` becomes
/// `sanitize_text_field( wp_unslash( $_POST['name'] ) )`.
///
/// One parameterized pattern covers the configured sanitizer names. The
/// rewrite is not naturally idempotent (its own output still contains a
/// sanitizer call around a superglobal), so any line that already contains
/// `wp_unslash` is skipped outright.
#[derive(Debug)]
pub struct UnslashInputRule {
    id: String,
    call: Regex,
}

impl UnslashInputRule {
    pub fn new(config: &RuleConfig) -> Result<Self, RuleBuildError> {
        if config.sanitizers.is_empty() {
            return Err(RuleBuildError::MissingField(config.id.clone(), "sanitizers"));
        }

        let names = config.sanitizers.join("|");
        let pattern =
            format!(r"(sanitize_(?:{names}))\(\s*(\$_(?:POST|GET)\[[^\]]+\])\s*\)");
        let call = Regex::new(&pattern)
            .map_err(|e| RuleBuildError::InvalidRegex(config.id.clone(), e))?;

        Ok(Self {
            id: config.id.clone(),
            call,
        })
    }
}

impl LineRule for UnslashInputRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, line: &str) -> Option<String> {
        // idempotence guard: never double-wrap
        if line.contains("wp_unslash") {
            return None;
        }
        if !self.call.is_match(line) {
            return None;
        }
        Some(
            self.call
                .replace_all(line, "${1}( wp_unslash( ${2} ) )")
                .into_owned(),
        )
    }
}
