use crate::config::RuleConfig;
use crate::rules::{LineRule, RuleBuildError};
use regex::{Captures, Regex};

/// Rewrites `$var === literal` comparisons to Yoda order inside conditional
/// tests.
///
/// Matching is deliberately narrow: the line must contain a conditional
/// keyword (so assignments are never rewritten), the left side must be a
/// variable (optionally with one string subscript), and the literal must be a
/// quoted string, an integer, or `true`/`false`/`null`. The three literal
/// forms are enumerated as separate patterns; each is applied left-to-right in
/// a single `replace_all` pass, so rewritten text is never rescanned.
/// Literal-first clauses have no variable on the left and never match.
///
/// Float literals are outside the literal set. The integer pattern captures a
/// trailing fraction and a trailing word character so `10.5` (and `10.`, and
/// digit-prefixed identifiers) can be recognized and left whole instead of
/// having their integer prefix swapped out from under them.
#[derive(Debug)]
pub struct YodaConditionRule {
    id: String,
    conditional: Regex,
    string_cmp: Regex,
    integer_cmp: Regex,
    keyword_cmp: Regex,
}

const VAR: &str = r"\$\w+(?:\[\s*'[^']*'\s*\])?";

impl YodaConditionRule {
    pub fn new(config: &RuleConfig) -> Result<Self, RuleBuildError> {
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| RuleBuildError::InvalidRegex(config.id.clone(), e))
        };
        Ok(Self {
            id: config.id.clone(),
            conditional: compile(r"\b(?:if|elseif|while)\s*\(".to_string())?,
            string_cmp: compile(format!(r#"({VAR})\s*(===|!==)\s*('[^']*'|"[^"]*")"#))?,
            integer_cmp: compile(format!(r"({VAR})\s*(===|!==)\s*(\d+(?:\.\d*)?)(\w)?"))?,
            keyword_cmp: compile(format!(r"({VAR})\s*(===|!==)\s*(true|false|null)\b"))?,
        })
    }
}

impl LineRule for YodaConditionRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, line: &str) -> Option<String> {
        if !self.conditional.is_match(line) {
            return None;
        }

        let mut current = line.to_string();
        let mut changed = false;

        for re in [&self.string_cmp, &self.keyword_cmp] {
            // a match always changes the line: the swap puts the literal first
            if re.is_match(&current) {
                current = re.replace_all(&current, "${3} ${2} ${1}").into_owned();
                changed = true;
            }
        }

        // integers need a per-match guard: a fraction or a trailing word
        // character means the digits are not an integer literal
        let next = self
            .integer_cmp
            .replace_all(&current, |caps: &Captures| {
                if caps[3].contains('.') || caps.get(4).is_some() {
                    caps[0].to_string()
                } else {
                    format!("{} {} {}", &caps[3], &caps[2], &caps[1])
                }
            })
            .into_owned();
        if next != current {
            current = next;
            changed = true;
        }

        changed.then_some(current)
    }
}
