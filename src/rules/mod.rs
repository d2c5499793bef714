pub mod comment_period;
pub mod factory;
pub mod scoped_rename;
pub mod translator_comment;
pub mod unslash_input;
pub mod yoda_condition;

use crate::source::SourceFile;
use globset::GlobSet;
use std::path::{Path, PathBuf};

/// A rewrite rule applied to one line at a time.
///
/// Implementations are pure: the same input line always yields the same
/// output, and a line the rule has already rewritten never matches again.
pub trait LineRule {
    /// Unique identifier for this rule (e.g. `"comment-period"`).
    fn id(&self) -> &str;

    /// Rewrite a single line (without its terminator). `None` means the rule
    /// did not fire.
    fn apply(&self, line: &str) -> Option<String>;
}

/// A rewrite rule applied once over a file's whole content.
///
/// Content rules see LF-joined content regardless of the file's terminator
/// convention. They run after every line rule and must be idempotent at the
/// file level: applying the rule to its own output is a no-op.
pub trait ContentRule {
    fn id(&self) -> &str;

    fn apply(&self, content: &str) -> Option<String>;
}

/// Per-file rewrite outcome: what changed and which rules did it.
#[derive(Debug)]
pub struct RewriteResult {
    pub file: PathBuf,
    pub modified: bool,
    pub lines_touched: usize,
    /// Rule ids that fired, in rule-set order.
    pub fired: Vec<String>,
}

/// The ordered rule collection applied to each file.
///
/// Line rules structurally precede content rules: earlier line-level rewrites
/// must land before whole-content rules compute offsets, and keeping the two
/// phases in separate lists means adding a rule cannot invert that ordering.
pub struct RuleSet {
    line_rules: Vec<(Box<dyn LineRule>, Option<GlobSet>)>,
    content_rules: Vec<(Box<dyn ContentRule>, Option<GlobSet>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self {
            line_rules: Vec::new(),
            content_rules: Vec::new(),
        }
    }

    pub fn add_line_rule(&mut self, rule: Box<dyn LineRule>, glob: Option<GlobSet>) {
        self.line_rules.push((rule, glob));
    }

    pub fn add_content_rule(&mut self, rule: Box<dyn ContentRule>, glob: Option<GlobSet>) {
        self.content_rules.push((rule, glob));
    }

    pub fn len(&self) -> usize {
        self.line_rules.len() + self.content_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply every rule to one file, mutating it in memory. The caller
    /// decides whether to persist based on `result.modified`.
    pub fn apply(&self, file: &mut SourceFile) -> RewriteResult {
        let mut lines_touched = 0;
        let mut fired: Vec<String> = Vec::new();

        for (rule, glob) in &self.line_rules {
            if !glob_allows(glob.as_ref(), &file.path) {
                continue;
            }
            let mut rule_fired = false;
            for i in 0..file.line_count() {
                if let Some(rewritten) = rule.apply(&file.lines()[i]) {
                    file.set_line(i, rewritten);
                    lines_touched += 1;
                    rule_fired = true;
                }
            }
            if rule_fired {
                fired.push(rule.id().to_string());
            }
        }

        for (rule, glob) in &self.content_rules {
            if !glob_allows(glob.as_ref(), &file.path) {
                continue;
            }
            let before = file.content();
            if let Some(rewritten) = rule.apply(&before) {
                lines_touched += count_changed_lines(&before, &rewritten);
                file.replace_content(&rewritten);
                fired.push(rule.id().to_string());
            }
        }

        RewriteResult {
            file: file.path.clone(),
            modified: file.modified,
            lines_touched,
            fired,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

fn glob_allows(glob: Option<&GlobSet>, path: &Path) -> bool {
    let Some(gs) = glob else {
        return true;
    };
    let file_str = path.to_string_lossy();
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    gs.is_match(&*file_str) || gs.is_match(&*file_name)
}

fn count_changed_lines(before: &str, after: &str) -> usize {
    let old: Vec<&str> = before.split('\n').collect();
    let new: Vec<&str> = after.split('\n').collect();

    // same line count: in-place substitutions, compare positionally
    if old.len() == new.len() {
        return old
            .iter()
            .zip(new.iter())
            .filter(|(a, b)| a != b)
            .count();
    }

    // content rules otherwise only insert lines; align by skipping the
    // insertions so the unchanged remainder is not counted as touched
    let mut next_old = 0;
    let mut inserted = 0;
    for line in &new {
        if next_old < old.len() && *line == old[next_old] {
            next_old += 1;
        } else {
            inserted += 1;
        }
    }
    inserted + (old.len() - next_old)
}

/// Errors that can occur when constructing a rule from config.
#[derive(Debug)]
pub enum RuleBuildError {
    InvalidRegex(String, regex::Error),
    MissingField(String, &'static str),
    InvalidGlob(String, globset::Error),
    /// A rename pair whose replacement contains its own search string would
    /// re-match on every run and break file-level idempotence.
    NonIdempotentRename(String, String),
}

impl std::fmt::Display for RuleBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleBuildError::InvalidRegex(id, err) => {
                write!(f, "rule '{}': invalid regex: {}", id, err)
            }
            RuleBuildError::MissingField(id, field) => {
                write!(f, "rule '{}': missing required field '{}'", id, field)
            }
            RuleBuildError::InvalidGlob(id, err) => {
                write!(f, "rule '{}': invalid glob: {}", id, err)
            }
            RuleBuildError::NonIdempotentRename(id, old) => {
                write!(
                    f,
                    "rule '{}': replacement for '{}' contains the search string itself",
                    id, old
                )
            }
        }
    }
}

impl std::error::Error for RuleBuildError {}
