/// Parsed rule configuration from `wpcs-fix.toml` (or a preset), consumed by
/// the rule factory. One flat struct shared by every rule type; each rule
/// reads the fields it cares about and validates them at build time.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    pub id: String,
    /// Optional glob restricting which files the rule touches. Required for
    /// file-scoped rules (scoped-rename).
    pub glob: Option<String>,
    /// Sanitizer function suffixes for the unslash-input rule
    /// (`text_field`, `email`, ...).
    pub sanitizers: Vec<String>,
    /// Exact old → new substring pairs for the scoped-rename rule.
    pub renames: Vec<(String, String)>,
    /// Literal-snippet → comment-body pairs for the translator-comment rule.
    pub descriptions: Vec<(String, String)>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            glob: None,
            sanitizers: Vec::new(),
            renames: Vec::new(),
            descriptions: Vec::new(),
        }
    }
}
