use crate::config::RuleConfig;
use crate::rules::{ContentRule, RuleBuildError};

/// Whole-file rename of local variables that collide with ambient WordPress
/// names, driven by an explicit table of exact substring replacements.
///
/// The table is enumerated rather than pattern-matched on purpose: each entry
/// pins the surrounding context (`$action  = isset`, `switch ( $action )`,
/// ...), so declarations, later references, switch dispatch and interpolated
/// output all rename consistently while unrelated identifiers that merely
/// share a fragment are never touched. The rule is file-scoped: it requires a
/// glob and only runs on the files it was written for.
///
/// Single-shot per file. Build-time validation rejects a pair whose
/// replacement still contains its search string, so a fixed file never
/// matches again.
#[derive(Debug)]
pub struct ScopedRenameRule {
    id: String,
    renames: Vec<(String, String)>,
}

impl ScopedRenameRule {
    pub fn new(config: &RuleConfig) -> Result<Self, RuleBuildError> {
        if config.glob.is_none() {
            return Err(RuleBuildError::MissingField(config.id.clone(), "glob"));
        }
        if config.renames.is_empty() {
            return Err(RuleBuildError::MissingField(config.id.clone(), "renames"));
        }
        for (old, new) in &config.renames {
            if old.is_empty() {
                return Err(RuleBuildError::MissingField(config.id.clone(), "renames"));
            }
            if new.contains(old.as_str()) {
                return Err(RuleBuildError::NonIdempotentRename(
                    config.id.clone(),
                    old.clone(),
                ));
            }
        }
        Ok(Self {
            id: config.id.clone(),
            renames: config.renames.clone(),
        })
    }
}

impl ContentRule for ScopedRenameRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, content: &str) -> Option<String> {
        let mut current = content.to_string();
        let mut changed = false;
        for (old, new) in &self.renames {
            if current.contains(old.as_str()) {
                current = current.replace(old.as_str(), new);
                changed = true;
            }
        }
        changed.then_some(current)
    }
}
