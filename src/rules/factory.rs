use crate::config::RuleConfig;
use crate::rules::comment_period::CommentPeriodRule;
use crate::rules::scoped_rename::ScopedRenameRule;
use crate::rules::translator_comment::TranslatorCommentRule;
use crate::rules::unslash_input::UnslashInputRule;
use crate::rules::yoda_condition::YodaConditionRule;
use crate::rules::{RuleBuildError, RuleSet};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fmt;

#[derive(Debug)]
pub enum FactoryError {
    UnknownRuleType(String),
    BuildError(RuleBuildError),
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::UnknownRuleType(t) => write!(f, "unknown rule type: '{}'", t),
            FactoryError::BuildError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FactoryError {}

impl From<RuleBuildError> for FactoryError {
    fn from(e: RuleBuildError) -> Self {
        FactoryError::BuildError(e)
    }
}

/// Add one rule to the set by type string. Line rules and content rules land
/// in their respective phases of the set; relative order within a phase
/// follows call order.
pub fn add_rule(
    rules: &mut RuleSet,
    rule_type: &str,
    config: &RuleConfig,
) -> Result<(), FactoryError> {
    let glob = compile_glob(config)?;
    match rule_type {
        "comment-period" => rules.add_line_rule(Box::new(CommentPeriodRule::new(config)?), glob),
        "yoda-condition" => rules.add_line_rule(Box::new(YodaConditionRule::new(config)?), glob),
        "unslash-input" => rules.add_line_rule(Box::new(UnslashInputRule::new(config)?), glob),
        "scoped-rename" => {
            rules.add_content_rule(Box::new(ScopedRenameRule::new(config)?), glob)
        }
        "translator-comment" => {
            rules.add_content_rule(Box::new(TranslatorCommentRule::new(config)?), glob)
        }
        _ => return Err(FactoryError::UnknownRuleType(rule_type.to_string())),
    }
    Ok(())
}

fn compile_glob(config: &RuleConfig) -> Result<Option<GlobSet>, FactoryError> {
    let Some(ref pattern) = config.glob else {
        return Ok(None);
    };
    let gs = GlobSetBuilder::new()
        .add(
            Glob::new(pattern)
                .map_err(|e| RuleBuildError::InvalidGlob(config.id.clone(), e))?,
        )
        .build()
        .map_err(|e| RuleBuildError::InvalidGlob(config.id.clone(), e))?;
    Ok(Some(gs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_known_type() {
        let mut rules = RuleSet::new();
        assert!(rules.is_empty());
        add_rule(
            &mut rules,
            "comment-period",
            &RuleConfig {
                id: "comment-period".into(),
                ..Default::default()
            },
        )
        .unwrap();
        add_rule(
            &mut rules,
            "unslash-input",
            &RuleConfig {
                id: "unslash-input".into(),
                sanitizers: vec!["text_field".into()],
                ..Default::default()
            },
        )
        .unwrap();
        add_rule(
            &mut rules,
            "scoped-rename",
            &RuleConfig {
                id: "rename".into(),
                glob: Some("**/agents.php".into()),
                renames: vec![("$action  = isset".into(), "$agent_action = isset".into())],
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn unknown_type_errors() {
        let mut rules = RuleSet::new();
        let err = add_rule(&mut rules, "nope", &RuleConfig::default()).unwrap_err();
        assert!(matches!(err, FactoryError::UnknownRuleType(_)));
    }

    #[test]
    fn invalid_glob_errors() {
        let mut rules = RuleSet::new();
        let err = add_rule(
            &mut rules,
            "comment-period",
            &RuleConfig {
                id: "comment-period".into(),
                glob: Some("a{".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::BuildError(RuleBuildError::InvalidGlob(_, _))
        ));
    }

    #[test]
    fn build_error_propagates() {
        let mut rules = RuleSet::new();
        let err = add_rule(
            &mut rules,
            "unslash-input",
            &RuleConfig {
                id: "unslash-input".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, FactoryError::BuildError(_)));
    }
}
