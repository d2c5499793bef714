use crate::cli::toml_config::TomlRule;
use std::fmt;

#[derive(Debug)]
pub enum PresetError {
    UnknownPreset {
        name: String,
        available: Vec<&'static str>,
    },
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::UnknownPreset { name, available } => {
                write!(
                    f,
                    "unknown preset '{}'. available presets: {}",
                    name,
                    available.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for PresetError {}

#[derive(Debug, Clone, Copy)]
enum Preset {
    Wordpress,
    WordpressComments,
    WordpressSecurity,
}

/// Returns the list of all available preset names.
pub fn available_presets() -> &'static [&'static str] {
    &["wordpress", "wordpress-comments", "wordpress-security"]
}

fn resolve_preset(name: &str) -> Option<Preset> {
    match name {
        "wordpress" => Some(Preset::Wordpress),
        "wordpress-comments" => Some(Preset::WordpressComments),
        "wordpress-security" => Some(Preset::WordpressSecurity),
        _ => None,
    }
}

fn default_sanitizers() -> Vec<String> {
    ["text_field", "textarea_field", "email", "key", "url"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn comment_period_rule() -> TomlRule {
    TomlRule {
        id: "comment-period".into(),
        rule_type: "comment-period".into(),
        ..Default::default()
    }
}

fn yoda_condition_rule() -> TomlRule {
    TomlRule {
        id: "yoda-condition".into(),
        rule_type: "yoda-condition".into(),
        ..Default::default()
    }
}

fn unslash_input_rule() -> TomlRule {
    TomlRule {
        id: "unslash-input".into(),
        rule_type: "unslash-input".into(),
        sanitizers: default_sanitizers(),
        ..Default::default()
    }
}

/// The agents.php collision table: `$action`, `$error` and `$search` locals
/// shadow ambient WordPress names there. Each entry pins enough surrounding
/// context that no unrelated identifier can match.
fn rename_agents_rule() -> TomlRule {
    TomlRule {
        id: "rename-agents-locals".into(),
        rule_type: "scoped-rename".into(),
        glob: Some("**/agents.php".into()),
        renames: vec![
            ("$action  = isset".into(), "$agent_action = isset".into()),
            ("$error   = ''".into(), "$agent_error = ''".into()),
            ("\n$action ".into(), "\n$agent_action ".into()),
            (
                "if ( $action && $slug".into(),
                "if ( $agent_action && $slug".into(),
            ),
            ("switch ( $action )".into(), "switch ( $agent_action )".into()),
            ("\n\t\t$error = ".into(), "\n\t\t$agent_error = ".into()),
            ("\n\t$error = ".into(), "\n\t$agent_error = ".into()),
            ("$search   = isset".into(), "$search_term = isset".into()),
            (
                "'search'   => $search,".into(),
                "'search'   => $search_term,".into(),
            ),
            (
                "wp_verify_nonce( $_GET['_wpnonce'] ?? '', 'agentic_agent_action' )".into(),
                "isset( $_GET['_wpnonce'] ) && wp_verify_nonce( sanitize_text_field( wp_unslash( $_GET['_wpnonce'] ) ), 'agentic_agent_action' )"
                    .into(),
            ),
        ],
        ..Default::default()
    }
}

fn translator_comment_rule() -> TomlRule {
    TomlRule {
        id: "translator-comment".into(),
        rule_type: "translator-comment".into(),
        descriptions: vec![
            (
                "%1$s activated.".into(),
                "1: Agent name, 2: Chat URL".into(),
            ),
            ("Delete %s".into(), "%s: Agent name".into()),
        ],
        ..Default::default()
    }
}

fn preset_rules(preset: Preset) -> Vec<TomlRule> {
    match preset {
        Preset::Wordpress => vec![
            comment_period_rule(),
            yoda_condition_rule(),
            unslash_input_rule(),
            rename_agents_rule(),
            translator_comment_rule(),
        ],
        Preset::WordpressComments => vec![comment_period_rule(), translator_comment_rule()],
        Preset::WordpressSecurity => vec![unslash_input_rule()],
    }
}

/// Resolve preset names and merge with user-defined rules.
///
/// Preset rules come first, in declared preset order. A user rule whose id
/// matches a preset rule replaces it in place; other user rules append after.
pub fn resolve_rules(
    extends: &[String],
    user_rules: &[TomlRule],
) -> Result<Vec<TomlRule>, PresetError> {
    let mut resolved: Vec<TomlRule> = Vec::new();

    for name in extends {
        let preset = resolve_preset(name).ok_or_else(|| PresetError::UnknownPreset {
            name: name.clone(),
            available: available_presets().to_vec(),
        })?;
        for rule in preset_rules(preset) {
            if !resolved.iter().any(|r| r.id == rule.id) {
                resolved.push(rule);
            }
        }
    }

    for user_rule in user_rules {
        match resolved.iter_mut().find(|r| r.id == user_rule.id) {
            Some(slot) => *slot = user_rule.clone(),
            None => resolved.push(user_rule.clone()),
        }
    }

    Ok(resolved)
}
