use crate::config::RuleConfig;
use serde::Deserialize;

/// Top-level TOML config file structure.
#[derive(Debug, Deserialize)]
pub struct TomlConfig {
    pub fixer: FixerSection,
    #[serde(default)]
    pub rule: Vec<TomlRule>,
}

/// The `[fixer]` section.
#[derive(Debug, Deserialize)]
pub struct FixerSection {
    #[allow(dead_code)]
    pub name: Option<String>,
    /// Root-relative directories fixed when no paths are given on the CLI.
    #[serde(default)]
    pub include: Vec<String>,
    /// Single file extension the fixer operates on.
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Preset names whose rules run before any `[[rule]]` entries.
    #[serde(default)]
    pub extends: Vec<String>,
}

fn default_extension() -> String {
    "php".into()
}

/// A single `[[rule]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlRule {
    pub id: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub glob: Option<String>,
    #[serde(default)]
    pub sanitizers: Vec<String>,
    #[serde(default)]
    pub renames: Vec<(String, String)>,
    #[serde(default)]
    pub descriptions: Vec<(String, String)>,
}

impl Default for TomlRule {
    fn default() -> Self {
        Self {
            id: String::new(),
            rule_type: String::new(),
            glob: None,
            sanitizers: Vec::new(),
            renames: Vec::new(),
            descriptions: Vec::new(),
        }
    }
}

impl TomlRule {
    /// Convert to the core `RuleConfig` type.
    pub fn to_rule_config(&self) -> RuleConfig {
        RuleConfig {
            id: self.id.clone(),
            glob: self.glob.clone(),
            sanitizers: self.sanitizers.clone(),
            renames: self.renames.clone(),
            descriptions: self.descriptions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: TomlConfig = toml::from_str(
            r#"
[fixer]
include = ["includes", "admin"]
extends = ["wordpress"]
"#,
        )
        .unwrap();
        assert_eq!(config.fixer.extension, "php");
        assert_eq!(config.fixer.include, vec!["includes", "admin"]);
        assert_eq!(config.fixer.extends, vec!["wordpress"]);
        assert!(config.rule.is_empty());
    }

    #[test]
    fn parses_rule_entries() {
        let config: TomlConfig = toml::from_str(
            r#"
[fixer]
include = ["src"]
extension = "php"

[[rule]]
id = "unslash-input"
type = "unslash-input"
sanitizers = ["text_field", "email"]

[[rule]]
id = "rename-agents-locals"
type = "scoped-rename"
glob = "**/agents.php"
renames = [["$action  = isset", "$agent_action = isset"]]
"#,
        )
        .unwrap();
        assert_eq!(config.rule.len(), 2);
        let rc = config.rule[1].to_rule_config();
        assert_eq!(rc.glob.as_deref(), Some("**/agents.php"));
        assert_eq!(rc.renames[0].1, "$agent_action = isset");
    }
}
