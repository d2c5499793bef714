use std::fs;
use std::path::Path;

/// What kind of WordPress project the current directory looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Plugin,
    Theme,
    Generic,
}

/// Detect the project type from files in `dir`: a `style.css` with a theme
/// header means a theme, a top-level PHP file with a plugin header means a
/// plugin, anything else is generic.
pub fn detect_project(dir: &Path) -> ProjectType {
    let style = dir.join("style.css");
    if let Ok(content) = fs::read_to_string(&style) {
        if content.contains("Theme Name:") {
            return ProjectType::Theme;
        }
    }

    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return ProjectType::Generic,
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("php") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            if content.contains("Plugin Name:") {
                return ProjectType::Plugin;
            }
        }
    }

    ProjectType::Generic
}

/// Generate a starter `wpcs-fix.toml` for the detected project type.
pub fn generate_config(project_type: &ProjectType) -> String {
    let include = match project_type {
        ProjectType::Plugin => r#"["includes", "admin"]"#,
        ProjectType::Theme => r#"["inc", "template-parts"]"#,
        ProjectType::Generic => r#"["."]"#,
    };

    format!(
        r#"# wpcs-fix configuration
# Run `wpcs-fix fix` to rewrite files in place, `wpcs-fix fix --dry-run` to preview.

[fixer]
include = {include}
extension = "php"
exclude = ["vendor/**", "node_modules/**"]
extends = ["wordpress"]

# Add [[rule]] entries to extend or override the preset, e.g. a file-scoped
# rename table:
#
# [[rule]]
# id = "rename-settings-locals"
# type = "scoped-rename"
# glob = "**/settings.php"
# renames = [["$tab = isset", "$settings_tab = isset"]]
"#
    )
}
