use crate::cli::toml_config::TomlConfig;
use crate::presets::{self, PresetError};
use crate::rules::factory::{self, FactoryError};
use crate::rules::{RewriteResult, RuleSet};
use crate::source::SourceFile;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub enum FixError {
    ConfigRead(io::Error),
    ConfigParse(toml::de::Error),
    GlobParse(globset::Error),
    RuleFactory(FactoryError),
    Preset(PresetError),
    FileRead(PathBuf, io::Error),
    FileWrite(PathBuf, io::Error),
}

impl fmt::Display for FixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixError::ConfigRead(e) => write!(f, "failed to read config: {}", e),
            FixError::ConfigParse(e) => write!(f, "failed to parse config: {}", e),
            FixError::GlobParse(e) => write!(f, "invalid glob pattern: {}", e),
            FixError::RuleFactory(e) => write!(f, "failed to build rule: {}", e),
            FixError::Preset(e) => write!(f, "preset error: {}", e),
            FixError::FileRead(path, e) => {
                write!(f, "failed to read '{}': {}", path.display(), e)
            }
            FixError::FileWrite(path, e) => {
                write!(f, "failed to write '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for FixError {}

/// Aggregate outcome of one batch run.
#[derive(Debug)]
pub struct FixReport {
    pub results: Vec<RewriteResult>,
    pub files_scanned: usize,
    pub files_fixed: usize,
    pub rules_loaded: usize,
    pub dry_run: bool,
}

/// Rewrite one file in memory and persist it when anything changed.
///
/// The write is whole-file and happens at most once; an untouched file is
/// never rewritten, so timestamps and byte content stay put. IO failures
/// propagate instead of being skipped.
pub fn fix_file(path: &Path, rules: &RuleSet, dry_run: bool) -> Result<RewriteResult, FixError> {
    let mut file =
        SourceFile::read(path).map_err(|e| FixError::FileRead(path.to_path_buf(), e))?;
    let result = rules.apply(&mut file);

    if result.modified && !dry_run {
        file.write()
            .map_err(|e| FixError::FileWrite(path.to_path_buf(), e))?;
    }

    Ok(result)
}

/// Run a full fix pass: parse config, build rules, walk files, rewrite each
/// sequentially.
pub fn run_fix(
    config_path: &Path,
    target_paths: &[PathBuf],
    dry_run: bool,
) -> Result<FixReport, FixError> {
    let config_text = fs::read_to_string(config_path).map_err(FixError::ConfigRead)?;
    let toml_config: TomlConfig = toml::from_str(&config_text).map_err(FixError::ConfigParse)?;

    let rules = build_rules(&toml_config)?;
    let exclude_set = build_glob_set(&toml_config.fixer.exclude)?;

    // CLI-provided targets override the config's include dirs (the user
    // explicitly chose what to fix). Exclude patterns still apply.
    let targets: Vec<PathBuf> = if target_paths.is_empty() {
        toml_config.fixer.include.iter().map(PathBuf::from).collect()
    } else {
        target_paths.to_vec()
    };

    let files = collect_files(&targets, &exclude_set, &toml_config.fixer.extension);

    let mut results: Vec<RewriteResult> = Vec::new();
    let mut files_fixed = 0;

    for file_path in &files {
        let result = fix_file(file_path, &rules, dry_run)?;
        if result.modified {
            files_fixed += 1;
        }
        results.push(result);
    }

    Ok(FixReport {
        files_scanned: files.len(),
        files_fixed,
        rules_loaded: rules.len(),
        results,
        dry_run,
    })
}

/// Resolve presets, merge user rules, and build the ordered rule set.
pub fn build_rules(toml_config: &TomlConfig) -> Result<RuleSet, FixError> {
    let resolved =
        presets::resolve_rules(&toml_config.fixer.extends, &toml_config.rule)
            .map_err(FixError::Preset)?;

    let mut rules = RuleSet::new();
    for toml_rule in &resolved {
        factory::add_rule(&mut rules, &toml_rule.rule_type, &toml_rule.to_rule_config())
            .map_err(FixError::RuleFactory)?;
    }
    Ok(rules)
}

fn collect_files(target_paths: &[PathBuf], exclude_set: &GlobSet, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for target in target_paths {
        if target.is_file() {
            files.push(target.clone());
        } else {
            for entry in WalkDir::new(target)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.into_path();
                if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                    continue;
                }
                let rel = path.strip_prefix(target).unwrap_or(&path);
                if exclude_set.is_match(rel.to_string_lossy().as_ref()) {
                    continue;
                }
                files.push(path);
            }
        }
    }
    files
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, FixError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(FixError::GlobParse)?);
    }
    builder.build().map_err(FixError::GlobParse)
}
