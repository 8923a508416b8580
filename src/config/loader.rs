//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ScaffoldError, ScaffoldResult};

use super::types::Config;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "HMS_SCAFFOLD_";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Yaml,
}

fn format_of(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Format::Yaml,
        _ => Format::Toml,
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// Environment overrides are applied to the result.
pub fn load_with_warnings(path: &Path) -> ScaffoldResult<(Config, Vec<ConfigWarning>)> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ScaffoldError::ConfigNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    let (config, warnings) = parse_with_warnings(&content, path)?;
    Ok((with_env_overrides(config), warnings))
}

/// Parse configuration text; `path` picks the format and labels errors
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> ScaffoldResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let config_error = |message: String| ScaffoldError::Config {
        file: path.to_path_buf(),
        message,
    };

    let config: Config = match format_of(path) {
        Format::Toml => {
            let deserializer = toml::de::Deserializer::new(content);
            serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
                .map_err(|e| config_error(e.to_string()))?
        }
        Format::Yaml => {
            let deserializer = serde_yaml_ng::Deserializer::from_str(content);
            serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
                .map_err(|e| config_error(e.to_string()))?
        }
    };

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (HMS_SCAFFOLD_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // HMS_SCAFFOLD_OUTPUT_DIR
    if let Ok(dir) = std::env::var(format!("{ENV_PREFIX}OUTPUT_DIR")) {
        if !dir.trim().is_empty() {
            config.output.dir = PathBuf::from(dir);
        }
    }

    // HMS_SCAFFOLD_STRICT
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}STRICT")) {
        config.strict = parse_bool(&val).unwrap_or(config.strict);
    }

    config
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "strict",
        "palette",
        "template",
        "path",
        "overrides",
        "source",
        "title",
        "icon",
        "color",
        "description",
        "class_stems",
        "color_word_region",
        "rules",
        "placeholder",
        "replacement",
        "region",
        "output",
        "dir",
        "pattern",
        "lockfile",
        "modules",
        "key",
        "capabilities",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            Some((_, best_dist)) if dist >= best_dist => best,
            _ => Some((candidate, dist)),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b.len()]
}
