//! TOML eval set parser.
//!
//! Loads prompt lists from TOML files and directories, and validates them.
//! Files only describe items; grades are never read from disk.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::EvaluationSet;

/// Intermediate TOML structure for parsing eval set files.
#[derive(Debug, Serialize, Deserialize)]
struct TomlEvalFile {
    eval_set: TomlEvalSetHeader,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlEvalSetHeader {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlItem {
    id: u32,
    prompt: String,
}

/// Parse a single TOML file into an `EvaluationSet`.
pub fn parse_eval_set(path: &Path) -> Result<EvaluationSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read eval set file: {}", path.display()))?;

    parse_eval_set_str(&content, path)
}

/// Parse a TOML string into an `EvaluationSet` (useful for testing).
pub fn parse_eval_set_str(content: &str, source_path: &Path) -> Result<EvaluationSet> {
    let parsed: TomlEvalFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let entries = parsed.items.into_iter().map(|item| (item.id, item.prompt));
    let set = EvaluationSet::new(parsed.eval_set.id, parsed.eval_set.name, entries)
        .with_context(|| format!("invalid eval set: {}", source_path.display()))?;

    Ok(set.with_description(parsed.eval_set.description))
}

/// Render a set's items as an eval set TOML document.
///
/// Grades are not included; the output parses back into an ungraded set.
pub fn to_toml_string(set: &EvaluationSet) -> Result<String> {
    let file = TomlEvalFile {
        eval_set: TomlEvalSetHeader {
            id: set.id().to_string(),
            name: set.name().to_string(),
            description: set.description().to_string(),
        },
        items: set
            .iter()
            .map(|item| TomlItem {
                id: item.id(),
                prompt: item.prompt().to_string(),
            })
            .collect(),
    };
    toml::to_string_pretty(&file).context("failed to serialize eval set")
}

/// Recursively load all `.toml` eval set files from a directory.
pub fn load_eval_directory(dir: &Path) -> Result<Vec<EvaluationSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_eval_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_eval_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// A warning from eval set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item id (if applicable).
    pub item_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate an eval set for issues that don't prevent grading.
///
/// Duplicate and zero ids are rejected while parsing, so they never reach
/// this point.
pub fn validate_eval_set(set: &EvaluationSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.is_empty() {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "eval set has no items; pass rate will always be 0.0".into(),
        });
    }

    for item in set {
        if item.prompt().trim().is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(item.id()),
                message: "prompt is empty".into(),
            });
        }
    }

    let mut ids: Vec<u32> = set.iter().map(|i| i.id()).collect();
    ids.sort_unstable();
    let contiguous = ids.iter().zip(1u32..).all(|(&id, expected)| id == expected);
    if !contiguous {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "item ids are not numbered 1..n".into(),
        });
    }

    warnings
}
