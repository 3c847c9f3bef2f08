//! The `promptgrade rate` command.
//!
//! Applies a batch of grades to a fresh set and prints the pass rate.

use std::path::PathBuf;

use anyhow::{Context, Result};

use promptgrade_core::model::Grade;
use promptgrade_platform::config::load_config_from;

use super::{load_eval_set, pass_rate_line};

/// Parse an `ID=GRADE` assignment such as `5=pass`.
pub fn parse_assignment(raw: &str) -> Result<(u32, Grade)> {
    let (id, grade) = raw
        .split_once('=')
        .with_context(|| format!("expected ID=GRADE, got '{raw}'"))?;
    let id: u32 = id
        .trim()
        .parse()
        .with_context(|| format!("invalid item id in '{raw}'"))?;
    let grade: Grade = grade.parse().map_err(|e: String| anyhow::anyhow!("{e}"))?;
    Ok((id, grade))
}

pub fn execute(
    eval_set_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    grades: Vec<String>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut set = load_eval_set(eval_set_path, &config)?;

    let assignments = grades
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>>>()?;

    for (id, grade) in assignments {
        // Unknown ids are ignored, same as in an interactive session.
        set.set_grade(id, grade);
    }

    let counts = set.counts();
    println!("{}", pass_rate_line(&set));
    println!(
        "{} pass, {} fail, {} ungraded of {}",
        counts.pass, counts.fail, counts.ungraded, counts.total
    );

    Ok(())
}
