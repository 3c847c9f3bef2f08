//! The `promptgrade list` command.

use std::path::PathBuf;

use anyhow::Result;

use promptgrade_core::report::GradeReport;
use promptgrade_platform::config::load_config_from;

use super::{load_eval_set, pass_rate_line, render_table};

pub fn execute(
    eval_set_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let set = load_eval_set(eval_set_path, &config)?;

    match format.as_str() {
        "json" => {
            println!("{}", GradeReport::from_set(&set).to_json()?);
        }
        "markdown" | "md" => {
            println!("{}", GradeReport::from_set(&set).to_markdown());
        }
        "table" => {
            println!("{} ({} prompts)", set.name(), set.len());
            println!("{}", pass_rate_line(&set));
            println!("{}", render_table(&set));
        }
        other => anyhow::bail!("unknown format '{other}' (expected table, json, or markdown)"),
    }

    Ok(())
}
