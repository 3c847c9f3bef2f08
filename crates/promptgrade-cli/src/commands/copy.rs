//! The `promptgrade copy` command.

use std::path::PathBuf;

use anyhow::Result;

use promptgrade_platform::config::load_config_from;

use super::{build_copier, load_eval_set};

pub async fn execute(
    id: u32,
    eval_set_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let set = load_eval_set(eval_set_path, &config)?;

    let Some(item) = set.get(id) else {
        anyhow::bail!("no item with id {id} in '{}'", set.name());
    };

    let (copier, _toasts) = build_copier(&config);
    let outcome = copier.copy(item.prompt()).await;

    // The failure notification has already been shown; only the exit code
    // is left to report.
    if !outcome.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
