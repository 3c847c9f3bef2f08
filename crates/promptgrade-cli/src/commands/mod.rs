//! Subcommand implementations and the helpers they share.

pub mod copy;
pub mod init;
pub mod list;
pub mod rate;
pub mod session;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use promptgrade_core::model::{EvaluationSet, Grade};
use promptgrade_core::traits::Clipboard;
use promptgrade_core::{parser, seed, PromptCopier};
use promptgrade_platform::{create_clipboard, PromptgradeConfig, ToastSurface};

/// Pick the eval set: explicit path, then the configured one, then the
/// built-in reference prompts.
pub fn load_eval_set(
    eval_set_path: Option<PathBuf>,
    config: &PromptgradeConfig,
) -> Result<EvaluationSet> {
    match eval_set_path.or_else(|| config.eval_set.clone()) {
        Some(path) => {
            let set = parser::parse_eval_set(&path)?;
            tracing::debug!(path = %path.display(), items = set.len(), "loaded eval set");
            Ok(set)
        }
        None => Ok(seed::reference_set()),
    }
}

/// Wire the configured clipboard to a toast surface.
pub fn build_copier(config: &PromptgradeConfig) -> (PromptCopier, ToastSurface) {
    let toasts = if config.echo_notifications {
        ToastSurface::echoing()
    } else {
        ToastSurface::new()
    };
    let clipboard: Arc<dyn Clipboard> = Arc::from(create_clipboard(&config.clipboard));
    let copier = PromptCopier::new(clipboard, Arc::new(toasts.clone()))
        .with_notice_duration(config.notice_duration());
    (copier, toasts)
}

/// Render the set as a table of id, prompt, and result.
pub fn render_table(set: &EvaluationSet) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Prompt", "Result"]);

    for item in set {
        let grade_cell = match item.grade() {
            Grade::Pass => Cell::new(item.grade()).fg(Color::Green),
            Grade::Fail => Cell::new(item.grade()).fg(Color::Red),
            Grade::Ungraded => Cell::new(item.grade()),
        };
        table.add_row(vec![
            Cell::new(item.id()),
            Cell::new(item.prompt()),
            grade_cell,
        ]);
    }

    table
}

/// The headline shown above and below the table.
pub fn pass_rate_line(set: &EvaluationSet) -> String {
    format!("Pass Rate: {}%", set.pass_rate())
}
