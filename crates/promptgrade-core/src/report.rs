//! Grade report: a point-in-time snapshot of a grading session.
//!
//! Reports are printed for the user; they are never read back as state.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{EvaluationSet, Grade, GradeCounts, PassRate};

/// A snapshot of the grades in a set.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    /// Summary of the eval set.
    pub eval_set: EvalSetSummary,
    /// Grade tally.
    pub counts: GradeCounts,
    /// Share of PASS items, one decimal.
    pub pass_rate: PassRate,
    /// Per-item grades in display order.
    pub items: Vec<ItemGrade>,
}

/// Summary of an eval set (without the prompts).
#[derive(Debug, Clone, Serialize)]
pub struct EvalSetSummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
}

/// Grade of one item at snapshot time.
#[derive(Debug, Clone, Serialize)]
pub struct ItemGrade {
    pub id: u32,
    pub grade: Grade,
}

impl GradeReport {
    /// Snapshot the current state of `set`.
    pub fn from_set(set: &EvaluationSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            eval_set: EvalSetSummary {
                id: set.id().to_string(),
                name: set.name().to_string(),
                item_count: set.len(),
            },
            counts: set.counts(),
            pass_rate: set.pass_rate(),
            items: set
                .iter()
                .map(|item| ItemGrade {
                    id: item.id(),
                    grade: item.grade(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Render as a Markdown summary.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("## {}\n\n", self.eval_set.name));
        md.push_str(&format!(
            "**Pass rate: {}%** ({} pass, {} fail, {} ungraded of {})\n\n",
            self.pass_rate,
            self.counts.pass,
            self.counts.fail,
            self.counts.ungraded,
            self.counts.total
        ));

        if !self.items.is_empty() {
            md.push_str("| # | Result |\n|---|--------|\n");
            for item in &self.items {
                md.push_str(&format!("| {} | {} |\n", item.id, item.grade));
            }
        }

        md
    }
}
