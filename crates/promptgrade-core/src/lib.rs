//! promptgrade-core — Grading model, pass-rate scoring, and service traits.
//!
//! This crate defines the evaluation set and its grading operations, the
//! built-in reference prompts, and the clipboard/notification seams that the
//! rest of promptgrade builds on.

pub mod copy;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod seed;
pub mod traits;

pub use copy::{CopyOutcome, PromptCopier};
pub use error::{ClipboardError, SetError};
pub use model::{EvaluationSet, Grade, GradeCounts, Item, PassRate};
