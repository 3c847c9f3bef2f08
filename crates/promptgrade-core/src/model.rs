//! Core data model types for promptgrade.
//!
//! An [`EvaluationSet`] is an ordered, fixed-size list of [`Item`]s, each
//! carrying a mutable [`Grade`]. Grading and pass-rate queries live here so
//! they can be exercised without any presentation layer.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::SetError;

/// Outcome of manually evaluating a prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Not graded yet.
    #[default]
    #[serde(rename = "NONE", alias = "UNGRADED")]
    Ungraded,
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl Grade {
    /// All grades, in the order a grading menu offers them.
    pub const ALL: [Grade; 3] = [Grade::Ungraded, Grade::Pass, Grade::Fail];
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Ungraded => write!(f, "NONE"),
            Grade::Pass => write!(f, "PASS"),
            Grade::Fail => write!(f, "FAIL"),
        }
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "ungraded" => Ok(Grade::Ungraded),
            "pass" => Ok(Grade::Pass),
            "fail" => Ok(Grade::Fail),
            other => Err(format!("unknown grade: {other} (expected NONE, PASS or FAIL)")),
        }
    }
}

/// A single prompt under evaluation.
///
/// `id` and `prompt` are fixed at construction; only the grade changes, and
/// only through [`EvaluationSet::set_grade`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: u32,
    prompt: String,
    grade: Grade,
}

impl Item {
    /// Create an ungraded item.
    pub fn new(id: u32, prompt: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            grade: Grade::Ungraded,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }
}

/// Tally of grades across a set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCounts {
    pub pass: usize,
    pub fail: usize,
    pub ungraded: usize,
    pub total: usize,
}

/// Share of PASS items, as a percentage with one fractional digit.
///
/// Stored as integer tenths of a percent so formatting is exact:
/// `PassRate::from_counts(2, 13)` displays as `15.4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassRate(u32);

impl PassRate {
    /// Compute the rate for `passed` out of `total`, rounding half up.
    ///
    /// An empty total yields `0.0`.
    pub fn from_counts(passed: usize, total: usize) -> Self {
        if total == 0 {
            return PassRate(0);
        }
        let passed = passed.min(total) as u64;
        let total = total as u64;
        let tenths = (passed * 2000 + total) / (2 * total);
        PassRate(tenths as u32)
    }

    /// The rate in tenths of a percent (`154` for `15.4%`).
    pub fn tenths(&self) -> u32 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for PassRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for PassRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// An ordered collection of items graded during one session.
///
/// The item list is fixed once constructed: there is no way to add or remove
/// items, and ids are guaranteed unique and non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSet {
    id: String,
    name: String,
    description: String,
    items: Vec<Item>,
}

impl EvaluationSet {
    /// Build a set from `(id, prompt)` pairs, all ungraded.
    pub fn new<I, P>(
        id: impl Into<String>,
        name: impl Into<String>,
        entries: I,
    ) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = (u32, P)>,
        P: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for (item_id, prompt) in entries {
            if item_id == 0 {
                return Err(SetError::ZeroId);
            }
            if !seen.insert(item_id) {
                return Err(SetError::DuplicateId(item_id));
            }
            items.push(Item::new(item_id, prompt));
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            items,
        })
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Current grade of the item with `id`, if it exists.
    pub fn grade_of(&self, id: u32) -> Option<Grade> {
        self.get(id).map(Item::grade)
    }

    /// Set the grade of the item with `id`.
    ///
    /// Unknown ids are ignored: the set is left untouched and `false` is
    /// returned. Grading views may hold stale ids, so this is not an error.
    /// Setting the same grade twice is the same as setting it once.
    pub fn set_grade(&mut self, id: u32, grade: Grade) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                if item.grade != grade {
                    tracing::debug!(id, from = %item.grade, to = %grade, "grade updated");
                }
                item.grade = grade;
                true
            }
            None => {
                tracing::debug!(id, "ignoring grade update for unknown item");
                false
            }
        }
    }

    /// Count items by grade.
    pub fn counts(&self) -> GradeCounts {
        let mut counts = GradeCounts {
            total: self.items.len(),
            ..GradeCounts::default()
        };
        for item in &self.items {
            match item.grade {
                Grade::Pass => counts.pass += 1,
                Grade::Fail => counts.fail += 1,
                Grade::Ungraded => counts.ungraded += 1,
            }
        }
        counts
    }

    /// Percentage of items currently graded PASS.
    pub fn pass_rate(&self) -> PassRate {
        let passed = self
            .items
            .iter()
            .filter(|item| item.grade == Grade::Pass)
            .count();
        PassRate::from_counts(passed, self.items.len())
    }
}

impl<'a> IntoIterator for &'a EvaluationSet {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
