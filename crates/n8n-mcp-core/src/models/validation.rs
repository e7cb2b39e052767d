//! Validation options and report types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation sensitivity. Only `Low` versus the rest changes behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Low,
    #[default]
    Medium,
    High,
}

impl Strictness {
    pub fn is_low(self) -> bool {
        self == Strictness::Low
    }
}

impl Display for Strictness {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Strictness::Low => write!(f, "low"),
            Strictness::Medium => write!(f, "medium"),
            Strictness::High => write!(f, "high"),
        }
    }
}

impl FromStr for Strictness {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Strictness::Low),
            "medium" => Ok(Strictness::Medium),
            "high" => Ok(Strictness::High),
            _ => Err(anyhow::anyhow!(
                "Invalid strictness: {} (expected low, medium or high)",
                s
            )),
        }
    }
}

/// Rule category. Declaration order is the order categories run and are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidatorKind {
    Naming,
    ErrorHandling,
    Security,
    Performance,
    Documentation,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 5] = [
        ValidatorKind::Naming,
        ValidatorKind::ErrorHandling,
        ValidatorKind::Security,
        ValidatorKind::Performance,
        ValidatorKind::Documentation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValidatorKind::Naming => "naming",
            ValidatorKind::ErrorHandling => "errorHandling",
            ValidatorKind::Security => "security",
            ValidatorKind::Performance => "performance",
            ValidatorKind::Documentation => "documentation",
        }
    }
}

impl Display for ValidatorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidatorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidatorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown validator: {}", s))
    }
}

/// Which categories run and how strictly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub strictness: Strictness,
    pub validators: BTreeSet<ValidatorKind>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::default(),
            validators: ValidatorKind::ALL.into_iter().collect(),
        }
    }
}

impl ValidationOptions {
    /// Build options from validator names; unknown names are ignored.
    pub fn from_names<I, S>(strictness: Strictness, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            strictness,
            validators: names
                .into_iter()
                .filter_map(|name| name.as_ref().trim().parse().ok())
                .collect(),
        }
    }
}

/// Findings of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: ValidatorKind,
    pub passed: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl CategoryResult {
    pub fn new(category: ValidatorKind, issues: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            category,
            passed: issues.is_empty(),
            issues,
            suggestions,
        }
    }
}

/// Identity of the validated workflow as found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub workflow: WorkflowRef,
    pub passed: bool,
    pub total_issues: usize,
    pub strictness: Strictness,
    pub results: BTreeMap<ValidatorKind, CategoryResult>,
}
